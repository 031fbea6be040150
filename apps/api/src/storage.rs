//! Uploaded-file storage on S3 / MinIO.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Uploads an object and returns its public URL.
pub async fn upload_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    key: &str,
    body: Bytes,
    content_type: &str,
) -> Result<String, AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Upload failed: {e}")))?;

    info!("Uploaded s3://{bucket}/{key}");
    Ok(object_url(endpoint, bucket, key))
}

/// Path-style URL for a stored object (MinIO-compatible).
pub fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_joins_parts() {
        assert_eq!(
            object_url("http://localhost:9000", "uploads", "resumes/u/r.pdf"),
            "http://localhost:9000/uploads/resumes/u/r.pdf"
        );
    }

    #[test]
    fn test_object_url_trims_trailing_slash() {
        assert_eq!(
            object_url("http://localhost:9000/", "uploads", "a.png"),
            "http://localhost:9000/uploads/a.png"
        );
    }
}
