//! Resume skill extraction.
//!
//! Default: `KeywordSkillExtractor` (pure-Rust, fast, deterministic): extract
//! raw text from the uploaded PDF and run a fixed-vocabulary substring scan.
//!
//! `AppState` holds an `Arc<dyn SkillExtractor>`, so a smarter backend can be
//! swapped in without touching the upload handler.

pub mod skills;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::resume::skills::scan_skills;

/// The skill extractor trait. Implement this to swap backends without touching
/// the endpoint or handler code.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    /// Returns the skills found in the resume, deduplicated.
    async fn extract(&self, pdf_bytes: Vec<u8>) -> Result<Vec<String>, AppError>;
}

/// PDF text extraction via `pdf-extract`, then the keyword scan.
pub struct KeywordSkillExtractor;

#[async_trait]
impl SkillExtractor for KeywordSkillExtractor {
    async fn extract(&self, pdf_bytes: Vec<u8>) -> Result<Vec<String>, AppError> {
        // pdf-extract is synchronous CPU work; keep it off the async workers.
        let text =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf_bytes))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))?
                .map_err(|e| {
                    AppError::UnprocessableEntity(format!("Could not read PDF text: {e}"))
                })?;

        Ok(scan_skills(&text))
    }
}
