//! Axum route handlers for accounts and profiles: register, login, profile
//! reads/updates, and the multipart resume / profile-picture uploads.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthUser, ROLE_EMPLOYER, ROLE_JOBSEEKER};
use crate::errors::AppError;
use crate::models::user::{User, UserResponse};
use crate::state::AppState;
use crate::storage::upload_object;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// All fields optional; missing fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub resume_url: String,
    /// Keyword-scan hits from the PDF text, deduplicated.
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AvatarUploadResponse {
    pub profile_picture_url: String,
}

fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    let email = req.email.trim();
    if email.len() < 3 || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::Validation("email is not valid".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if req.role != ROLE_JOBSEEKER && req.role != ROLE_EMPLOYER {
        return Err(AppError::Validation(format!(
            "role must be '{ROLE_JOBSEEKER}' or '{ROLE_EMPLOYER}'"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_registration(&req)?;

    let password_hash = hash_password(&req.password)?;
    let user: User = sqlx::query_as(
        "INSERT INTO users (id, email, password_hash, name, role) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(req.email.trim().to_lowercase())
    .bind(password_hash)
    .bind(req.name.trim())
    .bind(&req.role)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::on_conflict(e, "An account with this email already exists"))?;

    let token = state.jwt.issue(user.id, &user.email, &user.role)?;
    tracing::info!("Registered {} account {}", user.role, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// POST /api/users/login
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(req.email.trim().to_lowercase())
        .fetch_optional(&state.db)
        .await?;

    let user = user.ok_or(AppError::Unauthorized)?;
    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = state.jwt.issue(user.id, &user.email, &user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = fetch_user(&state, auth.id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
    }

    let user: User = sqlx::query_as(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            title = COALESCE($3, title),
            location = COALESCE($4, location),
            phone = COALESCE($5, phone),
            bio = COALESCE($6, bio),
            skills = COALESCE($7, skills),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(auth.id)
    .bind(&req.name)
    .bind(&req.title)
    .bind(&req.location)
    .bind(&req.phone)
    .bind(&req.bio)
    .bind(&req.skills)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(user.into()))
}

/// POST /api/users/me/resume
///
/// Multipart upload (field `resume`, PDF only). Extracts text, runs the
/// keyword skill scan, stores the file, and persists the resume URL.
pub async fn upload_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let file = read_upload_field(multipart, "resume", state.config.max_upload_bytes).await?;
    if file.content_type.as_deref() != Some("application/pdf") {
        return Err(AppError::Validation("resume must be a PDF".to_string()));
    }

    let skills = state.skill_extractor.extract(file.data.to_vec()).await?;

    let key = format!("resumes/{}/{}.pdf", auth.id, Uuid::new_v4());
    let resume_url = upload_object(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.s3_endpoint,
        &key,
        file.data,
        "application/pdf",
    )
    .await?;

    sqlx::query("UPDATE users SET resume_url = $2, updated_at = NOW() WHERE id = $1")
        .bind(auth.id)
        .bind(&resume_url)
        .execute(&state.db)
        .await?;

    Ok(Json(ResumeUploadResponse { resume_url, skills }))
}

/// POST /api/users/me/avatar
///
/// Multipart upload (field `avatar`, any image type).
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<AvatarUploadResponse>, AppError> {
    let file = read_upload_field(multipart, "avatar", state.config.max_upload_bytes).await?;
    let content_type = file
        .content_type
        .as_deref()
        .filter(|ct| ct.starts_with("image/"))
        .ok_or_else(|| AppError::Validation("avatar must be an image".to_string()))?
        .to_string();

    let key = format!(
        "avatars/{}/{}.{}",
        auth.id,
        Uuid::new_v4(),
        image_extension(&content_type)
    );
    let profile_picture_url = upload_object(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.s3_endpoint,
        &key,
        file.data,
        &content_type,
    )
    .await?;

    sqlx::query("UPDATE users SET profile_picture_url = $2, updated_at = NOW() WHERE id = $1")
        .bind(auth.id)
        .bind(&profile_picture_url)
        .execute(&state.db)
        .await?;

    Ok(Json(AvatarUploadResponse {
        profile_picture_url,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

struct UploadedFile {
    data: Bytes,
    content_type: Option<String>,
}

/// Reads the named field from a multipart body, enforcing the size cap.
async fn read_upload_field(
    mut multipart: Multipart,
    field_name: &str,
    max_bytes: usize,
) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("could not read upload: {e}")))?;

        if data.is_empty() {
            return Err(AppError::Validation(format!(
                "{field_name} upload is empty"
            )));
        }
        if data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "{field_name} exceeds the {max_bytes}-byte limit"
            )));
        }

        return Ok(UploadedFile { data, content_type });
    }

    Err(AppError::Validation(format!(
        "missing multipart field '{field_name}'"
    )))
}

fn image_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "img",
    }
}

async fn fetch_user(state: &AppState, id: Uuid) -> Result<User, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    user.ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            email: "dev@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            name: "Dev".to_string(),
            role: ROLE_JOBSEEKER.to_string(),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(validate_registration(&valid_request()).is_ok());
    }

    #[test]
    fn test_email_without_at_rejected() {
        let mut req = valid_request();
        req.email = "not-an-email".to_string();
        assert!(matches!(
            validate_registration(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_short_password_rejected() {
        let mut req = valid_request();
        req.password = "short".to_string();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let mut req = valid_request();
        req.role = "superuser".to_string();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn test_employer_role_accepted() {
        let mut req = valid_request();
        req.role = ROLE_EMPLOYER.to_string();
        assert!(validate_registration(&req).is_ok());
    }

    #[test]
    fn test_image_extension_mapping() {
        assert_eq!(image_extension("image/png"), "png");
        assert_eq!(image_extension("image/jpeg"), "jpg");
        assert_eq!(image_extension("image/x-unknown"), "img");
    }
}
