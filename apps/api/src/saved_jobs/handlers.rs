//! Axum route handlers for bookmarked jobs.
//!
//! Save is insert-if-absent, unsave is delete-if-present, both keyed by
//! (user, job). Concurrent saves race at the database unique constraint and
//! the loser surfaces as 409.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::handlers::fetch_active_job;
use crate::models::saved_job::SavedJob;
use crate::state::AppState;

/// POST /api/jobs/:id/save
pub async fn save_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SavedJob>), AppError> {
    let job = fetch_active_job(&state.db, id).await?;

    let saved: SavedJob = sqlx::query_as(
        "INSERT INTO saved_jobs (id, user_id, job_id, job_data) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(job.id)
    .bind(job.snapshot())
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::on_conflict(e, "Job already saved"))?;

    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /api/jobs/:id/save
pub async fn unsave_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
        .bind(user.id)
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Saved job not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/jobs/saved
pub async fn list_saved(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SavedJob>>, AppError> {
    let saved: Vec<SavedJob> =
        sqlx::query_as("SELECT * FROM saved_jobs WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(saved))
}
