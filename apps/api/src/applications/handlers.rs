//! Axum route handlers for job applications.
//!
//! One application per (user, job), enforced by the database unique
//! constraint; duplicates surface as 409. Status transitions
//! (applied, interviewing, accepted/rejected by convention) are free-form
//! string writes with no enforced state machine.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::handlers::fetch_active_job;
use crate::models::application::{Application, APPLICATION_STATUS_APPLIED};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// POST /api/applications
pub async fn apply(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let job = fetch_active_job(&state.db, req.job_id).await?;

    let application: Application = sqlx::query_as(
        r#"
        INSERT INTO applications
            (id, user_id, job_id, job_title, company, location, job_data, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(job.id)
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.location)
    .bind(job.snapshot())
    .bind(APPLICATION_STATUS_APPLIED)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::on_conflict(e, "You have already applied to this job"))?;

    sqlx::query("UPDATE jobs SET applicants = applicants + 1 WHERE id = $1")
        .bind(job.id)
        .execute(&state.db)
        .await?;

    tracing::info!("User {} applied to job {}", user.id, job.id);
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications: Vec<Application> =
        sqlx::query_as("SELECT * FROM applications WHERE user_id = $1 ORDER BY applied_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(applications))
}

/// GET /api/applications/:id
///
/// Visible to the applicant and to the employer who owns the job; everyone
/// else reads 404.
pub async fn get_application(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = fetch_application(&state.db, id).await?;

    if application.user_id != user.id {
        let employer_id: Option<Uuid> =
            sqlx::query_scalar("SELECT employer_id FROM jobs WHERE id = $1")
                .bind(application.job_id)
                .fetch_optional(&state.db)
                .await?;
        if employer_id != Some(user.id) {
            return Err(AppError::NotFound(format!("Application {id} not found")));
        }
    }

    Ok(Json(application))
}

/// PATCH /api/applications/:id/status
///
/// Employer-side status write for an application to one of their listings.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Application>, AppError> {
    user.require_employer()?;
    if req.status.trim().is_empty() {
        return Err(AppError::Validation("status cannot be empty".to_string()));
    }

    let application = fetch_application(&state.db, id).await?;
    let employer_id: Option<Uuid> = sqlx::query_scalar("SELECT employer_id FROM jobs WHERE id = $1")
        .bind(application.job_id)
        .fetch_optional(&state.db)
        .await?;
    if employer_id != Some(user.id) {
        return Err(AppError::Forbidden);
    }

    let updated: Application =
        sqlx::query_as("UPDATE applications SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(req.status.trim())
            .fetch_one(&state.db)
            .await?;

    Ok(Json(updated))
}

/// DELETE /api/applications/:id
///
/// The applicant withdraws their own application.
pub async fn withdraw(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_application(db: &sqlx::PgPool, id: Uuid) -> Result<Application, AppError> {
    let application: Option<Application> =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;

    application.ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}
