//! Axum route handlers for job listings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::filter::{push_filters, JobFilter};
use crate::models::job::{Job, JOB_STATUS_ACTIVE, JOB_STATUS_DELETED};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience: String,
    pub industry: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl CreateJobRequest {
    fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("job_type", &self.job_type),
            ("experience", &self.experience),
            ("description", &self.description),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(AppError::Validation(
                    "salary_min cannot exceed salary_max".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// All fields optional; missing fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub industry: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
}

/// Applicant summary returned to the employer who owns the listing.
#[derive(Debug, Serialize, FromRow)]
pub struct ApplicantRow {
    pub application_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub title: Option<String>,
    pub resume_url: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Query helpers
// ────────────────────────────────────────────────────────────────────────────

/// Fetches a live listing. Missing and soft-deleted jobs both read as 404.
pub async fn fetch_active_job(db: &PgPool, id: Uuid) -> Result<Job, AppError> {
    let job: Option<Job> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1 AND status = $2")
        .bind(id)
        .bind(JOB_STATUS_ACTIVE)
        .fetch_optional(db)
        .await?;

    job.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// Fetches a listing regardless of status and checks the caller owns it.
async fn fetch_owned_job(db: &PgPool, id: Uuid, employer_id: Uuid) -> Result<Job, AppError> {
    let job: Option<Job> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;

    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    if job.employer_id != employer_id {
        return Err(AppError::Forbidden);
    }
    Ok(job)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/jobs
///
/// Public listing of active jobs, newest first, with pagination metadata.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<JobListResponse>, AppError> {
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM jobs WHERE status = ");
    count_qb.push_bind(JOB_STATUS_ACTIVE);
    push_filters(&mut count_qb, &filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(&state.db).await?;

    let mut qb = QueryBuilder::new("SELECT * FROM jobs WHERE status = ");
    qb.push_bind(JOB_STATUS_ACTIVE);
    push_filters(&mut qb, &filter);
    qb.push(" ORDER BY posted_date DESC LIMIT ");
    qb.push_bind(filter.limit());
    qb.push(" OFFSET ");
    qb.push_bind(filter.offset());
    let jobs: Vec<Job> = qb.build_query_as().fetch_all(&state.db).await?;

    Ok(Json(JobListResponse {
        jobs,
        total,
        offset: filter.offset(),
        limit: filter.limit(),
    }))
}

/// GET /api/jobs/:id
///
/// Public detail view; bumps the view counter.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = fetch_active_job(&state.db, id).await?;

    sqlx::query("UPDATE jobs SET views = views + 1 WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(job))
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    user.require_employer()?;
    req.validate()?;

    let job: Job = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (id, employer_id, title, company, location, job_type, experience,
             industry, salary_min, salary_max, description, requirements, skills,
             benefits, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(req.title.trim())
    .bind(req.company.trim())
    .bind(req.location.trim())
    .bind(req.job_type.trim())
    .bind(req.experience.trim())
    .bind(&req.industry)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .bind(req.description.trim())
    .bind(&req.requirements)
    .bind(&req.skills)
    .bind(&req.benefits)
    .bind(JOB_STATUS_ACTIVE)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Employer {} posted job {}", user.id, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<Job>, AppError> {
    user.require_employer()?;
    fetch_owned_job(&state.db, id, user.id).await?;

    let job: Job = sqlx::query_as(
        r#"
        UPDATE jobs SET
            title = COALESCE($2, title),
            company = COALESCE($3, company),
            location = COALESCE($4, location),
            job_type = COALESCE($5, job_type),
            experience = COALESCE($6, experience),
            industry = COALESCE($7, industry),
            salary_min = COALESCE($8, salary_min),
            salary_max = COALESCE($9, salary_max),
            description = COALESCE($10, description),
            requirements = COALESCE($11, requirements),
            skills = COALESCE($12, skills),
            benefits = COALESCE($13, benefits),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.company)
    .bind(&req.location)
    .bind(&req.job_type)
    .bind(&req.experience)
    .bind(&req.industry)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .bind(&req.description)
    .bind(&req.requirements)
    .bind(&req.skills)
    .bind(&req.benefits)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(job))
}

/// DELETE /api/jobs/:id
///
/// Soft delete: the row stays, with `status = 'deleted'`, so applications
/// keep their snapshots and the employer keeps history.
pub async fn delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_employer()?;
    let job = fetch_owned_job(&state.db, id, user.id).await?;
    if job.status == JOB_STATUS_DELETED {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }

    sqlx::query("UPDATE jobs SET status = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(JOB_STATUS_DELETED)
        .execute(&state.db)
        .await?;

    tracing::info!("Employer {} removed job {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/jobs/mine
///
/// The employer's own listings, any status.
pub async fn my_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Job>>, AppError> {
    user.require_employer()?;

    let jobs: Vec<Job> =
        sqlx::query_as("SELECT * FROM jobs WHERE employer_id = $1 ORDER BY posted_date DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(jobs))
}

/// GET /api/jobs/:id/applications
///
/// Applicants for a listing, visible only to its owner.
pub async fn job_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ApplicantRow>>, AppError> {
    user.require_employer()?;
    fetch_owned_job(&state.db, id, user.id).await?;

    let applicants: Vec<ApplicantRow> = sqlx::query_as(
        r#"
        SELECT a.id AS application_id, a.status, a.applied_at,
               u.id AS user_id, u.name, u.email, u.title, u.resume_url
        FROM applications a
        JOIN users u ON u.id = a.user_id
        WHERE a.job_id = $1
        ORDER BY a.applied_at DESC
        "#,
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(applicants))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateJobRequest {
        CreateJobRequest {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Lahore".to_string(),
            job_type: "Remote".to_string(),
            experience: "Mid".to_string(),
            industry: None,
            salary_min: Some(50_000),
            salary_max: Some(90_000),
            description: "Build APIs".to_string(),
            requirements: vec![],
            skills: vec![],
            benefits: vec![],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut req = valid_request();
        req.title = "  ".to_string();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_inverted_salary_range_rejected() {
        let mut req = valid_request();
        req.salary_min = Some(100_000);
        req.salary_max = Some(50_000);
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_open_salary_range_allowed() {
        let mut req = valid_request();
        req.salary_min = Some(50_000);
        req.salary_max = None;
        assert!(req.validate().is_ok());
    }
}
