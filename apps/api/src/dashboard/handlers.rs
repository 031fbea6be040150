//! Axum route handler for the role-dependent dashboard.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::{AuthUser, ROLE_EMPLOYER};
use crate::dashboard::stats::recommended_job_count;
use crate::errors::AppError;
use crate::models::job::JOB_STATUS_ACTIVE;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeekerDashboard {
    pub applied_count: i64,
    pub saved_count: i64,
    pub recommended_count: i64,
}

#[derive(Debug, Serialize)]
pub struct EmployerDashboard {
    pub active_jobs: i64,
    pub total_applicants: i64,
    pub total_views: i64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DashboardResponse {
    Seeker(SeekerDashboard),
    Employer(EmployerDashboard),
}

/// GET /api/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    if user.role == ROLE_EMPLOYER {
        let (active_jobs, total_applicants, total_views): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE status = $2),
                   COALESCE(SUM(applicants), 0),
                   COALESCE(SUM(views), 0)
            FROM jobs
            WHERE employer_id = $1
            "#,
        )
        .bind(user.id)
        .bind(JOB_STATUS_ACTIVE)
        .fetch_one(&state.db)
        .await?;

        return Ok(Json(DashboardResponse::Employer(EmployerDashboard {
            active_jobs,
            total_applicants,
            total_views,
        })));
    }

    let applied_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&state.db)
            .await?;

    let saved_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saved_jobs WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&state.db)
        .await?;

    let skills: Vec<String> = sqlx::query_scalar("SELECT skills FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(DashboardResponse::Seeker(SeekerDashboard {
        applied_count,
        saved_count,
        recommended_count: recommended_job_count(skills.len()),
    })))
}
