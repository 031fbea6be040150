use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Initial status of every application. Later transitions (interviewing,
/// accepted, rejected) are free-form writes by the employer.
pub const APPLICATION_STATUS_APPLIED: &str = "applied";

/// One application per (user, job) pair, enforced by a unique constraint.
/// Title/company/location/job_data are denormalized at apply time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub job_data: Value,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}
