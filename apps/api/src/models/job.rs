use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const JOB_STATUS_ACTIVE: &str = "active";
pub const JOB_STATUS_DELETED: &str = "deleted";

/// A job listing. Soft-deleted rows keep their data with `status = 'deleted'`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience: String,
    pub industry: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub benefits: Vec<String>,
    pub status: String,
    pub posted_date: DateTime<Utc>,
    pub applicants: i32,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// JSONB snapshot stored on applications and saved jobs, so those rows
    /// survive later edits to the listing.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_carries_listing_fields() {
        let job = Job {
            id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Lahore".to_string(),
            job_type: "Remote".to_string(),
            experience: "Mid".to_string(),
            industry: Some("Software".to_string()),
            salary_min: Some(90_000),
            salary_max: Some(120_000),
            description: "Build APIs".to_string(),
            requirements: vec!["3y experience".to_string()],
            skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            benefits: vec!["Remote".to_string()],
            status: JOB_STATUS_ACTIVE.to_string(),
            posted_date: Utc::now(),
            applicants: 0,
            views: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let snapshot = job.snapshot();
        assert_eq!(snapshot["title"], "Backend Engineer");
        assert_eq!(snapshot["company"], "Acme");
        assert_eq!(snapshot["skills"][0], "Rust");
    }
}
