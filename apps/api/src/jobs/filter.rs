//! Job listing filters.
//!
//! All filters are conjunctive. Location/type/experience/industry are
//! case-insensitive substring matches; `search` is a free-text OR over
//! title, company, and description. No ranking, no relevance scoring.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters accepted by `GET /api/jobs`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct JobFilter {
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub industry: Option<String>,
    pub search: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl JobFilter {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Appends the filter's AND clauses to a query that already constrains status.
/// Pagination is the caller's concern so the same clauses serve the COUNT
/// query and the page query.
pub fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    push_ilike(qb, "location", &filter.location);
    push_ilike(qb, "job_type", &filter.job_type);
    push_ilike(qb, "experience", &filter.experience);
    push_ilike(qb, "industry", &filter.industry);

    if let Some(search) = non_empty(&filter.search) {
        let pattern = like_pattern(search);
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR company ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

fn push_ilike(qb: &mut QueryBuilder<'_, Postgres>, column: &str, value: &Option<String>) {
    if let Some(term) = non_empty(value) {
        qb.push(format!(" AND {column} ILIKE "));
        qb.push_bind(like_pattern(term));
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `%term%` with LIKE metacharacters escaped, so user input stays a plain
/// substring match.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_sql(filter: &JobFilter) -> String {
        let mut qb = QueryBuilder::new("SELECT * FROM jobs WHERE status = 'active'");
        push_filters(&mut qb, filter);
        qb.sql().to_string()
    }

    #[test]
    fn test_no_filters_add_no_clauses() {
        let sql = build_sql(&JobFilter::default());
        assert_eq!(sql, "SELECT * FROM jobs WHERE status = 'active'");
    }

    #[test]
    fn test_location_and_type_are_conjunctive() {
        let filter = JobFilter {
            location: Some("Lahore".to_string()),
            job_type: Some("Remote".to_string()),
            ..Default::default()
        };
        let sql = build_sql(&filter);
        assert!(sql.contains("AND location ILIKE $1"));
        assert!(sql.contains("AND job_type ILIKE $2"));
    }

    #[test]
    fn test_search_ors_over_title_company_description() {
        let filter = JobFilter {
            search: Some("engineer".to_string()),
            ..Default::default()
        };
        let sql = build_sql(&filter);
        assert!(sql.contains("(title ILIKE $1 OR company ILIKE $2 OR description ILIKE $3)"));
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let filter = JobFilter {
            location: Some("   ".to_string()),
            search: Some(String::new()),
            ..Default::default()
        };
        let sql = build_sql(&filter);
        assert_eq!(sql, "SELECT * FROM jobs WHERE status = 'active'");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_limit_defaults_and_clamps() {
        assert_eq!(JobFilter::default().limit(), DEFAULT_PAGE_SIZE);

        let too_big = JobFilter {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(too_big.limit(), MAX_PAGE_SIZE);

        let zero = JobFilter {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.limit(), 1);
    }

    #[test]
    fn test_negative_offset_clamps_to_zero() {
        let filter = JobFilter {
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(filter.offset(), 0);
    }
}
