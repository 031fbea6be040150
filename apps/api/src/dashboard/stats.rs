//! Dashboard counters.

/// "Recommended jobs" shown to a seeker is a fixed multiplier on the number
/// of skills on their profile.
pub const RECOMMENDATION_MULTIPLIER: i64 = 3;

pub fn recommended_job_count(skill_count: usize) -> i64 {
    skill_count as i64 * RECOMMENDATION_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_scales_with_skills() {
        assert_eq!(recommended_job_count(0), 0);
        assert_eq!(recommended_job_count(1), RECOMMENDATION_MULTIPLIER);
        assert_eq!(recommended_job_count(5), 5 * RECOMMENDATION_MULTIPLIER);
    }
}
