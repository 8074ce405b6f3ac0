//! Team capacity per week

/// Default points a single developer absorbs per week
pub const DEFAULT_AVERAGE_STORY_POINTS: u32 = 10;

/// Weekly point capacity of the whole team.
///
/// Zero developers yields zero capacity, which makes the plan empty.
pub fn compute_capacity(developer_count: u64, average_points: u32) -> i64 {
    let developers = i64::try_from(developer_count).unwrap_or(i64::MAX);
    developers.saturating_mul(i64::from(average_points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_scales_with_headcount() {
        assert_eq!(compute_capacity(2, 10), 20);
        assert_eq!(compute_capacity(3, DEFAULT_AVERAGE_STORY_POINTS), 30);
        assert_eq!(compute_capacity(1, 7), 7);
    }

    #[test]
    fn test_no_developers_means_no_capacity() {
        assert_eq!(compute_capacity(0, 10), 0);
    }

    #[test]
    fn test_capacity_saturates() {
        assert_eq!(compute_capacity(u64::MAX, 10), i64::MAX);
    }
}
