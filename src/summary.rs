//! Summary statistics over a filtered contractor list.

use crate::defaults::MILES_PER_JOB;
use crate::{format_with_grouping, Contractor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total_miles: u64,
    /// One job per `MILES_PER_JOB` miles driven, truncated.
    pub jobs_count: u64,
}

impl Summary {
    pub fn from_contractors(contractors: &[&Contractor]) -> Self {
        let total_miles: u64 = contractors.iter().map(|c| u64::from(c.miles)).sum();
        Self {
            count: contractors.len(),
            total_miles,
            jobs_count: total_miles / MILES_PER_JOB,
        }
    }

    /// Text for the miles slot, grouped like the table cells.
    pub fn miles_display(&self) -> String {
        format_with_grouping(self.total_miles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_CONTRACTORS;

    #[test]
    fn empty_list_is_all_zeros() {
        assert_eq!(Summary::from_contractors(&[]), Summary::default());
        assert_eq!(Summary::default().miles_display(), "0");
    }

    #[test]
    fn full_sample_totals() {
        let all: Vec<&Contractor> = SAMPLE_CONTRACTORS.iter().collect();
        let summary = Summary::from_contractors(&all);
        assert_eq!(summary.count, 8);
        assert_eq!(summary.total_miles, 18_500);
        assert_eq!(summary.jobs_count, 185);
        assert_eq!(summary.miles_display(), "18,500");
    }

    #[test]
    fn jobs_are_truncated() {
        // 1950 miles is 19.5 jobs
        let one = [&SAMPLE_CONTRACTORS[6]];
        let summary = Summary::from_contractors(&one);
        assert_eq!(summary.total_miles, 1950);
        assert_eq!(summary.jobs_count, 19);
        assert_eq!(summary.jobs_count, summary.total_miles / 100);
    }
}
