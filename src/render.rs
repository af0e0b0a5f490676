//! Display data for the contractor table and the summary slots.
//!
//! Everything here is computed from data only; the Yew components in the
//! binary turn it into markup.

use crate::summary::Summary;
use crate::{format_with_grouping, Contractor};

pub const TABLE_HEADERS: [&str; 4] = ["Company", "Location", "Miles", "Status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: u32,
    pub cells: [String; 4],
}

impl TableRow {
    pub fn from_contractor(contractor: &Contractor) -> Self {
        Self {
            id: contractor.id,
            cells: [
                contractor.name.clone(),
                contractor.location(),
                format_with_grouping(u64::from(contractor.miles)),
                contractor.status.clone(),
            ],
        }
    }
}

/// Text written into the `active-count`, `jobs-count` and `miles-count` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySlots {
    pub active_count: String,
    pub jobs_count: String,
    pub miles_count: String,
}

impl From<&Summary> for SummarySlots {
    fn from(summary: &Summary) -> Self {
        Self {
            active_count: summary.count.to_string(),
            jobs_count: summary.jobs_count.to_string(),
            miles_count: summary.miles_display(),
        }
    }
}

/// Complete output of one apply cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub rows: Vec<TableRow>,
    pub slots: SummarySlots,
}

impl DashboardView {
    pub fn build(filtered: &[&Contractor]) -> Self {
        Self {
            rows: filtered.iter().map(|c| TableRow::from_contractor(c)).collect(),
            slots: SummarySlots::from(&Summary::from_contractors(filtered)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_CONTRACTORS;

    #[test]
    fn row_cells_follow_header_order() {
        let row = TableRow::from_contractor(&SAMPLE_CONTRACTORS[0]);
        assert_eq!(row.id, 1);
        assert_eq!(
            row.cells,
            [
                "John's Trucking LLC".to_string(),
                "Los Angeles, CA".to_string(),
                "1,500".to_string(),
                "Active".to_string(),
            ]
        );
    }

    #[test]
    fn empty_view_shows_zeros() {
        let view = DashboardView::build(&[]);
        assert!(view.rows.is_empty());
        assert_eq!(
            view.slots,
            SummarySlots {
                active_count: "0".into(),
                jobs_count: "0".into(),
                miles_count: "0".into(),
            }
        );
    }

    #[test]
    fn view_matches_summary() {
        let filtered = [&SAMPLE_CONTRACTORS[2], &SAMPLE_CONTRACTORS[3]];
        let view = DashboardView::build(&filtered);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.slots.active_count, "2");
        assert_eq!(view.slots.miles_count, "6,300");
        assert_eq!(view.slots.jobs_count, "63");
    }
}
