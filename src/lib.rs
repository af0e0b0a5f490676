use log::{debug, info};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

pub mod controller;
pub mod debounce;
pub mod filters;
pub mod predicate;
pub mod render;
pub mod summary;
pub mod url_sync;

/// Default filter parameters
pub mod defaults {
    pub const MAX_DISTANCE: f64 = 600.0;
    pub const MIN_REVIEWS: f64 = 0.0;
    pub const ALL: &str = "all";
    /// Quiet interval before a debounced apply fires.
    pub const DEBOUNCE_MS: u32 = 300;
    /// Miles driven per estimated job.
    pub const MILES_PER_JOB: u64 = 100;
}

const SAMPLE_CSV: &str = include_str!("contractors.csv");

/// The contractor list shipped with the dashboard, parsed once.
pub static SAMPLE_CONTRACTORS: Lazy<Vec<Contractor>> = Lazy::new(|| {
    read_contractors_from_csv_string(SAMPLE_CSV).unwrap_or_else(|e| {
        log::warn!("Embedded contractor data is unusable: {}", e);
        Vec::new()
    })
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub miles: u32,
    pub status: String,
    pub tier: u8,
    pub service_type: String,
    pub reviews: u32,
    pub distance: u32,
}

impl Contractor {
    /// "City, ST" as shown in the location column.
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

#[derive(Debug)]
pub enum DataError {
    Csv(csv::Error),
    DuplicateId { id: u32, line: u64 },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Csv(e) => write!(f, "Failed to read contractor CSV: {}", e),
            DataError::DuplicateId { id, line } => {
                write!(f, "Duplicate contractor id {} on line {}", id, line)
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Csv(e) => Some(e),
            DataError::DuplicateId { .. } => None,
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Csv(e)
    }
}

/// Parse contractor records from CSV content with a header row.
///
/// Identifiers must be unique; a repeated id rejects the whole file since
/// records are looked up by id for the lifetime of the page.
pub fn read_contractors_from_csv_string(csv_content: &str) -> Result<Vec<Contractor>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let mut contractors = Vec::new();
    let mut seen_ids = HashSet::new();

    let headers = reader.headers()?.clone();
    for record in reader.records() {
        let record = record?;
        let contractor: Contractor = record.deserialize(Some(&headers))?;
        if !seen_ids.insert(contractor.id) {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(DataError::DuplicateId {
                id: contractor.id,
                line,
            });
        }
        debug!("Loaded contractor {} ({})", contractor.id, contractor.name);
        contractors.push(contractor);
    }

    info!("Successfully loaded {} contractors from CSV content", contractors.len());
    Ok(contractors)
}

/// Distinct state codes in first-seen order.
pub fn observed_states(contractors: &[Contractor]) -> Vec<String> {
    distinct(contractors.iter().map(|c| c.state.as_str()))
}

/// Distinct service types in first-seen order.
pub fn observed_service_types(contractors: &[Contractor]) -> Vec<String> {
    distinct(contractors.iter().map(|c| c.service_type.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Format an integer with comma thousands separators (en-US grouping).
pub fn format_with_grouping(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_has_eight_unique_records() {
        let contractors = &*SAMPLE_CONTRACTORS;
        assert_eq!(contractors.len(), 8);
        let ids: HashSet<u32> = contractors.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(contractors[0].name, "John's Trucking LLC");
        assert_eq!(contractors[0].service_type, "trucking");
        assert_eq!(contractors[7].distance, 250);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let csv = "id,name,city,state,miles,status,tier,serviceType,reviews,distance\n\
                   1,A,X,CA,10,Active,1,cargo,1,1\n\
                   1,B,Y,TX,20,Active,2,cargo,2,2\n";
        match read_contractors_from_csv_string(csv) {
            Err(DataError::DuplicateId { id, line }) => {
                assert_eq!(id, 1);
                // header is line 1, the repeat is the second record
                assert_eq!(line, 3);
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_id_line_ignores_trailing_records() {
        let csv = "id,name,city,state,miles,status,tier,serviceType,reviews,distance\n\
                   1,A,X,CA,10,Active,1,cargo,1,1\n\
                   2,B,Y,TX,20,Active,2,cargo,2,2\n\
                   2,C,Z,CO,30,Active,3,cargo,3,3\n\
                   4,D,W,GA,40,Active,1,cargo,4,4\n";
        match read_contractors_from_csv_string(csv) {
            Err(err @ DataError::DuplicateId { .. }) => {
                assert_eq!(err.to_string(), "Duplicate contractor id 2 on line 4");
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_numbers_surface_as_csv_errors() {
        let csv = "id,name,city,state,miles,status,tier,serviceType,reviews,distance\n\
                   1,A,X,CA,lots,Active,1,cargo,1,1\n";
        assert!(matches!(
            read_contractors_from_csv_string(csv),
            Err(DataError::Csv(_))
        ));
    }

    #[test]
    fn observed_values_keep_first_seen_order() {
        let contractors = &*SAMPLE_CONTRACTORS;
        assert_eq!(
            observed_states(contractors),
            vec!["CA", "TX", "FL", "NY", "IL", "GA", "CO"]
        );
        assert_eq!(
            observed_service_types(contractors),
            vec!["trucking", "delivery", "logistics", "transport", "cargo"]
        );
    }

    #[test]
    fn grouping_inserts_commas() {
        assert_eq!(format_with_grouping(0), "0");
        assert_eq!(format_with_grouping(999), "999");
        assert_eq!(format_with_grouping(1500), "1,500");
        assert_eq!(format_with_grouping(18500), "18,500");
        assert_eq!(format_with_grouping(1234567), "1,234,567");
    }

    #[test]
    fn location_joins_city_and_state() {
        assert_eq!(SAMPLE_CONTRACTORS[1].location(), "Houston, TX");
    }
}
