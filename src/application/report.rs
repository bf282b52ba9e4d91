use super::engine::AllocationOutcome;
use crate::domain::assignment::Assignment;
use serde::{Serialize, Serializer};

/// One row of the facility yield table.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct FacilityYieldRow {
    pub facility_id: u32,
    /// Already rounded to cents.
    #[serde(serialize_with = "shortest_form")]
    pub expected_yield: f64,
}

/// Writes the shortest decimal that round-trips, without exponent, so 34.5
/// stays `34.5` and 500 becomes `500`.
fn shortest_form<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

/// The two tables a run reports.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Report {
    /// Sorted by ascending facility id.
    pub yields: Vec<FacilityYieldRow>,
    /// In commit order.
    pub assignments: Vec<Assignment>,
}

/// Rounds to two decimals in binary floating point, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Report {
    pub fn assemble(outcome: &AllocationOutcome) -> Self {
        let mut yields: Vec<FacilityYieldRow> = outcome
            .yields
            .iter()
            .map(|(&facility_id, &total)| FacilityYieldRow {
                facility_id,
                expected_yield: round_to_cents(total),
            })
            .collect();
        yields.sort_by_key(|row| row.facility_id);

        Self {
            yields,
            assignments: outcome.assignments.clone(),
        }
    }
}
