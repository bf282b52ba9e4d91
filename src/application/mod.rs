//! Application layer: the allocation engine and the assembly of its outcome
//! into reportable tables.
//!
//! The engine is a single-pass greedy allocator. It owns the facilities for
//! the duration of a run and mutates their capacity by index as loans are
//! granted.

pub mod engine;
pub mod report;

use crate::domain::covenant::{Covenant, CovenantIndex};
use crate::domain::facility::Facility;
use crate::domain::loan::Loan;
use engine::{AllocationEngine, AllocationOutcome};

/// Aggregates the covenants and runs the engine over every loan.
pub fn allocate(
    facilities: Vec<Facility>,
    covenants: &[Covenant],
    loans: &[Loan],
) -> AllocationOutcome {
    let index = CovenantIndex::aggregate(covenants);
    AllocationEngine::new(facilities, index).run(loans)
}
