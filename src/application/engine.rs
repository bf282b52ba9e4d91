use crate::domain::assignment::Assignment;
use crate::domain::covenant::CovenantIndex;
use crate::domain::expected_yield::expected_yield;
use crate::domain::facility::Facility;
use crate::domain::loan::Loan;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Greedy loan-to-facility allocator.
///
/// Loans are considered one at a time in input order. Each one goes to the
/// eligible facility with the highest expected yield, and that facility's
/// capacity shrinks by the loan amount. Nothing is ever reconsidered.
///
/// Two quirks of the selection policy are kept on purpose:
///
/// * Ties go to the **last** facility in scan order reaching the best yield.
/// * The running best starts at `0.0` and a loan is only granted when the
///   best yield differs from zero, so break-even and money-losing loans are
///   dropped even if some facility could fund them.
pub struct AllocationEngine {
    facilities: Vec<Facility>,
    covenants: CovenantIndex,
    assignments: Vec<Assignment>,
    yields: HashMap<u32, f64>,
    loans_considered: usize,
}

/// Everything a run produced, including the facilities' final capacities.
#[derive(Debug, Clone, Default)]
pub struct AllocationOutcome {
    /// Assignments in commit order, which is loan input order.
    pub assignments: Vec<Assignment>,
    /// Accumulated expected yield per facility id. Only funded facilities
    /// appear.
    pub yields: HashMap<u32, f64>,
    pub facilities: Vec<Facility>,
    pub loans_considered: usize,
}

/// Headline numbers of a run.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AllocationSummary {
    pub loans_considered: usize,
    pub loans_assigned: usize,
    pub loans_dropped: usize,
    pub facilities_funded: usize,
    pub total_expected_yield: f64,
}

impl AllocationEngine {
    /// Creates an engine owning `facilities`. Scan order for every loan is
    /// the order of this vector.
    pub fn new(facilities: Vec<Facility>, covenants: CovenantIndex) -> Self {
        Self {
            facilities,
            covenants,
            assignments: Vec::new(),
            yields: HashMap::new(),
            loans_considered: 0,
        }
    }

    /// Capacity, state and default-likelihood checks against the facility's
    /// current remaining amount.
    pub fn is_eligible(&self, facility: &Facility, loan: &Loan) -> bool {
        facility.can_fund(loan.amount) && self.covenants.get(facility.id).permits(loan)
    }

    /// Allocates a single loan, committing the assignment if one is found.
    pub fn allocate(&mut self, loan: &Loan) -> Option<Assignment> {
        self.loans_considered += 1;

        let mut best_yield = 0.0_f64;
        let mut elected: Option<(usize, f64)> = None;
        for (index, facility) in self.facilities.iter().enumerate() {
            if !self.is_eligible(facility, loan) {
                continue;
            }
            let current = expected_yield(loan, facility);
            best_yield = best_yield.max(current);
            if best_yield == current {
                elected = Some((index, current));
            }
        }

        let Some((index, winning_yield)) = elected else {
            trace!(loan_id = loan.id, "no eligible facility, loan dropped");
            return None;
        };
        if best_yield == 0.0 {
            trace!(loan_id = loan.id, "best expected yield is zero, loan dropped");
            return None;
        }

        let facility = &mut self.facilities[index];
        facility.amount -= loan.amount;
        let assignment = Assignment {
            loan_id: loan.id,
            facility_id: facility.id,
        };
        self.assignments.push(assignment);
        self.yields
            .entry(facility.id)
            .and_modify(|total| *total += winning_yield)
            .or_insert(winning_yield);

        debug!(
            loan_id = loan.id,
            facility_id = facility.id,
            expected_yield = winning_yield,
            remaining = facility.amount,
            "loan assigned"
        );
        Some(assignment)
    }

    /// Allocates every loan in order and hands back the outcome.
    pub fn run(mut self, loans: &[Loan]) -> AllocationOutcome {
        for loan in loans {
            self.allocate(loan);
        }
        self.into_outcome()
    }

    /// Facilities with their current remaining capacity.
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn into_outcome(self) -> AllocationOutcome {
        AllocationOutcome {
            assignments: self.assignments,
            yields: self.yields,
            facilities: self.facilities,
            loans_considered: self.loans_considered,
        }
    }
}

impl AllocationOutcome {
    pub fn summary(&self) -> AllocationSummary {
        let loans_assigned = self.assignments.len();
        AllocationSummary {
            loans_considered: self.loans_considered,
            loans_assigned,
            loans_dropped: self.loans_considered.saturating_sub(loans_assigned),
            facilities_funded: self.yields.len(),
            total_expected_yield: self.yields.values().sum(),
        }
    }
}

impl AllocationSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
