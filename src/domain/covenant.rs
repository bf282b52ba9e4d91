use super::ensure_finite;
use super::loan::Loan;
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A risk constraint attached to a facility.
///
/// An empty `max_default_likelihood` cell reads as `0.0`. An empty
/// `banned_state` cell bans the empty state.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Covenant {
    pub facility_id: u32,
    #[serde(deserialize_with = "empty_as_zero")]
    pub max_default_likelihood: f64,
    pub bank_id: u32,
    pub banned_state: String,
}

fn empty_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Covenant {
    pub fn new(
        facility_id: u32,
        bank_id: u32,
        max_default_likelihood: f64,
        banned_state: &str,
    ) -> Self {
        Self {
            facility_id,
            max_default_likelihood,
            bank_id,
            banned_state: banned_state.to_owned(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("covenant max_default_likelihood", self.max_default_likelihood)
    }
}

/// The effective constraints on one facility, folded from all its covenants.
#[derive(Debug, PartialEq, Clone)]
pub struct CovenantSet {
    pub banned_states: BTreeSet<String>,
    /// Most permissive bound seen across the facility's covenants.
    pub max_default_likelihood: f64,
}

/// Constraints for facilities without any covenant: nothing banned, but no
/// default risk tolerated either.
static RESTRICTIVE: CovenantSet = CovenantSet {
    banned_states: BTreeSet::new(),
    max_default_likelihood: 0.0,
};

impl CovenantSet {
    /// Whether the loan's state and default risk are acceptable.
    pub fn permits(&self, loan: &Loan) -> bool {
        !self.banned_states.contains(&loan.state)
            && self.max_default_likelihood >= loan.default_likelihood
    }
}

/// Aggregated covenants keyed by facility id.
#[derive(Debug, Default, Clone)]
pub struct CovenantIndex {
    sets: HashMap<u32, CovenantSet>,
}

impl CovenantIndex {
    pub fn aggregate(covenants: &[Covenant]) -> Self {
        let mut sets: HashMap<u32, CovenantSet> = HashMap::new();
        for covenant in covenants {
            let set = sets
                .entry(covenant.facility_id)
                .or_insert_with(|| CovenantSet {
                    banned_states: BTreeSet::new(),
                    max_default_likelihood: covenant.max_default_likelihood,
                });
            set.max_default_likelihood = set
                .max_default_likelihood
                .max(covenant.max_default_likelihood);
            set.banned_states.insert(covenant.banned_state.clone());
        }
        Self { sets }
    }

    /// Constraints for `facility_id`, restrictive when it has no covenants.
    pub fn get(&self, facility_id: u32) -> &CovenantSet {
        self.sets.get(&facility_id).unwrap_or(&RESTRICTIVE)
    }
}
