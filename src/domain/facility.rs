use super::ensure_finite;
use crate::error::{AllocationError, Result};
use serde::{Deserialize, Serialize};

/// A pool of lendable capital.
///
/// `amount` is the remaining capacity. It only ever shrinks, and only by the
/// allocation engine, as loans are granted from the facility.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Facility {
    pub amount: f64,
    pub interest_rate: f64,
    pub id: u32,
    pub bank_id: u32,
}

impl Facility {
    pub fn new(id: u32, bank_id: u32, amount: f64, interest_rate: f64) -> Self {
        Self {
            amount,
            interest_rate,
            id,
            bank_id,
        }
    }

    /// Whether the remaining capacity covers `amount`.
    pub fn can_fund(&self, amount: f64) -> bool {
        self.amount >= amount
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("facility amount", self.amount)?;
        ensure_finite("facility interest_rate", self.interest_rate)?;
        if self.amount < 0.0 {
            return Err(AllocationError::Validation(format!(
                "facility {} has negative capacity {}",
                self.id, self.amount
            )));
        }
        Ok(())
    }
}
