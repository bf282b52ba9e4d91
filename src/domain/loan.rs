use super::ensure_finite;
use crate::error::{AllocationError, Result};
use serde::{Deserialize, Serialize};

/// A financing request. Loans are never mutated once read.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Loan {
    pub interest_rate: f64,
    pub amount: f64,
    pub id: u32,
    pub default_likelihood: f64,
    pub state: String,
}

impl Loan {
    pub fn new(
        id: u32,
        amount: f64,
        interest_rate: f64,
        default_likelihood: f64,
        state: impl Into<String>,
    ) -> Self {
        Self {
            interest_rate,
            amount,
            id,
            default_likelihood,
            state: state.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("loan amount", self.amount)?;
        ensure_finite("loan interest_rate", self.interest_rate)?;
        ensure_finite("loan default_likelihood", self.default_likelihood)?;
        if self.amount < 0.0 {
            return Err(AllocationError::Validation(format!(
                "loan {} requests a negative amount {}",
                self.id, self.amount
            )));
        }
        if !(0.0..=1.0).contains(&self.default_likelihood) {
            return Err(AllocationError::Validation(format!(
                "loan {} default_likelihood {} is outside [0, 1]",
                self.id, self.default_likelihood
            )));
        }
        Ok(())
    }
}
