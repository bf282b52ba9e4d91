use super::facility::Facility;
use super::loan::Loan;

/// Expected net return of funding `loan` from `facility`.
///
/// Interest income weighted by the chance the loan performs, minus the
/// expected default loss, minus the facility's cost of funds. All three
/// terms scale with the loan amount. The result may be negative.
pub fn expected_yield(loan: &Loan, facility: &Facility) -> f64 {
    let p = loan.default_likelihood;
    let principal = loan.amount;
    (1.0 - p) * (loan.interest_rate * principal)
        - p * principal
        - facility.interest_rate * principal
}
