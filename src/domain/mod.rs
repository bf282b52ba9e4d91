//! Domain layer: the records the allocator reasons about and the pure rules
//! applied to them (covenant aggregation, expected yield).

pub mod assignment;
pub mod covenant;
pub mod expected_yield;
pub mod facility;
pub mod loan;

pub(crate) fn ensure_finite(field: &str, value: f64) -> crate::error::Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(crate::error::AllocationError::Validation(format!(
            "{field} must be a finite number, got {value}"
        )))
    }
}
