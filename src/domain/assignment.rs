use serde::Serialize;

/// A committed pairing of one loan to the facility funding it.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct Assignment {
    pub loan_id: u32,
    pub facility_id: u32,
}
