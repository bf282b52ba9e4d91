#![allow(dead_code)]

use loan_allocator::domain::covenant::Covenant;
use loan_allocator::domain::facility::Facility;
use loan_allocator::domain::loan::Loan;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tempfile::TempDir;

pub const STATES: [&str; 6] = ["CA", "NY", "MT", "VT", "AL", "MO"];

/// A temporary directory holding the three input tables.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new(facilities: &[[&str; 4]], covenants: &[[&str; 4]], loans: &[[&str; 5]]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_table(
            &dir.path().join("facilities.csv"),
            &["amount", "interest_rate", "id", "bank_id"],
            facilities,
        );
        write_table(
            &dir.path().join("covenants.csv"),
            &["facility_id", "max_default_likelihood", "bank_id", "banned_state"],
            covenants,
        );
        write_table(
            &dir.path().join("loans.csv"),
            &["interest_rate", "amount", "id", "default_likelihood", "state"],
            loans,
        );
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read output")
    }
}

pub fn write_table<const N: usize>(path: &Path, header: &[&str; N], rows: &[[&str; N]]) {
    let mut wtr = csv::Writer::from_path(path).expect("Failed to create CSV");
    wtr.write_record(header).unwrap();
    for row in rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
}

/// A reproducible dataset with enough contention for capacity to run out
/// and covenants to bite.
pub fn random_dataset(seed: u64) -> (Vec<Facility>, Vec<Covenant>, Vec<Loan>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let facilities: Vec<Facility> = (1..=rng.gen_range(2..=8))
        .map(|id| {
            Facility::new(
                id,
                rng.gen_range(1..=3),
                rng.gen_range(0..100_000) as f64,
                rng.gen_range(0.0..0.1),
            )
        })
        .collect();

    let mut covenants = Vec::new();
    for facility in &facilities {
        for _ in 0..rng.gen_range(0..=3) {
            let banned = if rng.gen_bool(0.7) {
                STATES[rng.gen_range(0..STATES.len())]
            } else {
                ""
            };
            covenants.push(Covenant::new(
                facility.id,
                facility.bank_id,
                rng.gen_range(0.0..0.15),
                banned,
            ));
        }
    }

    let loans: Vec<Loan> = (1..=rng.gen_range(20..=80))
        .map(|id| {
            Loan::new(
                id,
                rng.gen_range(1_000..30_000) as f64,
                rng.gen_range(0.05..0.4),
                rng.gen_range(0.0..0.15),
                STATES[rng.gen_range(0..STATES.len())],
            )
        })
        .collect();

    (facilities, covenants, loans)
}
