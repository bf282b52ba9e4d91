use crate::application::report::Report;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

pub const YIELDS_HEADER: [&str; 2] = ["facility_id", "expected_yield"];
pub const ASSIGNMENTS_HEADER: [&str; 2] = ["loan_id", "facility_id"];

/// Writes one table of a [`Report`] as CSV.
///
/// The header row is written explicitly so that an empty table still carries
/// it.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_yields(&mut self, report: &Report) -> Result<()> {
        self.write_table(&YIELDS_HEADER, &report.yields)
    }

    pub fn write_assignments(&mut self, report: &Report) -> Result<()> {
        self.write_table(&ASSIGNMENTS_HEADER, &report.assignments)
    }

    fn write_table<T: Serialize>(&mut self, header: &[&str], rows: &[T]) -> Result<()> {
        self.writer.write_record(header)?;
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
