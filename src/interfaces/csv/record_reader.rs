use crate::domain::covenant::Covenant;
use crate::domain::facility::Facility;
use crate::domain::loan::Loan;
use crate::error::{AllocationError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads facility, covenant or loan records from a CSV source.
///
/// Columns are matched by header name and whitespace is trimmed. Every
/// record is validated once deserialized, so an iterator item is either a
/// usable record or the reason the row was rejected.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RecordReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn facilities(self) -> impl Iterator<Item = Result<Facility>> {
        self.records(Facility::validate)
    }

    pub fn covenants(self) -> impl Iterator<Item = Result<Covenant>> {
        self.records(Covenant::validate)
    }

    pub fn loans(self) -> impl Iterator<Item = Result<Loan>> {
        self.records(Loan::validate)
    }

    fn records<T>(self, validate: fn(&T) -> Result<()>) -> impl Iterator<Item = Result<T>>
    where
        T: DeserializeOwned,
    {
        self.reader.into_deserialize::<T>().map(move |result| -> Result<T> {
            let record = result.map_err(AllocationError::from)?;
            validate(&record)?;
            Ok(record)
        })
    }
}
