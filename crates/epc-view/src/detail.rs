//! Key/value table for a single certificate.

use std::fmt;

use epc_core::CertificateRecord;
use serde::Serialize;

/// Every field of a certificate in registry order, unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailTable {
    rows: Vec<(String, String)>,
}

impl DetailTable {
    /// Builds the table from a record.
    pub fn from_record(record: &CertificateRecord) -> Self {
        Self {
            rows: record
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// `(field, value)` rows in display order.
    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Returns `true` if the record had no fields.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for DetailTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0);
        for (key, value) in &self.rows {
            writeln!(f, "{key:<width$}  {value}")?;
        }
        Ok(())
    }
}
