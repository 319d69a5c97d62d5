//! Certificate records and result pages as returned by the registry.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field holding the display address of a property.
pub const FIELD_ADDRESS: &str = "address";
/// Field holding the unique property reference number.
pub const FIELD_UPRN: &str = "uprn";
/// Field holding the property postcode.
pub const FIELD_POSTCODE: &str = "postcode";
/// Field holding the numeric current energy efficiency score.
pub const FIELD_CURRENT_EFFICIENCY: &str = "current-energy-efficiency";
/// Field holding the letter rating printed on the certificate.
pub const FIELD_CURRENT_RATING: &str = "current-energy-rating";

/// One certificate as an ordered field-name → value mapping.
///
/// Field order is the registry's order. Values are kept as text: JSON
/// `null` becomes the empty string and numbers or booleans keep their
/// textual form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CertificateRecord {
    fields: Map<String, Value>,
}

impl CertificateRecord {
    /// Creates a record from `(field, value)` pairs, preserving their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self { fields }
    }

    /// Looks up a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Looks up a field value, treating an empty string as absent.
    pub fn non_empty(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Display address, if present.
    pub fn address(&self) -> Option<&str> {
        self.non_empty(FIELD_ADDRESS)
    }

    /// Unique property reference number, if present.
    pub fn uprn(&self) -> Option<&str> {
        self.non_empty(FIELD_UPRN)
    }

    /// Postcode, if present and non-empty.
    pub fn postcode(&self) -> Option<&str> {
        self.non_empty(FIELD_POSTCODE)
    }

    /// Current energy efficiency parsed as a number.
    ///
    /// Returns `None` when the field is missing or not numeric.
    pub fn current_efficiency(&self) -> Option<f64> {
        self.non_empty(FIELD_CURRENT_EFFICIENCY)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Iterates fields in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap_or_default()))
    }

    /// Number of fields on the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for CertificateRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let fields = raw
            .into_iter()
            .map(|(k, v)| (k, Value::String(value_text(v))))
            .collect();
        Ok(Self { fields })
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    /// Records in registry order
    #[serde(default)]
    pub rows: Vec<CertificateRecord>,

    /// Column list the registry may send alongside the rows
    #[serde(
        rename = "column-names",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub column_names: Option<Vec<String>>,
}

impl SearchResultPage {
    /// Creates a page from records.
    pub fn new(rows: Vec<CertificateRecord>) -> Self {
        Self {
            rows,
            column_names: None,
        }
    }

    /// Number of rows on the page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First record on the page.
    pub fn first(&self) -> Option<&CertificateRecord> {
        self.rows.first()
    }
}
