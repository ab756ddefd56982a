//! Unit-tagged numeric arrays

use serde::{Deserialize, Serialize};

use super::NumericSequenceLike;

/// Array of values carrying a unit label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Vec<f64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
}

impl Quantity {
    pub fn new(value: Vec<f64>, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Whether the unit is empty or explicitly dimensionless
    pub fn is_dimensionless(&self) -> bool {
        matches!(self.unit.trim(), "" | "dimensionless")
    }
}

impl NumericSequenceLike for Quantity {
    fn unwrap_values(&self) -> &[f64] {
        &self.value
    }
}

/// Serialized numeric array: a bare list or a `{ "value": [...], "unit": "..." }` object.
///
/// `null` entries in either form deserialize as NaN so that gaps in archive
/// data can be dropped or rejected explicitly downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericSeries {
    Bare(#[serde(deserialize_with = "nullable_floats")] Vec<f64>),
    Wrapped {
        #[serde(deserialize_with = "nullable_floats")]
        value: Vec<f64>,
        #[serde(default)]
        unit: String,
    },
}

impl NumericSeries {
    pub fn len(&self) -> usize {
        self.unwrap_values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.unwrap_values().is_empty()
    }

    /// Unit label, if the series was wrapped
    pub fn unit(&self) -> Option<&str> {
        match self {
            NumericSeries::Bare(_) => None,
            NumericSeries::Wrapped { unit, .. } => Some(unit),
        }
    }

    pub fn into_values(self) -> Vec<f64> {
        match self {
            NumericSeries::Bare(values) => values,
            NumericSeries::Wrapped { value, .. } => value,
        }
    }
}

impl NumericSequenceLike for NumericSeries {
    fn unwrap_values(&self) -> &[f64] {
        match self {
            NumericSeries::Bare(values) => values,
            NumericSeries::Wrapped { value, .. } => value,
        }
    }
}

impl From<Vec<f64>> for NumericSeries {
    fn from(values: Vec<f64>) -> Self {
        NumericSeries::Bare(values)
    }
}

impl From<Quantity> for NumericSeries {
    fn from(quantity: Quantity) -> Self {
        NumericSeries::Wrapped {
            value: quantity.value,
            unit: quantity.unit,
        }
    }
}

fn nullable_floats<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
