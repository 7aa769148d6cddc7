use std::collections::BTreeMap;

use serde::Deserialize;

use super::table::{is_null_token, normalize_header, parse_number, TableRow};
use crate::risk::coerce_flag;

/// A single cell as received from CSV text or a JSON document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Number(value) => !value.is_finite(),
            RawValue::Text(text) => is_null_token(text),
            RawValue::Bool(_) => false,
        }
    }

    /// Finite number; booleans and unparseable text yield `None`.
    pub fn number(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) => value.is_finite().then_some(*value),
            RawValue::Text(text) if !is_null_token(text) => parse_number(text),
            _ => None,
        }
    }

    /// Boolean-like coercion: `1` is the only true number, text goes through [`coerce_flag`].
    pub fn flag(&self) -> Option<bool> {
        if self.is_null() {
            return None;
        }
        match self {
            RawValue::Bool(flag) => Some(*flag),
            RawValue::Number(value) => Some(*value == 1.0),
            RawValue::Text(text) => Some(coerce_flag(text)),
            RawValue::Null => None,
        }
    }

    /// Identifier text; whole numbers print without a fractional part.
    pub fn text(&self) -> Option<String> {
        if self.is_null() {
            return None;
        }
        match self {
            RawValue::Text(text) => Some(text.trim().to_string()),
            RawValue::Number(value) if value.fract() == 0.0 => Some(format!("{value:.0}")),
            RawValue::Number(value) => Some(value.to_string()),
            RawValue::Bool(flag) => Some(flag.to_string()),
            RawValue::Null => None,
        }
    }
}

/// Loosely-typed input row keyed by normalized column name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, RawValue>")]
pub struct SignalRow {
    cells: BTreeMap<String, RawValue>,
}

impl SignalRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: RawValue) -> Self {
        self.cells.insert(normalize_header(column), value);
        self
    }

    /// Non-null value for a normalized column name.
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.cells.get(column).filter(|value| !value.is_null())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub(crate) fn from_table_row(row: TableRow<'_>) -> Self {
        let cells = row
            .columns()
            .map(|(name, cell)| {
                let value = cell
                    .map(|text| RawValue::Text(text.to_string()))
                    .unwrap_or(RawValue::Null);
                (name.to_string(), value)
            })
            .collect();
        Self { cells }
    }
}

impl From<BTreeMap<String, RawValue>> for SignalRow {
    fn from(raw: BTreeMap<String, RawValue>) -> Self {
        let cells = raw
            .into_iter()
            .map(|(column, value)| (normalize_header(&column), value))
            .collect();
        Self { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_rows_accept_either_naming_convention() {
        let row: SignalRow = serde_json::from_str(
            r#"{"Employee_ID": "EMP9", "Avg Vibe Score": 3.5, "mentor_assigned": "Yes", "work_hours": null}"#,
        )
        .expect("row deserializes");

        assert_eq!(
            row.get("employee_id").and_then(RawValue::text).as_deref(),
            Some("EMP9")
        );
        assert_eq!(row.get("avg_vibe_score").and_then(RawValue::number), Some(3.5));
        assert_eq!(row.get("mentor_assigned").and_then(RawValue::flag), Some(true));
        assert!(row.get("work_hours").is_none());
    }

    #[test]
    fn flag_coercion_handles_numbers_and_text() {
        assert_eq!(RawValue::Number(1.0).flag(), Some(true));
        assert_eq!(RawValue::Number(2.0).flag(), Some(false));
        assert_eq!(RawValue::Text("TRUE".into()).flag(), Some(true));
        assert_eq!(RawValue::Text("1.0".into()).flag(), Some(false));
        assert_eq!(RawValue::Text("n/a".into()).flag(), None);
        assert_eq!(RawValue::Bool(false).flag(), Some(false));
    }

    #[test]
    fn numeric_identifiers_render_without_fraction() {
        assert_eq!(RawValue::Number(1042.0).text().as_deref(), Some("1042"));
        assert_eq!(RawValue::Text("  EMP7 ".into()).text().as_deref(), Some("EMP7"));
        assert_eq!(RawValue::Text("NaN".into()).number(), None);
        assert_eq!(RawValue::Text("seven".into()).number(), None);
    }
}
