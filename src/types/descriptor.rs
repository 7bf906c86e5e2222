use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of a row or column.
///
/// JavaScript callers pass either numbers or strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Index(u64),
    Number(f64),
    Flag(bool),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Index(i) => write!(f, "{i}"),
            Label::Number(n) => write!(f, "{n}"),
            Label::Flag(b) => write!(f, "{b}"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<usize> for Label {
    fn from(index: usize) -> Self {
        u64::try_from(index)
            .map(Label::Index)
            .unwrap_or_else(|_| Label::Text(index.to_string()))
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

/// Caller-supplied description of one row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDescriptor {
    /// Shown in the row counter; defaults to the row index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Label>,
    /// Row height in pixels; defaults to the configured row height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl RowDescriptor {
    pub fn new(name: impl Into<Label>, height: f64) -> Self {
        Self {
            name: Some(name.into()),
            height: Some(height),
        }
    }
}

/// Caller-supplied description of one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Position in a data row holding this column's values; defaults to the
    /// column index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<usize>,
    /// Shown in the header; defaults to the column index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Label>,
    /// Column width in pixels; defaults to the configured column width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<Label>, width: f64) -> Self {
        Self {
            key: None,
            name: Some(name.into()),
            width: Some(width),
        }
    }

    /// Read values from position `key` of each data row.
    pub fn with_key(mut self, key: usize) -> Self {
        self.key = Some(key);
        self
    }
}
