use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::Label;
use crate::error::GridError;

/// Logical coordinates of a data cell.
///
/// Doubles as the identity token stamped on pooled data-cell nodes, so a click
/// or key event on a node can be mapped back to the cell it currently shows.
/// The text form is `"{row}-{column}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub row: usize,
    pub column: usize,
}

impl CellId {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.column)
    }
}

impl FromStr for CellId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::Config(format!("invalid cell token `{s}`"));
        let (row, column) = s.split_once('-').ok_or_else(invalid)?;
        let row = row.parse().map_err(|_| invalid())?;
        let column = column.parse().map_err(|_| invalid())?;
        Ok(CellId { row, column })
    }
}

/// Output of a cell renderer: what a data cell shows.
///
/// Deserializes from the `{ class, style, title, content }` object returned by
/// a JavaScript renderer. Every field is optional there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellContent {
    /// Extra class names appended after the grid's own classes
    #[serde(deserialize_with = "de_text")]
    pub class: String,
    /// Extra inline style properties
    #[serde(deserialize_with = "de_style")]
    pub style: BTreeMap<String, String>,
    /// Tooltip text
    #[serde(deserialize_with = "de_text")]
    pub title: String,
    /// Inner markup of the cell
    #[serde(deserialize_with = "de_text")]
    pub content: String,
}

impl CellContent {
    /// Content showing `text` with no extra class, style or title.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }
}

// Renderers written in JavaScript freely return numbers or null where text is
// expected.
fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Label>::deserialize(deserializer)?;
    Ok(value.map(|v| v.to_string()).unwrap_or_default())
}

fn de_style<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<BTreeMap<String, Label>>::deserialize(deserializer)?;
    Ok(value
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect())
}
