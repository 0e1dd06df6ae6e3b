use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered column names assigned to one scrape's rows.
pub type ColumnSchema = Vec<String>;

/// Trimmed cell texts from one `<tr>`, plus the resolved school name if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub cells: Vec<String>,
    pub name: Option<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>, name: Option<String>) -> Self {
        RawRow { cells, name }
    }

    /// The resolved name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// One row keyed by column name, fields in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<(String, String)>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }
}

/// All records collected for one (rank type, year) scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Empty until the first row has been seen.
    pub schema: ColumnSchema,
    pub records: Vec<Record>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A coerced cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(u64),
    /// `None` is a score or level that could not be parsed.
    Float(Option<f64>),
    Text(String),
}

impl CellValue {
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            CellValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => *v,
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Float(None))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{v}"),
            CellValue::Float(Some(v)) => write!(f, "{v}"),
            CellValue::Float(None) => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// How a column's values were typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Rank,
    Score,
    Level,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Rank => write!(f, "rank"),
            ColumnKind::Score => write!(f, "score"),
            ColumnKind::Level => write!(f, "level"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// A table after coercion. Rows are positional against `columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedTable {
    pub columns: Vec<TypedColumn>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TypedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }
}

/// A typed table tagged with the year it was scraped for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTable {
    pub year: i32,
    pub table: TypedTable,
}
