use crate::model::{RawRow, Record};

/// Column-name fragments that mark a column as holding the school name.
const NAME_KEYWORDS: &[&str] = &["学校", "名称", "name"];

pub fn is_name_column(column: &str) -> bool {
    let lower = column.to_lowercase();
    NAME_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Zip a raw row against a schema into a record.
///
/// Name-like columns take the row's resolved name when it is present and
/// non-empty. Cells missing from the row become empty strings; surplus cells
/// are dropped. The record always has exactly `schema.len()` fields.
pub fn build(raw: &RawRow, schema: &[String]) -> Record {
    let fields = schema
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let positional = || raw.cells.get(i).cloned().unwrap_or_default();
            let value = if is_name_column(column) {
                raw.name().map(str::to_string).unwrap_or_else(positional)
            } else {
                positional()
            };
            (column.clone(), value)
        })
        .collect();

    Record { fields }
}
