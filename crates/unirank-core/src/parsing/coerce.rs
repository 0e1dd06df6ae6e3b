use crate::error::CoercionError;
use crate::model::{CellValue, ColumnKind, Table, TypedColumn, TypedTable};
use crate::parsing::values::{parse_float, parse_rank};

/// Keyword rule deciding how a column is typed.
struct ColumnRule {
    kind: ColumnKind,
    contains: &'static [&'static str],
    starts_with: &'static [&'static str],
}

/// Evaluated top to bottom, first match wins. Latin keywords are matched
/// against the lowercased column name.
const RULES: &[ColumnRule] = &[
    ColumnRule {
        kind: ColumnKind::Rank,
        contains: &["排名", "名次"],
        starts_with: &["rank"],
    },
    ColumnRule {
        kind: ColumnKind::Score,
        contains: &["总分", "分", "score", "得分"],
        starts_with: &[],
    },
    ColumnRule {
        kind: ColumnKind::Level,
        contains: &["层次", "level"],
        starts_with: &[],
    },
];

impl ColumnRule {
    fn matches(&self, lower: &str) -> bool {
        self.contains.iter().any(|kw| lower.contains(kw))
            || self.starts_with.iter().any(|kw| lower.starts_with(kw))
    }
}

/// Decide the type of a column from its name.
pub fn column_kind(name: &str) -> ColumnKind {
    let lower = name.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.kind)
        .unwrap_or(ColumnKind::Text)
}

/// Convert a complete table into typed columns.
///
/// Every cell is trimmed first. A column that cannot be coerced keeps its
/// text values and is reported as [`ColumnKind::Text`]; the other columns
/// are unaffected.
pub fn coerce(table: Table) -> TypedTable {
    let names: Vec<String> = if table.schema.is_empty() {
        table
            .records
            .first()
            .map(|r| r.columns().map(str::to_string).collect())
            .unwrap_or_default()
    } else {
        table.schema.clone()
    };

    let mut columns = Vec::with_capacity(names.len());
    let mut typed: Vec<Vec<CellValue>> = Vec::with_capacity(names.len());

    for name in &names {
        let (kind, values) = match coerce_column(&table, name) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(column = %name, error = %e, "column left as text");
                (ColumnKind::Text, text_fallback(&table, name))
            }
        };
        columns.push(TypedColumn {
            name: name.clone(),
            kind,
        });
        typed.push(values);
    }

    // Column-major to row-major.
    let rows = (0..table.records.len())
        .map(|r| typed.iter().map(|col| col[r].clone()).collect())
        .collect();

    TypedTable { columns, rows }
}

fn coerce_column(
    table: &Table,
    name: &str,
) -> Result<(ColumnKind, Vec<CellValue>), CoercionError> {
    let raw: Vec<&str> = table
        .records
        .iter()
        .filter_map(|r| r.get(name))
        .map(str::trim)
        .collect();

    if raw.len() != table.records.len() {
        return Err(CoercionError::RaggedColumn {
            column: name.to_string(),
            expected: table.records.len(),
            found: raw.len(),
        });
    }

    let kind = column_kind(name);
    let values = raw
        .into_iter()
        .map(|s| match kind {
            ColumnKind::Rank => CellValue::Integer(parse_rank(s)),
            ColumnKind::Score | ColumnKind::Level => CellValue::Float(parse_float(s)),
            ColumnKind::Text => CellValue::Text(s.to_string()),
        })
        .collect();

    Ok((kind, values))
}

fn text_fallback(table: &Table, name: &str) -> Vec<CellValue> {
    table
        .records
        .iter()
        .map(|r| CellValue::Text(r.get(name).unwrap_or_default().trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn single_column(name: &str, values: &[&str]) -> Table {
        Table {
            schema: vec![name.to_string()],
            records: values
                .iter()
                .map(|v| Record {
                    fields: vec![(name.to_string(), v.to_string())],
                })
                .collect(),
        }
    }

    #[test]
    fn test_column_kinds() {
        assert_eq!(column_kind("排名"), ColumnKind::Rank);
        assert_eq!(column_kind("国家/地区排名"), ColumnKind::Rank);
        assert_eq!(column_kind("名次"), ColumnKind::Rank);
        assert_eq!(column_kind("Rank"), ColumnKind::Rank);
        assert_eq!(column_kind("总分"), ColumnKind::Score);
        assert_eq!(column_kind("Total Score"), ColumnKind::Score);
        assert_eq!(column_kind("办学层次"), ColumnKind::Level);
        assert_eq!(column_kind("LEVEL"), ColumnKind::Level);
        assert_eq!(column_kind("学校名称"), ColumnKind::Text);
        assert_eq!(column_kind("col_0"), ColumnKind::Text);
    }

    #[test]
    fn test_rank_prefix_only_at_start() {
        assert_eq!(column_kind("frank"), ColumnKind::Text);
    }

    #[test]
    fn test_rank_column_dense() {
        let typed = coerce(single_column("排名", &["1", "2nd", "", "3"]));
        let values: Vec<_> = typed.rows.iter().map(|r| r[0].as_integer()).collect();
        assert_eq!(values, vec![Some(1), Some(0), Some(0), Some(3)]);
    }

    #[test]
    fn test_score_column_nulls() {
        let typed = coerce(single_column("总分", &["85.5", "N/A", ""]));
        assert_eq!(
            typed.rows,
            vec![
                vec![CellValue::Float(Some(85.5))],
                vec![CellValue::Float(None)],
                vec![CellValue::Float(None)],
            ]
        );
    }

    #[test]
    fn test_text_trimmed() {
        let typed = coerce(single_column("省市", &["  北京 ", "上海"]));
        assert_eq!(typed.rows[0][0], CellValue::Text("北京".into()));
        assert_eq!(typed.columns[0].kind, ColumnKind::Text);
    }

    #[test]
    fn test_ragged_column_isolated() {
        let table = Table {
            schema: vec!["排名".into(), "总分".into()],
            records: vec![
                Record {
                    fields: vec![("排名".into(), "1".into()), ("总分".into(), "90".into())],
                },
                Record {
                    fields: vec![("排名".into(), "2".into())],
                },
            ],
        };
        let typed = coerce(table);
        assert_eq!(typed.columns[0].kind, ColumnKind::Rank);
        assert_eq!(typed.rows[1][0], CellValue::Integer(2));
        assert_eq!(typed.columns[1].kind, ColumnKind::Text);
        assert_eq!(typed.rows[0][1], CellValue::Text("90".into()));
        assert_eq!(typed.rows[1][1], CellValue::Text(String::new()));
    }

    #[test]
    fn test_empty_table() {
        let typed = coerce(Table::default());
        assert!(typed.columns.is_empty());
        assert!(typed.rows.is_empty());
    }
}
