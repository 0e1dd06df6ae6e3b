use std::path::Path;

use calamine::{Data, Reader, Xlsx};

use crate::error::UnirankError;
use crate::model::{CellValue, ColumnKind, TypedColumn, TypedTable};
use crate::parsing::coerce::column_kind;
use crate::parsing::values::{parse_float, parse_rank};

/// One sheet of an exported workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub table: TypedTable,
}

/// Read an exported workbook back into typed tables, one per sheet.
///
/// The first row of each sheet is the header; column kinds are derived from
/// the header names the same way they are during a scrape.
pub fn read_workbook(path: &Path) -> Result<Vec<SheetTable>, UnirankError> {
    let mut workbook: Xlsx<_> = calamine::open_workbook(path)
        .map_err(|e| UnirankError::Workbook(format!("{}: {e}", path.display())))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| UnirankError::Workbook(format!("sheet '{name}': {e}")))?;

        let mut rows = range.rows();
        let columns: Vec<TypedColumn> = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .map(|cell| {
                        let name = cell_as_string(cell).unwrap_or_default();
                        let kind = column_kind(&name);
                        TypedColumn { name, kind }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let rows = rows
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| typed_cell(row.get(i), column.kind))
                    .collect()
            })
            .collect();

        sheets.push(SheetTable {
            name,
            table: TypedTable { columns, rows },
        });
    }

    Ok(sheets)
}

fn typed_cell(cell: Option<&Data>, kind: ColumnKind) -> CellValue {
    let number = cell.and_then(cell_as_f64);
    let text = cell.and_then(cell_as_string).unwrap_or_default();

    match kind {
        ColumnKind::Rank => match number {
            Some(f) if f >= 0.0 && f.fract() == 0.0 => CellValue::Integer(f as u64),
            _ => CellValue::Integer(parse_rank(&text)),
        },
        ColumnKind::Score | ColumnKind::Level => {
            CellValue::Float(number.or_else(|| parse_float(&text)))
        }
        ColumnKind::Text => CellValue::Text(text),
    }
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}
