use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::catalog::RankTypeSpec;
use crate::error::UnirankError;
use crate::export::{workbook_file_name, ExportSink};
use crate::model::{CellValue, TypedTable, YearTable};

/// Writes one workbook per rank type with a sheet per year.
///
/// Sheets are named after the year and appear in the order the years were
/// scraped. Integers and floats are written as numbers, missing scores as
/// blank cells.
pub struct XlsxExporter {
    output_dir: PathBuf,
}

impl XlsxExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        XlsxExporter {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ExportSink for XlsxExporter {
    fn write(
        &self,
        rank_type: &RankTypeSpec,
        tables: &[YearTable],
    ) -> Result<PathBuf, UnirankError> {
        let file_name =
            workbook_file_name(rank_type, tables).ok_or_else(|| UnirankError::Export {
                path: self.output_dir.clone(),
                reason: format!("no tables to export for {}", rank_type.short_code),
            })?;
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);

        let export_err = |e: XlsxError| UnirankError::Export {
            path: path.clone(),
            reason: e.to_string(),
        };

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        for year_table in tables {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name(year_table.year.to_string())
                .map_err(export_err)?;
            write_sheet(sheet, &year_table.table, &header).map_err(export_err)?;
        }

        workbook.save(&path).map_err(export_err)?;
        tracing::info!(path = %path.display(), sheets = tables.len(), "workbook written");
        Ok(path)
    }
}

fn write_sheet(
    sheet: &mut Worksheet,
    table: &TypedTable,
    header: &Format,
) -> Result<(), XlsxError> {
    for (col, column) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, &column.name, header)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let excel_row = r as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            match value {
                CellValue::Integer(v) => {
                    sheet.write_number(excel_row, col, *v as f64)?;
                }
                CellValue::Float(Some(v)) => {
                    sheet.write_number(excel_row, col, *v)?;
                }
                CellValue::Float(None) => {}
                CellValue::Text(s) => {
                    sheet.write_string(excel_row, col, s)?;
                }
            }
        }
    }

    Ok(())
}
