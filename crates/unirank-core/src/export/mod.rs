pub mod workbook;
pub mod xlsx;

use std::path::PathBuf;

use crate::catalog::RankTypeSpec;
use crate::error::UnirankError;
use crate::model::YearTable;

pub use workbook::{read_workbook, SheetTable};
pub use xlsx::XlsxExporter;

/// Destination for the typed tables of one rank type.
pub trait ExportSink {
    /// Write all years of one rank type, returning where they went.
    fn write(
        &self,
        rank_type: &RankTypeSpec,
        tables: &[YearTable],
    ) -> Result<PathBuf, UnirankError>;
}

/// `{display name}_{first year}-{last year}.xlsx`, oldest year first.
pub fn workbook_file_name(rank_type: &RankTypeSpec, tables: &[YearTable]) -> Option<String> {
    let first = tables.iter().map(|t| t.year).min()?;
    let last = tables.iter().map(|t| t.year).max()?;
    Some(format!("{}_{first}-{last}.xlsx", rank_type.display_name))
}
