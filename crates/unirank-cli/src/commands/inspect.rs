use std::path::Path;

use unirank_core::export::read_workbook;

use crate::{observability, output};

pub fn run(workbook: &Path, rows: usize) -> anyhow::Result<()> {
    observability::init_console()?;

    let sheets = read_workbook(workbook)?;
    if sheets.is_empty() {
        println!("{} has no sheets", workbook.display());
        return Ok(());
    }

    for (i, sheet) in sheets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ({} rows) ===\n", sheet.name, sheet.table.len());
        println!("{}", output::table::format_columns(&sheet.table));
        println!("{}", output::table::format_table(&sheet.table, Some(rows)));
    }

    Ok(())
}
