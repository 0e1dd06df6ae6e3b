use std::path::PathBuf;

use unirank_core::catalog;

use crate::{observability, output};

pub fn run(html_file: PathBuf, rank_type: Option<&str>, output_format: &str) -> anyhow::Result<()> {
    observability::init_console()?;

    let markup = std::fs::read_to_string(&html_file)?;
    let hint = rank_type.map(|s| catalog::select(s).short_code);
    let table = unirank_core::parse_page(&markup, hint)?;

    match output_format {
        "json" => output::json::print(&table)?,
        _ => {
            println!("{}", output::table::format_table(&table, None));
            eprintln!("{} row(s) from {}", table.len(), html_file.display());
        }
    }

    Ok(())
}
