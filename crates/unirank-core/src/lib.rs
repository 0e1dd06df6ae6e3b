pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod scrape;

use std::path::PathBuf;

use catalog::RankTypeSpec;
use error::UnirankError;
use export::ExportSink;
use extraction::{PageSource, RowExtractor};
use model::{TypedTable, YearTable};
use scrape::{scrape_years, ScrapeAccumulator, ScrapeOptions};

/// Extract and type a single rendered page.
///
/// Uses the same schema resolution as a full scrape, with the page as the
/// only input.
pub fn parse_page(
    markup: &str,
    rank_type_hint: Option<&str>,
) -> Result<TypedTable, UnirankError> {
    let extractor = RowExtractor::new()?;
    let mut acc = ScrapeAccumulator::new(rank_type_hint);
    acc.absorb(extractor.extract(markup, 1));
    Ok(parsing::coerce(acc.finish()))
}

/// Outcome of [`scrape_and_export`].
#[derive(Debug)]
pub struct ScrapeReport {
    pub tables: Vec<YearTable>,
    /// `None` when no year could be scraped.
    pub path: Option<PathBuf>,
}

/// Main API entry point: scrape every year of one rank type and export the
/// typed tables.
///
/// Years that fail to load are left out of the export; if none succeed,
/// nothing is written.
pub fn scrape_and_export(
    source: &mut dyn PageSource,
    sink: &dyn ExportSink,
    rank_type: &RankTypeSpec,
    years: &[i32],
    options: &ScrapeOptions,
) -> Result<ScrapeReport, UnirankError> {
    let extractor = RowExtractor::new()?;
    let tables = scrape_years(source, &extractor, rank_type, years, options);

    if tables.is_empty() {
        tracing::warn!(
            rank_type = rank_type.short_code,
            "no year could be scraped, nothing exported"
        );
        return Ok(ScrapeReport { tables, path: None });
    }

    let path = sink.write(rank_type, &tables)?;
    Ok(ScrapeReport {
        tables,
        path: Some(path),
    })
}
