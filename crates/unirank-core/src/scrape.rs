use crate::catalog::RankTypeSpec;
use crate::error::UnirankError;
use crate::extraction::{PageSource, RowExtractor};
use crate::model::{ColumnSchema, RawRow, Table, YearTable};
use crate::parsing::{build, coerce, resolve};

/// Settings for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub url_template: String,
    /// Pages read per year, counting the first.
    pub max_pages: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        ScrapeOptions {
            url_template: crate::catalog::DEFAULT_URL_TEMPLATE.to_string(),
            max_pages: 20,
        }
    }
}

/// Collects records for one (rank type, year) across pages.
///
/// The schema is resolved from the first row absorbed and reused for every
/// later row, so all records share the same columns.
#[derive(Debug, Clone)]
pub struct ScrapeAccumulator {
    rank_type_hint: Option<String>,
    schema: Option<ColumnSchema>,
    table: Table,
}

impl ScrapeAccumulator {
    pub fn new(rank_type_hint: Option<&str>) -> Self {
        ScrapeAccumulator {
            rank_type_hint: rank_type_hint.map(str::to_string),
            schema: None,
            table: Table::default(),
        }
    }

    /// Append one page worth of rows. Returns how many records were added.
    pub fn absorb(&mut self, rows: Vec<RawRow>) -> usize {
        let added = rows.len();
        for row in rows {
            let hint = self.rank_type_hint.as_deref();
            let schema = self.schema.get_or_insert_with(|| {
                let schema = resolve(hint, row.cells.len());
                tracing::debug!(columns = ?schema, "resolved column schema");
                schema
            });
            self.table.records.push(build(&row, schema));
        }
        added
    }

    pub fn schema(&self) -> Option<&ColumnSchema> {
        self.schema.as_ref()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Hand over the table. A scrape that saw no rows still gets the fixed
    /// schema of a known rank type, so its export keeps a header row.
    pub fn finish(mut self) -> Table {
        let hint = self.rank_type_hint.as_deref();
        self.table.schema = self.schema.unwrap_or_else(|| resolve(hint, 0));
        self.table
    }
}

/// Scrape every page of one year's table.
///
/// Only failing to open the table or read its first page is an error.
/// Running out of pages, or any error while moving to or reading a later
/// page, ends the year normally with the rows read so far.
pub fn scrape_year(
    source: &mut dyn PageSource,
    extractor: &RowExtractor,
    rank_type: &RankTypeSpec,
    year: i32,
    options: &ScrapeOptions,
) -> Result<Table, UnirankError> {
    let url = rank_type.url(&options.url_template, year);
    tracing::info!(%url, backend = source.backend_name(), "visiting");
    source.open(&url)?;

    let mut acc = ScrapeAccumulator::new(Some(rank_type.short_code));
    let mut page = 1;

    loop {
        let markup = match source.current_markup() {
            Ok(markup) => markup,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                tracing::warn!(page, error = %e, "page could not be read, ending year");
                break;
            }
        };
        let rows = extractor.extract(&markup, page);
        acc.absorb(rows);
        tracing::info!(page, total_rows = acc.len(), "scraped page");

        if page >= options.max_pages {
            tracing::info!(page, "page limit reached");
            break;
        }

        match source.advance() {
            Ok(true) => page += 1,
            Ok(false) => {
                tracing::info!(page, "no next page");
                break;
            }
            Err(e) => {
                tracing::info!(page, error = %e, "pagination stopped");
                break;
            }
        }
    }

    Ok(acc.finish())
}

/// Scrape and coerce several years in order.
///
/// A year whose table cannot be opened or read is logged and left out.
/// Repeated years are scraped once, at their first position.
pub fn scrape_years(
    source: &mut dyn PageSource,
    extractor: &RowExtractor,
    rank_type: &RankTypeSpec,
    years: &[i32],
    options: &ScrapeOptions,
) -> Vec<YearTable> {
    let years = distinct_years(years);
    let mut tables = Vec::with_capacity(years.len());

    for year in years {
        tracing::info!(year, rank_type = rank_type.short_code, "scraping year");
        match scrape_year(source, extractor, rank_type, year, options) {
            Ok(table) => {
                let table = coerce(table);
                tracing::info!(year, rows = table.len(), "year complete");
                tables.push(YearTable { year, table });
            }
            Err(e) => {
                tracing::warn!(year, error = %e, "year skipped");
            }
        }
    }

    tables
}

/// `years` without repeats, keeping first-seen order.
pub fn distinct_years(years: &[i32]) -> Vec<i32> {
    let mut seen = Vec::with_capacity(years.len());
    for &year in years {
        if seen.contains(&year) {
            tracing::debug!(year, "ignoring repeated year");
        } else {
            seen.push(year);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[&str]) -> RawRow {
        RawRow::new(cells.iter().map(|s| s.to_string()).collect(), None)
    }

    #[test]
    fn test_schema_decided_once() {
        let mut acc = ScrapeAccumulator::new(None);
        acc.absorb(vec![raw(&["1", "甲", "北京", "80"])]);
        acc.absorb(vec![raw(&["2", "乙", "上海", "综合", "70", "30"])]);

        let table = acc.finish();
        assert_eq!(table.schema, vec!["排名", "学校名称", "省市", "总分"]);
        assert!(table.records.iter().all(|r| r.len() == 4));
    }

    #[test]
    fn test_hint_beats_first_row_count() {
        let mut acc = ScrapeAccumulator::new(Some("arwu"));
        acc.absorb(vec![raw(&["1", "Harvard"])]);
        assert_eq!(acc.schema().map(|s| s.len()), Some(6));
    }

    #[test]
    fn test_empty_pages_keep_schema_open() {
        let mut acc = ScrapeAccumulator::new(Some("gras"));
        assert_eq!(acc.absorb(vec![]), 0);
        assert!(acc.schema().is_none());
        acc.absorb(vec![raw(&["a", "b", "c"])]);
        assert_eq!(acc.finish().schema, vec!["col_0", "col_1", "col_2"]);
    }

    #[test]
    fn test_distinct_years_keeps_first_seen_order() {
        assert_eq!(distinct_years(&[2024, 2023, 2024, 2025, 2023]), vec![2024, 2023, 2025]);
        assert!(distinct_years(&[]).is_empty());
    }

    #[test]
    fn test_finish_without_rows() {
        let table = ScrapeAccumulator::new(Some("bcur")).finish();
        assert_eq!(table.schema.len(), 6);
        assert!(table.is_empty());

        let table = ScrapeAccumulator::new(Some("bcsr")).finish();
        assert!(table.schema.is_empty());
    }
}
