use scraper::{ElementRef, Html, Selector};

use crate::error::{RowError, UnirankError};
use crate::model::RawRow;

/// Where to look for a row's school name, tried in order until one yields
/// non-empty text.
const NAME_STRATEGIES: &[(&str, &str)] = &[
    ("chinese name class", ".name-cn"),
    ("name class", ".name"),
    ("first link", "a"),
];

struct NameStrategy {
    label: &'static str,
    selector: Selector,
}

/// Pulls raw rows out of a rendered ranking page.
///
/// Only the first `<tbody>` is read. Rows without any `<td>` are dropped with
/// a warning; they never stop the rest of the page from being read.
pub struct RowExtractor {
    tbody: Selector,
    cell: Selector,
    name_strategies: Vec<NameStrategy>,
}

impl RowExtractor {
    pub fn new() -> Result<Self, UnirankError> {
        let name_strategies = NAME_STRATEGIES
            .iter()
            .map(|&(label, css)| {
                Ok(NameStrategy {
                    label,
                    selector: parse_selector(css)?,
                })
            })
            .collect::<Result<Vec<_>, UnirankError>>()?;

        Ok(RowExtractor {
            tbody: parse_selector("tbody")?,
            cell: parse_selector("td")?,
            name_strategies,
        })
    }

    /// Extract every data row of the page's table body, in document order.
    pub fn extract(&self, markup: &str, page_number: usize) -> Vec<RawRow> {
        let document = Html::parse_document(markup);

        let Some(tbody) = document.select(&self.tbody).next() else {
            tracing::warn!(
                page = page_number,
                "table body not found, page structure may have changed"
            );
            return Vec::new();
        };

        let mut rows = Vec::new();
        let direct_rows = tbody
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "tr");

        for (index, tr) in direct_rows.enumerate() {
            match self.extract_row(tr) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::warn!(
                        page = page_number,
                        row = index + 1,
                        reason = %e,
                        "skipping row"
                    );
                }
            }
        }

        tracing::debug!(page = page_number, rows = rows.len(), "extracted rows");
        rows
    }

    fn extract_row(&self, tr: ElementRef<'_>) -> Result<RawRow, RowError> {
        let cells: Vec<String> = tr.select(&self.cell).map(stripped_text).collect();
        if cells.is_empty() {
            return Err(RowError::NoCells);
        }

        let name = self.resolve_name(tr);
        Ok(RawRow { cells, name })
    }

    fn resolve_name(&self, tr: ElementRef<'_>) -> Option<String> {
        self.name_strategies.iter().find_map(|strategy| {
            let text = tr.select(&strategy.selector).next().map(stripped_text)?;
            if text.is_empty() {
                return None;
            }
            tracing::trace!(strategy = strategy.label, name = %text, "resolved row name");
            Some(text)
        })
    }
}

/// Text content with every fragment trimmed and the pieces concatenated.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

fn parse_selector(css: &str) -> Result<Selector, UnirankError> {
    Selector::parse(css).map_err(|e| UnirankError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RowExtractor {
        RowExtractor::new().unwrap()
    }

    fn page(body: &str) -> String {
        format!(
            "<html><body><table><thead><tr><th>排名</th></tr></thead>\
             <tbody>{body}</tbody></table></body></html>"
        )
    }

    #[test]
    fn test_missing_tbody_yields_nothing() {
        let rows = extractor().extract("<html><body><p>loading</p></body></html>", 1);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_cells_are_stripped() {
        let html = page(concat!(
            "<tr><td> 1 </td><td>\n",
            "  <div class=\"name-cn\"> 清华大学 </div>\n",
            "  <div class=\"name-en\">Tsinghua University</div></td>",
            "<td>北京</td></tr>",
        ));
        let rows = extractor().extract(&html, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0], "1");
        assert_eq!(rows[0].cells[1], "清华大学Tsinghua University");
        assert_eq!(rows[0].cells[2], "北京");
        assert_eq!(rows[0].name.as_deref(), Some("清华大学"));
    }

    #[test]
    fn test_name_strategy_order() {
        let html = page(concat!(
            "<tr><td><span class=\"name\">通用名</span><a href=\"#\">链接名</a></td></tr>",
            "<tr><td><a href=\"/x\">只有链接</a></td></tr>",
            "<tr><td><span class=\"name-cn\"></span><span class=\"name\">后备名</span></td></tr>",
            "<tr><td>无名</td></tr>",
        ));
        let rows = extractor().extract(&html, 1);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(
            names,
            vec![Some("通用名"), Some("只有链接"), Some("后备名"), None]
        );
    }

    #[test]
    fn test_malformed_row_skipped_order_kept() {
        let html = page(concat!(
            "<tr><td>1</td><td>甲</td></tr>",
            "<tr><th>广告</th></tr>",
            "<tr><td>2</td><td>乙</td></tr>",
        ));
        let rows = extractor().extract(&html, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec!["1", "甲"]);
        assert_eq!(rows[1].cells, vec!["2", "乙"]);
    }

    #[test]
    fn test_only_first_tbody_read() {
        let html = "<table><tbody><tr><td>a</td></tr></tbody></table>\
                    <table><tbody><tr><td>b</td></tr></tbody></table>";
        let rows = extractor().extract(html, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells, vec!["a"]);
    }

    #[test]
    fn test_nested_table_rows_not_direct_children() {
        let html = page("<tr><td>1<table><tr><td>inner</td></tr></table></td></tr>");
        let rows = extractor().extract(&html, 1);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_empty_tbody_twice() {
        let ex = extractor();
        let html = page("");
        assert!(ex.extract(&html, 1).is_empty());
        assert!(ex.extract(&html, 1).is_empty());
    }
}
