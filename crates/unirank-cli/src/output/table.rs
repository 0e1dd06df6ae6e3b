use unicode_width::UnicodeWidthStr;
use unirank_core::model::TypedTable;

/// Render a typed table as aligned text. `limit` caps the number of rows.
pub fn format_table(table: &TypedTable, limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(table.rows.len()).min(table.rows.len());

    let header: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    let body: Vec<Vec<String>> = table.rows[..shown]
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&header, &widths));
    out.push('\n');
    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&format!("  {}", "-".repeat(rule_width)));
    for row in &body {
        out.push('\n');
        out.push_str(&format_line(row, &widths));
    }
    if shown < table.rows.len() {
        out.push_str(&format!("\n  … {} more row(s)", table.rows.len() - shown));
    }
    out
}

/// One line per column: name and how it was typed.
pub fn format_columns(table: &TypedTable) -> String {
    table
        .columns
        .iter()
        .map(|c| format!("  {} ({})", c.name, c.kind))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell}{}", " ".repeat(w.saturating_sub(cell.width()))))
        .collect();
    format!("  {}", padded.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use unirank_core::model::{CellValue, ColumnKind, TypedColumn};

    fn sample() -> TypedTable {
        TypedTable {
            columns: vec![
                TypedColumn {
                    name: "排名".into(),
                    kind: ColumnKind::Rank,
                },
                TypedColumn {
                    name: "总分".into(),
                    kind: ColumnKind::Score,
                },
            ],
            rows: vec![
                vec![CellValue::Integer(1), CellValue::Float(Some(85.5))],
                vec![CellValue::Integer(2), CellValue::Float(None)],
            ],
        }
    }

    #[test]
    fn aligns_wide_characters() {
        let out = format_table(&sample(), None);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "  排名  总分");
        assert_eq!(lines[2], "  1     85.5");
        assert_eq!(lines[3], "  2");
    }

    #[test]
    fn limit_reports_hidden_rows() {
        let out = format_table(&sample(), Some(1));
        assert!(out.ends_with("… 1 more row(s)"));
    }

    #[test]
    fn columns_list_kinds() {
        assert_eq!(format_columns(&sample()), "  排名 (rank)\n  总分 (score)\n");
    }
}
