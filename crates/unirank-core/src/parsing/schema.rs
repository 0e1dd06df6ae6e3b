use crate::model::ColumnSchema;

const BCUR_COLUMNS: &[&str] = &["排名", "学校名称", "省市", "类型", "总分", "办学层次"];
const BCVCR_COLUMNS: &[&str] = &["排名", "学校名称", "省市", "总分"];
const ARWU_COLUMNS: &[&str] = &[
    "排名",
    "学校名称",
    "国家/地区",
    "国家/地区排名",
    "总分",
    "校友获奖",
];

/// Fixed column names for the rank types whose table layout is known.
pub fn known_schema(short_code: &str) -> Option<&'static [&'static str]> {
    match short_code {
        "bcur" => Some(BCUR_COLUMNS),
        "bcvcr" => Some(BCVCR_COLUMNS),
        "arwu" => Some(ARWU_COLUMNS),
        _ => None,
    }
}

/// Pick the column names for a scrape.
///
/// A known rank type always wins. Otherwise the observed cell count decides:
/// six cells read as a `bcur` table, four as `bcvcr`, anything else gets
/// synthetic `col_0..col_{n-1}` names.
///
/// The count heuristic cannot tell apart two layouts that happen to share a
/// column count; a six-column table of some other rank type is labelled with
/// `bcur` names.
pub fn resolve(rank_type_hint: Option<&str>, observed_cell_count: usize) -> ColumnSchema {
    if let Some(columns) = rank_type_hint.and_then(known_schema) {
        return to_schema(columns);
    }

    match observed_cell_count {
        6 => to_schema(BCUR_COLUMNS),
        4 => to_schema(BCVCR_COLUMNS),
        n => synthetic(n),
    }
}

fn synthetic(count: usize) -> ColumnSchema {
    (0..count).map(|i| format!("col_{i}")).collect()
}

fn to_schema(columns: &[&str]) -> ColumnSchema {
    columns.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_rank_type_ignores_cell_count() {
        for count in [0, 1, 4, 6, 11] {
            assert_eq!(resolve(Some("bcvcr"), count), to_schema(BCVCR_COLUMNS));
            assert_eq!(resolve(Some("arwu"), count), to_schema(ARWU_COLUMNS));
        }
    }

    #[test]
    fn six_cells_infer_bcur() {
        assert_eq!(
            resolve(Some("gras"), 6),
            vec!["排名", "学校名称", "省市", "类型", "总分", "办学层次"]
        );
    }

    #[test]
    fn four_cells_infer_bcvcr() {
        assert_eq!(resolve(None, 4), vec!["排名", "学校名称", "省市", "总分"]);
    }

    #[test]
    fn other_counts_get_synthetic_names() {
        assert_eq!(resolve(Some("bcsr"), 3), vec!["col_0", "col_1", "col_2"]);
        assert!(resolve(None, 0).is_empty());
    }

    #[test]
    fn resolve_is_deterministic() {
        assert_eq!(resolve(Some("bcmr"), 5), resolve(Some("bcmr"), 5));
    }
}
