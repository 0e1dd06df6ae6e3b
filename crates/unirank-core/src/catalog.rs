use serde::Serialize;
use std::fmt;

/// URL of one ranking table; `{rankType}` and `{year}` are substituted.
pub const DEFAULT_URL_TEMPLATE: &str = "https://www.shanghairanking.cn/rankings/{rankType}/{year}";

/// One ranking table published by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankTypeSpec {
    pub display_name: &'static str,
    pub short_code: &'static str,
}

/// All rank types, in menu order. Only the first three carry a column schema.
pub const RANK_TYPES: &[RankTypeSpec] = &[
    BCUR,
    RankTypeSpec::new("中国高职院校排名", "bcvcr"),
    RankTypeSpec::new("世界大学学术排名", "arwu"),
    RankTypeSpec::new("中国最好学科排名", "bcsr"),
    RankTypeSpec::new("中国大学专业排名", "bcmr"),
    RankTypeSpec::new("世界一流学科排名", "gras"),
    RankTypeSpec::new("全球体育类院系学术排名", "grsssd"),
];

const BCUR: RankTypeSpec = RankTypeSpec::new("中国大学排名", "bcur");

/// Used when a selection is empty or not understood.
pub const DEFAULT_RANK_TYPE: &RankTypeSpec = &BCUR;

impl RankTypeSpec {
    pub const fn new(display_name: &'static str, short_code: &'static str) -> Self {
        RankTypeSpec {
            display_name,
            short_code,
        }
    }

    /// Whether a fixed column schema exists for this rank type.
    pub fn has_schema(&self) -> bool {
        crate::parsing::schema::known_schema(self.short_code).is_some()
    }

    pub fn url(&self, template: &str, year: i32) -> String {
        template
            .replace("{rankType}", self.short_code)
            .replace("{year}", &year.to_string())
    }
}

impl fmt::Display for RankTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.short_code)
    }
}

pub fn find(short_code: &str) -> Option<&'static RankTypeSpec> {
    let code = short_code.trim();
    RANK_TYPES
        .iter()
        .find(|rt| rt.short_code.eq_ignore_ascii_case(code))
}

/// Interpret a menu answer: a 1-based menu number or a short code.
///
/// Anything else, including empty input, falls back to [`DEFAULT_RANK_TYPE`].
pub fn select(input: &str) -> &'static RankTypeSpec {
    let input = input.trim();

    if let Ok(n) = input.parse::<usize>() {
        if (1..=RANK_TYPES.len()).contains(&n) {
            return &RANK_TYPES[n - 1];
        }
    } else if let Some(rt) = find(input) {
        return rt;
    }

    tracing::warn!(
        input,
        default = DEFAULT_RANK_TYPE.short_code,
        "invalid rank type selection, using default"
    );
    DEFAULT_RANK_TYPE
}
