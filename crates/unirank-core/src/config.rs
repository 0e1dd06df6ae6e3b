use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Datelike;
use serde::Deserialize;

use crate::catalog::DEFAULT_URL_TEMPLATE;
use crate::error::UnirankError;
use crate::extraction::webdriver::WebDriverOptions;
use crate::scrape::{distinct_years, ScrapeOptions};

/// Number of years scraped when none are configured: this year and the two
/// before it.
pub const DEFAULT_YEAR_SPAN: i32 = 3;

/// Settings for a scrape run, loadable from a TOML file.
///
/// Every key is optional; missing keys take the defaults below.
///
/// ```toml
/// webdriver_url = "http://localhost:9515"
/// headless = true
/// max_pages = 20
/// years = [2025, 2024]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeConfig {
    pub url_template: String,
    pub webdriver_url: String,
    pub headless: bool,
    pub max_pages: usize,
    pub page_delay_ms: u64,
    pub implicit_wait_secs: u64,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Empty means [`default_years`].
    pub years: Vec<i32>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            webdriver_url: "http://localhost:9515".into(),
            headless: false,
            max_pages: 20,
            page_delay_ms: 1000,
            implicit_wait_secs: 5,
            output_dir: PathBuf::from("output"),
            log_dir: PathBuf::from("logs"),
            years: Vec::new(),
        }
    }
}

impl ScrapeConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, UnirankError> {
        let content = std::fs::read_to_string(path).map_err(|e| UnirankError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, source: &Path) -> Result<Self, UnirankError> {
        toml::from_str(content).map_err(|e| UnirankError::Config {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Years to scrape, newest first when defaulted. Repeats are dropped.
    pub fn resolved_years(&self) -> Vec<i32> {
        if self.years.is_empty() {
            default_years(chrono::Local::now().year())
        } else {
            distinct_years(&self.years)
        }
    }

    pub fn scrape_options(&self) -> ScrapeOptions {
        ScrapeOptions {
            url_template: self.url_template.clone(),
            max_pages: self.max_pages.max(1),
        }
    }

    pub fn webdriver_options(&self) -> WebDriverOptions {
        WebDriverOptions {
            server_url: self.webdriver_url.clone(),
            headless: self.headless,
            implicit_wait: Duration::from_secs(self.implicit_wait_secs),
            page_delay: Duration::from_millis(self.page_delay_ms),
        }
    }
}

/// `current_year` and the years before it, newest first.
pub fn default_years(current_year: i32) -> Vec<i32> {
    (0..DEFAULT_YEAR_SPAN).map(|i| current_year - i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_years() {
        assert_eq!(default_years(2026), vec![2026, 2025, 2024]);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let cfg = ScrapeConfig::parse("", Path::new("unirank.toml")).unwrap();
        assert_eq!(cfg, ScrapeConfig::default());
        assert_eq!(cfg.resolved_years().len(), 3);
    }

    #[test]
    fn test_repeated_years_dropped() {
        let toml = "years = [2024, 2023, 2024]";
        let cfg = ScrapeConfig::parse(toml, Path::new("unirank.toml")).unwrap();
        assert_eq!(cfg.resolved_years(), vec![2024, 2023]);
    }

    #[test]
    fn test_partial_file() {
        let cfg = ScrapeConfig::parse(
            "headless = true\nmax_pages = 3\nyears = [2022]\noutput_dir = \"out\"\n",
            Path::new("unirank.toml"),
        )
        .unwrap();
        assert!(cfg.headless);
        assert_eq!(cfg.scrape_options().max_pages, 3);
        assert_eq!(cfg.resolved_years(), vec![2022]);
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.webdriver_url, "http://localhost:9515");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ScrapeConfig::parse("max_page = 3", Path::new("unirank.toml")).unwrap_err();
        assert!(matches!(err, UnirankError::Config { .. }));
    }

    #[test]
    fn test_zero_pages_still_reads_first() {
        let cfg = ScrapeConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert_eq!(cfg.scrape_options().max_pages, 1);
    }
}
