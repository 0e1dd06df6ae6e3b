use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use unirank_core::catalog::{self, RankTypeSpec, RANK_TYPES};
use unirank_core::config::ScrapeConfig;
use unirank_core::export::XlsxExporter;
use unirank_core::extraction::directory::DirectoryPageSource;
use unirank_core::extraction::webdriver::WebDriverPageSource;
use unirank_core::extraction::PageSource;

use crate::observability;

#[derive(Args)]
pub struct ScrapeArgs {
    /// Rank type: menu number (1-7) or code (e.g. bcur). Prompts if omitted
    #[arg(short, long)]
    rank_type: Option<String>,

    /// Year to scrape; repeat for several (default: this year and the two before)
    #[arg(short, long = "year", value_name = "YEAR")]
    years: Vec<i32>,

    /// TOML config file
    #[arg(short, long, env = "UNIRANK_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// WebDriver endpoint
    #[arg(long, env = "UNIRANK_WEBDRIVER_URL", value_name = "URL")]
    webdriver_url: Option<String>,

    /// Run the browser headless (Chrome only)
    #[arg(long)]
    headless: bool,

    /// Replay saved pages from <DIR>/<code>/<year>/<n>.html instead of a browser
    #[arg(long, value_name = "DIR")]
    pages_dir: Option<PathBuf>,

    /// Directory for the workbook
    #[arg(short, long, env = "UNIRANK_OUTPUT_DIR", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, env = "UNIRANK_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Maximum pages to read per year
    #[arg(long)]
    max_pages: Option<usize>,
}

impl ScrapeArgs {
    /// Command-line values win over the config file.
    fn apply(&self, config: &mut ScrapeConfig) {
        if !self.years.is_empty() {
            config.years = self.years.clone();
        }
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        if self.headless {
            config.headless = true;
        }
        if let Some(dir) = &self.out_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        if let Some(n) = self.max_pages {
            config.max_pages = n;
        }
    }
}

pub fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ScrapeConfig::load(path)?,
        None => ScrapeConfig::default(),
    };
    args.apply(&mut config);

    let (_guard, log_path) = observability::init_file_logging(&config.log_dir)?;
    tracing::debug!(log = %log_path.display(), "file logging enabled");

    let rank_type = match args.rank_type.as_deref() {
        Some(input) => catalog::select(input),
        None => prompt_rank_type()?,
    };
    tracing::info!(rank_type = %rank_type, "selected rank type");
    if !rank_type.has_schema() {
        eprintln!(
            "note: {} has no fixed columns; column names will be inferred",
            rank_type.display_name
        );
    }

    let years = config.resolved_years();
    let mut source: Box<dyn PageSource> = match &args.pages_dir {
        Some(dir) => Box::new(DirectoryPageSource::new(dir)),
        None => Box::new(WebDriverPageSource::connect(config.webdriver_options())?),
    };
    let exporter = XlsxExporter::new(&config.output_dir);

    let report = unirank_core::scrape_and_export(
        source.as_mut(),
        &exporter,
        rank_type,
        &years,
        &config.scrape_options(),
    )?;

    for year in &years {
        match report.tables.iter().find(|t| t.year == *year) {
            Some(t) => println!("  {year}: {} rows", t.table.len()),
            None => println!("  {year}: failed, see {}", log_path.display()),
        }
    }

    match report.path {
        Some(path) => println!("Wrote {}", path.display()),
        None => anyhow::bail!("no year could be scraped for {}", rank_type.short_code),
    }

    Ok(())
}

fn prompt_rank_type() -> anyhow::Result<&'static RankTypeSpec> {
    println!("请输入排名类型：");
    for (i, rt) in RANK_TYPES.iter().enumerate() {
        let unused = if rt.has_schema() { "" } else { "(未使用)" };
        println!("  {}.{}{}", i + 1, rt.display_name, unused);
    }
    print!("请输入对应数字（默认1）: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(catalog::select(&line))
}
