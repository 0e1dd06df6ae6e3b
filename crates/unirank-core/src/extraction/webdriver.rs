use std::time::Duration;

use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use tokio::runtime::Runtime;

use crate::error::UnirankError;
use crate::extraction::PageSource;

/// Link inside the "next page" item of the site's pagination bar.
const NEXT_PAGE_SELECTOR: &str = "li.ant-pagination-next>a";

#[derive(Debug, Clone)]
pub struct WebDriverOptions {
    /// WebDriver endpoint, e.g. a local chromedriver/msedgedriver.
    pub server_url: String,
    /// Run Chrome headless. Edge is only tried for headed sessions.
    pub headless: bool,
    pub implicit_wait: Duration,
    /// Pause after clicking "next" so the table can re-render.
    pub page_delay: Duration,
}

impl Default for WebDriverOptions {
    fn default() -> Self {
        WebDriverOptions {
            server_url: "http://localhost:9515".into(),
            headless: false,
            implicit_wait: Duration::from_secs(5),
            page_delay: Duration::from_millis(1000),
        }
    }
}

/// Reads rendered pages from a real browser through WebDriver.
///
/// The browser API is async; this source owns a current-thread runtime and
/// blocks on every call, so the scrape itself stays synchronous.
pub struct WebDriverPageSource {
    runtime: Runtime,
    driver: Option<WebDriver>,
    options: WebDriverOptions,
}

impl WebDriverPageSource {
    /// Start a browser session, trying Edge first and falling back to Chrome.
    pub fn connect(options: WebDriverOptions) -> Result<Self, UnirankError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let driver = runtime.block_on(start_browser(&options))?;

        Ok(WebDriverPageSource {
            runtime,
            driver: Some(driver),
            options,
        })
    }

    /// Quit the browser session.
    pub fn close(mut self) -> Result<(), UnirankError> {
        match self.driver.take() {
            Some(driver) => self.runtime.block_on(driver.quit()).map_err(webdriver_err),
            None => Ok(()),
        }
    }

    fn driver(&self) -> Result<&WebDriver, UnirankError> {
        self.driver
            .as_ref()
            .ok_or_else(|| UnirankError::WebDriver("browser session already closed".into()))
    }
}

impl PageSource for WebDriverPageSource {
    fn open(&mut self, url: &str) -> Result<(), UnirankError> {
        let driver = self.driver()?;
        let wait = self.options.implicit_wait;
        tracing::info!(url, "opening ranking page");

        self.runtime
            .block_on(async {
                driver.goto(url).await?;
                driver.set_implicit_wait_timeout(wait).await
            })
            .map_err(|e| UnirankError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    fn current_markup(&mut self) -> Result<String, UnirankError> {
        let driver = self.driver()?;
        self.runtime
            .block_on(driver.source())
            .map_err(webdriver_err)
    }

    fn advance(&mut self) -> Result<bool, UnirankError> {
        let driver = self.driver()?;
        let delay = self.options.page_delay;

        self.runtime
            .block_on(async {
                let next = match driver.find(By::Css(NEXT_PAGE_SELECTOR)).await {
                    Ok(el) => el,
                    Err(_) => return Ok(false),
                };
                let class = next.class_name().await?.unwrap_or_default();
                if class.contains("disabled") {
                    return Ok(false);
                }
                next.click().await?;
                tokio::time::sleep(delay).await;
                Ok::<_, WebDriverError>(true)
            })
            .map_err(webdriver_err)
    }

    fn backend_name(&self) -> &str {
        "webdriver"
    }
}

impl Drop for WebDriverPageSource {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            if let Err(e) = self.runtime.block_on(driver.quit()) {
                tracing::warn!(error = %e, "failed to quit browser");
            }
        }
    }
}

async fn start_browser(options: &WebDriverOptions) -> Result<WebDriver, UnirankError> {
    if !options.headless {
        tracing::info!(server = %options.server_url, "starting Edge");
        match WebDriver::new(options.server_url.as_str(), DesiredCapabilities::edge()).await {
            Ok(driver) => return Ok(driver),
            Err(e) => {
                tracing::warn!(error = %e, "failed to start Edge, falling back to Chrome")
            }
        }
    }

    let mut caps = DesiredCapabilities::chrome();
    if options.headless {
        caps.add_chrome_option(
            "args",
            vec![
                "--headless=new",
                "--disable-gpu",
                "--window-size=1920,1080",
            ],
        )
        .map_err(webdriver_err)?;
    }

    tracing::info!(
        server = %options.server_url,
        headless = options.headless,
        "starting Chrome"
    );
    WebDriver::new(options.server_url.as_str(), caps)
        .await
        .map_err(webdriver_err)
}

fn webdriver_err(e: WebDriverError) -> UnirankError {
    UnirankError::WebDriver(e.to_string())
}
