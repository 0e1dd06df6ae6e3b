use std::path::{Path, PathBuf};

use crate::error::UnirankError;
use crate::extraction::PageSource;

/// Replays ranking pages saved to disk.
///
/// Layout: `<root>/<rank type>/<year>/<page>.html`, where `<page>` is the
/// 1-based page number. The rank type and year are taken from the last two
/// path segments of the URL passed to [`PageSource::open`], which matches
/// the default URL template.
pub struct DirectoryPageSource {
    root: PathBuf,
    pages: Vec<PathBuf>,
    current: Option<usize>,
}

impl DirectoryPageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryPageSource {
            root: root.into(),
            pages: Vec::new(),
            current: None,
        }
    }

    /// Directory holding the pages for one URL.
    pub fn year_dir(&self, url: &str) -> Option<PathBuf> {
        let mut segments = url
            .trim_end_matches('/')
            .rsplit('/')
            .filter(|s| !s.is_empty());
        let year = segments.next()?;
        let code = segments.next()?;
        Some(self.root.join(code).join(year))
    }
}

impl PageSource for DirectoryPageSource {
    fn open(&mut self, url: &str) -> Result<(), UnirankError> {
        let dir = self.year_dir(url).ok_or_else(|| UnirankError::Navigation {
            url: url.to_string(),
            reason: "URL does not end in /<rank type>/<year>".into(),
        })?;

        let pages = list_pages(&dir).map_err(|e| UnirankError::Navigation {
            url: url.to_string(),
            reason: format!("{}: {e}", dir.display()),
        })?;

        if pages.is_empty() {
            return Err(UnirankError::Navigation {
                url: url.to_string(),
                reason: format!("no saved pages in {}", dir.display()),
            });
        }

        tracing::debug!(dir = %dir.display(), pages = pages.len(), "opened saved pages");
        self.pages = pages;
        self.current = Some(0);
        Ok(())
    }

    fn current_markup(&mut self) -> Result<String, UnirankError> {
        let path = self
            .current
            .and_then(|i| self.pages.get(i))
            .ok_or(UnirankError::NoPageOpen)?;
        Ok(std::fs::read_to_string(path)?)
    }

    fn advance(&mut self) -> Result<bool, UnirankError> {
        let current = self.current.ok_or(UnirankError::NoPageOpen)?;
        if current + 1 < self.pages.len() {
            self.current = Some(current + 1);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn backend_name(&self) -> &str {
        "directory"
    }
}

/// `*.html` files with a numeric stem, in page-number order.
fn list_pages(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut numbered: Vec<(u32, PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_html = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("html"))
            .unwrap_or(false);
        if !is_html {
            continue;
        }
        if let Some(n) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u32>().ok())
        {
            numbered.push((n, path));
        }
    }

    numbered.sort_by_key(|(n, _)| *n);
    Ok(numbered.into_iter().map(|(_, p)| p).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_dir_from_url() {
        let source = DirectoryPageSource::new("/data");
        assert_eq!(
            source.year_dir("https://www.shanghairanking.cn/rankings/bcur/2024"),
            Some(PathBuf::from("/data/bcur/2024"))
        );
        assert_eq!(
            source.year_dir("https://example.org/rankings/arwu/2023/"),
            Some(PathBuf::from("/data/arwu/2023"))
        );
    }

    #[test]
    fn test_pages_replayed_in_numeric_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("bcur").join("2024");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("10.html"), "ten").unwrap();
        std::fs::write(dir.join("2.html"), "two").unwrap();
        std::fs::write(dir.join("1.html"), "one").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let mut source = DirectoryPageSource::new(tmp.path());
        source.open("https://x/rankings/bcur/2024").unwrap();

        let mut seen = vec![source.current_markup().unwrap()];
        while source.advance().unwrap() {
            seen.push(source.current_markup().unwrap());
        }
        assert_eq!(seen, vec!["one", "two", "ten"]);
    }

    #[test]
    fn test_missing_year_is_navigation_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = DirectoryPageSource::new(tmp.path());
        let err = source.open("https://x/rankings/bcur/1999").unwrap_err();
        assert!(matches!(err, UnirankError::Navigation { .. }));
    }

    #[test]
    fn test_markup_before_open() {
        let mut source = DirectoryPageSource::new("/nowhere");
        assert!(matches!(
            source.current_markup(),
            Err(UnirankError::NoPageOpen)
        ));
    }
}
