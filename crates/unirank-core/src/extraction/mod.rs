pub mod directory;
pub mod table;
pub mod webdriver;

use crate::error::UnirankError;

pub use table::RowExtractor;

/// A paginated ranking table that can be read one rendered page at a time.
///
/// Implementations own all waiting (page loads, pagination delays); the
/// caller only asks for markup and whether another page exists.
pub trait PageSource {
    /// Navigate to the first page of a ranking table.
    fn open(&mut self, url: &str) -> Result<(), UnirankError>;

    /// Rendered markup of the current page.
    fn current_markup(&mut self) -> Result<String, UnirankError>;

    /// Move to the next page. `Ok(false)` means there is none.
    fn advance(&mut self) -> Result<bool, UnirankError>;

    /// Name of this page backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
