//! The contract between an invocation and whatever shows its results.

use travel_scrape_table::{ExportedFile, Table};

/// Displays tables, accepts downloads, and shows status messages.
///
/// The pipeline decides what to show; implementations decide how.
pub trait Frontend {
    /// Shows `table` under `title`.
    fn display_table(&self, title: &str, table: &Table);

    /// Hands `file` to the user (a save, a download button, ...).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file could not be delivered.
    fn offer_download(&self, file: &ExportedFile) -> std::io::Result<()>;

    fn report_warning(&self, message: &str);

    fn report_error(&self, message: &str);

    fn report_success(&self, message: &str);
}
