//! Terminal rendering of scrape results.

use std::path::PathBuf;

use console::style;
use travel_scrape_cli_utils::MultiProgress;
use travel_scrape_pipeline::Frontend;
use travel_scrape_table::render::render;
use travel_scrape_table::{ExportedFile, Table};

/// Prints tables and messages to stdout and saves downloads into a
/// directory.
///
/// Output is routed through [`MultiProgress::suspend`] so it never tears an
/// active progress bar.
pub struct TerminalFrontend {
    output_dir: PathBuf,
    multi: MultiProgress,
}

impl TerminalFrontend {
    #[must_use]
    pub const fn new(output_dir: PathBuf, multi: MultiProgress) -> Self {
        Self { output_dir, multi }
    }

    fn print(&self, text: &str) {
        self.multi.suspend(|| println!("{text}"));
    }
}

impl Frontend for TerminalFrontend {
    fn display_table(&self, title: &str, table: &Table) {
        self.print(&render(&style(title).bold().to_string(), table));
    }

    fn offer_download(&self, file: &ExportedFile) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&file.filename);
        std::fs::write(&path, &file.bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), file.bytes.len());
        self.print(&format!(
            "{} {}",
            style("Saved").green(),
            style(path.display()).underlined()
        ));
        Ok(())
    }

    fn report_warning(&self, message: &str) {
        self.print(&format!("{} {message}", style("⚠").yellow()));
    }

    fn report_error(&self, message: &str) {
        self.print(&format!("{} {message}", style("✖").red().bold()));
    }

    fn report_success(&self, message: &str) {
        self.print(&format!("{} {message}", style("✔").green()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_scrape_table::UTF8_BOM;

    #[test]
    fn downloads_land_in_the_output_directory() {
        let dir = std::env::temp_dir().join(format!("travel_scrape_cli_{}", std::process::id()));
        let frontend = TerminalFrontend::new(dir.clone(), MultiProgress::new());

        let mut table = Table::new(&["Train Name"]);
        table.push_row(vec!["Godavari Exp".to_owned()]).unwrap();
        let file = table.export("train_details.csv").unwrap();
        frontend.offer_download(&file).unwrap();

        let written = std::fs::read(dir.join("train_details.csv")).unwrap();
        assert!(written.starts_with(UTF8_BOM));
        assert_eq!(written, file.bytes);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
