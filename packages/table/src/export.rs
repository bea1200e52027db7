//! CSV serialisation.
//!
//! Exports are UTF-8 with a leading byte-order mark so spreadsheet tools
//! pick the right encoding for non-ASCII station and operator names.

use crate::{Table, TableError};

/// Byte-order mark prefixed to every export.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// MIME type of exported files.
pub const CSV_MIME: &str = "text/csv";

/// A serialised table ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl Table {
    /// Serialises the table as comma-delimited CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the CSV writer fails.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, TableError> {
        let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.into_inner().map_err(|e| TableError::Io(e.into_error()))
    }

    /// Serialises the table for download under `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the CSV writer fails.
    pub fn export(&self, filename: &str) -> Result<ExportedFile, TableError> {
        let bytes = self.to_csv_bytes()?;
        log::debug!(
            "Exported {} row(s) to {filename} ({} bytes)",
            self.len(),
            bytes.len()
        );
        Ok(ExportedFile {
            filename: filename.to_owned(),
            bytes,
            mime: CSV_MIME,
        })
    }

    /// Parses CSV produced by [`Table::to_csv_bytes`]; a leading BOM is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Csv`] if the input is not valid CSV or a row's
    /// width differs from the header's.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new().from_reader(body);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        let mut table = Self::new(&headers);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(str::to_owned).collect())?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_scrape_listing_models::{Listing, TrainRecord};

    fn train(name: &str, prices: &str, frequency: &str) -> TrainRecord {
        TrainRecord::from_row([
            name.to_owned(),
            "20:05".to_owned(),
            "08:35".to_owned(),
            "Kacheguda".to_owned(),
            "12h 30m".to_owned(),
            "Chittoor".to_owned(),
            prices.to_owned(),
            frequency.to_owned(),
        ])
    }

    #[test]
    fn export_is_bom_prefixed_csv() {
        let table = Table::from_listings(vec![train("Venkatadri", "SL ₹ 425", "Runs Daily")]);
        let file = table.export("train_details.csv").unwrap();

        assert_eq!(file.filename, "train_details.csv");
        assert_eq!(file.mime, "text/csv");
        assert!(file.bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&file.bytes[UTF8_BOM.len()..]).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, TrainRecord::HEADERS.join(","));
    }

    #[test]
    fn round_trip_preserves_separators_and_extended_characters() {
        let table = Table::from_listings(vec![
            train("Godavari Exp", "SL ₹ 350; 3A ₹ 940; 2A ₹ 1,325", "M, W, F"),
            train("\"Special\" Mail", "N/A", "Runs Daily"),
            train("विशाखा एक्सप्रेस", "CC ₹ 780", "T, S"),
        ]);

        let bytes = table.to_csv_bytes().unwrap();
        let parsed = Table::from_csv_bytes(&bytes).unwrap();

        assert_eq!(parsed, table);
        assert_eq!(parsed.rows()[0][6], "SL ₹ 350; 3A ₹ 940; 2A ₹ 1,325");
    }

    #[test]
    fn empty_table_exports_header_only() {
        let table = Table::new(TrainRecord::HEADERS);
        let parsed = Table::from_csv_bytes(&table.to_csv_bytes().unwrap()).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.headers().len(), 8);
    }
}
