use std::path::{Path, PathBuf};

use log::debug;

use crate::domain::entities::dataset::TabularData;
use crate::usecase::ports::source::{DatasetSource, SourceError};

/// Reads listings from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, source: csv::Error) -> SourceError {
        SourceError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

impl DatasetSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<TabularData, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| self.read_error(err))?;
        let headers = reader
            .headers()
            .map_err(|err| self.read_error(err))?
            .clone();

        if headers.is_empty() {
            return Err(SourceError::MissingHeader {
                path: self.path.clone(),
            });
        }

        let columns: Vec<String> = headers.iter().map(|name| name.trim().to_string()).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| self.read_error(err))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(
            "read {} rows x {} columns from {}",
            rows.len(),
            columns.len(),
            self.path.display()
        );
        Ok(TabularData { columns, rows })
    }
}
