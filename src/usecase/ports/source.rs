use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::dataset::TabularData;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no header row", path.display())]
    MissingHeader { path: PathBuf },
}

/// Where the listings come from. Loaded once at startup.
pub trait DatasetSource: Send + Sync {
    fn describe(&self) -> String;

    fn load(&self) -> Result<TabularData, SourceError>;
}
