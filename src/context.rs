use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::domain::aggregate::Aggregates;
use crate::domain::entities::dataset::Dataset;
use crate::usecase::ports::source::DatasetSource;
use crate::usecase::services::figure_service::FigureService;
use crate::usecase::services::query_service::QueryService;

/// Everything the UI reads, built once at startup and shared by reference.
/// There is no mutation path after construction.
#[derive(Clone)]
pub struct AppContext {
    pub title: String,
    pub source: String,
    pub default_page_size: i64,
    pub dataset: Arc<Dataset>,
    pub queries: QueryService,
    pub figures: FigureService,
}

impl AppContext {
    pub fn load(source: &dyn DatasetSource, title: &str, default_page_size: i64) -> Result<Self> {
        let data = source
            .load()
            .with_context(|| format!("failed to load dataset from {}", source.describe()))?;
        let dataset = Arc::new(Dataset::from_tabular(data));
        info!(
            "loaded {} listings with {} columns from {}",
            dataset.len(),
            dataset.columns().len(),
            source.describe()
        );
        Ok(Self::from_dataset(
            dataset,
            source.describe(),
            title,
            default_page_size,
        ))
    }

    pub fn from_dataset(
        dataset: Arc<Dataset>,
        source: String,
        title: &str,
        default_page_size: i64,
    ) -> Self {
        let aggregates = Arc::new(Aggregates::compute(&dataset));
        Self {
            title: title.to_string(),
            source,
            default_page_size,
            queries: QueryService::new(dataset.clone()),
            figures: FigureService::new(aggregates),
            dataset,
        }
    }
}
