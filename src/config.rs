use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use log::LevelFilter;

pub const DEFAULT_PORT: u16 = 8052;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_TITLE: &str = "BERLIN APARTMENT PERFORMANCE ANALYSIS";

#[derive(Parser, Debug, Clone)]
#[command(name = "rentboard", version, about = "Rental listings dashboard")]
pub struct AppConfig {
    /// Listings CSV (default: listings.csv in the app data directory)
    #[arg(long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Port the dashboard is served on when built with the server feature
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Rows per table page
    #[arg(long = "page-size", alias = "page_size", default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(i64).range(1..))]
    pub page_size: i64,

    /// Logging level off, error, warn, info, debug, trace
    #[arg(long = "log-level", alias = "log_level", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Heading shown above the dashboard
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,
}

impl AppConfig {
    pub fn dataset_path(&self) -> Result<PathBuf> {
        match &self.dataset {
            Some(path) => Ok(path.clone()),
            None => default_dataset_path(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "rentboard", "rentboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_dataset_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("listings.csv"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
