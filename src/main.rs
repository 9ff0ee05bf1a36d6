mod app;
mod config;
mod context;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use log::{debug, error, info};

use crate::app::App;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::infra::import::csv::CsvSource;

fn main() {
    let config = AppConfig::parse();
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();
    debug!("{config:?}");

    if let Err(err) = run(&config) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<()> {
    let source = CsvSource::new(config.dataset_path()?);
    let context = AppContext::load(&source, &config.title, config.page_size)?;
    launch(config, context)
}

#[cfg(feature = "desktop")]
fn launch(config: &AppConfig, context: AppContext) -> Result<()> {
    let webview_data_dir = crate::config::default_webview_data_dir()?;
    info!("opening dashboard window");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title(config.title.clone()))
                .with_data_directory(webview_data_dir),
        )
        .with_context(context)
        .launch(App);
    Ok(())
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn launch(config: &AppConfig, context: AppContext) -> Result<()> {
    // the server launcher binds to IP and PORT from the environment
    std::env::set_var("IP", "0.0.0.0");
    std::env::set_var("PORT", config.port.to_string());
    info!("serving dashboard on port {}", config.port);

    dioxus::LaunchBuilder::new().with_context(context).launch(App);
    Ok(())
}

#[cfg(not(any(feature = "desktop", feature = "server")))]
fn launch(_config: &AppConfig, _context: AppContext) -> Result<()> {
    anyhow::bail!("built without a launch target; enable the desktop or server feature")
}
