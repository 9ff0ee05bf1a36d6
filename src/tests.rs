use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::{cell_text, page_label, sort_indicator, status_line};
use crate::config::{default_dataset_path, ensure_webview_data_dir, AppConfig};
use crate::context::AppContext;
use crate::domain::entities::dataset::{Dataset, TabularData, Value};
use crate::domain::entities::query::{SortDirection, SortKey, TableState};
use crate::domain::error::QueryError;
use crate::infra::import::csv::CsvSource;
use crate::ui::state::app_state::toggle_selection;
use crate::ui::styles::{root_container_style, table_container_style, table_header_cell_style};
use crate::usecase::ports::source::{DatasetSource, SourceError};

const LISTINGS_CSV: &str = "\
neighborhood,monthly_rent,price_per_square_meter,sq_meters,bedrooms,bathrooms,floor,month
Mitte,1500,20,75,2,1,3,2023-03
Pankow,900,12.5,72,3,1,1,2023-02
Mitte,1100,18,61,1,1,5,2023-03
Kreuzberg,1300,17,76,2,2,2,2023-01
Pankow,700,11,64,2,1,0,2023-02
";

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("rentboard-{prefix}-{nanos}"))
}

fn write_listings(prefix: &str, content: &str) -> (PathBuf, PathBuf) {
    let temp_dir = unique_test_dir(prefix);
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("listings.csv");
    fs::write(&csv_path, content).expect("should write csv fixture");
    (temp_dir, csv_path)
}

fn load_context(prefix: &str) -> (PathBuf, AppContext) {
    let (temp_dir, csv_path) = write_listings(prefix, LISTINGS_CSV);
    let context = AppContext::load(&CsvSource::new(&csv_path), "Listings", 2)
        .expect("context should load");
    (temp_dir, context)
}

fn sequential_dataset(rows: usize) -> Dataset {
    Dataset::from_tabular(TabularData {
        columns: vec!["id".into(), "bedrooms".into()],
        rows: (0..rows)
            .map(|idx| vec![idx.to_string(), (idx % 4).to_string()])
            .collect(),
    })
}

fn ids(context: &AppContext, state: &TableState) -> Vec<String> {
    context
        .queries
        .render_page(state)
        .expect("query should succeed")
        .rows
        .iter()
        .map(|record| cell_text(record, "neighborhood"))
        .collect()
}

#[test]
fn csv_source_reads_headers_and_rows() {
    let (temp_dir, csv_path) = write_listings("csv-read", " name ,city\nAlice,Paris\nBob,Tokyo\n");

    let source = CsvSource::new(&csv_path);
    let data = source.load().expect("load should succeed");

    assert_eq!(source.path(), csv_path.as_path());
    assert_eq!(data.columns, vec!["name", "city"], "headers should be trimmed");
    assert_eq!(data.rows.len(), 2, "row count should match csv rows");
    assert_eq!(data.rows[0][1], "Paris", "expected imported cell value");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_source_pads_short_rows() {
    let (temp_dir, csv_path) = write_listings("csv-short", "name,rent\nAlice,900\nBob\n");

    let data = CsvSource::new(&csv_path).load().expect("load should succeed");
    let dataset = Dataset::from_tabular(data);

    assert!(
        dataset
            .value_by_name(1, "rent")
            .expect("padded cell should exist")
            .is_missing(),
        "missing numeric cell should be NaN"
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_source_reports_missing_file() {
    let temp_dir = unique_test_dir("csv-missing");
    let source = CsvSource::new(temp_dir.join("nope.csv"));

    let err = source.load().expect_err("missing file should fail");

    assert!(matches!(err, SourceError::Read { .. }), "unexpected error: {err:?}");
    assert!(
        err.to_string().contains("nope.csv"),
        "error should name the file: {err}"
    );
}

#[test]
fn csv_source_requires_header_row() {
    let (temp_dir, csv_path) = write_listings("csv-empty", "");

    let err = CsvSource::new(&csv_path)
        .load()
        .expect_err("empty file should fail");

    assert!(
        matches!(err, SourceError::MissingHeader { .. }),
        "unexpected error: {err:?}"
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn context_load_wraps_source_errors() {
    let temp_dir = unique_test_dir("context-missing");
    let source = CsvSource::new(temp_dir.join("listings.csv"));

    let err = AppContext::load(&source, "Listings", 20)
        .err()
        .expect("load should fail");

    assert!(
        format!("{err:#}").contains("failed to load dataset"),
        "context should describe the failure: {err:#}"
    );
}

#[test]
fn context_load_builds_queries_and_figures() {
    let (temp_dir, context) = load_context("context-load");

    assert_eq!(context.dataset.len(), 5);
    assert_eq!(context.default_page_size, 2);
    assert_eq!(
        context.figures.neighborhoods(),
        &["Mitte".to_string(), "Pankow".to_string(), "Kreuzberg".to_string()]
    );
    assert_eq!(
        context.dataset.value_by_name(1, "price_per_square_meter"),
        Some(&Value::Number(12.5))
    );

    let page = context
        .queries
        .render_page(&TableState::first_page(2))
        .expect("first page should render");
    assert_eq!(page.total_rows, 5);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.columns.first().map(String::as_str), Some("bathrooms"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn filter_and_sort_compose_over_loaded_listings() {
    let (temp_dir, context) = load_context("compose");
    let state = TableState {
        page_current: 0,
        page_size: 10,
        sort_by: vec![SortKey::desc("monthly_rent")],
        filter_query: "{bedrooms} ge 2 && {neighborhood} ne 'Kreuzberg'".to_string(),
    };

    let page = context.queries.render_page(&state).expect("query should succeed");
    let rents: Vec<String> = page
        .rows
        .iter()
        .map(|record| cell_text(record, "monthly_rent"))
        .collect();

    assert_eq!(rents, vec!["1500", "900", "700"]);
    assert_eq!(page.total_rows, 3);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn empty_query_returns_every_row_in_file_order() {
    let (temp_dir, context) = load_context("empty-query");
    let state = TableState::first_page(10);

    assert_eq!(
        ids(&context, &state),
        vec!["Mitte", "Pankow", "Mitte", "Kreuzberg", "Pankow"]
    );

    let unparseable = TableState {
        filter_query: "nothing to see here".to_string(),
        ..TableState::first_page(10)
    };
    assert_eq!(ids(&context, &unparseable).len(), 5);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn chained_filters_match_sequential_application_in_any_order() {
    let (temp_dir, context) = load_context("chained");
    let run = |query: &str| {
        let state = TableState {
            filter_query: query.to_string(),
            ..TableState::first_page(10)
        };
        context
            .queries
            .render_page(&state)
            .expect("query should succeed")
    };

    let forward = run("{neighborhood} eq 'Pankow' && {monthly_rent} gt 800");
    let backward = run("{monthly_rent} gt 800 && {neighborhood} eq 'Pankow'");

    assert_eq!(forward, backward);
    assert_eq!(forward.total_rows, 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn render_page_is_idempotent() {
    let (temp_dir, context) = load_context("idempotent");
    let state = TableState {
        page_current: 1,
        page_size: 2,
        sort_by: vec![SortKey::asc("neighborhood"), SortKey::desc("bedrooms")],
        filter_query: "{month} datestartswith '2023'".to_string(),
    };

    let first = serde_json::to_string(&context.queries.render_page(&state).expect("first run"))
        .expect("page should serialize");
    let second = serde_json::to_string(&context.queries.render_page(&state).expect("second run"))
        .expect("page should serialize");

    assert_eq!(first, second);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn table_state_deserializes_from_wire_json() {
    let json = r#"{
        "page_current": 2,
        "page_size": 5,
        "sort_by": [{"column_id": "bedrooms", "direction": "desc"}],
        "filter_query": "{bedrooms} eq 3"
    }"#;

    let state: TableState = serde_json::from_str(json).expect("state should deserialize");

    assert_eq!(state.page_current, 2);
    assert_eq!(
        state.sort_by,
        vec![SortKey {
            column: "bedrooms".to_string(),
            direction: SortDirection::Desc,
        }]
    );

    let minimal: TableState = serde_json::from_str(r#"{"page_current": 0, "page_size": 10}"#)
        .expect("optional fields should default");
    assert!(minimal.sort_by.is_empty());
    assert!(minimal.filter_query.is_empty());
}

#[test]
fn page_past_the_end_is_empty_not_an_error() {
    let context = AppContext::from_dataset(
        Arc::new(sequential_dataset(23)),
        "memory".to_string(),
        "Listings",
        5,
    );
    let page = |index| {
        context
            .queries
            .render_page(&TableState {
                page_current: index,
                ..TableState::first_page(5)
            })
            .expect("page should render")
    };

    assert_eq!(page(4).rows.len(), 3);
    assert!(page(5).rows.is_empty());
    assert_eq!(page(5).page_count, 5);
}

#[test]
fn invalid_page_spec_is_rejected() {
    let context = AppContext::from_dataset(
        Arc::new(sequential_dataset(3)),
        "memory".to_string(),
        "Listings",
        5,
    );

    let negative = TableState {
        page_current: -1,
        ..TableState::first_page(5)
    };
    assert_eq!(
        context.queries.render_page(&negative),
        Err(QueryError::InvalidPageIndex(-1))
    );
    assert_eq!(
        context.queries.render_page(&TableState::first_page(0)),
        Err(QueryError::InvalidPageSize(0))
    );
}

#[test]
fn sort_indicator_marks_position_in_multi_sort() {
    let single = vec![SortKey::asc("bedrooms")];
    let multi = vec![SortKey::asc("bedrooms"), SortKey::desc("monthly_rent")];

    assert_eq!(sort_indicator(&single, "bedrooms"), " ▲");
    assert_eq!(sort_indicator(&multi, "monthly_rent"), " ▼2");
    assert_eq!(sort_indicator(&multi, "floor"), "");
}

#[test]
fn cell_text_formats_values_for_display() {
    let dataset = Dataset::from_tabular(TabularData {
        columns: vec!["rent".into(), "name".into()],
        rows: vec![
            vec!["1200".into(), "Mitte".into()],
            vec!["".into(), "Pankow".into()],
        ],
    });

    assert_eq!(cell_text(&dataset.record(0), "rent"), "1200");
    assert_eq!(cell_text(&dataset.record(1), "rent"), "");
    assert_eq!(cell_text(&dataset.record(1), "missing"), "");
}

#[test]
fn page_label_is_one_based() {
    assert_eq!(page_label(0, 3), "Page 1 of 3");
    assert_eq!(page_label(0, 0), "Page 1 of 1");
}

#[test]
fn status_line_reports_match_count_and_source() {
    let dataset = sequential_dataset(4);

    let status = status_line(&dataset, "listings.csv", 2);

    assert!(status.starts_with("2 of 4 listings match"), "{status}");
    assert!(status.contains("listings.csv"), "{status}");
}

#[test]
fn toggle_selection_adds_then_removes() {
    let selected = toggle_selection(&[], "Mitte");
    assert_eq!(selected, vec!["Mitte"]);

    let selected = toggle_selection(&selected, "Pankow");
    assert_eq!(selected, vec!["Mitte", "Pankow"]);

    let selected = toggle_selection(&selected, "Mitte");
    assert_eq!(selected, vec!["Pankow"]);
}

#[test]
fn table_header_cell_style_is_sticky_and_opaque() {
    let style = table_header_cell_style();

    assert!(style.contains("position: sticky"));
    assert!(style.contains("top: 0"));
    assert!(style.contains("background:"));
}

#[test]
fn table_container_style_scrolls() {
    let style = table_container_style();

    assert!(style.contains("overflow: auto"));
    assert!(style.contains("min-height: 0"));
}

#[test]
fn root_container_style_uses_dark_theme() {
    let style = root_container_style();

    assert!(style.contains("background: #111111"));
    assert!(style.contains("color: #7FDBFF"));
}

#[test]
fn config_defaults_match_dashboard() {
    use clap::Parser;

    let config = AppConfig::try_parse_from(["rentboard"]).expect("defaults should parse");

    assert_eq!(config.port, 8052);
    assert_eq!(config.page_size, 20);
    assert_eq!(config.log_level, log::LevelFilter::Info);
    assert_eq!(config.title, "BERLIN APARTMENT PERFORMANCE ANALYSIS");
    assert!(config.dataset.is_none());
}

#[test]
fn config_rejects_non_positive_page_size() {
    use clap::Parser;

    let result = AppConfig::try_parse_from(["rentboard", "--page-size", "0"]);

    assert!(result.is_err(), "page size 0 should be rejected");
}

#[test]
fn explicit_dataset_path_wins() {
    use clap::Parser;

    let config = AppConfig::try_parse_from(["rentboard", "--dataset", "/tmp/flats.csv"])
        .expect("flags should parse");

    assert_eq!(
        config.dataset_path().expect("path should resolve"),
        PathBuf::from("/tmp/flats.csv")
    );
}

#[test]
fn default_dataset_path_points_at_listings_csv() {
    let path = default_dataset_path().expect("data dir should resolve");

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("listings.csv")
    );
}

#[test]
fn ensure_webview_data_dir_creates_webview_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

    assert!(webview_dir.ends_with("webview"));
    assert!(webview_dir.is_dir());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
