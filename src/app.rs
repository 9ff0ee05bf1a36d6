use dioxus::prelude::*;

use crate::context::AppContext;
use crate::domain::entities::dataset::{Dataset, Record};
use crate::domain::entities::query::{SortDirection, SortKey};
use crate::ui::chart::Chart;
use crate::ui::state::app_state::{toggle_selection, AppState};
use crate::ui::styles::{
    input_style, root_container_style, row_style, table_cell_style, table_container_style,
    table_header_cell_style, title_style,
};
use crate::usecase::services::query_service::toggle_sort;

pub const PAGE_SIZE_OPTIONS: [i64; 4] = [10, 20, 50, 100];
const FILTER_PLACEHOLDER: &str = "{bedrooms} ge 2 && {neighborhood} contains 'Mitte'";

/// Arrow shown next to a sorted header, with its position when several
/// columns are sorted.
pub fn sort_indicator(sort_by: &[SortKey], column: &str) -> String {
    let Some(position) = sort_by.iter().position(|key| key.column == column) else {
        return String::new();
    };
    let arrow = match sort_by[position].direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    };
    if sort_by.len() > 1 {
        format!(" {arrow}{}", position + 1)
    } else {
        format!(" {arrow}")
    }
}

pub fn cell_text(record: &Record, column: &str) -> String {
    record
        .get(column)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

pub fn page_label(page_current: i64, page_count: usize) -> String {
    format!("Page {} of {}", page_current + 1, page_count.max(1))
}

pub fn status_line(dataset: &Dataset, source: &str, matched: usize) -> String {
    format!(
        "{matched} of {} listings match, loaded from {source} at {}",
        dataset.len(),
        dataset.loaded_at().format("%Y-%m-%d %H:%M:%S")
    )
}

#[component]
pub fn App() -> Element {
    let context = use_context::<AppContext>();
    let state = AppState::new(context.default_page_size);
    let AppState {
        mut page_current,
        mut page_size,
        mut sort_by,
        mut filter_query,
        mut selected_neighborhoods,
    } = state;

    let figures = context.figures.clone();
    let static_charts = use_hook(move || {
        (
            figures.monthly_growth(),
            figures.correlation(),
            figures.configurations(),
        )
    });
    let (growth_chart, correlation_chart, configuration_chart) = static_charts;

    let selected = selected_neighborhoods();
    let neighborhood_figures = context.figures.refresh(&selected);
    let neighborhoods = context.figures.neighborhoods().to_vec();

    let current_page = page_current();
    let current_page_size = page_size();
    let current_sort = sort_by();
    let page = context.queries.render_page(&state.table_state());

    let (table_view, footer, status) = match page {
        Ok(result) => {
            let last_page = result.page_count.saturating_sub(1) as i64;
            let has_prev = current_page > 0;
            let has_next = current_page < last_page;
            let label = page_label(current_page, result.page_count);
            let status = status_line(&context.dataset, &context.source, result.total_rows);
            let table_view = rsx! {
                table { style: "border-collapse: collapse; width: 100%;",
                    thead {
                        tr {
                            {result.columns.iter().map(|column| {
                                let header = format!("{column}{}", sort_indicator(&current_sort, column));
                                let column = column.clone();
                                rsx!(
                                    th {
                                        style: "{table_header_cell_style()}",
                                        onclick: move |_| {
                                            let next = toggle_sort(&sort_by(), &column);
                                            sort_by.set(next);
                                        },
                                        "{header}"
                                    }
                                )
                            })}
                        }
                    }
                    tbody {
                        {result.rows.iter().map(|record| {
                            rsx!(
                                tr {
                                    {result.columns.iter().map(|column| {
                                        let text = cell_text(record, column);
                                        rsx!(td { style: "{table_cell_style()}", "{text}" })
                                    })}
                                }
                            )
                        })}
                    }
                }
            };
            let footer = rsx! {
                div { style: "display: flex; gap: 8px; align-items: center;",
                    button {
                        disabled: !has_prev,
                        onclick: move |_| {
                            if has_prev {
                                page_current.set(current_page - 1);
                            }
                        },
                        "Prev"
                    }
                    span { "{label}" }
                    button {
                        disabled: !has_next,
                        onclick: move |_| {
                            if has_next {
                                page_current.set(current_page + 1);
                            }
                        },
                        "Next"
                    }
                }
            };
            (table_view, footer, status)
        }
        Err(err) => (rsx! {}, rsx! {}, format!("query failed: {err}")),
    };

    rsx! {
        div { style: "{root_container_style()}",
            h1 { style: "{title_style()}", "{context.title}" }

            div { style: "display: flex; flex-wrap: wrap; gap: 12px;",
                {neighborhoods.iter().map(|name| {
                    let checked = selected.contains(name);
                    let label = name.clone();
                    let name = name.clone();
                    rsx!(
                        label { style: "display: flex; gap: 4px; align-items: center;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| {
                                    let next = toggle_selection(&selected_neighborhoods(), &name);
                                    selected_neighborhoods.set(next);
                                }
                            }
                            "{label}"
                        }
                    )
                })}
            }

            div { style: "{row_style()}",
                Chart { spec: neighborhood_figures.avg_rent }
                Chart { spec: neighborhood_figures.price_per_sqm }
            }

            div { style: "{row_style()}",
                Chart { spec: growth_chart }
                Chart { spec: correlation_chart }
            }

            div { style: "display: flex; gap: 12px; align-items: center;",
                input {
                    style: "{input_style()} flex: 1;",
                    placeholder: FILTER_PLACEHOLDER,
                    value: "{filter_query}",
                    oninput: move |event| {
                        filter_query.set(event.value());
                        page_current.set(0);
                    }
                }
                select {
                    style: "{input_style()}",
                    onchange: move |event| {
                        if let Ok(size) = event.value().parse::<i64>() {
                            page_size.set(size);
                            page_current.set(0);
                        }
                    },
                    for size in PAGE_SIZE_OPTIONS {
                        option { value: "{size}", selected: size == current_page_size, "{size} rows" }
                    }
                }
            }

            div { style: "{table_container_style()}", {table_view} }
            {footer}

            div { style: "{row_style()}",
                Chart { spec: configuration_chart }
            }

            div { style: "font-size: 12px; color: grey;", "{status}" }
        }
    }
}
