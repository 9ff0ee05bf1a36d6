use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::query::{SortKey, TableState};

/// Per-session UI state. Each window or server session owns its own signals;
/// only the dataset behind them is shared.
#[derive(Clone, Copy)]
pub struct AppState {
    pub page_current: Signal<i64>,
    pub page_size: Signal<i64>,
    pub sort_by: Signal<Vec<SortKey>>,
    pub filter_query: Signal<String>,
    pub selected_neighborhoods: Signal<Vec<String>>,
}

impl AppState {
    pub fn new(default_page_size: i64) -> Self {
        Self {
            page_current: use_signal(|| 0_i64),
            page_size: use_signal(|| default_page_size),
            sort_by: use_signal(Vec::<SortKey>::new),
            filter_query: use_signal(String::new),
            selected_neighborhoods: use_signal(Vec::<String>::new),
        }
    }

    pub fn table_state(&self) -> TableState {
        TableState {
            page_current: (self.page_current)(),
            page_size: (self.page_size)(),
            sort_by: (self.sort_by)(),
            filter_query: (self.filter_query)(),
        }
    }
}

/// Adds `name` to the selection, or removes it when already present.
pub fn toggle_selection(selected: &[String], name: &str) -> Vec<String> {
    let mut next = selected.to_vec();
    match next.iter().position(|item| item == name) {
        Some(idx) => {
            next.remove(idx);
        }
        None => next.push(name.to_string()),
    }
    next
}
