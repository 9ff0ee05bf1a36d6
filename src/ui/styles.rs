pub const BACKGROUND: &str = "#111111";
pub const TEXT: &str = "#7FDBFF";

pub fn root_container_style() -> String {
    format!(
        "min-height: 100vh; display: flex; flex-direction: column; gap: 16px; padding: 16px; \
         background: {BACKGROUND}; color: {TEXT}; font-family: sans-serif; box-sizing: border-box;"
    )
}

pub fn title_style() -> &'static str {
    "text-align: center; color: white; margin: 8px 0;"
}

pub fn row_style() -> &'static str {
    "display: flex; flex-wrap: wrap; gap: 24px; align-items: flex-start;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-width: 480px; max-height: 420px; min-height: 0; overflow: auto; border: 1px solid #444;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 1; background: #4b2c5e; color: black; font-weight: bold; \
     padding: 4px 8px; border: 1px solid #555; cursor: pointer; white-space: nowrap;"
}

pub fn table_cell_style() -> &'static str {
    "background: rgb(50, 50, 50); color: white; padding: 4px 8px; border: 1px solid #555; white-space: nowrap;"
}

pub fn chart_card_style() -> &'static str {
    "background: #1e1e1e; border: 1px solid #333; padding: 8px;"
}

pub fn input_style() -> &'static str {
    "background: rgb(35, 38, 40); color: grey; border: 1px solid #555; padding: 4px 8px;"
}
