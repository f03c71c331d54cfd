// UI and formatting module

pub mod detail_table;
pub mod monitor_tui;
pub mod status_bar;

// Re-export commonly used items for cleaner imports
pub use detail_table::{assemble_component_detail, assemble_detail, DetailRow, DetailSection};
pub use status_bar::BarOutput;
