pub mod get_history;
pub mod save_analysis;
