//! Ratatui widgets for the huaming TUI.

pub mod catalog_list;
pub mod command_bar;
pub mod detail;
pub mod filter_bar;
pub mod help;
pub mod query_bar;
pub mod status_bar;
