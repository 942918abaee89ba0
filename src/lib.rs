//! huaming — 花名 catalog browser.
//!
//! The binary is a thin shell: [`cli`] parses arguments, loads the dataset
//! through `huaming-sources`, and hands the result to either the ratatui shell
//! (`huaming-tui`) or one of the headless commands. Both adapters drive the
//! same `huaming-core` pipeline.
//!
//! # Architecture
//!
//! ```text
//! huaming-sources ──► huaming-core ──► huaming-tui
//!                          │
//!                          └─────────► cli (list / show / validate / import)
//! ```

pub mod cli;
