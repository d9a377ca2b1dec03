//! # Vantage Report Assembler
//!
//! Turns analysis results into transient artifacts: a JSON report document,
//! CSV dumps for fan charts and drawdown plots, and terminal tables.

pub mod error;
pub mod report;
pub mod summary;
pub mod tables;
pub mod writer;

pub use error::ReportError;
pub use report::{AssetReport, FailedSymbol, RiskReport};
pub use summary::{ExecutiveSummary, Highlight};
pub use tables::{render_metrics_table, render_simulation_table};
pub use writer::{write_history_csv, write_json_report, write_paths_csv};
