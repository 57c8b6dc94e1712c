//! pyri-rs
//!
//! A lightweight Rust library for loading, charting, and summarizing
//! Pyricularia (rice blast) risk weather data. Pairs with the `pyri` CLI and
//! the `pyri-gui` viewer.
//!
//! The pipeline is single-pass and one-directional: a delimited table is
//! decoded into raw rows, normalized into fixed-shape records, extracted
//! into per-field series, realized into a declarative chart configuration,
//! and handed to the chart host. The host owns dataset visibility and
//! notifies update plugins (the legend among them) after every update.
//!
//! ### Features
//! - Load the observation table from a file path or an http(s) URL
//! - Seven fixed series over two stacked clamped axes, rendered to SVG/PNG
//! - Click-to-toggle legend state with empty-label series filtered out
//! - Save records as CSV or JSON, quick per-field summary statistics
//!
//! ### Example
//! ```no_run
//! use pyri_rs::ingest::DataSource;
//!
//! let records = DataSource::default().load("weather.csv")?;
//! let bundle = pyri_rs::series::extract(&records);
//! let config = pyri_rs::chart::build_config(bundle);
//! let chart = pyri_rs::engine::Chart::new(config);
//! pyri_rs::render::render_to_path(&chart, "risk.svg", 1000, 600)?;
//! let stats = pyri_rs::stats::field_summary(&records);
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod engine;
pub mod ingest;
pub mod legend;
pub mod models;
pub mod render;
pub mod series;
pub mod stats;
pub mod storage;

pub use engine::Chart;
pub use ingest::DataSource;
pub use models::{ObservationRecord, RawRow, SeriesField};
