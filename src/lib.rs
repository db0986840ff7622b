//! # label-forge - grid label sheets for pre-cut foil stock
//!
//! This crate generates traceability labels (QR symbol plus serial, date,
//! and lot text) and lays them out on A4 pages for printing. The pipeline
//! stages are:
//!
//! 1. **Configure** - load persisted preferences ([`store`], [`config`])
//! 2. **Build** - render each label artifact once ([`label`], [`symbol`])
//! 3. **Layout** - place artifacts on the page grid ([`layout`])
//! 4. **Render** - emit draw commands to a sink ([`sink`], [`render`])
//!
//! Layout correctness is what puts printed labels onto the pre-cut foil
//! sheet: grid fill is row-major, pages break after a fixed number of rows,
//! and each page carries an L-shaped pattern of alignment marks so operators
//! can verify registration before peeling.

pub mod config;
pub mod error;
pub mod label;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod sink;
pub mod store;
pub mod symbol;
pub mod units;

// Re-exports for convenience
pub use config::{AppConfig, GenerateSettings, LayoutConfig};
pub use error::Error;
pub use pipeline::{generate_labels, render_sheet, Session};
