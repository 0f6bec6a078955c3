//! Output modules for rendering benchmark results.
//!
//! Tables (comfy-table), a JSON report, and a progress spinner.

pub mod json;
pub mod progress;
pub mod table;
