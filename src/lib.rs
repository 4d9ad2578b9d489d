//! Beam Section Optimizer
//!
//! Reads the beams of a running structural model, computes the governing
//! moment of each span and proposes the cheapest section from a beam library
//! that still carries it.
//!
//! ## Example
//! ```rust
//! use beam_optimizer::prelude::*;
//!
//! let beams = vec![BeamRecord::new("B1", 6.0, 12.0, "W200")];
//! let library = vec![
//!     CatalogSection::new("W150", 40.0, 30.0),
//!     CatalogSection::new("W180", 60.0, 50.0),
//! ];
//!
//! let records = optimize_beams(&beams, &library).unwrap();
//! assert_eq!(records[0].optimized_section, "W180");
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod optimizer;

// Re-export common types
pub mod prelude {
    pub use crate::catalog::{CatalogSource, JsonFileCatalog, StaticCatalog};
    pub use crate::config::ServiceConfig;
    pub use crate::error::{OptimizerError, OptimizerResult};
    pub use crate::extractor::{
        BeamSource, ModelBridgeClient, StaticBeamSource, DEFAULT_DISTRIBUTED_LOAD,
    };
    pub use crate::models::{
        BeamRecord, CatalogSection, CostSummary, OptimizationRecord, OptimizationReport,
        ReportedCost,
    };
    pub use crate::optimizer::{
        calculate_moment, optimize_beams, select_section, summarize, Optimizer, Selection,
    };
}
