//! # tfuse-orchestrator
//!
//! Runs one or all fusion strategies on an image pair, scores each fused
//! image and assembles an ordered report.
//!
//! ## Flow
//!
//! ```mermaid
//! graph LR
//!     IN["Image a, Image b"] --> R["run(strategy)"]
//!     R -->|"All"| RA["run_all (rayon)"]
//!     R -->|"single"| RO["run_one"]
//!     RA --> S["fuse + grayscale + QualityScores"]
//!     RO --> S
//!     S --> M["MetricReport"]
//!     M -->|"to_json"| J["JSON"]
//! ```
//!
//! Batches always report in the order Min, Max, Mean, Entropy, MACD,
//! Edge, Deviation, with `------` between strategies.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tfuse_fusion::FusionStrategy;
//! use tfuse_orchestrator::{OrchestratorConfig, run};
//! use tfuse_wavelet::WaveletFamily;
//!
//! let report = run(&visible, &thermal, FusionStrategy::All, WaveletFamily::Daubechies, &OrchestratorConfig::default())?;
//! for line in report.lines() {
//!     println!("{line}");
//! }
//! ```

mod config;
mod error;
mod handle;
mod report;
mod run;

pub use config::OrchestratorConfig;
pub use error::OrchestratorError;
pub use handle::{ReportHandle, spawn_run};
pub use report::{FusedResult, MetricReport, ReportSummary, ResultSummary, SEPARATOR, to_json};
pub use run::{run, run_all, run_one};
