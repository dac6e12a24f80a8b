//! SLang checks
//!
//! Structural rules over the language-agnostic trees of `slang-api`. Every
//! check registers handlers on one shared visitor, so a file is scanned
//! once whatever the number of enabled rules.
//!
//! # Features
//!
//! - **Check API**: [`SlangCheck`] and [`InitContext`] to register handlers
//! - **Structural checks**: cognitive complexity, duplicated branches and
//!   conditions, identical operands, duplicated function implementations,
//!   octal literals
//! - **Runner**: one tree, one source or many sources in parallel
//! - **Configuration**: enabled rules and thresholds, loadable from JSON
//! - **Metrics**: files analysed, failures, issues and time spent
//!
//! # Example
//!
//! ```rust
//! use slang_checks::CheckRunner;
//! use slang_parser::SlangConverter;
//!
//! let runner = CheckRunner::new();
//! let report = runner
//!     .analyze_source(&SlangConverter::new(), "demo.slang", "x = a == a;")
//!     .unwrap();
//! assert_eq!(report.issues[0].rule_key, "S1764");
//! ```

pub mod check;
pub mod checks;
pub mod config;
pub mod context;
pub mod errors;
pub mod issue;
pub mod metrics;
pub mod runner;


// Re-export commonly used types
pub use check::{InitContext, SlangCheck};
pub use checks::{
    all_checks, AllBranchesIdenticalCheck, DuplicateBranchCheck,
    DuplicatedFunctionImplementationCheck, FunctionCognitiveComplexityCheck,
    IdenticalBinaryOperandCheck, IdenticalConditionsCheck, OctalValuesCheck,
};
pub use config::ChecksConfig;
pub use context::CheckScanContext;
pub use errors::{CheckError, CheckResult};
pub use issue::{FileReport, Issue};
pub use metrics::AnalysisMetrics;
pub use runner::{AnalysisReport, CheckRunner};
