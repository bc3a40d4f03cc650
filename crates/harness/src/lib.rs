//! Behat Harness
//!
//! A wrapper around an external Behat-style BDD runner:
//! - Loads feature files and substitutes `<name>` placeholders into a
//!   working copy of their text
//! - Stages the substituted text as a uniquely-named `.feature` file in a
//!   configured workspace directory
//! - Invokes the runner binary as a blocking subprocess and folds its
//!   final two output lines into a structured result
//! - Extracts `# @param` declarations and renders an HTML input form for
//!   collecting placeholder values
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ExecutionService                                            │
//! │    ├── FeatureTemplate::apply(name, value)  (templating)     │
//! │    ├── stage .feature file in workspace     (tempfile)       │
//! │    └── BehatRunner::run(staged)  -> RunResult                │
//! ├──────────────────────────────────────────────────────────────┤
//! │  FormGenerator                                               │
//! │    ├── parse_params(text) -> {key -> ParamDescriptor}        │
//! │    └── RendererRegistry::create(kind).render(param) -> html  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  catalog::list_features(dir) -> [FeatureEntry]               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and blocking; one `ExecutionService`
//! instance must not be shared across overlapping executions.

pub mod catalog;
pub mod config;
pub mod error;
pub mod feature;
pub mod form;
pub mod params;
pub mod runner;
pub mod service;

pub use catalog::FeatureEntry;
pub use config::Config;
pub use error::{HarnessError, HarnessResult};
pub use feature::{FeatureSource, FeatureTemplate};
pub use form::{FormGenerator, ParamRenderer, RendererRegistry};
pub use params::{parse_params, ParamDescriptor};
pub use runner::{BehatRunner, RunResult};
pub use service::ExecutionService;
