pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{Container, ContainerRuntime, ContainerState, PruneOutcome, RuntimeError};
pub use infra::CliRuntime;
pub use services::{PruneOptions, PruneReport, PruneService};
