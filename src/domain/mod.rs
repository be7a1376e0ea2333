mod container;
mod error;
pub mod traits;

pub use container::{Container, ContainerState, PruneOutcome, RemoveOptions};
pub use error::RuntimeError;
pub use traits::ContainerRuntime;
