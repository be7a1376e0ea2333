use super::{Container, RemoveOptions, RuntimeError};
use std::fmt::Debug;

/// Trait for container runtime operations
pub trait ContainerRuntime: Send + Sync + Debug {
    /// List every container of a namespace, stopped or not
    fn list_containers(&self, namespace: &str) -> Result<Vec<Container>, RuntimeError>;

    /// Remove a container.
    ///
    /// Must return [`RuntimeError::Status`] when the container's state forbids
    /// removal with the given options, so callers can tell it apart from
    /// infrastructure failures.
    fn remove_container(
        &self,
        container: &Container,
        namespace: &str,
        options: RemoveOptions,
    ) -> Result<(), RuntimeError>;
}
