use crate::domain::{Container, ContainerRuntime, ContainerState, RemoveOptions, RuntimeError};
use std::collections::HashMap;
use std::sync::RwLock;

/// How a scripted removal should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Rejected because of the container's state
    Status,
    /// Anything else (I/O, permission, ...)
    Unexpected,
}

/// In-memory runtime that records every call it receives
#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<Vec<Container>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    remove_failures: RwLock<HashMap<String, MockFailure>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(Vec::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            remove_failures: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a container; enumeration returns them in insertion order
    pub fn add_container(&self, id: &str, state: ContainerState) {
        self.containers
            .write()
            .unwrap()
            .push(Container::new(id, format!("name-{id}"), state));
    }

    /// Makes every call of `operation` ("list", "remove") fail unexpectedly
    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    /// Scripts the removal of one container to fail
    pub fn fail_remove(&self, id: &str, failure: MockFailure) {
        self.remove_failures
            .write()
            .unwrap()
            .insert(id.to_string(), failure);
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn container_exists(&self, id: &str) -> bool {
        self.containers.read().unwrap().iter().any(|c| c.id == id)
    }

    pub fn container_ids(&self) -> Vec<String> {
        self.containers
            .read()
            .unwrap()
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<(), RuntimeError> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                return Err(RuntimeError::Io {
                    context: format!("Mock failure on: {operation}"),
                    source: std::io::Error::other("mock"),
                });
            }
        }
        Ok(())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for MockRuntime {
    fn list_containers(&self, namespace: &str) -> Result<Vec<Container>, RuntimeError> {
        self.record_command(&format!("list:{namespace}"));
        self.check_fail("list")?;

        Ok(self.containers.read().unwrap().clone())
    }

    fn remove_container(
        &self,
        container: &Container,
        _namespace: &str,
        options: RemoveOptions,
    ) -> Result<(), RuntimeError> {
        self.record_command(&format!(
            "remove:{}:force={}:best_effort={}",
            container.id, options.force, options.best_effort
        ));
        self.check_fail("remove")?;

        let mut containers = self.containers.write().unwrap();
        let Some(index) = containers.iter().position(|c| c.id == container.id) else {
            return Err(RuntimeError::NotFound(container.id.clone()));
        };
        let state = containers[index].state.clone();

        match self.remove_failures.read().unwrap().get(&container.id) {
            Some(MockFailure::Status) => {
                return Err(RuntimeError::Status {
                    id: container.id.clone(),
                    state,
                    reason: "mock status rejection".into(),
                });
            }
            Some(MockFailure::Unexpected) => {
                return Err(RuntimeError::Command {
                    program: "mock".into(),
                    context: format!("removendo container {}", container.id),
                    code: Some(1),
                    stderr: "permission denied".into(),
                });
            }
            None => {}
        }

        if !options.force && state.blocks_removal() {
            return Err(RuntimeError::Status {
                id: container.id.clone(),
                state,
                reason: "container is not stopped".into(),
            });
        }

        containers.remove(index);
        Ok(())
    }
}
