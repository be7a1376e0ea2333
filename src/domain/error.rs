use super::ContainerState;
use thiserror::Error;

/// Errors surfaced by a [`ContainerRuntime`](super::ContainerRuntime)
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime refused the operation because of the container's current state
    #[error("container {id} is {state}: {reason}")]
    Status {
        id: String,
        state: ContainerState,
        reason: String,
    },

    #[error("container not found: {0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {code:?} ({context}): {stderr}")]
    Command {
        program: String,
        context: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("unexpected runtime output: {0}")]
    Parse(String),
}

impl RuntimeError {
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let status = RuntimeError::Status {
            id: "abc".into(),
            state: ContainerState::Running,
            reason: "stop the container before removing".into(),
        };
        assert!(status.is_status());
        assert_eq!(
            status.to_string(),
            "container abc is running: stop the container before removing"
        );

        assert!(!RuntimeError::NotFound("abc".into()).is_status());
        assert!(!RuntimeError::Parse("garbage".into()).is_status());
    }
}
