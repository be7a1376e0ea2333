use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Stopped,
    Unknown,
}

impl ContainerState {
    /// Maps the human status column of `ps` ("Up 3 minutes", "Exited (0) 2 hours ago", ...)
    pub fn from_status(status: &str) -> Self {
        let status = status.trim().to_ascii_lowercase();

        if status.starts_with("up") {
            if status.contains("paused") {
                Self::Paused
            } else {
                Self::Running
            }
        } else if status.starts_with("exited") || status.starts_with("dead") {
            Self::Stopped
        } else if status.starts_with("created") {
            Self::Created
        } else if status.starts_with("restarting") {
            Self::Restarting
        } else if status.starts_with("paused") {
            Self::Paused
        } else {
            Self::Unknown
        }
    }

    /// Maps the `.State.Status` field of `inspect` (running, exited, paused, ...)
    pub fn from_inspect(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" | "pausing" => Self::Paused,
            "restarting" => Self::Restarting,
            "exited" | "stopped" | "dead" => Self::Stopped,
            _ => Self::Unknown,
        }
    }

    /// States in which a non-forced removal is rejected by the runtime
    pub fn blocks_removal(&self) -> bool {
        matches!(self, Self::Running | Self::Paused | Self::Restarting)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Stopped => "stopped",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Read-only view of a container as seen at enumeration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub state: ContainerState,
}

impl Container {
    pub fn new(id: impl Into<String>, name: impl Into<String>, state: ContainerState) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Options passed through to a single removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Remove even if the container is running
    pub force: bool,
    /// Also drop anonymous volumes, ignoring failures while doing so
    pub best_effort: bool,
}

impl RemoveOptions {
    /// What a bulk prune asks for: never kill, always clean volumes
    pub fn prune() -> Self {
        Self {
            force: false,
            best_effort: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneOutcome {
    Deleted,
    SkippedExpected,
    FailedUnexpected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_ps_status() {
        assert_eq!(ContainerState::from_status("Up 3 minutes"), ContainerState::Running);
        assert_eq!(
            ContainerState::from_status("Up 2 hours (Paused)"),
            ContainerState::Paused
        );
        assert_eq!(
            ContainerState::from_status("Exited (0) 2 hours ago"),
            ContainerState::Stopped
        );
        assert_eq!(ContainerState::from_status("Created"), ContainerState::Created);
        assert_eq!(ContainerState::from_status("???"), ContainerState::Unknown);
    }

    #[test]
    fn test_state_from_inspect() {
        assert_eq!(ContainerState::from_inspect("running\n"), ContainerState::Running);
        assert_eq!(ContainerState::from_inspect("exited"), ContainerState::Stopped);
        assert_eq!(ContainerState::from_inspect("paused"), ContainerState::Paused);
    }

    #[test]
    fn test_blocks_removal() {
        assert!(ContainerState::Running.blocks_removal());
        assert!(ContainerState::Paused.blocks_removal());
        assert!(!ContainerState::Stopped.blocks_removal());
        assert!(!ContainerState::Created.blocks_removal());
    }

    #[test]
    fn test_prune_remove_options() {
        let opts = RemoveOptions::prune();
        assert!(!opts.force);
        assert!(opts.best_effort);
    }
}
