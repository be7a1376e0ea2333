use crate::domain::{Container, ContainerRuntime, ContainerState, RemoveOptions, RuntimeError};
use std::ffi::OsStr;
use std::process::{Command, Output};
use tracing::debug;

const PS_FORMAT: &str = "{{.ID}}\t{{.Names}}\t{{.Status}}";
const INSPECT_STATE_FORMAT: &str = "{{.State.Status}}";

/// [`ContainerRuntime`] backed by a containerd-compatible CLI (nerdctl, podman, docker)
#[derive(Debug, Clone)]
pub struct CliRuntime {
    binary: String,
}

impl CliRuntime {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Only nerdctl speaks containerd namespaces; podman and docker reject the flag
    fn supports_namespaces(&self) -> bool {
        self.program_name() == "nerdctl"
    }

    fn program_name(&self) -> &str {
        self.binary.rsplit('/').next().unwrap_or(&self.binary)
    }

    fn base_args(&self, namespace: &str) -> Vec<String> {
        if self.supports_namespaces() {
            vec!["--namespace".into(), namespace.into()]
        } else {
            Vec::new()
        }
    }

    fn output<I, S>(&self, args: I, context: &str) -> Result<Output, RuntimeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|item| item.as_ref().to_os_string())
            .collect();
        debug!("{} {:?}", self.binary, args);

        Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|source| RuntimeError::Io {
                context: context.to_string(),
                source,
            })
    }

    fn run<I, S>(&self, args: I, context: &str) -> Result<String, RuntimeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.output(args, context)?;
        self.ensure_success(output, context)
    }

    fn ensure_success(&self, output: Output, context: &str) -> Result<String, RuntimeError> {
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        Err(RuntimeError::Command {
            program: self.binary.clone(),
            context: context.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn inspect_state(&self, id: &str, namespace: &str) -> Result<ContainerState, RuntimeError> {
        let context = format!("inspecionando container {id}");
        let mut args = self.base_args(namespace);
        args.extend([
            "container".into(),
            "inspect".into(),
            "--format".into(),
            INSPECT_STATE_FORMAT.into(),
            id.into(),
        ]);

        let output = self.output(&args, &context)?;
        match self.ensure_success(output, &context) {
            Ok(stdout) => Ok(ContainerState::from_inspect(&stdout)),
            // Containers removed by someone else between list and remove
            Err(RuntimeError::Command { stderr, .. }) if is_not_found(&stderr) => {
                Err(RuntimeError::NotFound(id.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new(crate::infra::config::DEFAULT_RUNTIME_BINARY)
    }
}

impl ContainerRuntime for CliRuntime {
    fn list_containers(&self, namespace: &str) -> Result<Vec<Container>, RuntimeError> {
        let mut args = self.base_args(namespace);
        args.extend([
            "ps".into(),
            "-a".into(),
            "--no-trunc".into(),
            "--format".into(),
            PS_FORMAT.into(),
        ]);

        let stdout = self.run(&args, &format!("listando containers em {namespace}"))?;
        parse_ps_output(&stdout)
    }

    fn remove_container(
        &self,
        container: &Container,
        namespace: &str,
        options: RemoveOptions,
    ) -> Result<(), RuntimeError> {
        let id = container.id();

        if !options.force {
            let state = self.inspect_state(id, namespace)?;
            if state.blocks_removal() {
                return Err(RuntimeError::Status {
                    id: id.to_string(),
                    state,
                    reason: "stop the container before removing or force remove".into(),
                });
            }
        }

        let mut args = self.base_args(namespace);
        args.push("rm".into());
        if options.force {
            args.push("-f".into());
        }
        if options.best_effort {
            args.push("-v".into());
        }
        args.push(id.into());

        self.run(&args, &format!("removendo container {id}"))
            .map(|_| ())
    }
}

/// Matches the "no such container" wording of nerdctl, podman and docker
fn is_not_found(stderr: &str) -> bool {
    let stderr = stderr.to_ascii_lowercase();
    stderr.contains("no such container") || stderr.contains("no such object")
}

/// Parses `ps --format` output produced with [`PS_FORMAT`]
pub fn parse_ps_output(stdout: &str) -> Result<Vec<Container>, RuntimeError> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_ps_line)
        .collect()
}

fn parse_ps_line(line: &str) -> Result<Container, RuntimeError> {
    let mut fields = line.splitn(3, '\t');

    let id = fields
        .next()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RuntimeError::Parse(line.to_string()))?;
    let name = fields.next().unwrap_or_default().trim();
    let status = fields.next().unwrap_or_default();

    Ok(Container::new(id, name, ContainerState::from_status(status)))
}
