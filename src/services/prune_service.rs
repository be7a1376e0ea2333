use crate::domain::{Container, ContainerRuntime, PruneOutcome, RemoveOptions};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const CONFIRM_PROMPT: &str =
    "WARNING! This will remove all stopped containers.\nAre you sure you want to continue? [y/N] ";
pub const REPORT_HEADER: &str = "Deleted Containers:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOptions {
    /// Skip the confirmation prompt
    pub force: bool,
    pub namespace: String,
}

/// Per-invocation result of a prune
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Ids removed, in the order removal was attempted
    pub deleted: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl PruneReport {
    fn record(&mut self, id: &str, outcome: PruneOutcome) {
        let bucket = match outcome {
            PruneOutcome::Deleted => &mut self.deleted,
            PruneOutcome::SkippedExpected => &mut self.skipped,
            PruneOutcome::FailedUnexpected => &mut self.failed,
        };
        bucket.push(id.to_string());
    }

    pub fn outcome(&self, id: &str) -> Option<PruneOutcome> {
        let has = |ids: &[String]| ids.iter().any(|candidate| candidate == id);

        if has(&self.deleted) {
            Some(PruneOutcome::Deleted)
        } else if has(&self.skipped) {
            Some(PruneOutcome::SkippedExpected)
        } else if has(&self.failed) {
            Some(PruneOutcome::FailedUnexpected)
        } else {
            None
        }
    }

    /// Prints the deleted ids; prints nothing when nothing was deleted
    pub fn write_to(&self, out: &mut dyn Write) -> Result<()> {
        if self.deleted.is_empty() {
            return Ok(());
        }

        writeln!(out, "{REPORT_HEADER}")?;
        for id in &self.deleted {
            writeln!(out, "{id}")?;
        }
        Ok(())
    }
}

/// Removes every stopped container of a namespace
pub struct PruneService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl PruneService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Full workflow: confirm, enumerate, remove each, report.
    ///
    /// Returns `None` when the operator declined. Only enumeration failures
    /// (and stream errors) are returned as errors.
    pub fn run(
        &self,
        options: &PruneOptions,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Option<PruneReport>> {
        if !options.force && !confirm(input, output)? {
            debug!("Prune cancelado pelo usuário");
            return Ok(None);
        }

        let report = self.prune(&options.namespace)?;
        report.write_to(output)?;
        output.flush()?;

        Ok(Some(report))
    }

    /// Enumerates and removes without asking
    pub fn prune(&self, namespace: &str) -> Result<PruneReport> {
        let containers = self
            .runtime
            .list_containers(namespace)
            .with_context(|| format!("listando containers do namespace {namespace}"))?;

        debug!("{} container(s) em {}", containers.len(), namespace);

        let mut report = PruneReport::default();
        for container in &containers {
            let outcome = self.remove_one(container, namespace);
            report.record(container.id(), outcome);
        }

        info!(
            "Prune concluído: {} removido(s), {} ignorado(s), {} falha(s)",
            report.deleted.len(),
            report.skipped.len(),
            report.failed.len()
        );

        Ok(report)
    }

    fn remove_one(&self, container: &Container, namespace: &str) -> PruneOutcome {
        match self
            .runtime
            .remove_container(container, namespace, RemoveOptions::prune())
        {
            Ok(()) => {
                debug!("Container {} removido", container.id());
                PruneOutcome::Deleted
            }
            Err(e) if e.is_status() => PruneOutcome::SkippedExpected,
            Err(e) => {
                warn!("  Falha ao remover container {}: {}", container.id(), e);
                PruneOutcome::FailedUnexpected
            }
        }
    }
}

/// Prompts and reads a single token; only `y`/`Y` confirms.
///
/// EOF, undecodable bytes and read errors all decline.
pub fn confirm(input: &mut dyn BufRead, output: &mut dyn Write) -> Result<bool> {
    write!(output, "{CONFIRM_PROMPT}")?;
    output.flush()?;

    let mut buf = Vec::new();
    if let Err(e) = input.read_until(b'\n', &mut buf) {
        debug!("Falha ao ler confirmação: {}", e);
        return Ok(false);
    }

    let line = String::from_utf8_lossy(&buf);
    let token = line.split_whitespace().next().unwrap_or_default();
    Ok(token.eq_ignore_ascii_case("y"))
}
