use crate::infra::CliRuntime;
use crate::infra::config::Settings;
use crate::services::{PruneOptions, PruneService};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::io;
use std::sync::Arc;
use tracing::debug;

#[derive(Args, Debug)]
pub struct ContainerCommand {
    #[command(subcommand)]
    pub command: ContainerAction,
}

#[derive(Subcommand, Debug)]
pub enum ContainerAction {
    /// Remove all stopped containers
    Prune(PruneArgs),
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneArgs {
    /// Do not prompt for confirmation
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(cmd: ContainerCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        ContainerAction::Prune(args) => prune(&args, settings),
    }
}

pub fn prune(args: &PruneArgs, settings: &Settings) -> Result<()> {
    debug!(
        "Prune em {} via {}",
        settings.namespace, settings.runtime_binary
    );

    let runtime = Arc::new(CliRuntime::new(settings.runtime_binary.clone()));
    let service = PruneService::new(runtime);
    let options = PruneOptions {
        force: args.force,
        namespace: settings.namespace.clone(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    service.run(&options, &mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
