pub mod container;

use crate::infra::config::{self, AppConfig, RuntimeConfig, Settings};
use anyhow::Result;
use clap::{Parser, Subcommand};
use container::{ContainerCommand, PruneArgs};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ctrprune",
    version,
    about = "Remove stopped containers from a containerd namespace"
)]
pub struct Cli {
    /// Namespace containerd (default: "default")
    #[arg(short, long, global = true, env = "CONTAINERD_NAMESPACE")]
    pub namespace: Option<String>,

    /// Binário do runtime (nerdctl, podman, docker)
    #[arg(long, global = true, env = "CTRPRUNE_RUNTIME")]
    pub runtime: Option<String>,

    /// Diretório de configuração (default: ~/.config/ctrprune)
    #[arg(long, global = true, env = "CTRPRUNE_CONFIG_DIR", default_value_os_t = config::default_config_dir())]
    pub config_dir: PathBuf,

    /// Logs detalhados
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Gerencia containers
    Container(ContainerCommand),
    /// Atalho para `container prune`
    Prune(PruneArgs),
}

impl Cli {
    /// Command-line values that take precedence over the config file
    pub fn overrides(&self) -> AppConfig {
        AppConfig {
            namespace: self.namespace.clone(),
            runtime: RuntimeConfig {
                binary: self.runtime.clone(),
            },
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        let config_dir = config::expand_config_dir(&self.config_dir)?;
        config::load_settings(&config_dir, self.overrides())
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;

    match cli.command {
        Commands::Container(cmd) => container::run(cmd, &settings),
        Commands::Prune(args) => container::prune(&args, &settings),
    }
}
