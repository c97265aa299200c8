use anyhow::Context;
use clap::Parser;
use pc_e2e_chain_config::{
    E2eConfig,
    CONFIG_FILE_KEY,
    LOCAL_TESTNET,
};
use std::{
    env,
    str::FromStr,
};
use tracing_subscriber::{
    filter::EnvFilter,
    layer::SubscriberExt,
    registry,
    Layer,
};

pub mod epochs;
pub mod header;

#[derive(Parser, Debug)]
#[clap(
    name = "pc-e2e-tool",
    about = "Epoch, header and authorship tooling for partner chain e2e environments",
    version,
    rename_all = "kebab-case"
)]
pub struct Opt {
    #[clap(subcommand)]
    command: Tool,
}

#[derive(Debug, Parser)]
pub enum Tool {
    PcEpochs(epochs::FindPcEpochs),
    McEpoch(epochs::FindMcEpoch),
    HeaderHash(header::HeaderHash),
    VerifyAuthor(header::VerifyAuthor),
}

impl Tool {
    fn exec(&self) -> anyhow::Result<()> {
        match self {
            Tool::PcEpochs(cmd) => print_value(cmd.run()?, cmd.pretty),
            Tool::McEpoch(cmd) => print_value(cmd.run()?, cmd.pretty),
            Tool::HeaderHash(cmd) => print_value(cmd.run()?, cmd.pretty),
            Tool::VerifyAuthor(cmd) => print_value(cmd.run()?, cmd.pretty),
        }
    }
}

/// Where the environment description comes from.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to a `.json` or `.toml` config file, or the name of a preset.
    #[clap(long = "config", short = 'c', env = CONFIG_FILE_KEY, default_value = LOCAL_TESTNET)]
    pub config: String,
}

impl ConfigArgs {
    pub fn load(&self) -> anyhow::Result<E2eConfig> {
        E2eConfig::from_str(&self.config)
            .with_context(|| format!("failed to load config `{}`", self.config))
    }
}

pub const LOG_FILTER: &str = "RUST_LOG";
pub const HUMAN_LOGGING: &str = "HUMAN_LOGGING";

pub fn init_logging() -> anyhow::Result<()> {
    let filter = match env::var_os(LOG_FILTER) {
        Some(_) => EnvFilter::try_from_default_env()
            .with_context(|| format!("invalid `{LOG_FILTER}` provided"))?,
        None => EnvFilter::new("info"),
    };

    let human_logging = match env::var(HUMAN_LOGGING) {
        Ok(value) => bool::from_str(&value).with_context(|| {
            format!("expected `true` or `false` to be provided for `{HUMAN_LOGGING}`")
        })?,
        Err(_) => true,
    };

    // stdout carries the command output
    let layer = tracing_subscriber::fmt::Layer::default().with_writer(std::io::stderr);

    let fmt = if human_logging {
        layer
            .with_ansi(true)
            .with_level(true)
            .with_line_number(true)
            .boxed()
    } else {
        layer
            .with_ansi(false)
            .with_level(true)
            .with_line_number(true)
            .json()
            .boxed()
    };

    let subscriber = registry::Registry::default().with(filter).with(fmt);

    tracing::subscriber::set_global_default(subscriber)
        .context("setting global default failed")?;
    Ok(())
}

pub fn run_cli() -> anyhow::Result<()> {
    init_logging()?;
    let opt = Opt::parse();
    opt.command.exec()
}

fn print_value(output: serde_json::Value, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    };
    println!("{}", output?);
    Ok(())
}
