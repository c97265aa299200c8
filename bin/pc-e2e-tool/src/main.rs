//! Operator tooling for partner chain e2e environments.

mod cli;

fn main() -> anyhow::Result<()> {
    cli::run_cli()
}
