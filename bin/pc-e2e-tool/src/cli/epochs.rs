use super::ConfigArgs;
use anyhow::Context;
use pc_e2e_epoch_correlator::EpochCorrelator;
use pc_e2e_types::{
    McEpoch,
    PcEpoch,
};
use serde_json::json;

/// Print the partner chain epochs that belong to a main chain epoch
#[derive(Debug, clap::Args)]
#[clap(author, version, about)]
pub struct FindPcEpochs {
    #[clap(flatten)]
    config: ConfigArgs,
    #[clap(long = "mc-epoch")]
    mc_epoch: u64,
    /// Start the deployment epoch at the configured initial partner chain
    /// epoch.
    #[clap(long = "from-initial")]
    from_initial: bool,
    #[clap(long = "pretty", short = 'p')]
    pub(crate) pretty: bool,
}

impl FindPcEpochs {
    pub(crate) fn run(&self) -> anyhow::Result<serde_json::Value> {
        let config = self.config.load()?;
        let correlator = EpochCorrelator::new(config.clock);
        let mc_epoch = McEpoch::new(self.mc_epoch);

        let range = correlator
            .find_pc_epochs(mc_epoch, self.from_initial)
            .with_context(|| format!("cannot map main chain epoch {mc_epoch}"))?;
        tracing::info!(%mc_epoch, %range, epochs = range.len(), "resolved partner chain epochs");

        Ok(serde_json::to_value(range)?)
    }
}

/// Print the main chain epoch a partner chain epoch belongs to
#[derive(Debug, clap::Args)]
#[clap(author, version, about)]
pub struct FindMcEpoch {
    #[clap(flatten)]
    config: ConfigArgs,
    #[clap(long = "pc-epoch")]
    pc_epoch: u64,
    /// Most recent main chain epoch to consider.
    #[clap(long = "current-mc-epoch")]
    current_mc_epoch: u64,
    #[clap(long = "pretty", short = 'p')]
    pub(crate) pretty: bool,
}

impl FindMcEpoch {
    pub(crate) fn run(&self) -> anyhow::Result<serde_json::Value> {
        let config = self.config.load()?;
        let correlator = EpochCorrelator::new(config.clock);
        let pc_epoch = PcEpoch::new(self.pc_epoch);

        match correlator.find_mc_epoch(pc_epoch, McEpoch::new(self.current_mc_epoch)) {
            Some(mc_epoch) => Ok(json!({
                "pc_epoch": pc_epoch,
                "mc_epoch": mc_epoch,
            })),
            None => anyhow::bail!(
                "partner chain epoch {pc_epoch}: epoch predates known history (searched main chain epochs 1..={})",
                self.current_mc_epoch
            ),
        }
    }
}
