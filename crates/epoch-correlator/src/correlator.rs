use crate::{
    Error,
    Result,
};
use pc_e2e_chain_config::ChainClockConfig;
use pc_e2e_types::{
    EpochRange,
    McEpoch,
    PcEpoch,
};


/// Pure epoch arithmetic over a validated [`ChainClockConfig`].
#[derive(Clone, Copy, Debug)]
pub struct EpochCorrelator {
    config: ChainClockConfig,
}

impl EpochCorrelator {
    pub fn new(config: ChainClockConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChainClockConfig {
        &self.config
    }

    /// Unix time in seconds at which `mc_epoch` begins.
    pub fn mc_epoch_change_timestamp(&self, mc_epoch: McEpoch) -> Result<u64> {
        let main_chain = &self.config.main_chain;
        mc_epoch
            .get()
            .checked_mul(main_chain.epoch_duration_seconds())
            .and_then(|offset| offset.checked_add(main_chain.init_timestamp))
            .ok_or(Error::TimestampOverflow { mc_epoch })
    }

    /// The partner chain epoch running when `mc_epoch` begins.
    pub fn first_pc_epoch(&self, mc_epoch: McEpoch) -> Result<PcEpoch> {
        let pc_epoch_seconds = self.config.partner_chain.epoch_duration_seconds().max(1);
        Ok(PcEpoch::new(
            self.mc_epoch_change_timestamp(mc_epoch)? / pc_epoch_seconds,
        ))
    }

    /// Partner chain epochs that belong to `mc_epoch`.
    ///
    /// With `use_deployment_override` the range of the deployment epoch starts
    /// at the configured initial partner chain epoch, since the chain may have
    /// started in the middle of that main chain epoch.
    pub fn find_pc_epochs(
        &self,
        mc_epoch: McEpoch,
        use_deployment_override: bool,
    ) -> Result<EpochRange> {
        let computed_start = self.first_pc_epoch(mc_epoch)?;
        let start = match self.config.initial_pc_epoch {
            Some(initial)
                if use_deployment_override
                    && mc_epoch == self.config.deployment_mc_epoch =>
            {
                tracing::debug!(
                    %mc_epoch,
                    %initial,
                    computed = %computed_start,
                    "using the initial partner chain epoch for the deployment epoch"
                );
                initial
            }
            _ => computed_start,
        };
        let stop = self.first_pc_epoch(mc_epoch.next())?;

        if stop <= start {
            return Err(Error::InvalidRange {
                mc_epoch,
                start,
                stop,
            })
        }

        Ok(EpochRange::new(start, stop))
    }

    /// The main chain epoch in `1..=current_mc_epoch` whose range contains
    /// `pc_epoch`, searching from the most recent one.
    ///
    /// `None` means the epoch predates the known history.
    pub fn find_mc_epoch(
        &self,
        pc_epoch: PcEpoch,
        current_mc_epoch: McEpoch,
    ) -> Option<McEpoch> {
        (1..=current_mc_epoch.get())
            .rev()
            .map(McEpoch::new)
            .find(|&mc_epoch| {
                self.find_pc_epochs(mc_epoch, false)
                    .is_ok_and(|range| range.contains(pc_epoch))
            })
    }

    /// Like [`Self::find_mc_epoch`], reporting a miss as [`Error::EpochNotFound`].
    pub fn mc_epoch_of(
        &self,
        pc_epoch: PcEpoch,
        current_mc_epoch: McEpoch,
    ) -> Result<McEpoch> {
        self.find_mc_epoch(pc_epoch, current_mc_epoch)
            .ok_or(Error::EpochNotFound {
                pc_epoch,
                current_mc_epoch,
            })
    }
}
