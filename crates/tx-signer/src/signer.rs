use crate::{
    payload::{
        signing_payload,
        RuntimeContext,
        TipPayment,
    },
    ports::ChainState,
    EcdsaKeypair,
    Result,
    SigningError,
};
use pc_e2e_types::{
    extrinsic::{
        Call,
        Era,
        EraSpec,
        SignedTransactionPayload,
    },
    Bytes32,
    SignatureScheme,
};

#[cfg(test)]
mod tests;

/// Signs extrinsics for secp256k1 wallets against one runtime.
pub struct EcdsaSigner<S> {
    chain: S,
    runtime: RuntimeContext,
}

impl<S> EcdsaSigner<S>
where
    S: ChainState,
{
    pub fn new(chain: S, runtime: RuntimeContext) -> Self {
        Self { chain, runtime }
    }

    pub fn runtime(&self) -> &RuntimeContext {
        &self.runtime
    }

    /// Builds and signs `call`.
    ///
    /// A missing `nonce` is read from the chain, `0` for unknown accounts. A
    /// mortal era without a reference block starts at the finalized block.
    pub async fn sign_ecdsa_extrinsic(
        &self,
        call: &Call,
        keypair: &EcdsaKeypair,
        nonce: Option<u64>,
        era: EraSpec,
        tip: u128,
        tip_asset_id: Option<u128>,
    ) -> Result<SignedTransactionPayload> {
        if let (TipPayment::Native, Some(asset)) = (self.runtime.tip_payment, tip_asset_id) {
            return Err(SigningError::AssetTipUnsupported(asset))
        }

        let account_id = keypair.account_id();
        let nonce = match nonce {
            Some(nonce) => nonce,
            None => self
                .chain
                .account_nonce(&account_id)
                .await
                .map_err(|source| SigningError::Nonce {
                    account: account_id,
                    source,
                })?
                .unwrap_or_default(),
        };
        let (era, checkpoint) = self.resolve_era(era).await?;

        let payload = signing_payload(
            &call.encoded,
            &era,
            nonce,
            tip,
            tip_asset_id,
            &self.runtime,
            &checkpoint,
        );
        let signature = keypair.sign(&payload)?;
        tracing::debug!(
            account = %account_id,
            nonce,
            call_module = %call.call_module,
            call_function = %call.call_function,
            "signed ecdsa extrinsic"
        );

        Ok(SignedTransactionPayload {
            account_id,
            signature: signature.to_vec(),
            signature_version: self
                .runtime
                .signature_type
                .signature_version(SignatureScheme::Ecdsa),
            call_module: call.call_module.clone(),
            call_function: call.call_function.clone(),
            call_args: call.call_args.clone(),
            nonce,
            era,
            tip,
            asset_id: tip_asset_id,
            asset_tip: self.runtime.tip_payment == TipPayment::Asset,
            call: call.encoded.clone(),
        })
    }

    /// The era and the hash of the block it is checked against.
    async fn resolve_era(&self, era: EraSpec) -> Result<(Era, Bytes32)> {
        let (period, current) = match era {
            EraSpec::Immortal => return Ok((Era::Immortal, self.runtime.genesis_hash)),
            EraSpec::Mortal { period, current } => (period, current),
        };
        let current = match current {
            Some(current) => current,
            None => self
                .chain
                .finalized_block_number()
                .await
                .map_err(SigningError::FinalizedBlock)?,
        };

        let era = Era::mortal(period, current);
        let birth = era.birth(current);
        let checkpoint = self.chain.block_hash(birth).await.map_err(|source| {
            SigningError::CheckpointHash {
                block: birth,
                source,
            }
        })?;
        Ok((era, checkpoint))
    }
}
