use super::ConfigArgs;
use anyhow::Context;
use pc_e2e_authorship::{
    codec::parse_rpc_header,
    AuthorshipVerifier,
};
use pc_e2e_types::{
    header::rpc::RpcBlockHeader,
    serde_hex,
    BlockHeader,
    CommitteeMember,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

/// Print the pre-seal encoding of a block header, its hash and its seal
#[derive(Debug, clap::Args)]
#[clap(author, version, about)]
pub struct HeaderHash {
    #[clap(flatten)]
    config: ConfigArgs,
    /// JSON header as returned by the partner chain RPC.
    #[clap(long = "header")]
    header: PathBuf,
    #[clap(long = "pretty", short = 'p')]
    pub(crate) pretty: bool,
}

impl HeaderHash {
    pub(crate) fn run(&self) -> anyhow::Result<serde_json::Value> {
        let config = self.config.load()?;
        let header = read_header(&self.header)?;

        let encoded = AuthorshipVerifier::new(config.block_encoding).encode(&header)?;

        Ok(json!({
            "number": header.number,
            "preimage": serde_hex::encode(&encoded.preimage),
            "hash": encoded.hash,
            "seal": serde_hex::encode(&encoded.signature),
        }))
    }
}

/// Prove which committee member sealed a block
#[derive(Debug, clap::Args)]
#[clap(author, version, about)]
pub struct VerifyAuthor {
    #[clap(flatten)]
    config: ConfigArgs,
    /// JSON header as returned by the partner chain RPC.
    #[clap(long = "header")]
    header: PathBuf,
    /// JSON array of committee members.
    #[clap(long = "committee")]
    committee: PathBuf,
    /// Also require the author to be the one scheduled for the block's slot.
    #[clap(long = "check-slot")]
    check_slot: bool,
    #[clap(long = "pretty", short = 'p')]
    pub(crate) pretty: bool,
}

impl VerifyAuthor {
    pub(crate) fn run(&self) -> anyhow::Result<serde_json::Value> {
        let config = self.config.load()?;
        let header = read_header(&self.header)?;
        let committee: Vec<CommitteeMember> = read_json(&self.committee)?;
        let verifier = AuthorshipVerifier::new(config.block_encoding);

        if self.check_slot {
            let authorship = verifier.attribute(&header, &committee)?;
            return Ok(json!({
                "number": authorship.number,
                "slot": authorship.slot,
                "author": authorship.author,
            }))
        }

        let author = verifier.verify_header(&header, &committee)?;
        Ok(json!({
            "number": header.number,
            "author": author,
        }))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn read_header(path: &Path) -> anyhow::Result<BlockHeader> {
    let header: RpcBlockHeader = read_json(path)?;
    Ok(parse_rpc_header(header)?)
}
