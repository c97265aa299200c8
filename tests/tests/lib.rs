#![deny(unused_must_use)]

mod authorship;
mod epoch_blocks;
mod helpers;
mod tx_signer;

pc_e2e_trace::enable_tracing!();
