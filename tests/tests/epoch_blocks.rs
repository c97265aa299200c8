use crate::helpers::{
    TwoChain,
    FIRST_EPOCH,
};
use pc_e2e_authorship::AuthorshipVerifier;
use pc_e2e_block_finder::{
    BlockFinder,
    EpochQuery,
};
use pc_e2e_epoch_correlator::EpochCorrelator;
use pc_e2e_trace::CapturedLogs;
use pc_e2e_types::{
    BlockNumber,
    EpochRange,
    McEpoch,
    PcEpoch,
};
use pretty_assertions::assert_eq;
use std::ops::RangeInclusive;
use test_case::test_case;

/// Six full epochs and half of the seventh.
const SLOTS: u64 = 65;

const MC_EPOCH: McEpoch = McEpoch::new(3);

async fn resolve(
    chain: &TwoChain,
    epoch: PcEpoch,
) -> Option<RangeInclusive<BlockNumber>> {
    let finder = BlockFinder::new(chain.clone(), chain.clock());
    let query = EpochQuery::aligned(&chain.clock(), chain.current_epoch(), epoch);
    finder.get_block_range(query).await.unwrap()
}

#[test]
fn main_chain_epoch_covers_two_partner_chain_epochs() {
    let chain = TwoChain::new(SLOTS, []);
    let correlator = EpochCorrelator::new(chain.config.clock);

    let range = correlator.find_pc_epochs(MC_EPOCH, false).unwrap();

    assert_eq!(
        range,
        EpochRange::new(PcEpoch::new(27_777_606), PcEpoch::new(27_777_608))
    );
    assert_eq!(chain.current_epoch(), PcEpoch::new(FIRST_EPOCH.get() + 6));
    for pc_epoch in range.iter() {
        assert_eq!(correlator.find_mc_epoch(pc_epoch, McEpoch::new(10)), Some(MC_EPOCH));
    }
}

#[test_case(&[], &[21..=30, 31..=40] ; "complete chain")]
#[test_case(&[25, 30, 31], &[21..=29, 30..=37] ; "empty slots at epoch start")]
#[tokio::test]
async fn block_ranges_of_main_chain_epoch_are_sealed_by_scheduled_authors(
    empty_slots: &[u64],
    expected: &[RangeInclusive<BlockNumber>],
) {
    let chain = TwoChain::new(SLOTS, empty_slots.iter().copied());
    let correlator = EpochCorrelator::new(chain.config.clock);
    let verifier = AuthorshipVerifier::new(chain.config.block_encoding.clone());
    let members = chain.members();

    let pc_epochs = correlator.find_pc_epochs(MC_EPOCH, false).unwrap();
    let mut ranges = Vec::new();
    for pc_epoch in pc_epochs.iter() {
        let blocks = resolve(&chain, pc_epoch).await.unwrap();
        assert_eq!(blocks, chain.expected_range(pc_epoch));

        for number in blocks.clone() {
            let authorship = verifier.attribute(chain.header(number), &members).unwrap();
            let scheduled = &members[(authorship.slot % members.len() as u64) as usize];
            assert_eq!(authorship.number, number);
            assert_eq!(&authorship.author, scheduled);
        }
        ranges.push(blocks);
    }

    assert_eq!(ranges, expected);
}

#[tokio::test]
async fn epoch_missing_too_many_blocks_is_skipped() {
    // slots 30..=40 hold the first block of epoch 27_777_607 and its retries
    let chain = TwoChain::new(SLOTS, 30..=40);
    let logs = CapturedLogs::start();

    let previous = resolve(&chain, PcEpoch::new(27_777_606)).await;
    let target = resolve(&chain, PcEpoch::new(27_777_607)).await;

    assert_eq!(target, None);
    // the previous epoch ends with the same missing block
    assert_eq!(previous, None);
    assert!(logs.contains("epoch boundary unresolvable: missing first block of epoch"));
    assert!(logs.contains("epoch boundary unresolvable: missing last block of epoch"));
}

#[tokio::test]
async fn current_epoch_cannot_be_resolved() {
    let chain = TwoChain::new(SLOTS, []);
    let finder = BlockFinder::new(chain.clone(), chain.clock());

    let result = finder
        .get_block_range(EpochQuery::aligned(
            &chain.clock(),
            chain.current_epoch(),
            chain.current_epoch(),
        ))
        .await;

    assert!(matches!(
        result,
        Err(pc_e2e_block_finder::Error::EpochNotInPast { .. })
    ));
}
