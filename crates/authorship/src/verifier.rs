use crate::{
    aura,
    codec::{
        encode_header_for_hashing,
        EncodedHeader,
    },
    Error,
    Result,
};
use pc_e2e_chain_config::HeaderEncodingConfig;
use pc_e2e_types::{
    BlockHeader,
    BlockNumber,
    Bytes32,
    CommitteeMember,
};


/// The first of `candidates` whose key produced `signature` over `header_hash`.
///
/// Candidates are tried in the given order.
pub fn verify_author<'a>(
    header_hash: &Bytes32,
    signature: &[u8],
    candidates: &'a [CommitteeMember],
) -> Option<&'a CommitteeMember> {
    candidates
        .iter()
        .find(|candidate| candidate.signed(header_hash.as_ref(), signature))
}

/// Who authored a block, and in which slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockAuthorship {
    pub number: BlockNumber,
    pub slot: u64,
    pub author: CommitteeMember,
}

/// Verifies block seals with a fixed header encoding.
#[derive(Clone, Debug)]
pub struct AuthorshipVerifier {
    encoding: HeaderEncodingConfig,
}

impl AuthorshipVerifier {
    pub fn new(encoding: HeaderEncodingConfig) -> Self {
        Self { encoding }
    }

    pub fn encode(&self, header: &BlockHeader) -> Result<EncodedHeader> {
        encode_header_for_hashing(header, &self.encoding)
    }

    /// The committee member that sealed `header`.
    ///
    /// [`Error::HashMismatch`] means no candidate signed the re-encoded hash,
    /// which usually points at an outdated committee rather than a codec bug.
    pub fn verify_header<'a>(
        &self,
        header: &BlockHeader,
        candidates: &'a [CommitteeMember],
    ) -> Result<&'a CommitteeMember> {
        let encoded = self.encode(header)?;
        match verify_author(&encoded.hash, &encoded.signature, candidates) {
            Some(author) => {
                tracing::debug!(number = header.number, %author, "verified block author");
                Ok(author)
            }
            None => {
                tracing::warn!(
                    number = header.number,
                    hash = %encoded.hash,
                    candidates = candidates.len(),
                    "no committee member signed the block"
                );
                Err(Error::HashMismatch {
                    number: header.number,
                    hash: encoded.hash,
                })
            }
        }
    }

    /// Verifies the seal of `header` and checks that its author is the one
    /// round-robin Aura schedules for the block's slot.
    pub fn attribute(
        &self,
        header: &BlockHeader,
        committee: &[CommitteeMember],
    ) -> Result<BlockAuthorship> {
        let slot = aura::aura_slot(header)?;
        let expected = aura::expected_author(slot, committee).ok_or(
            Error::EmptyCommittee {
                number: header.number,
            },
        )?;
        let author = self.verify_header(header, committee)?;

        if author != expected {
            tracing::warn!(
                number = header.number,
                slot,
                %expected,
                actual = %author,
                "block sealed out of turn"
            );
            return Err(Error::UnexpectedAuthor {
                number: header.number,
                slot,
                expected: expected.clone(),
                actual: author.clone(),
            })
        }

        Ok(BlockAuthorship {
            number: header.number,
            slot,
            author: author.clone(),
        })
    }
}
