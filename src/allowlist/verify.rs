use sha3::{Digest, Keccak256};

use super::{
    typedefs::{Hash32, RecipientRecord},
    validate::ValidationError,
};

// Commutative pairing: the smaller node hashes first, so sibling order does
// not matter when walking up the tree.
fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a.as_bytes() <= b.as_bytes() {
        (a, b)
    } else {
        (b, a)
    };

    let digest: [u8; 32] = Keccak256::new()
        .chain_update(lo.as_bytes())
        .chain_update(hi.as_bytes())
        .finalize()
        .into();

    Hash32::from(digest)
}

pub fn resolves_to_root(leaf: &Hash32, proof: &[Hash32], root: &Hash32) -> bool {
    let mut node = *leaf;
    for sibling in proof {
        node = hash_pair(&node, sibling);
    }

    node == *root
}

/// Strict mode: every record's proof must walk from its leaf to the shared
/// root. The leaf itself is taken as supplied, not recomputed.
pub fn verify_records(records: &[RecipientRecord], root: &Hash32) -> Result<(), ValidationError> {
    for record in records {
        if !resolves_to_root(&record.leaf, &record.proof, root) {
            return Err(ValidationError::ProofVerificationFailed {
                address: record.address,
                root: *root,
            });
        }
    }

    Ok(())
}
