use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use super::{
    schemas::{Allowlist, RawEntry},
    typedefs::{Address, Amount, Hash32, RecipientRecord},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed address (must be 20-byte hex): {0}")]
    MalformedAddress(String),
    #[error("malformed {field} for {address} (must be 32-byte hex): {value}")]
    MalformedHash {
        address: String,
        field: &'static str,
        value: String,
    },
    #[error("malformed proof hash for {address} (must be 32-byte hex): {value}")]
    MalformedProof { address: String, value: String },
    #[error("empty proof for {address}")]
    EmptyProof { address: String },
    #[error("inputs for {address} must be [address, amount]")]
    MalformedInputs { address: String },
    #[error("inputs[0] ({input}) does not match entry key {key}")]
    AddressMismatch { key: String, input: String },
    #[error("malformed amount for {address} (must be a non-negative integer): {value}")]
    MalformedAmount { address: String, value: String },
    #[error("malformed token address (must be 20-byte hex): {0}")]
    MalformedTokenAddress(String),
    #[error("expected a single shared root, found {}: [{}]", .0.len(), hash_list(.0))]
    InconsistentRoot(Vec<Hash32>),
    #[error("proof for {address} does not resolve to root {root}")]
    ProofVerificationFailed { address: Address, root: Hash32 },
}

fn hash_list(hashes: &[Hash32]) -> String {
    hashes
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks one raw entry and normalizes it into a storage-ready record.
/// Shape checks only; the proof is not walked here (see `verify`).
pub fn validate_entry(key: &str, entry: &RawEntry) -> Result<RecipientRecord, ValidationError> {
    let address =
        Address::from_hex(key).ok_or_else(|| ValidationError::MalformedAddress(key.to_owned()))?;

    let root = Hash32::from_hex(&entry.root).ok_or_else(|| ValidationError::MalformedHash {
        address: key.to_owned(),
        field: "root",
        value: entry.root.clone(),
    })?;

    let leaf = Hash32::from_hex(&entry.leaf).ok_or_else(|| ValidationError::MalformedHash {
        address: key.to_owned(),
        field: "leaf",
        value: entry.leaf.clone(),
    })?;

    if entry.proof.is_empty() {
        return Err(ValidationError::EmptyProof {
            address: key.to_owned(),
        });
    }

    let mut proof = Vec::with_capacity(entry.proof.len());
    for hash in &entry.proof {
        proof.push(
            Hash32::from_hex(hash).ok_or_else(|| ValidationError::MalformedProof {
                address: key.to_owned(),
                value: hash.clone(),
            })?,
        );
    }

    // inputs = [address, amountString]
    let [input_address, input_amount] = entry.inputs.as_slice() else {
        return Err(ValidationError::MalformedInputs {
            address: key.to_owned(),
        });
    };

    let input_address_str = match input_address {
        Value::String(s) => s.as_str(),
        other => return Err(ValidationError::MalformedAddress(other.to_string())),
    };
    let input_address = Address::from_hex(input_address_str)
        .ok_or_else(|| ValidationError::MalformedAddress(input_address_str.to_owned()))?;

    if input_address != address {
        return Err(ValidationError::AddressMismatch {
            key: key.to_owned(),
            input: input_address_str.to_owned(),
        });
    }

    let amount_str = match input_amount {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let amount = Amount::from_decimal_str(&amount_str).ok_or_else(|| {
        ValidationError::MalformedAmount {
            address: key.to_owned(),
            value: amount_str.clone(),
        }
    })?;

    let reasons = match &entry.reasons {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(RecipientRecord {
        address,
        amount,
        leaf,
        proof,
        root,
        reasons,
    })
}

/// Validates every entry; the first rejection aborts the whole document.
pub fn validate_document(allowlist: &Allowlist) -> Result<Vec<RecipientRecord>, ValidationError> {
    let mut records = Vec::with_capacity(allowlist.0.len());
    for (key, entry) in &allowlist.0 {
        records.push(validate_entry(key, entry)?);
    }

    Ok(records)
}

/// Every record in one load must reference exactly one root.
pub fn shared_root(records: &[RecipientRecord]) -> Result<Hash32, ValidationError> {
    let roots: BTreeSet<Hash32> = records.iter().map(|r| r.root).collect();
    match roots.len() {
        1 => Ok(records[0].root),
        _ => Err(ValidationError::InconsistentRoot(
            roots.into_iter().collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const ADDRESS: &str = "0xabcdef7890abcdef1234567890abcdef12345678";

    fn raw_entry(value: Value) -> RawEntry {
        serde_json::from_value(value).unwrap()
    }

    fn valid_entry() -> RawEntry {
        raw_entry(json!({
            "inputs": [ADDRESS, "5000000000000000000"],
            "proof": [format!("0x{}", "11".repeat(32))],
            "root": format!("0x{}", "aa".repeat(32)),
            "leaf": format!("0x{}", "bb".repeat(32)),
            "reasons": ["Tier 1"],
        }))
    }

    #[test]
    fn test_valid_entry_normalizes() {
        let record = validate_entry(ADDRESS, &valid_entry()).unwrap();

        assert_eq!(record.address.to_string(), ADDRESS);
        assert_eq!(record.amount.as_str(), "5000000000000000000");
        assert_eq!(record.root.as_bytes(), [0xaa; 32]);
        assert_eq!(record.leaf.as_bytes(), [0xbb; 32]);
        assert_eq!(record.proof, vec![Hash32::from([0x11; 32])]);
        assert_eq!(record.reasons, vec!["Tier 1".to_string()]);
    }

    #[test]
    fn test_key_case_is_insensitive() {
        let key = ADDRESS.to_uppercase().replace("0X", "0x");
        let record = validate_entry(&key, &valid_entry()).unwrap();

        // Canonicalized to lowercase regardless of input case
        assert_eq!(record.address.to_string(), ADDRESS);
    }

    #[test]
    fn test_proof_order_is_preserved() {
        let entry = raw_entry(json!({
            "inputs": [ADDRESS, "1"],
            "proof": [
                format!("0x{}", "33".repeat(32)),
                format!("0x{}", "11".repeat(32)),
                format!("0x{}", "22".repeat(32)),
            ],
            "root": format!("0x{}", "aa".repeat(32)),
            "leaf": format!("0x{}", "bb".repeat(32)),
        }));

        let record = validate_entry(ADDRESS, &entry).unwrap();
        assert_eq!(
            record.proof,
            vec![
                Hash32::from([0x33; 32]),
                Hash32::from([0x11; 32]),
                Hash32::from([0x22; 32]),
            ]
        );
    }

    #[test]
    fn test_malformed_key_rejected() {
        let err = validate_entry("0x1234", &valid_entry()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedAddress(_)));
    }

    #[test]
    fn test_malformed_root_rejected() {
        let mut entry = valid_entry();
        entry.root = format!("0x{}", "aa".repeat(20));

        let err = validate_entry(ADDRESS, &entry).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedHash { field: "root", .. }
        ));
    }

    #[test]
    fn test_malformed_leaf_rejected() {
        let mut entry = valid_entry();
        entry.leaf = "not-hex".to_string();

        let err = validate_entry(ADDRESS, &entry).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedHash { field: "leaf", .. }
        ));
    }

    #[test]
    fn test_empty_proof_rejected() {
        let mut entry = valid_entry();
        entry.proof.clear();

        let err = validate_entry(ADDRESS, &entry).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyProof { .. }));
    }

    #[test]
    fn test_malformed_proof_element_rejected() {
        let mut entry = valid_entry();
        entry.proof.push(format!("0x{}", "11".repeat(31)));

        let err = validate_entry(ADDRESS, &entry).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedProof { .. }));
    }

    #[test]
    fn test_inputs_arity_rejected() {
        let mut entry = valid_entry();
        entry.inputs.truncate(1);

        let err = validate_entry(ADDRESS, &entry).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedInputs { .. }));
    }

    #[test]
    fn test_non_string_inputs_address_rejected() {
        let mut entry = valid_entry();
        entry.inputs[0] = json!(42);

        let err = validate_entry(ADDRESS, &entry).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedAddress(_)));
    }

    #[test]
    fn test_address_mismatch_rejected() {
        let mut entry = valid_entry();
        entry.inputs[0] = json!("0x0000000000000000000000000000000000000001");

        let err = validate_entry(ADDRESS, &entry).unwrap_err();
        assert!(matches!(err, ValidationError::AddressMismatch { .. }));
    }

    #[test]
    fn test_mismatched_case_still_matches() {
        let mut entry = valid_entry();
        entry.inputs[0] = json!(ADDRESS.to_uppercase().replace("0X", "0x"));

        assert!(validate_entry(ADDRESS, &entry).is_ok());
    }

    #[test]
    fn test_numeric_amount_is_stringified() {
        let mut entry = valid_entry();
        entry.inputs[1] = json!(7_000_000u64);

        let record = validate_entry(ADDRESS, &entry).unwrap();
        assert_eq!(record.amount.as_str(), "7000000");
    }

    #[test]
    fn test_huge_numeric_amount_survives_verbatim() {
        // 30 digits, well past u64; arbitrary_precision keeps the raw token
        let entry = raw_entry(
            serde_json::from_str::<Value>(&format!(
                r#"{{
                    "inputs": ["{ADDRESS}", 123456789012345678901234567890],
                    "proof": ["0x{}"],
                    "root": "0x{}",
                    "leaf": "0x{}"
                }}"#,
                "11".repeat(32),
                "aa".repeat(32),
                "bb".repeat(32),
            ))
            .unwrap(),
        );

        let record = validate_entry(ADDRESS, &entry).unwrap();
        assert_eq!(record.amount.as_str(), "123456789012345678901234567890");
    }

    #[test]
    fn test_malformed_amounts_rejected() {
        for bad in ["5.5", "-5", "1e18", "5 000", "0x5"] {
            let mut entry = valid_entry();
            entry.inputs[1] = json!(bad);

            let err = validate_entry(ADDRESS, &entry).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedAmount { .. }),
                "expected MalformedAmount for {bad:?}"
            );
        }
    }

    #[test]
    fn test_missing_reasons_normalize_to_empty() {
        let mut entry = valid_entry();
        entry.reasons = None;

        let record = validate_entry(ADDRESS, &entry).unwrap();
        assert!(record.reasons.is_empty());
    }

    #[test]
    fn test_non_array_reasons_normalize_to_empty() {
        let mut entry = valid_entry();
        entry.reasons = Some(json!("Tier 1"));

        let record = validate_entry(ADDRESS, &entry).unwrap();
        assert!(record.reasons.is_empty());
    }

    #[test]
    fn test_non_string_reason_elements_are_coerced() {
        let mut entry = valid_entry();
        entry.reasons = Some(json!(["Tier 1", 2]));

        let record = validate_entry(ADDRESS, &entry).unwrap();
        assert_eq!(record.reasons, vec!["Tier 1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_document_validation_aborts_on_first_bad_entry() {
        let allowlist: Allowlist = serde_json::from_value(json!({
            ADDRESS: {
                "inputs": [ADDRESS, "1"],
                "proof": [format!("0x{}", "11".repeat(32))],
                "root": format!("0x{}", "aa".repeat(32)),
                "leaf": format!("0x{}", "bb".repeat(32)),
            },
            "0xffffffffffffffffffffffffffffffffffffffff": {
                "inputs": ["0x0000000000000000000000000000000000000001", "1"],
                "proof": [format!("0x{}", "11".repeat(32))],
                "root": format!("0x{}", "aa".repeat(32)),
                "leaf": format!("0x{}", "bb".repeat(32)),
            },
        }))
        .unwrap();

        let err = validate_document(&allowlist).unwrap_err();
        assert!(matches!(err, ValidationError::AddressMismatch { .. }));
    }

    #[test]
    fn test_shared_root_single() {
        let records = vec![
            validate_entry(ADDRESS, &valid_entry()).unwrap(),
            validate_entry(ADDRESS, &valid_entry()).unwrap(),
        ];

        let root = shared_root(&records).unwrap();
        assert_eq!(root, Hash32::from([0xaa; 32]));
    }

    #[test]
    fn test_shared_root_reports_all_distinct_roots() {
        let mut second = valid_entry();
        second.root = format!("0x{}", "ff".repeat(32));

        let records = vec![
            validate_entry(ADDRESS, &valid_entry()).unwrap(),
            validate_entry(ADDRESS, &second).unwrap(),
        ];

        let err = shared_root(&records).unwrap_err();
        let ValidationError::InconsistentRoot(roots) = err else {
            panic!("expected InconsistentRoot, got {err:?}");
        };
        assert_eq!(roots.len(), 2);
        assert!(roots.contains(&Hash32::from([0xaa; 32])));
        assert!(roots.contains(&Hash32::from([0xff; 32])));
    }

    #[test]
    fn test_shared_root_rejects_empty_batch() {
        assert!(matches!(
            shared_root(&[]).unwrap_err(),
            ValidationError::InconsistentRoot(roots) if roots.is_empty()
        ));
    }
}
