//! Decoder configuration
//!
//! Sequence counts read off the wire are attacker controlled. Each decoder
//! checks a declared count against the matching limit here before reading
//! any element, so a hostile length field cannot drive allocation.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConsensusError, Result};

/// Per-type caps on declared sequence lengths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Maximum inputs in one transaction
    #[serde(default = "default_max_inputs")]
    pub max_inputs: usize,

    /// Maximum outputs in one transaction
    #[serde(default = "default_max_outputs")]
    pub max_outputs: usize,

    /// Maximum length of a script or other opaque byte buffer
    #[serde(default = "default_max_script_size")]
    pub max_script_size: usize,

    /// Maximum transactions in one block
    #[serde(default = "default_max_block_transactions")]
    pub max_block_transactions: usize,

    /// Maximum hashes in a block locator
    #[serde(default = "default_max_locator_hashes")]
    pub max_locator_hashes: usize,
}

fn default_max_inputs() -> usize {
    MAX_INPUTS
}

fn default_max_outputs() -> usize {
    MAX_OUTPUTS
}

fn default_max_script_size() -> usize {
    MAX_SCRIPT_SIZE
}

fn default_max_block_transactions() -> usize {
    MAX_BLOCK_TRANSACTIONS
}

fn default_max_locator_hashes() -> usize {
    MAX_LOCATOR_HASHES
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_inputs: MAX_INPUTS,
            max_outputs: MAX_OUTPUTS,
            max_script_size: MAX_SCRIPT_SIZE,
            max_block_transactions: MAX_BLOCK_TRANSACTIONS,
            max_locator_hashes: MAX_LOCATOR_HASHES,
        }
    }
}

impl DecodeLimits {
    /// Load limits from a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConsensusError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let limits = DecodeLimits::from_json(r#"{ "max_inputs": 10 }"#).unwrap();
        assert_eq!(limits.max_inputs, 10);
        assert_eq!(limits.max_outputs, MAX_OUTPUTS);
        assert_eq!(limits.max_locator_hashes, MAX_LOCATOR_HASHES);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(DecodeLimits::from_json("{}").unwrap(), DecodeLimits::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            DecodeLimits::from_json("{ max_inputs"),
            Err(ConsensusError::Serialization(_))
        ));
    }
}
