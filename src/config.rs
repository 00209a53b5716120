use serde::{Deserialize, Serialize};

/// How transaction processing treats an input whose referenced output is
/// not present in the UTXO set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingInputPolicy {
    /// Fail the transaction with `UnresolvedInput`.
    Reject,
    /// Leave the input unresolved; it contributes zero value.
    Tolerate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Number of leading zero hex characters a block hash must carry.
    pub difficulty: u32,
    /// Smallest input sum a transaction may spend.
    pub minimum_transaction: u64,
    pub missing_inputs: MissingInputPolicy,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: 3,
            minimum_transaction: 1,
            missing_inputs: MissingInputPolicy::Reject,
        }
    }
}

impl ChainConfig {
    pub fn with_params(difficulty: u32, minimum_transaction: u64) -> Self {
        Self {
            difficulty,
            minimum_transaction,
            ..Self::default()
        }
    }

    pub fn tolerate_missing_inputs(mut self) -> Self {
        self.missing_inputs = MissingInputPolicy::Tolerate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChainConfig::default();

        assert_eq!(config.difficulty, 3);
        assert_eq!(config.minimum_transaction, 1);
        assert_eq!(config.missing_inputs, MissingInputPolicy::Reject);
    }

    #[test]
    fn test_with_params() {
        let config = ChainConfig::with_params(5, 10).tolerate_missing_inputs();

        assert_eq!(config.difficulty, 5);
        assert_eq!(config.minimum_transaction, 10);
        assert_eq!(config.missing_inputs, MissingInputPolicy::Tolerate);
    }
}
