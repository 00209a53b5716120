use crate::config::ChainConfig;
use crate::core::utxo::UtxoSet;
use crate::crypto::hash::Hash256;
use crate::crypto::keys::PublicKey;

/// Mutable ledger context threaded through transaction processing.
///
/// Owns the live UTXO set and the transaction sequence counter; there is no
/// ambient global state. A [`crate::core::Chain`] carries one of these for
/// its whole lifetime.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub utxo_set: UtxoSet,
    sequence: u64,
    config: ChainConfig,
}

impl Ledger {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            utxo_set: UtxoSet::new(),
            sequence: 0,
            config,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Transactions processed so far, counting failed attempts that got as
    /// far as id assignment.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Next transaction id: digest of sender, recipient, value and a
    /// monotonically increasing counter. The counter is what keeps two
    /// otherwise identical transactions from colliding; it is never reused.
    pub(crate) fn next_transaction_id(
        &mut self,
        sender: &PublicKey,
        recipient: &PublicKey,
        value: u64,
    ) -> Hash256 {
        self.sequence += 1;

        let mut data = Vec::new();
        data.extend_from_slice(sender.to_bytes());
        data.extend_from_slice(recipient.to_bytes());
        data.extend_from_slice(&value.to_le_bytes());
        data.extend_from_slice(&self.sequence.to_le_bytes());

        Hash256::hash(&data)
    }

    pub fn balance(&self, owner: &PublicKey) -> u64 {
        self.utxo_set.balance(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::Result;

    #[test]
    fn test_sequence_never_repeats_an_id() -> Result<()> {
        let alice = KeyPair::new()?;
        let bob = KeyPair::new()?;
        let mut ledger = Ledger::new(ChainConfig::default());

        // Identical sender/recipient/value still get distinct ids.
        let id1 = ledger.next_transaction_id(&alice.public_key, &bob.public_key, 40);
        let id2 = ledger.next_transaction_id(&alice.public_key, &bob.public_key, 40);

        assert_ne!(id1, id2);
        assert_eq!(ledger.sequence(), 2);

        Ok(())
    }
}
