use crate::core::transaction::{Transaction, TxInput};
use crate::core::utxo::UtxoSet;
use crate::crypto::keys::{KeyPair, PublicKey};
use crate::{ChainError, Result};

/// A keypair with convenience logic over the UTXO set: balance scanning
/// and transaction construction. Holds no ledger state of its own.
#[derive(Debug, Clone)]
pub struct Wallet {
    keypair: KeyPair,
}

impl Wallet {
    pub fn new() -> Result<Self> {
        Ok(Self {
            keypair: KeyPair::new()?,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public_key
    }

    /// Sum of unspent outputs this wallet's key owns.
    pub fn balance(&self, utxo_set: &UtxoSet) -> u64 {
        utxo_set.balance(self.public_key())
    }

    pub fn sign_transaction(&self, tx: &mut Transaction) -> Result<()> {
        tx.sign(&self.keypair.private_key)
    }

    /// Build and sign a transaction paying `value` to `recipient`.
    ///
    /// Gathers this wallet's unspent outputs until they cover the amount
    /// and references them as inputs; the change output comes later, when
    /// the transaction is processed.
    pub fn send_funds(
        &self,
        recipient: &PublicKey,
        value: u64,
        utxo_set: &UtxoSet,
    ) -> Result<Transaction> {
        let mut gathered = 0u64;
        let mut inputs = Vec::new();

        for output in utxo_set.owned_by(self.public_key()) {
            gathered += output.value;
            inputs.push(TxInput::new(output.id));
            if gathered >= value {
                break;
            }
        }

        if gathered < value {
            return Err(ChainError::InsufficientFunds {
                required: value,
                available: gathered,
            });
        }

        let mut tx = Transaction::new(
            self.public_key().clone(),
            recipient.clone(),
            value,
            inputs,
        );
        self.sign_transaction(&mut tx)?;

        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::TxOutput;
    use crate::crypto::hash::Hash256;

    #[test]
    fn test_balance_scans_only_own_outputs() -> Result<()> {
        let alice = Wallet::new()?;
        let bob = Wallet::new()?;
        let mut set = UtxoSet::new();

        set.insert(TxOutput::new(alice.public_key().clone(), 60, Hash256::zero()));
        set.insert(TxOutput::new(bob.public_key().clone(), 40, Hash256::zero()));

        assert_eq!(alice.balance(&set), 60);
        assert_eq!(bob.balance(&set), 40);

        Ok(())
    }

    #[test]
    fn test_send_funds_builds_signed_transaction() -> Result<()> {
        let alice = Wallet::new()?;
        let bob = Wallet::new()?;
        let mut set = UtxoSet::new();

        set.insert(TxOutput::new(alice.public_key().clone(), 30, Hash256::zero()));
        set.insert(TxOutput::new(alice.public_key().clone(), 30, Hash256::zero()));

        let tx = alice.send_funds(bob.public_key(), 50, &set)?;

        assert_eq!(tx.value, 50);
        assert_eq!(tx.inputs.len(), 2);
        assert!(tx.verify_signature()?);
        // Referenced outputs all belong to the sender.
        for input in &tx.inputs {
            assert!(set.get(&input.output_id).unwrap().is_owned_by(alice.public_key()));
        }

        Ok(())
    }

    #[test]
    fn test_send_funds_insufficient_balance() -> Result<()> {
        let alice = Wallet::new()?;
        let bob = Wallet::new()?;
        let mut set = UtxoSet::new();

        set.insert(TxOutput::new(alice.public_key().clone(), 60, Hash256::zero()));

        assert!(matches!(
            alice.send_funds(bob.public_key(), 1000, &set),
            Err(ChainError::InsufficientFunds {
                required: 1000,
                available: 60
            })
        ));

        Ok(())
    }

    #[test]
    fn test_send_funds_stops_gathering_once_covered() -> Result<()> {
        let alice = Wallet::new()?;
        let bob = Wallet::new()?;
        let mut set = UtxoSet::new();

        set.insert(TxOutput::new(alice.public_key().clone(), 100, Hash256::zero()));

        let tx = alice.send_funds(bob.public_key(), 40, &set)?;

        assert_eq!(tx.inputs.len(), 1);

        Ok(())
    }
}
