use crate::config::MissingInputPolicy;
use crate::core::ledger::Ledger;
use crate::crypto::hash::Hash256;
use crate::crypto::keys::{KeyPair, PrivateKey, PublicKey};
use crate::crypto::signatures::Signature;
use crate::{ChainError, Result};
use serde::{Deserialize, Serialize};

/// A value assignment to an owner, identified by the digest of its content.
///
/// Immutable once created; it exists in at most one UTXO set at a time and
/// is removed from it when spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub id: Hash256,
    pub owner: PublicKey,
    pub value: u64,
    /// Id of the transaction this output was created in.
    pub parent_tx: Hash256,
}

/// A reference to a prior output by id.
///
/// `resolved` is a cache filled in during processing; the UTXO set lookup
/// stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub output_id: Hash256,
    pub resolved: Option<TxOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Hash256,
    pub sender: PublicKey,
    pub recipient: PublicKey,
    pub value: u64,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub signature: Option<Signature>,
}

impl TxOutput {
    pub fn new(owner: PublicKey, value: u64, parent_tx: Hash256) -> Self {
        let mut data = Vec::new();
        data.extend_from_slice(owner.to_bytes());
        data.extend_from_slice(&value.to_le_bytes());
        data.extend_from_slice(parent_tx.as_bytes());
        let id = Hash256::hash(&data);

        Self {
            id,
            owner,
            value,
            parent_tx,
        }
    }

    pub fn is_owned_by(&self, owner: &PublicKey) -> bool {
        self.owner == *owner
    }
}

impl TxInput {
    pub fn new(output_id: Hash256) -> Self {
        Self {
            output_id,
            resolved: None,
        }
    }
}

impl Transaction {
    pub fn new(sender: PublicKey, recipient: PublicKey, value: u64, inputs: Vec<TxInput>) -> Self {
        Self {
            id: Hash256::zero(),
            sender,
            recipient,
            value,
            inputs,
            outputs: Vec::new(),
            signature: None,
        }
    }

    /// Build the issuance transaction that seeds a chain.
    ///
    /// It has no inputs, keeps the zero id, and carries its single output
    /// inline; the chain inserts that output into the UTXO set directly
    /// instead of processing the transaction.
    pub fn genesis(issuer: &KeyPair, recipient: PublicKey, value: u64) -> Result<Self> {
        let mut tx = Self::new(issuer.public_key.clone(), recipient, value, Vec::new());
        tx.sign(&issuer.private_key)?;

        let output = TxOutput::new(tx.recipient.clone(), tx.value, tx.id);
        tx.outputs.push(output);

        Ok(tx)
    }

    /// Digest of the data covered by the signature: sender, recipient and
    /// value. Inputs, outputs and the transaction id are deliberately not
    /// covered, matching the audit checks.
    fn signing_message(&self) -> Hash256 {
        let mut data = Vec::new();
        data.extend_from_slice(self.sender.to_bytes());
        data.extend_from_slice(self.recipient.to_bytes());
        data.extend_from_slice(&self.value.to_le_bytes());

        Hash256::hash(&data)
    }

    pub fn sign(&mut self, secret: &PrivateKey) -> Result<()> {
        let message = self.signing_message();
        self.signature = Some(secret.sign(&message)?);
        Ok(())
    }

    /// Recompute the signed message and verify it against the sender's key.
    /// An unsigned transaction verifies false.
    pub fn verify_signature(&self) -> Result<bool> {
        match &self.signature {
            Some(signature) => self.sender.verify(&self.signing_message(), signature),
            None => Ok(false),
        }
    }

    /// Validate this transaction against the ledger and commit its effect.
    ///
    /// The effect set (outputs created, resolved inputs spent) is computed
    /// and checked in full before anything touches the UTXO set, so a
    /// failure leaves the ledger exactly as it was.
    pub fn process(&mut self, ledger: &mut Ledger) -> Result<()> {
        if !self.verify_signature()? {
            return Err(ChainError::InvalidSignature);
        }

        for input in &mut self.inputs {
            match ledger.utxo_set.get(&input.output_id) {
                Some(output) => input.resolved = Some(output.clone()),
                None => match ledger.config().missing_inputs {
                    MissingInputPolicy::Reject => {
                        return Err(ChainError::UnresolvedInput {
                            output_id: input.output_id,
                        })
                    }
                    MissingInputPolicy::Tolerate => input.resolved = None,
                },
            }
        }

        let available = self.input_value();
        let minimum = ledger.config().minimum_transaction;
        if available < minimum {
            return Err(ChainError::InputsTooSmall { available, minimum });
        }

        let change = available
            .checked_sub(self.value)
            .ok_or(ChainError::InsufficientFunds {
                required: self.value,
                available,
            })?;

        self.id = ledger.next_transaction_id(&self.sender, &self.recipient, self.value);

        self.outputs
            .push(TxOutput::new(self.recipient.clone(), self.value, self.id));
        self.outputs
            .push(TxOutput::new(self.sender.clone(), change, self.id));

        let spent: Vec<Hash256> = self
            .inputs
            .iter()
            .filter_map(|input| input.resolved.as_ref().map(|output| output.id))
            .collect();
        ledger.utxo_set.apply(&spent, self.outputs.clone());

        log::debug!(
            "transaction {} processed: {} spent, {} to recipient, {} change",
            self.id,
            available,
            self.value,
            change
        );
        Ok(())
    }

    /// Sum of resolved input values. Unresolved inputs contribute nothing.
    pub fn input_value(&self) -> u64 {
        self.inputs
            .iter()
            .filter_map(|input| input.resolved.as_ref().map(|output| output.value))
            .sum()
    }

    pub fn output_value(&self) -> u64 {
        self.outputs.iter().map(|output| output.value).sum()
    }
}
