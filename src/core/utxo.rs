use crate::core::transaction::TxOutput;
use crate::crypto::hash::Hash256;
use crate::crypto::keys::PublicKey;
use std::collections::HashMap;

/// The set of unspent transaction outputs, keyed by output id.
///
/// An output lives here from the moment the transaction that created it is
/// processed until a later transaction spends it. All mutation funnels
/// through [`UtxoSet::apply`] so a transaction's effect lands atomically.
#[derive(Debug, Clone, Default)]
pub struct UtxoSet {
    entries: HashMap<Hash256, TxOutput>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, output_id: &Hash256) -> bool {
        self.entries.contains_key(output_id)
    }

    pub fn get(&self, output_id: &Hash256) -> Option<&TxOutput> {
        self.entries.get(output_id)
    }

    pub fn insert(&mut self, output: TxOutput) {
        self.entries.insert(output.id, output);
    }

    pub fn remove(&mut self, output_id: &Hash256) -> Option<TxOutput> {
        self.entries.remove(output_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TxOutput> {
        self.entries.values()
    }

    /// Commit one transaction's full effect: spend `spent`, create `created`.
    pub fn apply(&mut self, spent: &[Hash256], created: Vec<TxOutput>) {
        for output_id in spent {
            self.entries.remove(output_id);
        }
        for output in created {
            self.entries.insert(output.id, output);
        }
    }

    /// Outputs currently owned by `owner`, compared by key material.
    pub fn owned_by<'a>(&'a self, owner: &'a PublicKey) -> impl Iterator<Item = &'a TxOutput> {
        self.entries.values().filter(move |output| output.owner == *owner)
    }

    pub fn balance(&self, owner: &PublicKey) -> u64 {
        self.owned_by(owner).map(|output| output.value).sum()
    }
}
