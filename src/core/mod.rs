//! Core ledger components

pub mod block;
pub mod blockchain;
pub mod ledger;
pub mod transaction;
pub mod utxo;

pub use block::{Block, Parent};
pub use blockchain::Chain;
pub use ledger::Ledger;
pub use transaction::{Transaction, TxInput, TxOutput};
pub use utxo::UtxoSet;
