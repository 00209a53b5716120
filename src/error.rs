use crate::crypto::hash::Hash256;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChainError>;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("transaction signature failed to verify")]
    InvalidSignature,

    #[error("transaction inputs too small: {available} available, {minimum} required")]
    InputsTooSmall { available: u64, minimum: u64 },

    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("input references unknown output {output_id}")]
    UnresolvedInput { output_id: Hash256 },

    #[error("block {height}: stored hash does not match its contents")]
    ChainHashMismatch { height: usize },

    #[error("block {height}: does not link to the hash of its predecessor")]
    ChainLinkMismatch { height: usize },

    #[error("block {height}: hash does not meet the proof-of-work target")]
    ProofOfWorkUnmet { height: usize },

    #[error("block {height}, transaction {index}: signature is invalid")]
    TransactionSignatureInvalid { height: usize, index: usize },

    #[error("block {height}, transaction {index}: inputs ({inputs}) do not equal outputs ({outputs})")]
    TransactionValueMismatch {
        height: usize,
        index: usize,
        inputs: u64,
        outputs: u64,
    },

    #[error("block {height}, transaction {index}: referenced output {output_id} is not unspent")]
    MissingReplayInput {
        height: usize,
        index: usize,
        output_id: Hash256,
    },

    #[error("block {height}, transaction {index}: cached input value {cached} does not match unspent record {recorded}")]
    InputValueMismatch {
        height: usize,
        index: usize,
        cached: u64,
        recorded: u64,
    },

    #[error("block {height}, transaction {index}: outputs do not follow the recipient/change convention")]
    OutputStructureInvalid { height: usize, index: usize },

    #[error("proof-of-work search was interrupted")]
    MiningInterrupted,

    #[error("crypto error: {0}")]
    Crypto(String),
}
