use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex_str)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }

        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(Self(array))
    }

    /// Whether the first `n` characters of the hex digest are `'0'`.
    ///
    /// Each hex character covers one nibble, so this checks the leading
    /// `n` nibbles. This is the mining difficulty predicate: a hash meets
    /// difficulty `d` when its hex text starts with `d` zeros.
    pub fn has_leading_zero_chars(&self, n: u32) -> bool {
        if n as usize > 2 * self.0.len() {
            return false;
        }

        self.0
            .iter()
            .flat_map(|byte| [byte >> 4, byte & 0x0f])
            .take(n as usize)
            .all(|nibble| nibble == 0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

pub trait Hashable {
    fn hash(&self) -> Hash256;
}

impl Hashable for &[u8] {
    fn hash(&self) -> Hash256 {
        Hash256::hash(self)
    }
}

impl Hashable for Vec<u8> {
    fn hash(&self) -> Hash256 {
        Hash256::hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash256_deterministic() {
        let data = b"hello world";
        let hash1 = Hash256::hash(data);
        let hash2 = Hash256::hash(data);

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, Hash256::zero());
    }

    #[test]
    fn test_hash256_hex() {
        let hash = Hash256::hash(b"test");
        let hex_str = hash.to_hex();
        let parsed_hash = Hash256::from_hex(&hex_str).unwrap();

        assert_eq!(hash, parsed_hash);
        assert_eq!(hex_str.len(), 64);
    }

    #[test]
    fn test_leading_zero_chars() {
        let mut bytes = [0xffu8; 32];
        bytes[0] = 0x00;
        bytes[1] = 0x0f;
        let hash = Hash256::new(bytes);

        // Hex text is "000f..": three zero characters, not four.
        assert!(hash.has_leading_zero_chars(0));
        assert!(hash.has_leading_zero_chars(3));
        assert!(!hash.has_leading_zero_chars(4));
    }

    #[test]
    fn test_leading_zero_chars_bounds() {
        let zero = Hash256::zero();

        assert!(zero.has_leading_zero_chars(64));
        assert!(!zero.has_leading_zero_chars(65));
    }
}
