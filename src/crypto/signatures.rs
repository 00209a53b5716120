use crate::{ChainError, Result};
use secp256k1::ecdsa::Signature as Secp256k1Signature;
use serde::{Deserialize, Serialize};

/// Compact ECDSA signature over a 32-byte message digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 64 {
            return Err(ChainError::Crypto("Invalid signature length".to_string()));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self { r, s })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(64);
        bytes.extend_from_slice(&self.r);
        bytes.extend_from_slice(&self.s);
        bytes
    }

    pub fn from_secp256k1(signature: Secp256k1Signature) -> Self {
        let compact = signature.serialize_compact();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[0..32]);
        s.copy_from_slice(&compact[32..64]);

        Self { r, s }
    }

    pub fn to_secp256k1(&self) -> Result<Secp256k1Signature> {
        let mut compact = [0u8; 64];
        compact[0..32].copy_from_slice(&self.r);
        compact[32..64].copy_from_slice(&self.s);

        Secp256k1Signature::from_compact(&compact)
            .map_err(|e| ChainError::Crypto(format!("Invalid signature: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::Hash256;
    use crate::crypto::keys::PrivateKey;

    #[test]
    fn test_signature_roundtrip() -> Result<()> {
        let private_key = PrivateKey::new()?;
        let message = Hash256::hash(b"test message");
        let signature = private_key.sign(&message)?;

        let bytes = signature.to_bytes();
        let restored = Signature::from_bytes(&bytes)?;

        assert_eq!(signature, restored);

        Ok(())
    }

    #[test]
    fn test_invalid_length_rejected() {
        assert!(Signature::from_bytes(&[0u8; 63]).is_err());
        assert!(Signature::from_bytes(&[0u8; 65]).is_err());
    }
}
