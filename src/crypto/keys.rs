use crate::crypto::hash::Hash256;
use crate::crypto::signatures::Signature;
use crate::{ChainError, Result};
use rand::{rngs::OsRng, RngCore};
use secp256k1::{Message, PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub struct PrivateKey {
    key: SecretKey,
}

/// Serialized secp256k1 public key.
///
/// Equality is over the serialized key material, so ownership checks
/// compare keys by value rather than by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    key: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl PrivateKey {
    pub fn new() -> Result<Self> {
        let mut rng = OsRng;
        let mut secret_bytes = [0u8; 32];
        rng.fill_bytes(&mut secret_bytes);

        let secret_key = SecretKey::from_slice(&secret_bytes)
            .map_err(|e| ChainError::Crypto(format!("Failed to create private key: {}", e)))?;

        Ok(Self { key: secret_key })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(ChainError::Crypto("Private key must be 32 bytes".to_string()));
        }

        let secret_key = SecretKey::from_slice(bytes)
            .map_err(|e| ChainError::Crypto(format!("Invalid private key: {}", e)))?;

        Ok(Self { key: secret_key })
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.key.secret_bytes()
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        let secp = Secp256k1::new();
        let public_key = Secp256k1PublicKey::from_secret_key(&secp, &self.key);

        Ok(PublicKey {
            key: public_key.serialize().to_vec(),
        })
    }

    pub fn sign(&self, message: &Hash256) -> Result<Signature> {
        let secp = Secp256k1::new();
        let message = Message::from_digest_slice(message.as_bytes())
            .map_err(|e| ChainError::Crypto(format!("Invalid message: {}", e)))?;

        let signature = secp.sign_ecdsa(&message, &self.key);
        Ok(Signature::from_secp256k1(signature))
    }
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let _ = Secp256k1PublicKey::from_slice(bytes)
            .map_err(|e| ChainError::Crypto(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            key: bytes.to_vec(),
        })
    }

    pub fn to_bytes(&self) -> &[u8] {
        &self.key
    }

    pub fn verify(&self, message: &Hash256, signature: &Signature) -> Result<bool> {
        let secp = Secp256k1::new();

        let public_key = Secp256k1PublicKey::from_slice(&self.key)
            .map_err(|e| ChainError::Crypto(format!("Invalid public key: {}", e)))?;

        let message = Message::from_digest_slice(message.as_bytes())
            .map_err(|e| ChainError::Crypto(format!("Invalid message: {}", e)))?;

        let secp_signature = signature.to_secp256k1()?;

        match secp.verify_ecdsa(&message, &secp_signature, &public_key) {
            Ok(()) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}

impl KeyPair {
    pub fn new() -> Result<Self> {
        let private_key = PrivateKey::new()?;
        let public_key = private_key.public_key()?;

        Ok(Self {
            private_key,
            public_key,
        })
    }

    pub fn from_private_key(private_key: PrivateKey) -> Result<Self> {
        let public_key = private_key.public_key()?;

        Ok(Self {
            private_key,
            public_key,
        })
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() -> Result<()> {
        let keypair = KeyPair::new()?;

        assert_eq!(keypair.public_key.to_bytes().len(), 33);

        Ok(())
    }

    #[test]
    fn test_sign_and_verify() -> Result<()> {
        let keypair = KeyPair::new()?;
        let message = Hash256::hash(b"pay 40 to bob");

        let signature = keypair.private_key.sign(&message)?;
        assert!(keypair.public_key.verify(&message, &signature)?);

        Ok(())
    }

    #[test]
    fn test_wrong_key_rejected() -> Result<()> {
        let signer = KeyPair::new()?;
        let other = KeyPair::new()?;
        let message = Hash256::hash(b"pay 40 to bob");

        let signature = signer.private_key.sign(&message)?;
        assert!(!other.public_key.verify(&message, &signature)?);

        Ok(())
    }

    #[test]
    fn test_key_roundtrip() -> Result<()> {
        let private_key = PrivateKey::new()?;
        let restored = PrivateKey::from_bytes(&private_key.to_bytes())?;

        assert_eq!(private_key.to_bytes(), restored.to_bytes());
        assert_eq!(private_key.public_key()?, restored.public_key()?);

        Ok(())
    }

    #[test]
    fn test_public_key_value_equality() -> Result<()> {
        let keypair = KeyPair::new()?;
        let reparsed = PublicKey::from_bytes(keypair.public_key.to_bytes())?;

        // Distinct instances with the same key material compare equal.
        assert_eq!(keypair.public_key, reparsed);

        Ok(())
    }
}
