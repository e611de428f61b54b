use std::fmt;

use rand::rngs::OsRng;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, Oaep, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::encoding::{from_base64url, to_base64url};
use crate::error::CryptoError;

/// Size of the RSA modulus in bits
pub const RSA_MODULUS_BITS: usize = 2048;
/// Fixed RSA public exponent (F4)
pub const RSA_PUBLIC_EXPONENT: u64 = 65537;
/// JWK `alg` value for RSA-OAEP with SHA-256
pub const JWK_ALGORITHM: &str = "RSA-OAEP-256";

const JWK_KEY_TYPE: &str = "RSA";

/// Errors that can occur while importing, exporting or generating keys
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
    #[error("rsa error: {0}")]
    Rsa(#[from] rsa::Error),
    #[error("malformed jwk: {0}")]
    Json(#[from] serde_json::Error),
}

/// The operation an imported key is allowed to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
}

impl KeyUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUsage::Encrypt => "encrypt",
            KeyUsage::Decrypt => "decrypt",
        }
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RSA key in JSON Web Key form (RFC 7517 / RFC 7518 section 6.3)
///
/// Integers are big-endian, base64url without padding. Only the fields we
/// read or write are modelled; anything else in the input is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RsaJwk {
    kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ext: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key_ops: Option<Vec<String>>,
    n: String,
    e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qi: Option<String>,
}

impl RsaJwk {
    fn public(key: &RsaPublicKey) -> Self {
        Self {
            kty: JWK_KEY_TYPE.to_string(),
            alg: Some(JWK_ALGORITHM.to_string()),
            ext: Some(true),
            key_ops: Some(vec![KeyUsage::Encrypt.as_str().to_string()]),
            n: encode_uint(key.n()),
            e: encode_uint(key.e()),
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        }
    }

    fn parse(jwk: &str) -> Result<Self, KeyError> {
        Ok(serde_json::from_str(jwk)?)
    }

    /// Reject keys that were not made for RSA-OAEP-256 or that do not
    /// permit `usage`
    fn check(&self, usage: KeyUsage) -> Result<(), KeyError> {
        if self.kty != JWK_KEY_TYPE {
            return Err(anyhow::anyhow!(
                "unsupported jwk key type {}, expected {}",
                self.kty,
                JWK_KEY_TYPE
            )
            .into());
        }
        if let Some(alg) = &self.alg {
            if alg != JWK_ALGORITHM {
                return Err(anyhow::anyhow!(
                    "unsupported jwk algorithm {}, expected {}",
                    alg,
                    JWK_ALGORITHM
                )
                .into());
            }
        }
        if let Some(ops) = &self.key_ops {
            if !ops.iter().any(|op| op == usage.as_str()) {
                return Err(anyhow::anyhow!("jwk key_ops do not permit {}", usage).into());
            }
        }
        Ok(())
    }
}

fn encode_uint(value: &BigUint) -> String {
    to_base64url(&value.to_bytes_be())
}

fn decode_uint(field: &str, value: Option<&str>) -> Result<BigUint, KeyError> {
    let value = value.ok_or_else(|| anyhow::anyhow!("jwk is missing field {}", field))?;
    let bytes = from_base64url(value)
        .map_err(|e| anyhow::anyhow!("jwk field {} is not base64url: {}", field, e))?;
    if bytes.is_empty() {
        return Err(anyhow::anyhow!("jwk field {} is empty", field).into());
    }
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Public half of an identity key, restricted to encryption
///
/// Used to wrap per-message content keys for the key's owner. It can only be
/// built from a public JWK; a JWK carrying private components is refused so
/// that a private key can never be mistaken for something to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionKey(RsaPublicKey);

impl EncryptionKey {
    /// Import a public key from its JWK text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not a JSON object with `kty`, `n` and `e`
    /// - `kty` is not `RSA`, or `alg` is present and not `RSA-OAEP-256`
    /// - `key_ops` is present and does not include `encrypt`
    /// - The JWK carries a private exponent
    pub fn from_jwk(jwk: &str) -> Result<Self, KeyError> {
        let jwk = RsaJwk::parse(jwk)?;
        jwk.check(KeyUsage::Encrypt)?;
        if jwk.d.is_some() {
            return Err(anyhow::anyhow!("refusing to import a private jwk as an encryption key").into());
        }

        let n = decode_uint("n", Some(jwk.n.as_str()))?;
        let e = decode_uint("e", Some(jwk.e.as_str()))?;
        Ok(Self(RsaPublicKey::new(n, e)?))
    }

    /// Export as a public JWK with `key_ops: ["encrypt"]`
    pub fn to_jwk(&self) -> Result<String, KeyError> {
        Ok(serde_json::to_string(&RsaJwk::public(&self.0))?)
    }

    /// Encrypt a short payload (a content key) with RSA-OAEP-SHA256
    pub(crate) fn wrap(&self, data: &[u8]) -> Result<Vec<u8>, rsa::Error> {
        let mut rng = OsRng;
        self.0.encrypt(&mut rng, Oaep::new::<Sha256>(), data)
    }
}

/// Private half of an identity key, restricted to decryption
///
/// Keep this on the device. `Debug` output never includes key material.
#[derive(Clone)]
pub struct DecryptionKey(RsaPrivateKey);

impl fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("modulus_bits", &(self.0.size() * 8))
            .finish_non_exhaustive()
    }
}

impl DecryptionKey {
    /// Import a private key from its JWK text
    ///
    /// Both primes must be present; the CRT parameters are recomputed
    /// rather than trusted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not a JSON object with `kty`, `n`, `e`, `d`, `p` and `q`
    /// - `kty` is not `RSA`, or `alg` is present and not `RSA-OAEP-256`
    /// - `key_ops` is present and does not include `decrypt`
    /// - The components do not form a consistent RSA key
    pub fn from_jwk(jwk: &str) -> Result<Self, KeyError> {
        let jwk = RsaJwk::parse(jwk)?;
        jwk.check(KeyUsage::Decrypt)?;

        let n = decode_uint("n", Some(jwk.n.as_str()))?;
        let e = decode_uint("e", Some(jwk.e.as_str()))?;
        let d = decode_uint("d", jwk.d.as_deref())?;
        let p = decode_uint("p", jwk.p.as_deref())?;
        let q = decode_uint("q", jwk.q.as_deref())?;

        let key = RsaPrivateKey::from_components(n, e, d, vec![p, q])?;
        key.validate()?;
        Ok(Self(key))
    }

    /// Export as a private JWK with `key_ops: ["decrypt"]`
    pub fn to_jwk(&self) -> Result<String, KeyError> {
        let primes = self.0.primes();
        if primes.len() != 2 {
            return Err(anyhow::anyhow!(
                "multi-prime keys cannot be exported, got {} primes",
                primes.len()
            )
            .into());
        }
        let (dp, dq, qi) = match (self.0.dp(), self.0.dq(), self.0.crt_coefficient()) {
            (Some(dp), Some(dq), Some(qi)) => (dp, dq, qi),
            _ => return Err(anyhow::anyhow!("private key is missing CRT parameters").into()),
        };

        let mut jwk = RsaJwk::public(&self.0.to_public_key());
        jwk.key_ops = Some(vec![KeyUsage::Decrypt.as_str().to_string()]);
        jwk.d = Some(encode_uint(self.0.d()));
        jwk.p = Some(encode_uint(&primes[0]));
        jwk.q = Some(encode_uint(&primes[1]));
        jwk.dp = Some(encode_uint(dp));
        jwk.dq = Some(encode_uint(dq));
        jwk.qi = Some(encode_uint(&qi));

        Ok(serde_json::to_string(&jwk)?)
    }

    /// Derive the matching encryption key
    pub fn public(&self) -> EncryptionKey {
        EncryptionKey(self.0.to_public_key())
    }

    /// Recover a payload wrapped by [`EncryptionKey::wrap`]
    pub(crate) fn unwrap(&self, data: &[u8]) -> Result<Vec<u8>, rsa::Error> {
        self.0.decrypt(Oaep::new::<Sha256>(), data)
    }
}

/// A freshly generated identity keypair, both halves serialized as JWK text
///
/// `public_key_jwk` is what gets published; `private_key_jwk` belongs in a
/// [`KeyStore`](crate::key_store::KeyStore) and nowhere else.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub public_key_jwk: String,
    pub private_key_jwk: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key_jwk", &self.public_key_jwk)
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate a 2048-bit RSA-OAEP-256 keypair
    ///
    /// This is CPU heavy (primality testing); async callers should prefer
    /// [`KeyPair::generate_async`].
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = OsRng;
        let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);
        let private = RsaPrivateKey::new_with_exp(&mut rng, RSA_MODULUS_BITS, &exponent)
            .map_err(KeyError::from)?;
        let private = DecryptionKey(private);

        let pair = Self {
            public_key_jwk: private.public().to_jwk()?,
            private_key_jwk: private.to_jwk()?,
        };
        tracing::debug!("generated {}-bit identity keypair", RSA_MODULUS_BITS);
        Ok(pair)
    }

    /// Generate a keypair on the blocking thread pool
    pub async fn generate_async() -> Result<Self, CryptoError> {
        tokio::task::spawn_blocking(Self::generate).await?
    }

    /// Import the public half
    pub fn encryption_key(&self) -> Result<EncryptionKey, KeyError> {
        EncryptionKey::from_jwk(&self.public_key_jwk)
    }

    /// Import the private half
    pub fn decryption_key(&self) -> Result<DecryptionKey, KeyError> {
        DecryptionKey::from_jwk(&self.private_key_jwk)
    }
}

/// Generate a new identity keypair as JWK strings
pub fn generate_key_pair() -> Result<KeyPair, CryptoError> {
    KeyPair::generate()
}
