//! Obfuscation of outgoing notification fields.
//!
//! The notification API expects each text field encrypted the way
//! `openssl enc -aes-128-cbc -salt -base64 -A` produces it: an 8-byte
//! random salt, key and IV derived via EVP_BytesToKey with MD5, and the
//! `Salted__` header prepended to the ciphertext. The base64 output is
//! made URL-safe (`/` -> `_`, `+` -> `-`, padding stripped).

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use base64::Engine as _;
use md5::{Digest, Md5};
use rand::rngs::OsRng;
use rand::RngCore;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;

const SALT_HEADER: &[u8] = b"Salted__";
const SALT_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("encryption secret is empty")]
    EmptySecret,

    #[error("failed to generate salt: {0}")]
    Salt(String),
}

/// Encrypts `plaintext` under `secret` and encodes it for the wire.
///
/// Every call draws a fresh salt, so identical inputs produce different
/// output. A single trailing space is appended to the plaintext before
/// encryption; the remote decryptor expects it.
pub fn obfuscate(secret: &str, plaintext: &str) -> Result<String, CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::EmptySecret);
    }
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| CryptoError::Salt(e.to_string()))?;
    Ok(encrypt_with_salt(secret.as_bytes(), &salt, plaintext))
}

fn encrypt_with_salt(secret: &[u8], salt: &[u8; SALT_LEN], plaintext: &str) -> String {
    let (key, iv) = derive_key_iv(secret, salt);

    let mut input = plaintext.as_bytes().to_vec();
    input.push(b' ');
    let ciphertext =
        Aes128CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(&input);

    let mut raw = Vec::with_capacity(SALT_HEADER.len() + SALT_LEN + ciphertext.len());
    raw.extend_from_slice(SALT_HEADER);
    raw.extend_from_slice(salt);
    raw.extend_from_slice(&ciphertext);

    let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);
    encoded.replace('/', "_").replace('+', "-").replace('=', "")
}

/// EVP_BytesToKey with MD5 and a single round: `D1 = MD5(secret || salt)`
/// is the key, `D2 = MD5(D1 || secret || salt)` is the IV.
fn derive_key_iv(secret: &[u8], salt: &[u8; SALT_LEN]) -> ([u8; 16], [u8; 16]) {
    let mut hasher = Md5::new();
    hasher.update(secret);
    hasher.update(salt);
    let d1 = hasher.finalize();

    let mut hasher = Md5::new();
    hasher.update(&d1);
    hasher.update(secret);
    hasher.update(salt);
    let d2 = hasher.finalize();

    (d1.into(), d2.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Generated with:
    //   printf 'server ' | openssl enc -aes-128-cbc -S 0102030405060708 \
    //       -md md5 -pass pass:testpass -base64 -A
    // plus the Salted__ header and the URL-safe alphabet swap.
    #[test]
    fn matches_openssl_enc_output() {
        let salt = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let out = encrypt_with_salt(b"testpass", &salt, "server");
        assert_eq!(out, "U2FsdGVkX18BAgMEBQYHCKQke4ewo2-3EIP-3TElQns");
    }

    #[test]
    fn derives_key_and_iv_per_evp_bytes_to_key() {
        let salt = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let (key, iv) = derive_key_iv(b"testpass", &salt);
        assert_eq!(
            key,
            [
                0x97, 0xed, 0xe0, 0x67, 0x0a, 0x22, 0xb5, 0x18, 0x4f, 0xa7, 0x36, 0x71, 0x0e,
                0xeb, 0x02, 0xbb
            ]
        );
        assert_ne!(key, iv);
    }
}
