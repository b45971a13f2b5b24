//! Age encryption for record data.
//!
//! Record data is encrypted with the age format using x25519 keys and
//! ASCII armor, once for the whole recipient set.

use std::io::{Read, Write};

use age::secrecy::ExposeSecret;
use age::x25519;
use tracing::trace;

use crate::error::{CipherError, Result};

/// A freshly generated keypair as strings: (public key, secret key).
pub fn generate_keypair() -> (String, String) {
    let identity = x25519::Identity::generate();
    let public_key = identity.to_public().to_string();
    let secret = identity.to_string().expose_secret().to_string();
    (public_key, secret)
}

/// Encrypt plaintext for multiple recipients.
///
/// # Errors
///
/// Returns `CipherError` if encryption fails at any stage.
pub fn encrypt(plaintext: &str, recipients: &[x25519::Recipient]) -> Result<String> {
    trace!(
        recipients = recipients.len(),
        plaintext_len = plaintext.len(),
        "encrypting"
    );

    let encryptor =
        age::Encryptor::with_recipients(recipients.iter().map(|r| r as &dyn age::Recipient))
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(age::armor::ArmoredWriter::wrap_output(
            &mut encrypted,
            age::armor::Format::AsciiArmor,
        )?)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    writer.write_all(plaintext.as_bytes())?;
    let armored = writer
        .finish()
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
    armored
        .finish()
        .map_err(|e| CipherError::ArmorFailed(e.to_string()))?;

    trace!(ciphertext_len = encrypted.len(), "encrypted");

    String::from_utf8(encrypted)
        .map_err(|e| CipherError::EncryptionFailed(format!("UTF-8 error: {}", e)).into())
}

/// Decrypt an armored ciphertext with a private identity.
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` if the identity is not a recipient
/// or the ciphertext is damaged.
pub fn decrypt(encrypted: &str, identity: &x25519::Identity) -> Result<String> {
    trace!(ciphertext_len = encrypted.len(), "decrypting");

    let reader = age::armor::ArmoredReader::new(encrypted.as_bytes());
    let decryptor =
        age::Decryptor::new(reader).map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

    let mut decrypted = Vec::new();
    let mut reader = decryptor
        .decrypt(std::iter::once(identity as &dyn age::Identity))
        .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

    String::from_utf8(decrypted)
        .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)).into())
}

/// Parse a public key string into an age recipient.
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the key format is invalid.
pub fn parse_recipient(key: &str) -> Result<x25519::Recipient> {
    key.parse::<x25519::Recipient>()
        .map_err(|_| CipherError::InvalidPublicKey(key.to_string()).into())
}

/// Parse a secret key string into an age identity.
///
/// # Errors
///
/// Returns `CipherError::InvalidPrivateKey` if the key format is invalid.
/// The key itself is never included in the error.
pub fn parse_identity(key: &str) -> Result<x25519::Identity> {
    key.trim()
        .parse::<x25519::Identity>()
        .map_err(|e: &str| CipherError::InvalidPrivateKey(e.to_string()).into())
}
