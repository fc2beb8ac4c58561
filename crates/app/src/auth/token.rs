//! Bearer token generation and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Prefix identifying tokens minted by this service.
pub const USER_TOKEN_PREFIX: &str = "pt";

/// Number of random bytes encoded in a token.
pub const USER_TOKEN_SECRET_BYTES: usize = 32;

const USER_TOKEN_SECRET_HEX_CHARS: usize = USER_TOKEN_SECRET_BYTES * 2;

/// Mint a new random bearer token: `pt_<64 hex chars>`.
#[must_use]
pub fn generate_user_token() -> String {
    let mut secret = [0_u8; USER_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    let token = format!("{USER_TOKEN_PREFIX}_{}", hex::encode(secret));

    secret.zeroize();

    token
}

/// Whether `token` has the shape of a token minted by [`generate_user_token`].
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token
        .strip_prefix(USER_TOKEN_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|secret| {
            secret.len() == USER_TOKEN_SECRET_HEX_CHARS
                && secret.bytes().all(|b| b.is_ascii_hexdigit())
        })
}

/// The digest stored in place of the token.
#[must_use]
pub fn hash_user_token(token: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(token.as_bytes());

    hex::encode(hasher.finalize())
}
