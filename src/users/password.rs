use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::DataError;

/// Argon2 PHC string for storage; the plaintext never reaches the database.
pub fn hash_password(plain: &str) -> Result<String, DataError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            DataError::Internal(e.to_string())
        })?
        .to_string();
    Ok(hash)
}
