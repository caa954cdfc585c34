//! Password hashing (Argon2id keyed with the server secret)

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHasher, Version,
};

use cedin::DomainError;

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

/// Hashes and verifies user passwords
#[derive(Clone)]
pub struct PasswordService {
    secret: String,
}

impl PasswordService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, DomainError> {
        Argon2::new_with_secret(
            self.secret.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| DomainError::Repository(format!("Password hasher setup failed: {}", e)))
    }

    /// Hash a plaintext password into a PHC string
    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        let len = password.chars().count();
        if len < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if len > MAX_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at most {} characters",
                MAX_PASSWORD_LEN
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Repository(format!("Password hashing failed: {}", e)))
    }

    /// Check a plaintext password against a stored hash
    #[cfg(test)]
    pub(crate) fn verify(&self, password: &str, hash: &str) -> bool {
        use argon2::{PasswordHash, PasswordVerifier};

        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        self.argon2()
            .map(|argon2| argon2.verify_password(password.as_bytes(), &parsed).is_ok())
            .unwrap_or(false)
    }
}
