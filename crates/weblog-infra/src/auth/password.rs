//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use weblog_core::ports::{CredentialError, PasswordService};

/// Argon2-based password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            tracing::debug!("Stored credential is not a valid PHC string");
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::Params;
    use weblog_core::ports::DUMMY_PASSWORD_HASH;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "secret1";

        let hash = service.hash(password).unwrap();
        assert!(service.verify(password, &hash));
        assert!(!service.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = Argon2PasswordService::new();

        let first = service.hash("secret1").unwrap();
        let second = service.hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        let service = Argon2PasswordService::new();

        assert!(!service.verify("123456", "123456"));
        assert!(!service.verify("secret1", ""));
    }

    #[test]
    fn test_dummy_hash_costs_a_full_verification() {
        let service = Argon2PasswordService::new();

        let parsed = PasswordHash::new(DUMMY_PASSWORD_HASH).unwrap();
        let params = Params::try_from(&parsed).unwrap();
        assert_eq!(params.m_cost(), Params::DEFAULT_M_COST);
        assert_eq!(params.t_cost(), Params::DEFAULT_T_COST);
        assert_eq!(params.p_cost(), Params::DEFAULT_P_COST);

        assert!(!service.verify("123456", DUMMY_PASSWORD_HASH));
    }
}
