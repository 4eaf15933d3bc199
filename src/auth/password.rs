//! Password hashing with Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`) so the
//! algorithm, cost and salt travel with the digest and verification needs
//! nothing else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),

    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Argon2 work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashParams {
    /// Checks the work factor against Argon2's limits.
    pub fn to_params(&self) -> Result<Params, PasswordError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_params(password, &HashParams::default())
}

pub fn hash_password_with_params(
    password: &str,
    params: &HashParams,
) -> Result<String, PasswordError> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_params()?);

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;

    Ok(password_hash.to_string())
}

/// Checks `candidate` against a stored PHC hash. A malformed hash is simply a
/// mismatch.
pub fn verify_password(hash: &str, candidate: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed_hash)
        .is_ok()
}

/// [`hash_password_with_params`] on the blocking pool, keeping the memory-hard
/// work off the async workers.
pub async fn hash_password_blocking(
    password: String,
    params: HashParams,
) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password_with_params(&password, &params)).await?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(
    hash: String,
    candidate: String,
) -> Result<bool, PasswordError> {
    let matches = tokio::task::spawn_blocking(move || verify_password(&hash, &candidate)).await?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> HashParams {
        HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "secret"));
        assert!(!verify_password(&hash, "Secret"));
    }

    #[test]
    fn test_salt_makes_hashes_differ() {
        let first = hash_password_with_params("same-password", &light()).unwrap();
        let second = hash_password_with_params("same-password", &light()).unwrap();

        assert_ne!(first, second);
        assert!(verify_password(&first, "same-password"));
        assert!(verify_password(&second, "same-password"));
    }

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hash = hash_password_with_params("pw", &light()).unwrap();
        assert!(hash.contains("m=1024,t=1,p=1"));
        assert!(verify_password(&hash, "pw"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let params = HashParams {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        let result = hash_password_with_params("pw", &params);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
        assert!(params.to_params().is_err());
        assert!(light().to_params().is_ok());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_blocking_pool_hash_and_verify() {
        let hash = hash_password_blocking("secret".to_string(), light())
            .await
            .unwrap();

        assert!(verify_password_blocking(hash.clone(), "secret".to_string())
            .await
            .unwrap());
        assert!(!verify_password_blocking(hash, "wrong".to_string())
            .await
            .unwrap());
    }
}
