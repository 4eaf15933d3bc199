pub mod password;
pub mod token;

pub use password::{
    hash_password, hash_password_blocking, hash_password_with_params, verify_password,
    verify_password_blocking, HashParams, PasswordError,
};
pub use token::{Claims, TokenError, TokenService, MAX_TTL_SECS};
