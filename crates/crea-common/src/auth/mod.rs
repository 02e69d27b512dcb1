//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{
    equalize_verification_time, hash_password, validate_password_strength, verify_password,
    MIN_PASSWORD_LEN,
};
