//! # Shoplist Core
//!
//! Core types shared by every Shoplist crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Salt generation, salted password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use shoplist_core::{AppError, generate_salt, hash_password, verify_password};
//!
//! let salt = generate_salt();
//! let hash = hash_password("secure_password", &salt)?;
//! assert!(verify_password("secure_password", &salt, &hash)?);
//!
//! let error = AppError::not_found(anyhow::anyhow!("List not found"));
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{MAX_PASSWORD_BYTES, SALT_LEN, Salt, generate_salt, hash_password, verify_password};
