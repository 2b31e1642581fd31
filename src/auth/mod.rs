//! Auth Module
//!
//! Password hashing, access tokens and the authenticated-user extractor.

mod extractor;
mod password;
mod token;

pub use extractor::AuthUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};
