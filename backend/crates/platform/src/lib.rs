//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random secrets and Base64 helpers
//! - Password hashing (Argon2id)
//! - Signed bearer tokens (JWT, HS256)

pub mod crypto;
pub mod password;
pub mod token;
