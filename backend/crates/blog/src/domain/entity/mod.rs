//! Entity Module

pub mod blog;
pub mod tag;
