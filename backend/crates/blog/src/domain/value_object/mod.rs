//! Value Object Module

pub mod blog_id;
pub mod blog_title;
pub mod tag_id;
pub mod tag_name;
