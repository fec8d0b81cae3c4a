//! Data models for the Velora client.
//!
//! `UserProfile` mirrors the platform's user payload; `Member` is the
//! row type shown by the directory table.

pub mod member;
pub mod user;

pub use member::Member;
pub use user::UserProfile;
