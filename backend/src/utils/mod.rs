//! Collection of general utility functions.
//!
//! Holds the token-signing and password-hashing primitives used by the
//! credential service.

pub mod jwt;
pub mod password;
