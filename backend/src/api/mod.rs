//! Shared API plumbing.
//!
//! Authentication routes live in `auth`; this module holds the response and
//! error conversion helpers every handler uses.

pub mod common;
