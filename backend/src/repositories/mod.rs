//! Persistence layer for user records.
//!
//! Repositories hide the storage engine behind the `UserStore` trait so the
//! credential service can be driven by SQLite in production and by an
//! in-memory store in tests.

#[cfg(test)]
pub mod memory_repository;
pub mod user_repository;
