//! Authentication module for account registration and login.
//!
//! This module provides the public interface for the credential flow: the
//! `AuthService` business logic, its HTTP handlers and routes, and the
//! bearer-token middleware guarding authenticated endpoints.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
