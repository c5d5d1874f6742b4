//! Employee attendance engine.
//!
//! This crate decides whether an employee may punch in or out, derives the
//! status of each working day (present, late, absent, regularized) and
//! resolves regularization requests. Persistence, authentication and the
//! current time are injected through the [`store::Store`],
//! [`auth::AuthProvider`] and [`clock::Clock`] traits.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod service;
pub mod store;
