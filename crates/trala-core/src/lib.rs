//! Core types, validation rules, and the contact service for Trala.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! relational store is reached only through the [`store::ContactStore`]
//! trait, which the service receives at construction time.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod input;
pub mod service;
pub mod store;

pub use error::{Error, FieldError, Result};
pub use service::ContactService;
