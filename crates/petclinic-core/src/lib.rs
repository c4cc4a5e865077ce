//! Domain model, validation, and the store trait for the PetClinic record
//! keeper.
//!
//! This crate is deliberately free of HTTP and database dependencies; the
//! storage and web crates both depend on it, never the other way round.

// Native `async fn` in traits; suppress the advisory lint about `Send`
// bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod entity;
pub mod error;
pub mod format;
pub mod owner;
pub mod pet;
pub mod store;
pub mod validate;
pub mod vet;

pub use error::{Error, Result};
