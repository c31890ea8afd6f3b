//! Core types and traits for the echo workspace.
//!
//! This crate defines the shared abstractions used across every layer of the
//! SDK: the error type, the fetch primitive, the token provider trait, and the
//! app id precondition run before any provider client is built.

pub mod app_id;
pub mod error;
pub mod fetch;
pub mod traits;

pub use app_id::validate_app_id;
pub use error::{EchoError, Result};
pub use fetch::{
    AppTokenFn, FetchInput, FetchRequest, FetchResponse, InsufficientFundsFn, RefreshErrorFn,
    RequestInit, TokenFn,
};
pub use traits::{Fetch, TokenProvider};
