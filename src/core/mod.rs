//! Core validation logic.
//!
//! This module provides:
//! - [`ContentValidator`] escaping, screening, URL/token helpers and the violation log
//! - [`SignatureSet`] ordered suspicious-content signatures
//! - [`PageEnvironment`] the ambient reads from the host page
//! - [`SecurityError`] for the few operations that can fail

pub mod env;
pub mod error;
mod sanitize;
mod signatures;
mod validator;

#[cfg(target_arch = "wasm32")]
pub use env::BrowserEnvironment;
pub use env::{PageEnvironment, PageLocation, StaticEnvironment};
pub use error::{Result, SecurityError};
pub use sanitize::{sanitize_input, sanitize_value};
pub use signatures::{Signature, SignatureSet, SignatureSpec};
pub use validator::ContentValidator;
