//! JavaScript bindings for the hosting page.
//!
//! - [`SecurityHelper`] - the validator exported as a JS class
//! - [`CspListener`] - forwards `securitypolicyviolation` events into the log

mod helper;
mod listener;

pub use helper::SecurityHelper;
pub use listener::CspListener;
