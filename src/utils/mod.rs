//! Utility modules for browser access, data structures and formatting.
//!
//! Provides:
//! - [`RingBuffer`] - Fixed-capacity circular buffer with O(1) push
//! - [`validate_url`] - URL scheme allow-listing
//! - [`format_timestamp_iso`] - ISO-8601 timestamps from Unix milliseconds
//! - `dom`, `console` - Browser API access (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
mod format;
mod ring_buffer;
mod url;

pub use format::format_timestamp_iso;
pub use ring_buffer::RingBuffer;
pub use self::url::{validate_url, UrlValidation, UrlValidationError};
