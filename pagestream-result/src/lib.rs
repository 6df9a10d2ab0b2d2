//! Error types and result definitions for the pagestream crates.
//!
//! The workspace uses a single error enum ([`Error`]) and result alias
//! ([`Result<T>`]) rather than crate-specific error types. Failures propagate
//! with the `?` operator across crate boundaries, and callers that need
//! differentiated handling (abandon the chunk vs. report corruption vs. fix
//! the call sequence) match on the variant instead of inspecting messages.
//!
//! # Error Categories
//!
//! - **Contract violations** ([`Error::Precondition`]): the caller broke the
//!   page reader protocol (dictionary ordering, double reads, peeking past
//!   the end). Non-retryable; indicates a bug in the calling code.
//! - **Format violations** ([`Error::Format`]): the page sequence or page
//!   structure does not match the chunk metadata. Fatal for the chunk and a
//!   corrupt-file signal for higher layers.
//! - **Decode failures** ([`Error::Decode`]): a compression codec rejected
//!   its input or expanded it to the wrong size. Fatal for the chunk;
//!   corrupt bytes will not self-heal, so nothing below this layer retries.
//! - **I/O errors** ([`Error::Io`]): propagated from streaming codec
//!   backends.
//! - **Internal errors** ([`Error::Internal`]): violated invariants inside
//!   the pagestream crates themselves.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
