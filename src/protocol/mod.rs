//! JSON-RPC 2.0 protocol handling over newline-delimited stdio.
//!
//! - `codec`: line framing plus JSON decoding and encoding of messages.
//! - `message`: request, response, and worker-initiated envelopes.
//! - `dispatcher`: startup announcements and the request loop.

pub mod codec;
pub mod dispatcher;
pub mod message;

pub use dispatcher::Dispatcher;
