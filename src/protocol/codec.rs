//! JSON-RPC framing for the harness channel.
//!
//! Inbound bytes are split on `\n` and every line is decoded straight into a
//! [`Request`]; an empty or non-JSON line is a protocol error like any other
//! malformed message. Outbound messages are serialized compactly and
//! terminated by a single `\n`.

use bytes::{BufMut, BytesMut};
use serde::Serialize;
use tokio_util::codec::{Decoder, Encoder, LinesCodec};

use super::message::Request;
use crate::{AppError, Result};

/// Maximum inbound line length: 64 MiB.
///
/// Candidate configurations are small, but the limit leaves room for a
/// harness that inlines large payloads into `params`.
pub const MAX_LINE_BYTES: usize = 64 * 1024 * 1024;

/// Decodes [`Request`]s from and encodes serializable messages to NDJSON.
#[derive(Debug)]
pub struct RpcCodec {
    lines: LinesCodec,
}

impl RpcCodec {
    /// Create a codec bounded by [`MAX_LINE_BYTES`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(MAX_LINE_BYTES),
        }
    }
}

impl Default for RpcCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RpcCodec {
    type Item = Request;
    type Error = AppError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Request>> {
        self.lines.decode(src)?.as_deref().map(Request::parse).transpose()
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Request>> {
        self.lines
            .decode_eof(src)?
            .as_deref()
            .map(Request::parse)
            .transpose()
    }
}

impl<T: Serialize> Encoder<&T> for RpcCodec {
    type Error = AppError;

    fn encode(&mut self, message: &T, dst: &mut BytesMut) -> Result<()> {
        serde_json::to_writer(BufMut::writer(&mut *dst), message).map_err(|err| {
            AppError::Protocol(format!("failed to serialise outbound message: {err}"))
        })?;
        dst.put_u8(b'\n');
        Ok(())
    }
}
