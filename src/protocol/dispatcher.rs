//! Request/response loop.
//!
//! The dispatcher announces itself, publishes the seed population, then
//! handles one inbound request at a time: decode, route, respond, flush.
//! The next line is not read until the current response has been written.
//! Any line that does not decode, blank lines included, ends the session.
//!
//! The harness is not awaited after `jipe.start`; the population
//! notification follows immediately.

use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info};

use super::codec::RpcCodec;
use super::message::{Method, Outbound, Request, Response, RpcError};
use crate::catalog;
use crate::diff::LineDiffer;
use crate::fitness::FitnessEvaluator;
use crate::format::StyleFormatter;
use crate::{AppError, Result};

/// Owns the harness channel and routes requests to their handlers.
#[derive(Debug)]
pub struct Dispatcher<F, D> {
    evaluator: FitnessEvaluator<F, D>,
    next_id: u64,
}

impl<F, D> Dispatcher<F, D>
where
    F: StyleFormatter,
    D: LineDiffer,
{
    /// Create a dispatcher around `evaluator`.
    pub fn new(evaluator: FitnessEvaluator<F, D>) -> Self {
        Self {
            evaluator,
            next_id: 1,
        }
    }

    /// Run the worker over `reader`/`writer` until end of input.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: a malformed line, a failed
    /// evaluation, or an I/O failure on either stream.
    pub async fn serve<R, W>(&mut self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut requests = FramedRead::new(reader, RpcCodec::new());
        let mut out = FramedWrite::new(writer, RpcCodec::new());

        self.announce(&mut out).await?;

        while let Some(request) = requests.next().await {
            let request = request?;
            if let Some(response) = self.dispatch(&request).await? {
                out.send(&response).await?;
            }
        }

        info!("input closed, worker exiting");
        Ok(())
    }

    /// Emit the `jipe.start` handshake followed by `evolve.populate`.
    async fn announce<W>(&mut self, out: &mut FramedWrite<W, RpcCodec>) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let start = Outbound::start(self.next_id);
        self.next_id += 1;
        out.send(&start).await?;

        let solutions = catalog::solutions()?;
        out.send(&Outbound::populate(solutions)).await?;
        info!(presets = solutions.len(), "seed population published");
        Ok(())
    }

    /// Route a decoded request to its handler.
    ///
    /// # Errors
    ///
    /// Propagates evaluation and catalog failures; unknown methods are
    /// answered with `-32601` rather than failing.
    pub async fn dispatch(&self, request: &Request) -> Result<Option<Response>> {
        let Some(method) = request.method() else {
            debug!(id = %request.id, "ignoring notification");
            return Ok(None);
        };

        let response = match method {
            Method::Measure => {
                let result = self.evaluator.measure_result(request.solution()?).await?;
                Response::success(request.id.clone(), to_value(&result)?)
            }
            Method::Template => {
                let template = catalog::template()?;
                Response::success(request.id.clone(), json!({ "template": template }))
            }
            Method::Unknown(name) => {
                debug!(method = %name, id = %request.id, "method not found");
                Response::failure(request.id.clone(), RpcError::method_not_found())
            }
        };

        Ok(Some(response))
    }
}

fn to_value<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload)
        .map_err(|err| AppError::Protocol(format!("failed to serialise result: {err}")))
}
