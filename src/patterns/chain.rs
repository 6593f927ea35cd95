//! Chain of responsibility: each handler owns the next one in line.

use thiserror::Error;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ChainError {
    /// Every link declined and no default handler closed the chain
    #[error("No handler for request {0}")]
    Unhandled(i64),
}

impl From<ChainError> for DemoError {
    fn from(err: ChainError) -> Self {
        DemoError::from_error(err)
    }
}

/// A link in the chain.
///
/// `handle` returns the line produced by whichever link took the request.
pub trait Handler {
    fn handle(&self, request: i64) -> Result<String, ChainError>;
}

/// Takes requests in `lower < n <= upper`, passes the rest on.
pub struct RangeHandler {
    id: u32,
    lower: i64,
    upper: i64,
    successor: Option<Box<dyn Handler>>,
}

impl RangeHandler {
    pub fn new(id: u32, lower: i64, upper: i64, successor: Option<Box<dyn Handler>>) -> Self {
        Self { id, lower, upper, successor }
    }

    fn accepts(&self, request: i64) -> bool {
        self.lower < request && request <= self.upper
    }
}

impl Handler for RangeHandler {
    fn handle(&self, request: i64) -> Result<String, ChainError> {
        if self.accepts(request) {
            return Ok(format!("Request {} handled in handler {}", request, self.id));
        }
        match &self.successor {
            Some(next) => next.handle(request),
            None => Err(ChainError::Unhandled(request)),
        }
    }
}

/// End of chain; accepts everything.
#[derive(Debug, Default)]
pub struct DefaultHandler;

impl Handler for DefaultHandler {
    fn handle(&self, request: i64) -> Result<String, ChainError> {
        Ok(format!("End of chain, no handler for {}", request))
    }
}

/// Sends requests into the head of a chain.
pub struct Client {
    handler: Box<dyn Handler>,
}

impl Client {
    /// Client wired as `handler 1 (0, 10] -> default`.
    pub fn new() -> Self {
        Self::with_handler(Box::new(RangeHandler::new(1, 0, 10, Some(Box::new(DefaultHandler)))))
    }

    pub fn with_handler(handler: Box<dyn Handler>) -> Self {
        Self { handler }
    }

    /// Handle each request in order, stopping at the first unhandled one.
    pub fn delegate(&self, requests: &[i64]) -> Result<Vec<String>, ChainError> {
        requests.iter().map(|&r| self.handler.handle(r)).collect()
    }
}

#[derive(Debug, Default)]
pub struct ChainDemo;

impl PatternDemo for ChainDemo {
    fn name(&self) -> &str {
        "chain"
    }

    fn description(&self) -> &str {
        "Chain of Responsibility: requests pass along handlers until one accepts"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let client = Client::new();
        for line in client.delegate(&[2, 5, 30])? {
            out.emit(line);
        }
        Ok(())
    }
}
