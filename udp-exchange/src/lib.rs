//! One request/reply exchange with a DNS server over UDP.
//!
//! The query is retransmitted whenever a receive attempt times out, up to a
//! fixed number of retries. Datagrams from any address other than the server
//! are dropped without extending the attempt's deadline.

mod exchange;

pub use exchange::UdpExchange;

use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// A reply accepted from the server.
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    pub reply: Bytes,
    /// From the first send until the reply was accepted.
    pub elapsed: Duration,
    /// Retransmissions, the original send not included.
    pub retries: u32,
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Maximum number of retries {max_retries} exceeded")]
    RetriesExhausted { max_retries: u32, elapsed: Duration },

    #[error("Socket error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        elapsed: Duration,
    },
}

impl ExchangeError {
    pub fn elapsed(&self) -> Duration {
        match self {
            ExchangeError::RetriesExhausted { elapsed, .. } => *elapsed,
            ExchangeError::Io { elapsed, .. } => *elapsed,
        }
    }
}
