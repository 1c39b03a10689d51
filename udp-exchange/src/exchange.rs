use crate::{ExchangeError, ExchangeOutcome};
use bytes::BytesMut;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
const MAX_RESPONSE_SIZE: usize = 512;

#[derive(Debug, Clone)]
pub struct UdpExchange {
    server_addr: SocketAddrV4,
    timeout: Duration,
    max_retries: u32,
}

impl UdpExchange {
    /// `timeout` bounds each receive attempt, not the whole exchange.
    pub fn new(server_addr: SocketAddrV4, timeout: Duration, max_retries: u32) -> Self {
        Self {
            server_addr,
            timeout,
            max_retries,
        }
    }

    /// Sends `request_bytes` from a fresh socket and waits for the server's reply.
    pub async fn send(&self, request_bytes: &[u8]) -> Result<ExchangeOutcome, ExchangeError> {
        let local_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
        let sock = UdpSocket::bind(local_addr)
            .await
            .map_err(|source| ExchangeError::Io {
                source,
                elapsed: Duration::ZERO,
            })?;

        self.send_on(&sock, request_bytes).await
    }

    async fn send_on(
        &self,
        sock: &UdpSocket,
        request_bytes: &[u8],
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let server = SocketAddr::V4(self.server_addr);
        let mut resp_buf = BytesMut::with_capacity(MAX_RESPONSE_SIZE);
        let started = Instant::now();
        let mut retries: u32 = 0;

        let io_error = |source: std::io::Error| ExchangeError::Io {
            source,
            elapsed: started.elapsed(),
        };

        loop {
            let send_size = sock.send_to(request_bytes, server).await.map_err(io_error)?;
            tracing::debug!(%server, send_size, attempt = retries + 1, "sent udp query");

            let deadline = Instant::now() + self.timeout;
            let accepted = recv_from_server(sock, server, deadline, &mut resp_buf)
                .await
                .map_err(io_error)?;

            if accepted {
                let elapsed = started.elapsed();
                tracing::debug!(
                    %server,
                    response_size = resp_buf.len(),
                    retries,
                    ?elapsed,
                    "received udp response"
                );

                return Ok(ExchangeOutcome {
                    reply: resp_buf.freeze(),
                    elapsed,
                    retries,
                });
            }

            if retries >= self.max_retries {
                tracing::warn!(%server, max_retries = self.max_retries, "no reply, giving up");
                return Err(ExchangeError::RetriesExhausted {
                    max_retries: self.max_retries,
                    elapsed: started.elapsed(),
                });
            }

            retries += 1;
            tracing::warn!(%server, retry = retries, "timed out waiting for reply, resending");
        }
    }
}

/// Waits until `deadline` for a datagram whose source is `server`.
///
/// Returns `false` on timeout. Datagrams from other sources are discarded and
/// the wait continues against the same deadline.
async fn recv_from_server(
    sock: &UdpSocket,
    server: SocketAddr,
    deadline: Instant,
    buf: &mut BytesMut,
) -> std::io::Result<bool> {
    loop {
        buf.clear();
        let (size, peer) = match tokio::time::timeout_at(deadline, sock.recv_buf_from(buf)).await {
            Ok(ret) => ret?,
            Err(_) => return Ok(false),
        };

        if peer == server {
            return Ok(true);
        }

        tracing::warn!(
            expected = %server,
            received_from = %peer,
            size,
            "dropping udp datagram from unexpected source"
        );
    }
}
