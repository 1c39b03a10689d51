use configuration::ClientConfiguration;
use dns::{IdGenerator, ParsedResponse};
use domain_name_query_types::NameQuery;
use std::net::Ipv4Addr;
use std::time::Duration;
use udp_exchange::{ExchangeError, UdpExchange};

#[derive(Debug)]
pub enum LookupOutcome {
    /// The query could not be built; nothing was sent.
    EncodeFailed(dns::Error),
    ExchangeFailed(ExchangeError),
    Answered {
        elapsed: Duration,
        retries: u32,
        response: ParsedResponse,
    },
}

#[derive(Debug)]
pub struct LookupReport {
    pub query: NameQuery,
    pub server: Ipv4Addr,
    pub outcome: LookupOutcome,
}

impl LookupReport {
    pub fn is_error(&self) -> bool {
        match &self.outcome {
            LookupOutcome::EncodeFailed(_) | LookupOutcome::ExchangeFailed(_) => true,
            LookupOutcome::Answered { response, .. } => response.is_failure(),
        }
    }
}

/// Encodes the configured query, exchanges it with the server, and decodes the reply.
pub async fn lookup<G: IdGenerator>(cfg: &ClientConfiguration, ids: &mut G) -> LookupReport {
    let outcome = run(cfg, ids).await;

    LookupReport {
        query: cfg.query().clone(),
        server: cfg.server(),
        outcome,
    }
}

async fn run<G: IdGenerator>(cfg: &ClientConfiguration, ids: &mut G) -> LookupOutcome {
    let (id, request_bytes) = match dns::encode_request(cfg.query(), ids) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::debug!(name = %cfg.query().name, error = %e, "query not sent");
            return LookupOutcome::EncodeFailed(e);
        }
    };
    tracing::debug!(id, len = request_bytes.len(), "encoded query");

    let exchange = UdpExchange::new(cfg.server_address(), cfg.timeout(), cfg.max_retries());
    let reply = match exchange.send(&request_bytes).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::debug!(id, elapsed = ?e.elapsed(), error = %e, "exchange failed");
            return LookupOutcome::ExchangeFailed(e);
        }
    };

    let response = dns::decode_response(&reply.reply, id);
    if let ParsedResponse::Failure { reason } = &response {
        tracing::debug!(id, %reason, "rejected reply");
    }

    LookupOutcome::Answered {
        elapsed: reply.elapsed,
        retries: reply.retries,
        response,
    }
}
