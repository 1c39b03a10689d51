// DNS message codec, RFC 1035 section 4.
//
// Queries carry one question with RD set; replies are validated against the
// query id and turned into a `ParsedResponse`.

mod error;
mod header;
mod id;
mod name;
mod question;
mod request_message;
mod resource_record;
mod response_message;
mod utils;

pub use domain_name_query_types::{NameQuery, QType};
pub use error::{Error, Result};
pub use header::Header;
pub use id::{IdGenerator, RandomIds};
pub use name::{domain_to_qname, qname_to_domain, MAX_DECODE_STEPS};
pub use request_message::RequestMessage;
pub use resource_record::{RecordData, ResourceRecord};
pub use response_message::{ParsedResponse, ResponseMessage};

/// Builds the query packet, drawing the transaction id from `ids`.
///
/// Returns the id alongside the bytes so the reply can be matched against it.
pub fn encode_request<G: IdGenerator>(query: &NameQuery, ids: &mut G) -> Result<(u16, Vec<u8>)> {
    let request_msg = RequestMessage::new(ids.next_id(), query)?;

    Ok((request_msg.id(), request_msg.to_bytes()))
}

pub fn decode_response(response_bytes: &[u8], expected_id: u16) -> ParsedResponse {
    ResponseMessage::parse_response(response_bytes, expected_id)
}
