use crate::error::{Error, Result};
use crate::header::{Header, RCODE_NAME_ERROR, RCODE_NO_ERROR};
use crate::question::Question;
use crate::resource_record::ResourceRecord;
use std::io::Cursor;

/// What a single reply means to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    Success {
        authoritative: bool,
        answers: Vec<ResourceRecord>,
        additionals: Vec<ResourceRecord>,
    },
    NotFound {
        authoritative: bool,
    },
    Failure {
        reason: Error,
    },
}

impl ParsedResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self, ParsedResponse::Failure { .. })
    }
}

#[derive(Debug)]
pub struct ResponseMessage {
    header: Header,
    answer_records: Vec<ResourceRecord>,
    additional_records: Vec<ResourceRecord>,
}

impl ResponseMessage {
    /// Validates the reply to the query with `expected_id` and interprets it.
    pub fn parse_response(response: &[u8], expected_id: u16) -> ParsedResponse {
        Self::parse(response, expected_id)
            .unwrap_or_else(|reason| ParsedResponse::Failure { reason })
    }

    fn parse(response: &[u8], expected_id: u16) -> Result<ParsedResponse> {
        let mut reader = Cursor::new(response);

        let header = Header::parse_from_reader(&mut reader)?;
        if header.id() != expected_id {
            return Err(Error::IdMismatch {
                expected: expected_id,
                actual: header.id(),
            });
        }
        if !header.is_response() {
            return Err(Error::NotAResponse);
        }
        if header.is_truncated() {
            return Err(Error::Truncated);
        }
        match header.rcode() {
            RCODE_NO_ERROR => {}
            // the counts of a name error are never looked at
            RCODE_NAME_ERROR => {
                return Ok(ParsedResponse::NotFound {
                    authoritative: header.is_authoritative(),
                })
            }
            rcode => return Err(Error::ServerFailure { rcode }),
        }

        for _ in 0..header.qd_count() {
            Question::skip_from_reader(&mut reader)?;
        }

        let answer_records = read_records(&mut reader, header.answer_count())?;

        for _ in 0..header.authority_count() {
            ResourceRecord::skip_from_reader(&mut reader)?;
        }

        let additional_records = read_records(&mut reader, header.additional_count())?;

        let msg = Self {
            header,
            answer_records,
            additional_records,
        };

        Ok(msg.into_parsed())
    }

    fn into_parsed(self) -> ParsedResponse {
        let authoritative = self.header.is_authoritative();

        // NOERROR without a usable answer is reported like NXDOMAIN
        if self.answer_records.is_empty() {
            return ParsedResponse::NotFound { authoritative };
        }

        ParsedResponse::Success {
            authoritative,
            answers: self.answer_records,
            additionals: self.additional_records,
        }
    }
}

fn read_records(reader: &mut Cursor<&[u8]>, count: u16) -> Result<Vec<ResourceRecord>> {
    let mut records: Vec<ResourceRecord> = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let record = ResourceRecord::parse_from_reader(reader)?;
        if record.is_renderable() {
            records.push(record);
        } else {
            log::debug!("skipping record of unsupported type for {}", record.name);
        }
    }

    Ok(records)
}
