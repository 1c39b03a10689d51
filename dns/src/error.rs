use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // encoding, raised before anything is sent
    #[error("invalid label length: empty label at position {position}")]
    EmptyLabel { position: usize },

    #[error("invalid label length: '{label}' is {length} bytes, maximum is 63")]
    LabelTooLong { label: String, length: usize },

    #[error("name too long: encoded length {length} exceeds 255 bytes")]
    NameTooLong { length: usize },

    // malformed replies
    #[error("Malformed response (too short): {length} bytes, header needs 12")]
    TooShort { length: usize },

    #[error("Response id mismatch: sent {expected:#06x}, received {actual:#06x}")]
    IdMismatch { expected: u16, actual: u16 },

    #[error("Malformed response: QR bit not set, packet is not a response")]
    NotAResponse,

    #[error("Truncated response (TC bit set), TCP fallback is not supported")]
    Truncated,

    #[error("Malformed response: unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("Malformed response: compression loop detected at offset {offset}")]
    CompressionLoop { offset: usize },

    #[error("Malformed response: invalid label type {byte:#04x} at offset {offset}")]
    InvalidLabelType { offset: usize, byte: u8 },

    #[error("Malformed response: invalid {rtype} record data, {message}")]
    InvalidRdata { rtype: &'static str, message: String },

    // server side
    #[error("Server returned error code {rcode} ({})", rcode_description(.rcode))]
    ServerFailure { rcode: u8 },
}

impl Error {
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            Self::EmptyLabel { .. } | Self::LabelTooLong { .. } | Self::NameTooLong { .. }
        )
    }

    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::TooShort { .. }
                | Self::IdMismatch { .. }
                | Self::NotAResponse
                | Self::Truncated
                | Self::UnexpectedEof { .. }
                | Self::CompressionLoop { .. }
                | Self::InvalidLabelType { .. }
                | Self::InvalidRdata { .. }
        )
    }
}

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
fn rcode_description(rcode: &u8) -> &'static str {
    match *rcode {
        1 => "format error: the name server was unable to interpret the query",
        2 => "server failure: the name server was unable to process this query",
        4 => "not implemented: the name server does not support the requested kind of query",
        5 => "refused: the name server refuses to perform the requested operation",
        _ => "unknown response code",
    }
}
