use crate::error::{Error, Result};
use crate::utils::{read_u16, Reader};
use bytes::BufMut;

pub const HEADER_LENGTH: usize = 12;

// FLAGS, MSB to LSB: QR(1) OPCODE(4) AA(1) TC(1) RD(1) RA(1) Z(3) RCODE(4)
const QR: u16 = 1 << 15;
const AA: u16 = 1 << 10;
const TC: u16 = 1 << 9;
const RD: u16 = 1 << 8;
const RA: u16 = 1 << 7;

pub const RCODE_NO_ERROR: u8 = 0;
pub const RCODE_NAME_ERROR: u8 = 3;

// 12 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    id: u16,
    flags: u16,
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl Header {
    /// Header of a recursive query carrying a single question.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: RD,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) {
        bytes.put_u16(self.id);
        bytes.put_u16(self.flags);
        bytes.put_u16(self.qdcount);
        bytes.put_u16(self.ancount);
        bytes.put_u16(self.nscount);
        bytes.put_u16(self.arcount);
    }

    pub fn parse_from_reader(rdr: &mut Reader) -> Result<Self> {
        let length = rdr.get_ref().len();
        if length < HEADER_LENGTH {
            return Err(Error::TooShort { length });
        }

        let id = read_u16(rdr)?;
        let flags = read_u16(rdr)?;
        let qdcount = read_u16(rdr)?;
        let ancount = read_u16(rdr)?;
        let nscount = read_u16(rdr)?;
        let arcount = read_u16(rdr)?;

        let h = Self {
            id,
            flags,
            qdcount,
            ancount,
            nscount,
            arcount,
        };

        Ok(h)
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn is_response(&self) -> bool {
        self.flags & QR != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    pub fn is_authoritative(&self) -> bool {
        self.flags & AA != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & TC != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & RD != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & RA != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & 0x0F) as u8
    }

    pub fn qd_count(&self) -> u16 {
        self.qdcount
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount
    }

    pub fn authority_count(&self) -> u16 {
        self.nscount
    }

    pub fn additional_count(&self) -> u16 {
        self.arcount
    }
}
