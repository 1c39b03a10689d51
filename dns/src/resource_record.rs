use crate::error::{Error, Result};
use crate::name::{qname_to_domain, read_name};
use crate::utils::{offset, read_u16, read_u32, skip, Reader};
use std::net::Ipv4Addr;

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_MX: u16 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Ns(String),
    Cname(String),
    Mx { preference: u16, exchange: String },
    Unrecognized(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    /// Parses the record at the cursor and leaves the cursor exactly RDLENGTH
    /// bytes past the start of RDATA.
    pub fn parse_from_reader(rdr: &mut Reader) -> Result<Self> {
        let name = read_name(rdr)?;
        let rtype = read_u16(rdr)?;
        let class = read_u16(rdr)?;
        let ttl = read_u32(rdr)?;
        let rdlength = read_u16(rdr)? as usize;

        let message: &[u8] = *rdr.get_ref();
        let rdata_start = offset(rdr);
        let rdata = message
            .get(rdata_start..rdata_start + rdlength)
            .ok_or(Error::UnexpectedEof {
                offset: message.len(),
            })?;

        let data = match rtype {
            TYPE_A if rdlength == 4 => {
                RecordData::A(Ipv4Addr::new(rdata[0], rdata[1], rdata[2], rdata[3]))
            }
            TYPE_NS => RecordData::Ns(qname_to_domain(message, rdata_start)?.0),
            TYPE_CNAME => RecordData::Cname(qname_to_domain(message, rdata_start)?.0),
            TYPE_MX => {
                if rdlength < 2 {
                    return Err(Error::InvalidRdata {
                        rtype: "MX",
                        message: format!("RDLENGTH {} cannot hold a preference", rdlength),
                    });
                }
                let preference = u16::from_be_bytes([rdata[0], rdata[1]]);
                let (exchange, _) = qname_to_domain(message, rdata_start + 2)?;
                RecordData::Mx {
                    preference,
                    exchange,
                }
            }
            other => RecordData::Unrecognized(other),
        };

        skip(rdr, rdlength)?;

        let record = Self {
            name,
            class,
            ttl,
            data,
        };

        Ok(record)
    }

    /// Walks past a record without decoding its RDATA.
    pub fn skip_from_reader(rdr: &mut Reader) -> Result<()> {
        let _name = read_name(rdr)?;
        // TYPE, CLASS, TTL
        skip(rdr, 8)?;
        let rdlength = read_u16(rdr)? as usize;
        skip(rdr, rdlength)
    }

    /// Whether the record carries a value the client reports.
    pub fn is_renderable(&self) -> bool {
        !matches!(self.data, RecordData::Unrecognized(_))
    }
}
