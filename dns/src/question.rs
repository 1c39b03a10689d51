use crate::error::Result;
use crate::name::{domain_to_qname, read_name};
use crate::utils::{skip, Reader};
use bytes::BufMut;
use domain_name_query_types::NameQuery;

pub const CLASS_IN: u16 = 1;

#[derive(Debug)]
pub struct Question {
    qname: Vec<u8>,
    qtype: u16,
    qclass: u16,
}

impl Question {
    /// Fails when the name cannot be encoded, so a `Question` always holds a valid QNAME.
    pub fn new(query: &NameQuery) -> Result<Self> {
        let qname = domain_to_qname(&query.name)?;

        Ok(Self {
            qname,
            qtype: query.q_type.code(),
            qclass: CLASS_IN,
        })
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.qname);
        bytes.put_u16(self.qtype);
        bytes.put_u16(self.qclass);
    }

    /// Walks past one question entry of a reply: QNAME, QTYPE and QCLASS.
    pub fn skip_from_reader(rdr: &mut Reader) -> Result<()> {
        let _domain = read_name(rdr)?;
        skip(rdr, 4)
    }
}
