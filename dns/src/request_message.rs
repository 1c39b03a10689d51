use crate::error::Result;
use crate::header::Header;
use crate::question::Question;
use domain_name_query_types::NameQuery;

pub struct RequestMessage {
    header: Header,
    question: Question,
}

impl RequestMessage {
    pub fn new(id: u16, query: &NameQuery) -> Result<Self> {
        let header = Header::query(id);
        let question = Question::new(query)?;

        Ok(Self { header, question })
    }

    pub fn id(&self) -> u16 {
        self.header.id()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = vec![];
        self.header.to_bytes(&mut bytes);
        self.question.to_bytes(&mut bytes);

        bytes
    }
}
