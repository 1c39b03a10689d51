use std::fmt;

/// Record types a query may ask for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum QType {
    #[default]
    A,
    Ns,
    Mx,
}

impl QType {
    /// TYPE value on the wire.
    pub fn code(&self) -> u16 {
        match self {
            QType::A => 1,
            QType::Ns => 2,
            QType::Mx => 15,
        }
    }
}

impl fmt::Display for QType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            QType::A => "A",
            QType::Ns => "NS",
            QType::Mx => "MX",
        };
        write!(f, "{}", s)
    }
}

pub type Name = String;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NameQuery {
    pub name: Name,
    pub q_type: QType,
}

impl NameQuery {
    pub fn new(name_str: &str, q_type: QType) -> Self {
        Self {
            name: Name::from(name_str),
            q_type,
        }
    }

    pub fn a_record(name_str: &str) -> Self {
        Self::new(name_str, QType::A)
    }

    pub fn ns_record(name_str: &str) -> Self {
        Self::new(name_str, QType::Ns)
    }

    pub fn mx_record(name_str: &str) -> Self {
        Self::new(name_str, QType::Mx)
    }
}
