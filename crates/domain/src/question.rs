use std::fmt;
use std::sync::Arc;

/// A single DNS question as seen by the query router.
///
/// Wire-level parsing stays in the transport adapter; the router only needs
/// the name and enough type/class information to validate TXT+IN.
#[derive(Debug, Clone)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType, class: RecordClass) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Txt,
    Other(u16),
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        match code {
            16 => RecordType::Txt,
            other => RecordType::Other(other),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Txt => write!(f, "TXT"),
            RecordType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    In,
    Other(u16),
}

impl From<u16> for RecordClass {
    fn from(code: u16) -> Self {
        match code {
            1 => RecordClass::In,
            other => RecordClass::Other(other),
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordClass::In => write!(f, "IN"),
            RecordClass::Other(code) => write!(f, "CLASS{}", code),
        }
    }
}
