use crate::util::escape_and_elide;
use core::fmt::Debug;

/// An in-memory response body.
///
/// This server sends only small fixed payloads, so there is no streaming or
/// file-backed variant.  The whole body is written after the response head.
#[derive(Clone, Eq, PartialEq)]
pub enum ResponseBody {
    StaticBytes(&'static [u8]),
    StaticStr(&'static str),
    Vec(Vec<u8>),
}
impl ResponseBody {
    #[must_use]
    pub fn empty() -> Self {
        ResponseBody::StaticStr("")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        match self {
            ResponseBody::StaticBytes(b) => b.len() as u64,
            ResponseBody::StaticStr(s) => s.len() as u64,
            ResponseBody::Vec(v) => v.len() as u64,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            ResponseBody::StaticBytes(b) => b,
            ResponseBody::StaticStr(s) => s.as_bytes(),
            ResponseBody::Vec(v) => v.as_slice(),
        }
    }
}
impl Debug for ResponseBody {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        match self {
            ResponseBody::StaticBytes(b) => write!(
                f,
                "ResponseBody::StaticBytes(len={} [{}])",
                b.len(),
                escape_and_elide(b, 100),
            ),
            ResponseBody::StaticStr(s) => write!(
                f,
                "ResponseBody::StaticStr(len={} \"{}\")",
                s.len(),
                escape_and_elide(s.as_bytes(), 100),
            ),
            ResponseBody::Vec(v) => write!(
                f,
                "ResponseBody::Vec(len={} [{}])",
                v.len(),
                escape_and_elide(v.as_slice(), 100)
            ),
        }
    }
}
impl From<&'static [u8]> for ResponseBody {
    fn from(b: &'static [u8]) -> Self {
        ResponseBody::StaticBytes(b)
    }
}
impl From<&'static str> for ResponseBody {
    fn from(s: &'static str) -> Self {
        ResponseBody::StaticStr(s)
    }
}
impl From<String> for ResponseBody {
    fn from(s: String) -> Self {
        ResponseBody::Vec(s.into_bytes())
    }
}
impl From<Vec<u8>> for ResponseBody {
    fn from(v: Vec<u8>) -> Self {
        ResponseBody::Vec(v)
    }
}
