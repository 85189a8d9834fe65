use crate::AsciiString;
use crate::util::escape_and_elide;
use core::fmt::{Debug, Display, Formatter};
use std::ops::{Deref, DerefMut};

/// A request header.
///
/// Names are US-ASCII tokens.  Values may contain ISO-8859-1 chars, so they
/// are carried as a plain [`String`].
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Header {
    pub name: AsciiString,
    pub value: String,
}
impl Header {
    #[must_use]
    pub fn new(name: AsciiString, value: String) -> Self {
        Self { name, value }
    }
}
impl Debug for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "Header({}:{})",
            escape_and_elide(self.name.as_bytes(), 30),
            escape_and_elide(self.value.as_bytes(), 1000)
        )
    }
}
impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}:{}", self.name.as_str(), self.value)
    }
}

#[derive(Clone, Eq, PartialEq)]
pub struct HeaderList(pub Vec<Header>);
impl HeaderList {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Searches for a header that matches `name`.
    /// Uses a case-insensitive comparison.
    ///
    /// Returns the value of the header.
    ///
    /// Returns `None` when multiple headers matched or none matched.
    pub fn get_only(&self, name: impl AsRef<str>) -> Option<&str> {
        let mut value = None;
        for header in &self.0 {
            if header.name.eq_ignore_ascii_case(name.as_ref()) {
                if value.is_some() {
                    return None;
                }
                value = Some(header.value.as_str());
            }
        }
        value
    }
}
impl Default for HeaderList {
    fn default() -> Self {
        Self::new()
    }
}
impl Debug for HeaderList {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{:?}", self.0)
    }
}
impl Deref for HeaderList {
    type Target = Vec<Header>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for HeaderList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Header, HeaderList};

    fn header(name: &str, value: &str) -> Header {
        Header::new(name.try_into().unwrap(), value.to_string())
    }

    #[test]
    fn get_only_is_case_insensitive() {
        let mut headers = HeaderList::new();
        headers.push(header("Content-Length", "5"));
        assert_eq!(Some("5"), headers.get_only("content-length"));
        assert_eq!(Some("5"), headers.get_only("CONTENT-LENGTH"));
        assert_eq!(None, headers.get_only("content-type"));
    }

    #[test]
    fn get_only_rejects_duplicates() {
        let mut headers = HeaderList::new();
        headers.push(header("x", "1"));
        headers.push(header("X", "2"));
        assert_eq!(None, headers.get_only("x"));
    }
}
