#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum ContentType {
    Html,
    None,
    OctetStream,
    PlainText,
    Str(&'static str),
}
impl ContentType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Html => "text/html; charset=UTF-8",
            ContentType::None => "",
            ContentType::OctetStream => "application/octet-stream",
            ContentType::PlainText => "text/plain; charset=UTF-8",
            ContentType::Str(s) => s,
        }
    }
}
impl AsRef<str> for ContentType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl core::fmt::Display for ContentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}
