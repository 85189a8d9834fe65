use crate::log::tag::Tag;
use crate::log::tag_value::TagValue;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Deref, DerefMut};

/// This struct converts a tuple of tag builders (`Into<Tag>`) to a vector of
/// tags.  It supports tuples of length 0 through 4.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TagList(pub Vec<Tag>);
impl TagList {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<TagValue>) {
        self.0.push(Tag::new(name, value));
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<TagValue>) -> Self {
        self.push(name, value);
        self
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Tag> {
        self.0
    }
}
impl Default for TagList {
    fn default() -> Self {
        Self::new()
    }
}
impl Deref for TagList {
    type Target = Vec<Tag>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for TagList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
impl Display for TagList {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        if let Some(tag) = self.0.first() {
            write!(f, "{:?}:{}", tag.name, tag.value)?;
        }
        for tag in self.0.iter().skip(1) {
            write!(f, ",{:?}:{}", tag.name, tag.value)?;
        }
        Ok(())
    }
}
impl Debug for TagList {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "TagList{{")?;
        if let Some(tag) = self.0.first() {
            write!(f, "{:?}:{:?}", tag.name, tag.value)?;
        }
        for tag in self.0.iter().skip(1) {
            write!(f, ",{:?}:{:?}", tag.name, tag.value)?;
        }
        write!(f, "}}")
    }
}
impl From<Vec<Tag>> for TagList {
    fn from(v: Vec<Tag>) -> Self {
        Self(v)
    }
}
impl<A: Into<Tag>> From<A> for TagList {
    fn from(a: A) -> Self {
        TagList(vec![a.into()])
    }
}
impl From<()> for TagList {
    fn from((): ()) -> Self {
        TagList(vec![])
    }
}
impl<A: Into<Tag>> From<(A,)> for TagList {
    fn from((a,): (A,)) -> Self {
        TagList(vec![a.into()])
    }
}
impl<A: Into<Tag>, B: Into<Tag>> From<(A, B)> for TagList {
    fn from((a, b): (A, B)) -> Self {
        TagList(vec![a.into(), b.into()])
    }
}
impl<A: Into<Tag>, B: Into<Tag>, C: Into<Tag>> From<(A, B, C)> for TagList {
    fn from((a, b, c): (A, B, C)) -> Self {
        TagList(vec![a.into(), b.into(), c.into()])
    }
}
impl<A: Into<Tag>, B: Into<Tag>, C: Into<Tag>, D: Into<Tag>> From<(A, B, C, D)> for TagList {
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        TagList(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::TagList;
    use crate::log::tag;

    #[test]
    fn display_formats_tags() {
        let tags = TagList::from((tag("code", 200_u16), tag("addr", "0.0.0.0:8080")));
        assert_eq!("\"code\":200,\"addr\":\"0.0.0.0:8080\"", format!("{tags}"));
    }

    #[test]
    fn from_unit_is_empty() {
        assert!(TagList::from(()).is_empty());
    }
}
