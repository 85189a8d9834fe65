//! Structured logging to stdout.
//!
//! Every log line has a timestamp, a level, a message, and zero or more
//! `name:value` tags.  Programs that need a different sink can install one
//! with [`set_global_logger`].
mod logger;
mod tag;
mod tag_list;
mod tag_value;

use logger::log;
pub use logger::{GlobalLoggerAlreadySetError, LogEvent, Logger, StdoutLogger, set_global_logger};
use std::fmt::{Display, Formatter};
use std::time::SystemTime;
pub use tag::{Tag, tag};
pub use tag_list::TagList;
pub use tag_value::TagValue;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Level {
    Error,
    Info,
}
impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Level::Error => write!(f, "error"),
            Level::Info => write!(f, "info"),
        }
    }
}

/// Makes a new log event with 'error' level and sends it to the global logger.
pub fn error(msg: impl Into<String>, tags: impl Into<TagList>) {
    let mut tags = tags.into();
    tags.insert(0, tag("msg", msg.into()));
    log(SystemTime::now(), Level::Error, tags);
}

/// Makes a new log event with 'info' level and sends it to the global logger.
pub fn info(msg: impl Into<String>, tags: impl Into<TagList>) {
    let mut tags = tags.into();
    tags.insert(0, tag("msg", msg.into()));
    log(SystemTime::now(), Level::Info, tags);
}
