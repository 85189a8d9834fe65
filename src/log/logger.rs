use crate::log::Level;
use crate::log::tag_list::TagList;
use crate::time::FormatTime;
use std::time::SystemTime;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LogEvent {
    pub time: SystemTime,
    pub level: Level,
    pub tags: TagList,
}

pub trait Logger: Send + Sync {
    fn add(&self, event: LogEvent);
}

/// Writes events to stdout, one line per event:
/// `2023-04-14T07:32:16Z info "server starting" "addr":"0.0.0.0:8080"`.
#[derive(Clone)]
pub struct StdoutLogger {}
impl Logger for StdoutLogger {
    fn add(&self, event: LogEvent) {
        let time = event.time.iso8601_utc();
        let level = event.level;
        let mut tags = event.tags;
        if let Some(msg_index) = tags.iter().position(|tag| tag.name == "msg") {
            let msg_tag = tags.remove(msg_index);
            let msg = msg_tag.value;
            println!("{time} {level} {msg} {tags}");
        } else {
            println!("{time} {level} {tags}");
        }
    }
}

static GLOBAL_LOGGER: once_cell::sync::OnceCell<Box<dyn Logger>> =
    once_cell::sync::OnceCell::new();

static STDOUT_LOGGER: StdoutLogger = StdoutLogger {};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GlobalLoggerAlreadySetError {}

/// # Errors
/// Returns an error when a global logger was already set.
pub fn set_global_logger(logger: impl Logger + 'static) -> Result<(), GlobalLoggerAlreadySetError> {
    GLOBAL_LOGGER
        .set(Box::new(logger))
        .map_err(|_| GlobalLoggerAlreadySetError {})
}

/// Gets the logger previously passed to [`set_global_logger`].
/// Returns [`StdoutLogger`] if no global logger was set.
pub fn global_logger() -> &'static dyn Logger {
    match GLOBAL_LOGGER.get() {
        Some(logger) => &**logger,
        None => &STDOUT_LOGGER,
    }
}

pub fn log(time: SystemTime, level: Level, tags: impl Into<TagList>) {
    let event = LogEvent {
        time,
        level,
        tags: tags.into(),
    };
    global_logger().add(event);
}
