use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("a training date is required")]
    MissingDate,
    #[error("mat hours are required")]
    MissingHours,
    #[error("invalid date '{0}'")]
    InvalidDate(String),
    #[error("entry {0} not found")]
    NotFound(String),
    #[error("id prefix '{prefix}' matches {count} entries")]
    AmbiguousId { prefix: String, count: usize },
    #[error("unknown field '{0}'")]
    UnknownField(String),
}
