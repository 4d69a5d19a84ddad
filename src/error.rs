use thiserror::Error;

/// Errors returned when parsing the textual names used by hosts.
///
/// The gesture engine itself never fails; these only surface from
/// `FromStr` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown event name: {0:?}")]
    UnknownEvent(String),

    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
