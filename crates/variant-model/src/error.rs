use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid attribute id: {0:?}")]
    InvalidAttributeId(String),
    #[error("invalid value id: {0:?}")]
    InvalidValueId(String),
    #[error("invalid selection {0:?}, expected ATTR=VALUE[,VALUE...]")]
    InvalidSelection(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
