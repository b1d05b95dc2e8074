use thiserror::Error;

use super::path::FormPath;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("`{path}` is already mounted by another nested form")]
    DuplicateMount { path: FormPath },

    #[error("a nested form needs a non-empty key")]
    EmptyKey,

    #[error("`{path}` is not an array")]
    NotAnArray { path: FormPath },

    #[error("index {index} is out of range for `{path}` (len {len})")]
    IndexOutOfRange {
        path: FormPath,
        index: usize,
        len: usize,
    },

    #[error("failed to read `{path}`: {message}")]
    Decode { path: FormPath, message: String },

    #[error("failed to write `{path}`: {message}")]
    Encode { path: FormPath, message: String },

    #[error("form state is no longer alive")]
    Disposed,
}
