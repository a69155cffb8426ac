use super::Error;

/// Error when an operation needs an instance key that is not available.
///
/// Raised when saving against a model without an instance key, or when an
/// updated or deleted row carries no `id`.
#[derive(Debug)]
pub(super) struct MissingKey {
    context: Box<str>,
}

impl std::error::Error for MissingKey {}

impl core::fmt::Display for MissingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing instance key: {}", self.context)
    }
}

impl Error {
    /// Creates a missing key error.
    pub fn missing_key(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingKey(MissingKey {
            context: context.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing key error.
    pub fn is_missing_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingKey(_))
    }
}
