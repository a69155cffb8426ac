use super::Error;

/// Error when a model definition cannot be compiled.
///
/// This occurs when:
/// - The model has no basis table
/// - A step names a join that does not exist on its source table
/// - A join, field, or order-by entry names a column or field that does not exist
/// - A child model has a missing or dangling parent link
/// - A name is not a valid code name
///
/// These errors are never retried; the definition itself must be fixed.
#[derive(Debug)]
pub(super) struct InvalidDefinition {
    model: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidDefinition {}

impl core::fmt::Display for InvalidDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid model definition `{}`: {}",
            self.model, self.message
        )
    }
}

impl Error {
    /// Creates an invalid definition error for the named model.
    pub fn invalid_definition(model: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDefinition(InvalidDefinition {
            model: model.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid definition error.
    pub fn is_invalid_definition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidDefinition(_))
    }
}
