use super::Error;

/// Aggregate error for a save batch in which at least one row failed.
///
/// The first row failure is attached as the cause.
#[derive(Debug)]
pub(super) struct SaveFailed {
    model: Box<str>,
    failed: usize,
    total: usize,
}

impl std::error::Error for SaveFailed {}

impl core::fmt::Display for SaveFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "saving `{}` failed for {} of {} rows",
            self.model, self.failed, self.total
        )
    }
}

impl Error {
    /// Creates a save failure summary. Attach it with [`Error::context`] on
    /// top of the first row failure.
    pub fn save_failed(model: impl Into<String>, failed: usize, total: usize) -> Error {
        Error::from(super::ErrorKind::SaveFailed(SaveFailed {
            model: model.into().into(),
            failed,
            total,
        }))
    }

    /// Returns `true` if this error is a save failure summary.
    pub fn is_save_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SaveFailed(_))
    }
}
