use jiter::JiterError;
use numshape_core::Error as CoreError;

/// Lowers a [`jiter::JiterError`] into the crate-wide [`numshape_core::Error`].
///
/// `numshape-core` doesn't depend on `jiter`, so this lives here rather than
/// as a `From` impl on `CoreError` itself.
pub(crate) fn lex_error(err: JiterError) -> CoreError {
    CoreError::Parse(err.to_string())
}
