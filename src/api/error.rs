/*!

The error surface of the core. Per the design, there are three result shapes a caller can see:
a successful [`Term`](crate::api::term::Term), a failure null value (unification, a plain
`Option::None`), or one of the errors below.

*/

use thiserror::Error;

use crate::api::term::KindTag;

/// Raised for malformed call-site arguments. The sole documented case is the internal
/// `replace` recursion being driven with an inconsistent path/depth pair.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum TermError {
    #[error("Depth must be at most the length of the path if path is provided.")]
    InvalidDepth,
}

/// Raised by [`from_dict`](crate::core::registry::from_dict) when a serialized node is
/// missing a required field or names a kind tag that was never registered.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum DeserializationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("no variant registered for kind tag {0:?}")]
    UnknownKind(KindTag),

    #[error("field `{0}` has the wrong shape")]
    MalformedField(&'static str),
}
