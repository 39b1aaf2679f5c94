/*!

[`AttrValue`] is the dynamically-typed value a declared attribute (child-independent or
child-dependent) can hold. A variant reports its attributes through [`AttrValue`]s so that the
core can implement `eq_child_independent_attrs`, hashing, and `to_dict` generically, without
knowing the concrete variant type.

*/

use std::fmt;

use serde_json::Value as JsonValue;

use crate::abstractions::IString;
use crate::api::term::Term;

/// A single declared attribute's value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrValue {
    Str(IString),
    Int(i64),
    Bool(bool),
    Term(Term),
    Terms(Vec<Term>),
}

impl AttrValue {
    /// Recursively dict-ify this attribute's value for [`crate::core::registry::from_dict`]'s
    /// counterpart, `to_dict`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            AttrValue::Str(s) => JsonValue::String(s.to_string()),
            AttrValue::Int(i) => JsonValue::from(*i),
            AttrValue::Bool(b) => JsonValue::from(*b),
            AttrValue::Term(t) => t.to_dict(),
            AttrValue::Terms(ts) => JsonValue::Array(ts.iter().map(Term::to_dict).collect()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "{s}"),
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Term(t) => write!(f, "{t}"),
            AttrValue::Terms(ts) => {
                write!(f, "[")?;
                for (i, t) in ts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{t}")?;
                }
                write!(f, "]")
            }
        }
    }
}
