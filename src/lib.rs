/*!

`termlogic` is a small, purely functional library for manipulating symbolic terms: an immutable,
possibly-DAG-shaped tree data model together with the algebra that operates on it — structural
equality and hashing, shallow/deep copy, positional rewriting (`replace`), first-order unification
(`unify`), list-variable unification (`multi_unify`), subterm search, and dictionary
serialization.

See [`api::term`] for the term model, [`core::replace`] for the rewriter, [`core::unify`] and
[`core::multi_unify`] for the two unification algorithms, and [`core::pattern_match`] for the
sequence-pattern matcher that `multi_unify` is built on.

*/
#![allow(dead_code)]

pub mod abstractions;
pub mod api;
mod core;

#[cfg(test)]
mod test_support;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{log, IString};

pub use api::{
    attr::AttrValue,
    error::{DeserializationError, TermError},
    path::Path,
    substitution::{EqualCheckFn, KeyCheckFn, Substitution},
    multi_substitution::{Binding, MultiSubstitution},
    term::{KindTag, Term, TermVariant},
};

pub use core::{
    pattern_match::{matches_to_actual, string_match, ActualAssignment, ActualSlot, Assignment, MatchSlot},
    registry::{dict_to_constructor_kwargs, from_dict, register_variant, ConstructorFn},
};
