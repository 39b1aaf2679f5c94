/*!

The algebra of the term model: the operations that take one or more [`crate::api::term::Term`]s
and produce a new term, a substitution, a set of paths, or a serialized form. Every operation
here is pure — none of them mutate their arguments, and none of them perform I/O or block.

| module | operation |
|---|---|
| [`replace`] | positional, simultaneous rewriting |
| [`unify`] | first-order unification |
| [`multi_unify`] | unification with list-consuming (multi-) variables |
| [`pattern_match`] | the sequence-pattern enumerator `multi_unify` is built on |
| [`search`] | subterm search |
| [`registry`] | dictionary (de)serialization and the variant registry |

*/

pub mod multi_unify;
pub mod pattern_match;
pub mod registry;
pub mod replace;
pub mod search;
pub mod unify;
