/*!

First-order unification. `self.unify(other)` looks for a [`Substitution`] that, applied to
`self` via [`crate::core::replace::replace`], yields `other` — but unlike `replace`, the
direction is asymmetric: only `self`'s basic (leaf, by default) subterms are eligible to become
substitution keys. There is no occurs-check, matching the source this is modeled on: unifying a
variable against a structure that contains it produces a substitution whose replay is not
idempotent, and that is accepted behavior rather than a bug (§9, "No occurs-check").

*/

use crate::abstractions::log::trace;
use crate::api::substitution::{structural_equal, EqualCheckFn, KeyCheckFn, Substitution};
use crate::api::term::Term;

impl Term {
    /// Unify `self` against `other`. Returns the empty substitution (not `None`) when the two
    /// terms are already equal under `equal_check`; returns `None` on failure.
    ///
    /// `key_check` decides which terms are eligible as substitution keys — the default,
    /// `None`, is [`Term::is_leaf`].
    pub fn unify(&self, other: &Term, key_check: Option<KeyCheckFn>, equal_check: Option<EqualCheckFn>) -> Option<Substitution> {
        let key_check = key_check.unwrap_or(Term::is_leaf);
        let equal_check = equal_check.unwrap_or(structural_equal);
        unify_rec(self, other, key_check, equal_check)
    }
}

pub(crate) fn unify_rec(a: &Term, b: &Term, key_check: KeyCheckFn, equal_check: EqualCheckFn) -> Option<Substitution> {
    if equal_check(a, b) {
        return Some(Substitution::new());
    }

    if key_check(a) {
        let mut sub = Substitution::new();
        sub.insert(a.clone(), b.clone());
        return Some(sub);
    }

    if key_check(b) {
        trace!(1, "unify: complex lhs against basic rhs, no key available on the left");
        return None;
    }

    if !a.eq_child_independent_attrs(b) {
        trace!(1, "unify: complex terms disagree on child-independent attributes");
        return None;
    }

    if a.children().len() != b.children().len() {
        trace!(1, "unify: complex terms have mismatched arity");
        return None;
    }

    let mut result = Substitution::new();
    for (ac, bc) in a.children().iter().zip(b.children().iter()) {
        let child_sub = unify_rec(ac, bc, key_check, equal_check)?;
        if result.merge_consistent(&child_sub).is_none() {
            trace!(1, "unify: inconsistent shared key across child substitutions");
            return None;
        }
    }
    Some(result)
}
