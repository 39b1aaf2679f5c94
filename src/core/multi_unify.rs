/*!

`multi_unify` generalizes [`unify`](crate::core::unify::unify) with *multi-variables*: pattern
leaves that, instead of binding to a single counterpart term, consume a contiguous (possibly
empty) run of the other side's children. Everywhere a multi-variable doesn't appear, this
degenerates to ordinary unification.

The children-splitting itself is delegated to [`crate::core::pattern_match::splits`], the same
combinatorial enumerator [`string_match`](crate::core::pattern_match::string_match) is built on;
see that module's docs for why `multi_unify` uses the equality-free variant rather than
`string_match` directly — a non-multi-var pattern child is a term to *unify*, not a value to
equality-test at the split stage.

*/

use crate::api::multi_substitution::MultiSubstitution;
use crate::api::substitution::{structural_equal, KeyCheckFn};
use crate::api::term::Term;
use crate::core::pattern_match::{matches_to_actual, splits, ActualSlot};

impl Term {
    /// Unify `self` against `other`, allowing pattern leaves recognized by `key_for_list_check`
    /// to consume a run of `other`'s children rather than a single counterpart.
    ///
    /// `key_check` (default [`Term::is_leaf`]) decides ordinary (single-term) keys, exactly as in
    /// [`Term::unify`]; `key_for_list_check` (default: no term is a multi-variable) decides
    /// multi-variables. When no multi-variable appears anywhere in `self`, the result is
    /// identical to `self.unify(other, Some(key_check), None)`.
    pub fn multi_unify(&self, other: &Term, key_check: Option<KeyCheckFn>, key_for_list_check: Option<KeyCheckFn>) -> Option<MultiSubstitution> {
        let key_check = key_check.unwrap_or(Term::is_leaf);
        let key_for_list_check = key_for_list_check.unwrap_or(|_: &Term| false);
        if !contains_multi_var(self, key_for_list_check) {
            return self.unify(other, Some(key_check), None).map(MultiSubstitution::from_ordinary);
        }
        multi_unify_rec(self, other, key_check, key_for_list_check)
    }
}

/// True iff `term` or any of its descendants is recognized as a multi-variable by
/// `is_multi_var`. Used to take the degenerate "no multi-variable anywhere" path through plain
/// [`Term::unify`] instead of the list-aware recursion.
fn contains_multi_var(term: &Term, is_multi_var: KeyCheckFn) -> bool {
    is_multi_var(term) || term.children().iter().any(|child| contains_multi_var(child, is_multi_var))
}

fn multi_unify_rec(a: &Term, b: &Term, key_check: KeyCheckFn, is_multi_var: KeyCheckFn) -> Option<MultiSubstitution> {
    if is_multi_var(a) {
        let mut sub = MultiSubstitution::new();
        sub.insert_sequence(a.clone(), vec![b.clone()]);
        return Some(sub);
    }

    if structural_equal(a, b) {
        return Some(MultiSubstitution::new());
    }

    if key_check(a) {
        let mut sub = MultiSubstitution::new();
        sub.insert_single(a.clone(), b.clone());
        return Some(sub);
    }

    if key_check(b) {
        return None;
    }

    if !a.eq_child_independent_attrs(b) {
        return None;
    }

    let candidates = splits(a.children(), b.children(), &is_multi_var);
    let actuals = matches_to_actual(&candidates, b.children());

    // Deterministic left-to-right try order from `splits`' enumeration: the first candidate
    // assignment whose per-position recursive unification is fully consistent wins.
    for actual in actuals {
        if let Some(sub) = try_assignment(a.children(), &actual, key_check, is_multi_var) {
            return Some(sub);
        }
    }
    None
}

fn try_assignment(pattern_children: &[Term], actual: &[ActualSlot], key_check: KeyCheckFn, is_multi_var: KeyCheckFn) -> Option<MultiSubstitution> {
    let mut result = MultiSubstitution::new();
    for (pattern_child, slot) in pattern_children.iter().zip(actual.iter()) {
        match slot {
            ActualSlot::Sequence(seq) => {
                result.merge_consistent_sequence(pattern_child, seq)?;
            }
            ActualSlot::Literal(target_child) => {
                let child_sub = multi_unify_rec(pattern_child, target_child, key_check, is_multi_var)?;
                result.merge_consistent(&child_sub)?;
            }
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use crate::api::multi_substitution::Binding;
    use crate::test_support::*;

    #[test]
    fn multi_unify_with_no_multi_var_matches_ordinary_unify() {
        let f = Fixtures::new();
        let x = named("x", vec![]);
        let a = named("5", vec![x.clone(), f.o1.clone(), f.o3.clone()]);
        let sub = a.multi_unify(&f.o5, None, Some(is_multi_var)).unwrap();
        assert_eq!(sub.get(&x), Some(&Binding::Single(f.o5.children()[0].clone())));
    }

    #[test]
    fn multi_var_at_top_level_consumes_whole_other_term() {
        let star = multi_var("*x");
        let target = named("5", vec![named("1", vec![])]);
        let sub = star.multi_unify(&target, None, Some(is_multi_var)).unwrap();
        assert_eq!(sub.get(&star), Some(&Binding::Sequence(vec![target.clone()])));
    }

    #[test]
    fn multi_var_consumes_contiguous_run_of_children() {
        // pattern: "f"(*rest) against "f"(1, 2, 3) -- *rest should consume all three children.
        let rest = multi_var("*rest");
        let pattern = named("f", vec![rest.clone()]);
        let one = named("1", vec![]);
        let two = named("2", vec![]);
        let three = named("3", vec![]);
        let target = named("f", vec![one.clone(), two.clone(), three.clone()]);
        let sub = pattern.multi_unify(&target, None, Some(is_multi_var)).unwrap();
        assert_eq!(sub.get(&rest), Some(&Binding::Sequence(vec![one, two, three])));
    }

    #[test]
    fn multi_var_mixed_with_literal_children() {
        // pattern: "f"(head, *rest) against "f"(1, 2, 3) -- head binds to 1 (as a basic key),
        // *rest consumes the remaining two.
        let head = named("head", vec![]);
        let rest = multi_var("*rest");
        let pattern = named("f", vec![head.clone(), rest.clone()]);
        let one = named("1", vec![]);
        let two = named("2", vec![]);
        let three = named("3", vec![]);
        let target = named("f", vec![one.clone(), two.clone(), three.clone()]);
        let sub = pattern.multi_unify(&target, None, Some(is_multi_var)).unwrap();
        assert_eq!(sub.get(&head), Some(&Binding::Single(one)));
        assert_eq!(sub.get(&rest), Some(&Binding::Sequence(vec![two, three])));
    }

    #[test]
    fn multi_var_consistent_repeated_binding_required() {
        // pattern: "f"(*same, *same) against a target where the two runs it would consume
        // differ -- inconsistent, so unification fails. (`*same` is literally the same Term
        // twice here, mirroring how a repeated ordinary variable must bind consistently.)
        let same = multi_var("*same");
        let pattern = named("f", vec![same.clone(), same.clone()]);
        let target = named(
            "f",
            vec![named("1", vec![]), named("2", vec![]), named("3", vec![])],
        );
        assert!(pattern.multi_unify(&target, None, Some(is_multi_var)).is_none());
    }

    #[test]
    fn multi_var_empty_run_is_allowed() {
        let rest = multi_var("*rest");
        let pattern = named("f", vec![named("1", vec![]), rest.clone()]);
        let target = named("f", vec![named("1", vec![])]);
        let sub = pattern.multi_unify(&target, None, Some(is_multi_var)).unwrap();
        assert_eq!(sub.get(&rest), Some(&Binding::Sequence(vec![])));
    }

    #[test]
    fn multi_var_complex_lhs_basic_rhs_fails() {
        let rest = multi_var("*rest");
        let pattern = named("f", vec![rest]);
        let target = named("x", vec![]);
        assert!(pattern.multi_unify(&target, None, Some(is_multi_var)).is_none());
    }
}
