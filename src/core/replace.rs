/*!

`replace` is simultaneous, non-interfering substitution over a term tree: every candidate
subterm is looked up in the substitution map *once*, against the term as it was before any
rewriting began, and if it matches, the corresponding value is substituted without recursing
into the replacement. This is what makes a cyclic map like `{a: b, b: a}` a pairwise swap of
pre-existing occurrences rather than a cascade.

When `positions` restricts the rewrite, each listed path is followed from the root by plain
index descent (no match-check along the way); once a path is fully consumed the node it lands on
is substituted using that same unrestricted algorithm, scoped to its own subtree. The single
empty path is the one exception: it means "check the root itself, and nowhere else" rather than
"the whole tree is in scope" — this is the distinction the design calls out as "root only" in
§4.3 and "apply only at the root" in §4.4. Nodes outside every listed subtree are left completely
untouched. See §4.4 of the design for the full contract.

*/

use crate::abstractions::log::trace;
use crate::api::error::TermError;
use crate::api::path::Path;
use crate::api::substitution::{structural_equal, EqualCheckFn, Substitution};
use crate::api::term::Term;

impl Term {
    /// Replace every subterm matching a key of `replace_map` with the corresponding value.
    ///
    /// - `positions = None`: substitute everywhere a key matches, simultaneously.
    /// - `positions = Some(list)`: descend to each listed path and substitute the subtree
    ///   rooted there (the empty path alone means "root only" — see module docs); paths that
    ///   run out of bounds are silently ignored, and an empty list is a no-op.
    /// - `equal_check`: defaults to structural equality ([`structural_equal`]); an alternative
    ///   such as [`crate::api::substitution::identical`] changes which candidates match.
    pub fn replace(&self, replace_map: &Substitution, positions: Option<&[Path]>, equal_check: Option<EqualCheckFn>) -> Term {
        let equal_check = equal_check.unwrap_or(structural_equal);
        replace_checked(self, replace_map, positions, equal_check, &[], 0).expect("public entry point always calls with depth == path.len()")
    }
}

/// Validates the depth/path invariant the source's hidden `_path`/`_depth` parameters carried,
/// then dispatches to the unrestricted or position-restricted algorithm. During ordinary use
/// `depth` always equals `path.len()` (the public `replace` always calls with `&[], 0`); the
/// mismatch case is only reachable through
/// [`replace_checked`] directly, which is how
/// [`replace_rejects_inconsistent_depth`](tests::replace_rejects_inconsistent_depth) exercises
/// it without leaking recursion bookkeeping into the public signature.
pub(crate) fn replace_checked(
    term: &Term,
    replace_map: &Substitution,
    positions: Option<&[Path]>,
    equal_check: EqualCheckFn,
    path: &[usize],
    depth: usize,
) -> Result<Term, TermError> {
    if depth > path.len() {
        return Err(TermError::InvalidDepth);
    }
    Ok(match positions {
        None => replace_everywhere(term, replace_map, equal_check),
        Some(paths) => replace_restricted(term, replace_map, paths, equal_check),
    })
}

fn replace_everywhere(term: &Term, replace_map: &Substitution, equal_check: EqualCheckFn) -> Term {
    if let Some(value) = replace_map.get_by(term, equal_check) {
        trace!(1, "replace: matched, substituting without recursing into the replacement");
        return value.clone();
    }
    if term.is_leaf() {
        return term.clone();
    }
    let mut changed = false;
    let new_children: Vec<Term> = term
        .children()
        .iter()
        .map(|child| {
            let replaced = replace_everywhere(child, replace_map, equal_check);
            if !replaced.ptr_eq(child) {
                changed = true;
            }
            replaced
        })
        .collect();
    if changed {
        trace!(1, "replace: child changed, recursed and rebuilt");
        term.rebuild(new_children)
    } else {
        term.clone()
    }
}

/// Split `paths` into "the root itself" (a literal empty path) and everything else, apply the
/// root case if present, and otherwise hand the rest to [`apply_positions`].
fn replace_restricted(root: &Term, replace_map: &Substitution, paths: &[Path], equal_check: EqualCheckFn) -> Term {
    let mut root_targeted = false;
    let mut descendant_paths: Vec<Path> = Vec::new();
    for p in paths {
        if p.is_empty() {
            root_targeted = true;
        } else {
            descendant_paths.push(p.clone());
        }
    }

    if root_targeted {
        if let Some(value) = replace_map.get_by(root, equal_check) {
            trace!(1, "replace: root itself listed in positions and matched");
            // Per the design, a root match takes precedence over any interior paths nested
            // beneath the replaced root.
            return value.clone();
        }
    }

    apply_positions(root, replace_map, equal_check, &descendant_paths)
}

/// `paths` are relative to `term`: each is stripped of the index used to reach `term` as the
/// caller recurses. A path that has been fully consumed (now empty) means `term` itself is a
/// listed (non-root) target, so its whole subtree gets the unrestricted treatment. Otherwise we
/// only recurse into children that some remaining path still addresses; an index beyond
/// `term`'s children drops that path silently.
fn apply_positions(term: &Term, replace_map: &Substitution, equal_check: EqualCheckFn, paths: &[Path]) -> Term {
    if paths.iter().any(Vec::is_empty) {
        return replace_everywhere(term, replace_map, equal_check);
    }
    if paths.is_empty() || term.is_leaf() {
        return term.clone();
    }

    let mut changed = false;
    let new_children: Vec<Term> = term
        .children()
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let child_paths: Vec<Path> = paths.iter().filter(|p| p[0] == i).map(|p| p[1..].to_vec()).collect();
            if child_paths.is_empty() {
                child.clone()
            } else {
                let replaced = apply_positions(child, replace_map, equal_check, &child_paths);
                if !replaced.ptr_eq(child) {
                    changed = true;
                }
                replaced
            }
        })
        .collect();

    if changed {
        trace!(1, "replace: child changed, recursed and rebuilt");
        term.rebuild(new_children)
    } else {
        term.clone()
    }
}
