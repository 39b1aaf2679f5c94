/*!

Subterm search by structural equality: [`Term::subobject_find`] returns the first path (in
pre-order — self, then children left-to-right, descending fully into each before moving to the
next) at which a subterm equals the target, and [`Term::subobject_find_all`] returns every such
path.

Per the design note in §9, a matched node's own descendants are still searched: a match does not
prune the subtree beneath it, so a root match and a nested descendant match can both appear in
`subobject_find_all`'s result.

*/

use crate::api::path::Path;
use crate::api::term::Term;

impl Term {
    /// The first pre-order path at which a subterm structurally equals `target`, or `None` if
    /// none does. The root itself is checked first and matches under the empty path.
    pub fn subobject_find(&self, target: &Term) -> Option<Path> {
        find_first(self, target, &mut Vec::new())
    }

    /// Every pre-order path at which a subterm structurally equals `target`. Descent continues
    /// beneath a match, so a matched subtree's own internal matches are also reported.
    pub fn subobject_find_all(&self, target: &Term) -> Vec<Path> {
        let mut out = Vec::new();
        find_all(self, target, &mut Vec::new(), &mut out);
        out
    }
}

fn find_first(term: &Term, target: &Term, path: &mut Path) -> Option<Path> {
    if term == target {
        return Some(path.clone());
    }
    for (i, child) in term.children().iter().enumerate() {
        path.push(i);
        if let Some(found) = find_first(child, target, path) {
            return Some(found);
        }
        path.pop();
    }
    None
}

fn find_all(term: &Term, target: &Term, path: &mut Path, out: &mut Vec<Path>) {
    if term == target {
        out.push(path.clone());
    }
    for (i, child) in term.children().iter().enumerate() {
        path.push(i);
        find_all(child, target, path, out);
        path.pop();
    }
}
