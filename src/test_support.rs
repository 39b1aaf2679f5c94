/*!

A minimal [`TermVariant`] used only by this crate's own tests, together with the fixture tree
built by [`Fixtures::new`]: `o3 = "3"(o1, o2)`, `o4 = "4"(o3, o2)`, `o5 = "5"(o4, o1, o3)`, so that
tests here exercise a tree with shared subterms (`o2` and `o3` each appear more than once).

*/

use std::fmt;

use crate::abstractions::IString;
use crate::api::attr::AttrValue;
use crate::api::term::{KindTag, Term, TermVariant};

#[derive(Clone)]
pub struct NamedTerm {
    name: IString,
    is_multi_var: bool,
}

impl fmt::Debug for NamedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multi_var {
            write!(f, "*{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl TermVariant for NamedTerm {
    fn kind_tag(&self) -> KindTag {
        KindTag::new("test_support", "NamedTerm")
    }

    fn child_independent_attr_names(&self) -> &'static [&'static str] {
        &["name", "is_multi_var"]
    }

    fn hash_participating_attr_names(&self) -> &'static [&'static str] {
        &["name"]
    }

    fn child_independent_attr(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(AttrValue::Str(self.name.clone())),
            "is_multi_var" => Some(AttrValue::Bool(self.is_multi_var)),
            _ => None,
        }
    }

    fn recompute_child_dependent_attrs(&mut self, _children: &[Term]) {}

    fn copy_child_independent_attrs_from(&mut self, reference: &dyn TermVariant) {
        if let Some(AttrValue::Str(name)) = reference.child_independent_attr("name") {
            self.name = name;
        }
        if let Some(AttrValue::Bool(is_multi_var)) = reference.child_independent_attr("is_multi_var") {
            self.is_multi_var = is_multi_var;
        }
    }

    fn clone_variant(&self) -> Box<dyn TermVariant> {
        Box::new(self.clone())
    }
}

/// Build an ordinary named term with the given `children`.
pub fn named(name: &str, children: Vec<Term>) -> Term {
    Term::new(
        children,
        Box::new(NamedTerm {
            name: IString::from(name),
            is_multi_var: false,
        }),
    )
}

/// Build a leaf that `unify`'s `key_for_list_check` recognizes as a list-consuming (multi-)
/// variable, for `multi_unify`/`string_match` tests.
pub fn multi_var(name: &str) -> Term {
    Term::new(
        Vec::new(),
        Box::new(NamedTerm {
            name: IString::from(name),
            is_multi_var: true,
        }),
    )
}

/// The `name` of a [`NamedTerm`], for assertions that don't want to match on `Debug` output.
pub fn name_of(term: &Term) -> String {
    match term.child_independent_attr("name") {
        Some(AttrValue::Str(s)) => s.to_string(),
        _ => panic!("name_of called on a term with no `name` attribute"),
    }
}

/// Whether `term` was built with [`multi_var`] rather than [`named`].
pub fn is_multi_var(term: &Term) -> bool {
    matches!(term.child_independent_attr("is_multi_var"), Some(AttrValue::Bool(true)))
}

/// The tree built by the original test suite's `setup()`: five named nodes sharing subterms
/// (`o2` occurs under both `o3` and `o4`; `o3` occurs under both `o4` and `o5`).
pub struct Fixtures {
    pub o1: Term,
    pub o2: Term,
    pub o3: Term,
    pub o4: Term,
    pub o5: Term,
}

impl Fixtures {
    pub fn new() -> Self {
        let o1 = named("1", vec![]);
        let o2 = named("2", vec![]);
        let o3 = named("3", vec![o1.clone(), o2.clone()]);
        let o4 = named("4", vec![o3.clone(), o2.clone()]);
        let o5 = named("5", vec![o4.clone(), o1.clone(), o3.clone()]);
        Fixtures { o1, o2, o3, o4, o5 }
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Fixtures::new()
    }
}

/// Recursively build a random [`NamedTerm`] tree, mirroring `build_random_tree`'s shape: each
/// non-leaf node gets a random number of children between `min_width` and `max_width`, down to
/// `max_depth`, after which every node is forced to be a leaf. Leaf names are drawn from `names`
/// so that repeated leaves (and hence repeated substructure/candidate unification keys) show up
/// across a single tree, the same way the fixture tree reuses `o1`/`o2`/`o3`.
pub fn random_tree(rng: &mut impl rand::Rng, max_depth: usize, min_width: usize, max_width: usize, names: &[&str]) -> Term {
    let min_width = min_width.min(max_width);
    let max_width = max_width.max(min_width);
    if max_depth == 0 {
        let name = names[rng.gen_range(0..names.len())];
        return named(name, vec![]);
    }
    let width = rng.gen_range(min_width..=max_width);
    if width == 0 {
        let name = names[rng.gen_range(0..names.len())];
        return named(name, vec![]);
    }
    let children: Vec<Term> = (0..width).map(|_| random_tree(rng, max_depth - 1, min_width, max_width, names)).collect();
    let name = names[rng.gen_range(0..names.len())];
    named(name, children)
}
