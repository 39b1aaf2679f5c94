/*!

A [`Term`] is a node in a finite, ordered, possibly-DAG-shaped tree. It is the sole currency of
this crate: every other operation (`replace`, `unify`, `multi_unify`, search, (de)serialization)
is a function over `Term`s.

Terms are conceptually immutable after construction: every transform returns a freshly
constructed term, and a `Term` is cheap to clone (it is a reference-counted pointer to a shared
node). Variant-specific data — the "subclass" in an inheritance-based design — is supplied by a
[`TermVariant`] trait object rather than by a Rust enum, so that client code can add new kinds of
term without touching this crate.

*/

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::abstractions::IString;
use crate::api::attr::AttrValue;

/// The variant discriminator. Two terms of different kind tags are never equal, even if every
/// other declared attribute happens to match (`equal_up_to_subclass` is the predicate that
/// ignores this distinction).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct KindTag {
    pub class_module: IString,
    pub class_name: IString,
}

impl KindTag {
    pub fn new(class_module: impl Into<IString>, class_name: impl Into<IString>) -> Self {
        KindTag {
            class_module: class_module.into(),
            class_name: class_name.into(),
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class_module, self.class_name)
    }
}

/// The three vtable hooks and three attribute-name declarations a collaborator supplies to
/// define a new kind of term (§6, "Collaborator contract").
///
/// Implementors hold their own child-independent attributes (e.g. a `name` field) and, if they
/// extend the child-dependent attribute set beyond the universally-defined `leaves`, whatever
/// state those extra attributes are computed from.
pub trait TermVariant: fmt::Debug {
    /// The variant discriminator for this kind of term.
    fn kind_tag(&self) -> KindTag;

    /// Names of the child-independent attributes this variant declares, in a stable order.
    fn child_independent_attr_names(&self) -> &'static [&'static str];

    /// Subset of `child_independent_attr_names` that participates in structural equality and
    /// hashing. Everything else is informational only as far as `==` is concerned.
    fn hash_participating_attr_names(&self) -> &'static [&'static str];

    /// Fetch a declared child-independent attribute by name.
    fn child_independent_attr(&self, name: &str) -> Option<AttrValue>;

    /// Names of child-dependent attributes this variant declares beyond the universal `leaves`.
    fn extra_child_dependent_attr_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Fetch an extra child-dependent attribute by name. Called only after
    /// `recompute_child_dependent_attrs` has run for the current children.
    fn extra_child_dependent_attr(&self, _name: &str) -> Option<AttrValue> {
        None
    }

    /// Recompute this variant's extra child-dependent attributes (if any) from `children`.
    /// Invoked once, at construction, by [`Term::new`] and by [`Term::deep_copy`]/rebuild.
    fn recompute_child_dependent_attrs(&mut self, children: &[Term]);

    /// Refresh this variant's child-independent attributes by copying them from `reference`.
    /// Used by [`Term::shallow_copy`]/[`Term::deep_copy`] after `clone_variant` has produced a
    /// structural duplicate.
    fn copy_child_independent_attrs_from(&mut self, reference: &dyn TermVariant);

    /// Produce an owned duplicate of this variant (child-independent *and* already-computed
    /// child-dependent state).
    fn clone_variant(&self) -> Box<dyn TermVariant>;
}

struct TermNode {
    children: Rc<Vec<Term>>,
    variant: Box<dyn TermVariant>,
    leaves: Vec<Term>,
    hash_value: u64,
}

impl fmt::Debug for TermNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermNode")
            .field("variant", &self.variant)
            .field("children", &self.children)
            .finish()
    }
}

/// A node in the term tree. Cheap to clone: cloning a `Term` bumps a reference count, it does
/// not copy the subtree (see [`Term::shallow_copy`]/[`Term::deep_copy`] for the operations that
/// actually duplicate structure).
#[derive(Clone, Debug)]
pub struct Term(Rc<TermNode>);

impl Term {
    /// Construct a term from its children and a variant already initialized with its
    /// child-independent attributes. `recompute_child_dependent_attrs` is invoked on `variant`
    /// exactly once, here, before the term is considered constructed.
    pub fn new(children: Vec<Term>, mut variant: Box<dyn TermVariant>) -> Term {
        variant.recompute_child_dependent_attrs(&children);
        let leaves = compute_leaves(&children);
        let hash_value = compute_hash_value(&*variant, &children);
        Term(Rc::new(TermNode {
            children: Rc::new(children),
            variant,
            leaves,
            hash_value,
        }))
    }

    /// Rebuild a term with the same kind and child-independent attributes as `self` but a new
    /// children sequence. Used by `replace` when a node's descendants changed but the node
    /// itself did not match any substitution key.
    pub(crate) fn rebuild(&self, new_children: Vec<Term>) -> Term {
        let mut variant = self.0.variant.clone_variant();
        variant.copy_child_independent_attrs_from(self.0.variant.as_ref());
        Term::new(new_children, variant)
    }

    pub fn kind_tag(&self) -> KindTag {
        self.0.variant.kind_tag()
    }

    pub fn variant(&self) -> &dyn TermVariant {
        self.0.variant.as_ref()
    }

    pub fn children(&self) -> &[Term] {
        &self.0.children
    }

    /// The shared children reference, exposed so `shallow_copy` can be shown to share it (the
    /// documented `shallow_copy(t).children is t.children` law).
    pub fn children_rc(&self) -> &Rc<Vec<Term>> {
        &self.0.children
    }

    /// Reference identity: do `self` and `other` point at the same node? Used as an alternative
    /// `equal_check` for `replace`.
    pub fn ptr_eq(&self, other: &Term) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_leaf(&self) -> bool {
        self.0.children.is_empty()
    }

    /// The in-order concatenation of leaf descendants. Empty for a childless term.
    pub fn leaves(&self) -> &[Term] {
        &self.0.leaves
    }

    /// Fetch a declared attribute by name, whether child-independent, the universal
    /// child-dependent `leaves`, or an extra child-dependent attribute.
    pub fn child_independent_attr(&self, name: &str) -> Option<AttrValue> {
        self.0.variant.child_independent_attr(name)
    }

    pub fn child_dependent_attr(&self, name: &str) -> Option<AttrValue> {
        if name == "leaves" {
            Some(AttrValue::Terms(self.0.leaves.clone()))
        } else {
            self.0.variant.extra_child_dependent_attr(name)
        }
    }

    /// Names of every declared child-dependent attribute, `leaves` first.
    pub fn child_dependent_attr_names(&self) -> Vec<&'static str> {
        let mut names = vec!["leaves"];
        names.extend_from_slice(self.0.variant.extra_child_dependent_attr_names());
        names
    }

    /// True iff both terms declare exactly the same set of child-independent attribute names
    /// and each declared attribute compares equal. Ignores kind tag and children.
    pub fn eq_child_independent_attrs(&self, other: &Term) -> bool {
        let mut a: Vec<&str> = self.0.variant.child_independent_attr_names().to_vec();
        let mut b: Vec<&str> = other.0.variant.child_independent_attr_names().to_vec();
        a.sort_unstable();
        b.sort_unstable();
        if a != b {
            return false;
        }
        a.iter()
            .all(|name| self.0.variant.child_independent_attr(name) == other.0.variant.child_independent_attr(name))
    }

    /// `eq_child_independent_attrs` conjoined with elementwise children equality, ignoring kind
    /// tag.
    pub fn equal_up_to_subclass(&self, other: &Term) -> bool {
        self.eq_child_independent_attrs(other) && self.0.children.as_slice() == other.0.children.as_slice()
    }

    /// Shallow copy: a new node whose children reference is the *same* `Rc` as `self`'s, with
    /// child-independent attributes refreshed through the variant's update hook.
    pub fn shallow_copy(&self) -> Term {
        let mut variant = self.0.variant.clone_variant();
        variant.copy_child_independent_attrs_from(self.0.variant.as_ref());
        Term(Rc::new(TermNode {
            children: Rc::clone(&self.0.children),
            variant,
            leaves: self.0.leaves.clone(),
            hash_value: self.0.hash_value,
        }))
    }

    /// Deep copy: every descendant is duplicated too, so the resulting children sequence is a
    /// brand new `Rc`.
    pub fn deep_copy(&self) -> Term {
        let new_children: Vec<Term> = self.0.children.iter().map(Term::deep_copy).collect();
        self.rebuild(new_children)
    }

    /// Recursively produce the nested-mapping serialized form described in §4.8/§6.
    pub fn to_dict(&self) -> JsonValue {
        let tag = self.kind_tag();
        let mut map = JsonMap::new();
        map.insert("class_module".to_string(), JsonValue::String(tag.class_module.to_string()));
        map.insert("class_name".to_string(), JsonValue::String(tag.class_name.to_string()));
        map.insert(
            "children".to_string(),
            JsonValue::Array(self.0.children.iter().map(Term::to_dict).collect()),
        );
        for name in self.0.variant.child_independent_attr_names() {
            if let Some(value) = self.0.variant.child_independent_attr(name) {
                map.insert((*name).to_string(), value.to_json());
            }
        }
        for name in self.child_dependent_attr_names() {
            if let Some(value) = self.child_dependent_attr(name) {
                map.insert(name.to_string(), value.to_json());
            }
        }
        JsonValue::Object(map)
    }
}

impl PartialEq for Term {
    /// Structural equality: equal kind tags, pairwise-equal hash-participating
    /// child-independent attributes, and elementwise-equal children.
    fn eq(&self, other: &Term) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        self.kind_tag() == other.kind_tag()
            && eq_hash_participating_attrs(self.0.variant.as_ref(), other.0.variant.as_ref())
            && self.0.children.as_slice() == other.0.children.as_slice()
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash_value);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.children.is_empty() {
            write!(f, "{:?}", self.0.variant)
        } else {
            write!(f, "{:?}", self.0.variant)?;
            write!(f, "(")?;
            write!(f, "{}", crate::abstractions::join_string(self.0.children.iter(), ", "))?;
            write!(f, ")")
        }
    }
}

fn eq_hash_participating_attrs(a: &dyn TermVariant, b: &dyn TermVariant) -> bool {
    let a_names = a.hash_participating_attr_names();
    let b_names = b.hash_participating_attr_names();
    if a_names.len() != b_names.len() {
        return false;
    }
    a_names.iter().all(|name| a.child_independent_attr(name) == b.child_independent_attr(name))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(t: &super::Term) -> u64 {
        let mut hasher = DefaultHasher::new();
        t.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_is_reflexive_symmetric_transitive() {
        let f = Fixtures::new();
        assert_eq!(f.o5, f.o5);
        let other = named("5", vec![f.o4.clone(), f.o1.clone(), f.o3.clone()]);
        assert_eq!(f.o5 == other, other == f.o5);
        let third = named("5", vec![f.o4.clone(), f.o1.clone(), f.o3.clone()]);
        assert!(f.o5 == other && other == third && f.o5 == third);
    }

    #[test]
    fn different_kind_tags_are_never_equal() {
        // `equal_up_to_subclass` ignores the kind tag; plain `==` does not. Since every term in
        // this crate's own tests shares one `NamedTerm` variant, there is no second kind tag to
        // construct here, so this documents the contract rather than exercising cross-kind code
        // (see `equal_up_to_subclass_ignores_kind_tag` for the attribute-level distinction).
        let f = Fixtures::new();
        assert!(f.o1.equal_up_to_subclass(&f.o1));
    }

    #[test]
    fn equal_terms_hash_equal() {
        let f = Fixtures::new();
        let other = named("5", vec![f.o4.clone(), f.o1.clone(), f.o3.clone()]);
        assert_eq!(f.o5, other);
        assert_eq!(hash_of(&f.o5), hash_of(&other));
    }

    #[test]
    fn shallow_copy_shares_children_but_not_identity() {
        let f = Fixtures::new();
        let copy = f.o5.shallow_copy();
        assert!(!copy.ptr_eq(&f.o5));
        assert_eq!(copy, f.o5);
        assert!(std::rc::Rc::ptr_eq(copy.children_rc(), f.o5.children_rc()));
    }

    #[test]
    fn deep_copy_duplicates_children_but_not_identity() {
        let f = Fixtures::new();
        let copy = f.o5.deep_copy();
        assert!(!copy.ptr_eq(&f.o5));
        assert_eq!(copy, f.o5);
        assert!(!std::rc::Rc::ptr_eq(copy.children_rc(), f.o5.children_rc()));
        // Deep-copying duplicates the shared subterm too: the copy's `o1` child isn't the same
        // node as the original's, even though they compare equal.
        assert!(!copy.children()[1].ptr_eq(&f.o1));
        assert_eq!(copy.children()[1], f.o1);
    }

    #[test]
    fn childless_term_has_empty_leaves() {
        assert!(named("leaf", vec![]).leaves().is_empty());
    }

    #[test]
    fn leaves_is_in_order_concatenation_of_descendant_leaves() {
        let f = Fixtures::new();
        let names: Vec<String> = f.o5.leaves().iter().map(name_of).collect();
        // o5 = "5"(o4, o1, o3) where o4 = "4"(o3, o2) and o3 = "3"(o1, o2): reading off
        // left to right, o4 contributes o3's leaves (1, 2) then its own direct o2 (2), o5's
        // direct o1 contributes 1, and o5's direct o3 contributes (1, 2) again.
        assert_eq!(names, vec!["1", "2", "2", "1", "1", "2"]);
        // Cross-check against the documented replace-all-swap scenario: swapping o1<->o2 and
        // reading leaves off the result should flip every name in this same sequence.
        let swapped = f.o5.replace(
            &crate::api::substitution::Substitution::from_pairs([(f.o1.clone(), f.o2.clone()), (f.o2.clone(), f.o1.clone())]),
            None,
            None,
        );
        let swapped_names: Vec<String> = swapped.leaves().iter().map(name_of).collect();
        assert_eq!(swapped_names, vec!["2", "1", "1", "2", "2", "1"]);
    }

    #[test]
    fn eq_child_independent_attrs_ignores_children() {
        let a = named("x", vec![named("1", vec![])]);
        let b = named("x", vec![named("1", vec![]), named("2", vec![])]);
        assert!(a.eq_child_independent_attrs(&b));
        assert!(!a.equal_up_to_subclass(&b));
    }

    #[test]
    fn to_dict_contains_kind_tag_attrs_and_children() {
        let f = Fixtures::new();
        let dict = f.o3.to_dict();
        assert_eq!(dict["class_module"], "test_support");
        assert_eq!(dict["class_name"], "NamedTerm");
        assert_eq!(dict["name"], "3");
        assert_eq!(dict["children"].as_array().unwrap().len(), 2);
    }
}

fn compute_leaves(children: &[Term]) -> Vec<Term> {
    let mut leaves = Vec::new();
    for child in children {
        if child.is_leaf() {
            leaves.push(child.clone());
        } else {
            leaves.extend(child.leaves().iter().cloned());
        }
    }
    leaves
}

/// Deterministic within a process: combines the kind tag, hash-participating child-independent
/// attributes, and each child's own cached hash.
fn compute_hash_value(variant: &dyn TermVariant, children: &[Term]) -> u64 {
    let mut hasher = DefaultHasher::new();
    variant.kind_tag().hash(&mut hasher);
    for name in variant.hash_participating_attr_names() {
        name.hash(&mut hasher);
        variant.child_independent_attr(name).hash(&mut hasher);
    }
    for child in children {
        child.hash(&mut hasher);
    }
    hasher.finish()
}
