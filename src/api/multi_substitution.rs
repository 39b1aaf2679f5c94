/*!

[`MultiSubstitution`] is the substitution form produced by
[`crate::core::multi_unify::multi_unify`]: ordinary keys bind to a single `Term` just as in
[`crate::api::substitution::Substitution`], but a multi-variable key binds to an ordered
sequence of `Term`s (the contiguous run of children it consumed).

*/

use crate::api::term::Term;

/// The image of a key under a [`MultiSubstitution`]: either an ordinary single-term binding,
/// or the sequence a multi-variable consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Single(Term),
    Sequence(Vec<Term>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiSubstitution {
    pairs: Vec<(Term, Binding)>,
}

impl MultiSubstitution {
    pub fn new() -> Self {
        MultiSubstitution { pairs: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Binding)> {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub fn get(&self, key: &Term) -> Option<&Binding> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: Term, value: Binding) {
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    pub fn insert_single(&mut self, key: Term, value: Term) {
        self.insert(key, Binding::Single(value));
    }

    pub fn insert_sequence(&mut self, key: Term, value: Vec<Term>) {
        self.insert(key, Binding::Sequence(value));
    }

    /// Build a `MultiSubstitution` out of an ordinary `Substitution` (the case where
    /// `multi_unify` degenerates to plain unification because no multi-variable is involved).
    pub fn from_ordinary(sub: crate::api::substitution::Substitution) -> Self {
        MultiSubstitution {
            pairs: sub.iter().map(|(k, v)| (k.clone(), Binding::Single(v.clone()))).collect(),
        }
    }

    /// Merge `other` into `self`, failing on an inconsistent shared key. Multi-variable images
    /// compare as sequences, ordinary images as single terms, matching whatever shape the key
    /// was already bound to.
    pub fn merge_consistent(&mut self, other: &MultiSubstitution) -> Option<()> {
        for (k, v) in other.iter() {
            match self.get(k) {
                Some(existing) if existing != v => return None,
                Some(_) => {}
                None => self.insert(k.clone(), v.clone()),
            }
        }
        Some(())
    }

    /// Merge a single multi-variable binding `key -> sequence`, failing if `key` is already
    /// bound to something else.
    pub fn merge_consistent_sequence(&mut self, key: &Term, sequence: &[Term]) -> Option<()> {
        match self.get(key) {
            Some(Binding::Sequence(existing)) if existing != sequence => None,
            Some(Binding::Single(_)) => None,
            _ => {
                self.insert_sequence(key.clone(), sequence.to_vec());
                Some(())
            }
        }
    }
}
