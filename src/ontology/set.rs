//! Axioms held in a single in-memory set.
use std::iter::FromIterator;
use std::rc::Rc;

use indexmap::IndexSet;

use super::indexed::{rc_unwrap_or_clone, OntologyIndex};
use crate::model::*;

/// The simplest ontology: an `OntologyID` and a set of axioms.
///
/// Iteration is in insertion order.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct SetOntology {
    id: OntologyID,
    axiom: IndexSet<Axiom>,
}

impl SetOntology {
    /// Create a new ontology.
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::ontology::set::SetOntology;
    /// let o = SetOntology::new();
    /// let o2 = SetOntology::new();
    ///
    /// assert_eq!(o, o2);
    /// ```
    pub fn new() -> SetOntology {
        SetOntology::default()
    }

    /// Gets an iterator that visits the axioms of the ontology.
    pub fn iter(&self) -> indexmap::set::Iter<'_, Axiom> {
        self.axiom.iter()
    }

    pub fn contains(&self, ax: &Axiom) -> bool {
        self.axiom.contains(ax)
    }

    pub fn len(&self) -> usize {
        self.axiom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axiom.is_empty()
    }
}

impl Ontology for SetOntology {
    fn id(&self) -> &OntologyID {
        &self.id
    }

    fn mut_id(&mut self) -> &mut OntologyID {
        &mut self.id
    }
}

impl<'a> IntoIterator for &'a SetOntology {
    type Item = &'a Axiom;
    type IntoIter = indexmap::set::Iter<'a, Axiom>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for SetOntology {
    type Item = Axiom;
    type IntoIter = indexmap::set::IntoIter<Axiom>;
    fn into_iter(self) -> Self::IntoIter {
        self.axiom.into_iter()
    }
}

impl MutableOntology for SetOntology {
    /// Insert an axiom into the ontology.
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::model::*;
    /// # use horned_frame::ontology::set::SetOntology;
    /// let mut o = SetOntology::new();
    /// let b = Build::new();
    /// assert!(o.insert(SubClassOf::new(
    ///     b.class("http://www.example.com/a"),
    ///     b.class("http://www.example.com/b"))));
    /// ```
    fn insert<A>(&mut self, ax: A) -> bool
    where
        A: Into<Axiom>,
    {
        self.axiom.insert(ax.into())
    }

    fn take(&mut self, ax: &Axiom) -> Option<Axiom> {
        self.axiom.shift_take(ax)
    }
}

impl FromIterator<Axiom> for SetOntology {
    fn from_iter<I: IntoIterator<Item = Axiom>>(iter: I) -> Self {
        SetOntology {
            id: Default::default(),
            axiom: IndexSet::from_iter(iter),
        }
    }
}

/// An `OntologyIndex` holding every axiom, in insertion order.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct SetIndex(IndexSet<Rc<Axiom>>);

impl SetIndex {
    pub fn new() -> SetIndex {
        SetIndex::default()
    }

    pub fn iter(&self) -> SetIndexIter<'_> {
        SetIndexIter(self.0.iter())
    }

    pub fn contains(&self, ax: &Axiom) -> bool {
        self.0.contains(ax)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An iterator over the axioms of a `SetIndex`.
pub struct SetIndexIter<'a>(indexmap::set::Iter<'a, Rc<Axiom>>);

impl<'a> Iterator for SetIndexIter<'a> {
    type Item = &'a Axiom;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|rc| &**rc)
    }
}

impl<'a> IntoIterator for &'a SetIndex {
    type Item = &'a Axiom;
    type IntoIter = SetIndexIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl OntologyIndex for SetIndex {
    fn index_insert(&mut self, ax: Rc<Axiom>) -> bool {
        self.0.insert(ax)
    }

    fn index_take(&mut self, ax: &Axiom) -> Option<Axiom> {
        self.0.shift_take(ax).map(rc_unwrap_or_clone)
    }
}
