//! Indexes for ontologies to enable faster searching
//!
//! # Overview
//!

//! This module provides an interface and a multiplexer for an
//! `OntologyIndex`.

//! An indexed `MutableOntology` is one that uses one or more
//! `OntologyIndex` objects as the backing store for its `Axiom`.
//! These `Axiom` objects are shared between different
//! `OntologyIndex` objects using `Rc`. The `OntologyIndex` interface
//! does not provide any mechanisms for searching or querying the
//! index which need to be provided by concrete implementations.
use crate::model::{Axiom, MutableOntology, Ontology, OntologyID};
use std::rc::Rc;

/// An `OntologyIndex` object.
///
/// The `OntologyIndex` stores references to an `Axiom` as they are
/// added (or removed) from an indexed ontology. Objects implementing
/// this should only provide search facilities that they can do
/// rapidly (e.g. in constant or log time, not linear).
///
/// A given `OntologyIndex` object is not bound to keep references to
/// all `Rc<Axiom>` that are inserted into it, although at least one
/// `OntologyIndex` object for an indexed ontology should do, or the
/// axiom will be dropped entirely. The `SetIndex` is a simple way to
/// achieve this.
pub trait OntologyIndex {
    /// Potentially insert an Axiom to the index.
    ///
    /// If the index did not have this value present, true is returned.
    ///
    /// If the index did have this value present, false is returned.
    fn index_insert(&mut self, ax: Rc<Axiom>) -> bool;

    /// Remove an Axiom from the index.
    ///
    /// If the index did have this value present, true is returned.
    ///
    /// If the index did not have this value present, false is returned.
    fn index_remove(&mut self, ax: &Axiom) -> bool {
        self.index_take(ax).is_some()
    }

    /// Take an Axiom from the index.
    ///
    /// Return the `Some(Axiom)` if it is in the index.
    ///
    /// Return None if it does not.
    fn index_take(&mut self, ax: &Axiom) -> Option<Axiom>;
}

/// A `TwoIndexOntology` implements `Ontology` and supports two
/// `OntologyIndex`. It itself implements `OntologyIndex` so that it
/// can be composed.
#[derive(Default, Debug)]
pub struct TwoIndexedOntology<I: OntologyIndex, J: OntologyIndex>(I, J, OntologyID);

impl<I: OntologyIndex, J: OntologyIndex> TwoIndexedOntology<I, J> {
    pub fn new(i: I, j: J, id: OntologyID) -> Self {
        TwoIndexedOntology(i, j, id)
    }

    pub fn i(&self) -> &I {
        &self.0
    }

    pub fn j(&self) -> &J {
        &self.1
    }

    pub fn index(self) -> (I, J) {
        (self.0, self.1)
    }
}

impl<I: OntologyIndex, J: OntologyIndex> Ontology for TwoIndexedOntology<I, J> {
    fn id(&self) -> &OntologyID {
        &self.2
    }

    fn mut_id(&mut self) -> &mut OntologyID {
        &mut self.2
    }
}

impl<I: OntologyIndex, J: OntologyIndex> MutableOntology for TwoIndexedOntology<I, J> {
    fn insert<A: Into<Axiom>>(&mut self, ax: A) -> bool {
        let rc = Rc::new(ax.into());
        self.index_insert(rc)
    }

    fn take(&mut self, ax: &Axiom) -> Option<Axiom> {
        self.index_take(ax)
    }
}

impl<I: OntologyIndex, J: OntologyIndex> OntologyIndex for TwoIndexedOntology<I, J> {
    fn index_insert(&mut self, ax: Rc<Axiom>) -> bool {
        let rtn = self.0.index_insert(ax.clone());
        // Don't short circuit
        self.1.index_insert(ax) || rtn
    }

    fn index_take(&mut self, ax: &Axiom) -> Option<Axiom> {
        let rtn = self.0.index_take(ax);
        self.1.index_take(ax).or(rtn)
    }
}

// Utility
pub(crate) fn rc_unwrap_or_clone(rcax: Rc<Axiom>) -> Axiom {
    Rc::try_unwrap(rcax).unwrap_or_else(|rcax| (*rcax).clone())
}
