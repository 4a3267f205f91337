//! Access `Axiom` by subject.
//!
//! # Overview
//!
//! This module provides a `SubjectMappedIndex` which provides rapid
//! access to all axioms about a given subject `IRI`. An axiom is
//! indexed under every one of its `subjects`; axioms without a
//! subject are not indexed at all.
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexSet;

use super::indexed::{rc_unwrap_or_clone, OntologyIndex};
use crate::model::*;

#[derive(Debug, Default, Eq, PartialEq)]
pub struct SubjectMappedIndex {
    subindex: HashMap<IRI, IndexSet<Rc<Axiom>>>,
}

impl SubjectMappedIndex {
    pub fn new() -> SubjectMappedIndex {
        SubjectMappedIndex::default()
    }

    /// Fetch the axioms about `iri`, in the order they were inserted.
    pub fn axioms_for_iri(&self, iri: &IRI) -> impl Iterator<Item = &Axiom> {
        self.subindex
            .get(iri)
            // Iterate over option
            .into_iter()
            // flatten option iterator!
            .flat_map(|s| s.iter())
            .map(|rc| &**rc)
    }

    /// Returns true if there is at least one axiom about `iri`.
    pub fn has_subject(&self, iri: &IRI) -> bool {
        self.subindex.get(iri).map_or(false, |s| !s.is_empty())
    }

    /// All subjects with at least one axiom, in no particular order.
    pub fn subjects(&self) -> impl Iterator<Item = &IRI> {
        self.subindex
            .iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(k, _)| k)
    }
}

impl OntologyIndex for SubjectMappedIndex {
    fn index_insert(&mut self, ax: Rc<Axiom>) -> bool {
        let subjects = ax.subjects();
        if subjects.is_empty() {
            return false;
        }

        let mut inserted = false;
        for iri in subjects {
            inserted = self.subindex.entry(iri).or_default().insert(ax.clone()) || inserted;
        }
        inserted
    }

    fn index_take(&mut self, ax: &Axiom) -> Option<Axiom> {
        let mut result = None;
        for iri in ax.subjects() {
            if let Some(set) = self.subindex.get_mut(&iri) {
                let taken = set.shift_take(ax);
                if set.is_empty() {
                    self.subindex.remove(&iri);
                }
                result = result.or(taken);
            }
        }
        result.map(rc_unwrap_or_clone)
    }
}
