//! A change-tracking axiom store.
//!
//! # Overview
//!
//! `AxiomStore` is the mutable set of axioms for a single ontology.
//! Every mutation goes through the store, which records it as a
//! `Change` before applying it. The store can therefore be rebuilt at
//! any time by replaying its change log over an empty ontology.
//!
//! Axioms are held in a `SetIndex`, which keeps insertion order, and
//! in a `SubjectMappedIndex`, which gives rapid access to the axioms
//! about a given subject.
//!
//! # Examples
//! ```
//! # use horned_frame::model::*;
//! # use horned_frame::ontology::store::AxiomStore;
//! let b = Build::new();
//! let mut store = AxiomStore::new_with_build(b.clone());
//!
//! let ax: Axiom = SubClassOf::new(b.class("http://www.example.com/b"),
//!                                 b.class("http://www.example.com/a")).into();
//! store.add(ax.clone()).unwrap();
//! store.add(ax.clone()).unwrap();
//!
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.changes().len(), 2);
//! ```
use std::collections::{HashMap, HashSet, VecDeque};
use std::iter::FromIterator;

use log::debug;

use super::indexed::TwoIndexedOntology;
use super::set::{SetIndex, SetIndexIter, SetOntology};
use super::subject_mapped::SubjectMappedIndex;
use crate::error::{invalid, HornedError};
use crate::idgen::IdSpace;
use crate::io::Format;
use crate::materialize::Materialization;
use crate::model::*;

/// A single recorded mutation of an `AxiomStore`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Change {
    Add(Axiom),
    Remove(Axiom),
}

impl Change {
    pub fn axiom(&self) -> &Axiom {
        match self {
            Change::Add(ax) => ax,
            Change::Remove(ax) => ax,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Change::Add(_))
    }

    /// Apply this change to `o`, returning true if `o` was altered.
    pub fn apply_to<O: MutableOntology>(&self, o: &mut O) -> bool {
        match self {
            Change::Add(ax) => o.insert(ax.clone()),
            Change::Remove(ax) => o.remove(ax),
        }
    }
}

#[derive(Debug)]
pub struct AxiomStore {
    ont: TwoIndexedOntology<SetIndex, SubjectMappedIndex>,
    changes: Vec<Change>,
    // Changes recorded by materialization
    materialization_changes: usize,
    id_space: IdSpace,
    pub(crate) materialized: HashMap<(IRI, bool), Materialization>,
    build: Build,
    default_format: Format,
}

impl Default for AxiomStore {
    fn default() -> Self {
        AxiomStore::new_with_build(Build::new())
    }
}

impl AxiomStore {
    pub fn new() -> AxiomStore {
        AxiomStore::default()
    }

    /// Create a new store whose derived entities are built with `build`.
    pub fn new_with_build(build: Build) -> AxiomStore {
        AxiomStore {
            ont: TwoIndexedOntology::new(
                SetIndex::new(),
                SubjectMappedIndex::new(),
                Default::default(),
            ),
            changes: vec![],
            materialization_changes: 0,
            id_space: Default::default(),
            materialized: HashMap::new(),
            build,
            default_format: Format::default(),
        }
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    /// The ontology `IRI`, if it has one.
    pub fn ontology_iri(&self) -> Option<&IRI> {
        self.ont.id().iri.as_ref()
    }

    pub fn set_ontology_iri(&mut self, iri: IRI) {
        self.ont.mut_id().iri = Some(iri);
    }

    pub fn id_space(&self) -> &IdSpace {
        &self.id_space
    }

    pub(crate) fn id_space_mut(&mut self) -> &mut IdSpace {
        &mut self.id_space
    }

    /// Set the idspace and the lower bound used for new identifiers.
    pub fn configure_id_space<S: Into<String>>(&mut self, idspace: S, last_id: u64) {
        self.id_space = IdSpace {
            idspace: idspace.into(),
            last_id,
        };
    }

    pub fn default_format(&self) -> Format {
        self.default_format
    }

    pub fn set_default_format(&mut self, format: Format) {
        self.default_format = format;
    }

    /// Check that `ax` may be added to this store.
    pub(crate) fn validate(&self, ax: &Axiom) -> Result<(), HornedError> {
        if let Axiom::Import(Import(iri)) = ax {
            if self.ontology_iri() == Some(iri) {
                return Err(invalid!("Ontology {} cannot import itself", iri));
            }
        }
        Ok(())
    }

    fn record(&mut self, change: Change) -> bool {
        let altered = match &change {
            Change::Add(ax) => self.ont.insert(ax.clone()),
            Change::Remove(ax) => self.ont.remove(ax),
        };
        self.changes.push(change);
        altered
    }

    /// Record a change made by materialization. It does not count
    /// towards `edit_generation`.
    pub(crate) fn record_materialization(&mut self, change: Change) -> bool {
        self.materialization_changes += 1;
        self.record(change)
    }

    /// Add `ax` without validation.
    pub(crate) fn record_add(&mut self, ax: Axiom) -> bool {
        self.record(Change::Add(ax))
    }

    /// Add an axiom, returning true if it was not already present.
    ///
    /// The change is recorded even when the axiom was present.
    pub fn add<A: Into<Axiom>>(&mut self, ax: A) -> Result<bool, HornedError> {
        let ax = ax.into();
        self.validate(&ax)?;
        Ok(self.record(Change::Add(ax)))
    }

    /// Add every axiom in turn, returning the number that were new.
    ///
    /// Stops at the first axiom that fails validation; axioms before
    /// it remain added.
    pub fn add_all<I: IntoIterator<Item = Axiom>>(&mut self, axioms: I) -> Result<usize, HornedError> {
        let mut count = 0;
        for ax in axioms {
            if self.add(ax)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Remove an axiom, returning true if it was present.
    ///
    /// The change is recorded even when the axiom was absent.
    pub fn remove(&mut self, ax: &Axiom) -> bool {
        self.record(Change::Remove(ax.clone()))
    }

    /// Remove every axiom in turn, returning the number that were
    /// present.
    pub fn remove_all<I: IntoIterator<Item = Axiom>>(&mut self, axioms: I) -> usize {
        axioms
            .into_iter()
            .filter(|ax| self.remove(ax))
            .count()
    }

    /// Replace `old` with `news`.
    ///
    /// Every new axiom is validated before anything is changed.
    pub fn replace(&mut self, old: &Axiom, news: Vec<Axiom>) -> Result<(), HornedError> {
        for ax in news.iter() {
            self.validate(ax)?;
        }

        self.remove(old);
        for ax in news {
            self.record_add(ax);
        }
        Ok(())
    }

    /// All axioms, in insertion order.
    pub fn iter(&self) -> SetIndexIter<'_> {
        self.ont.i().iter()
    }

    pub fn contains(&self, ax: &Axiom) -> bool {
        self.ont.i().contains(ax)
    }

    pub fn len(&self) -> usize {
        self.ont.i().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ont.i().is_empty()
    }

    /// The axioms whose subjects include `iri`, in insertion order.
    pub fn axioms_about(&self, iri: &IRI) -> impl Iterator<Item = &Axiom> {
        self.ont.j().axioms_for_iri(iri)
    }

    /// Every subject with at least one axiom.
    pub fn subjects(&self) -> impl Iterator<Item = &IRI> {
        self.ont.j().subjects()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// A counter which increases with every recorded change.
    pub fn generation(&self) -> usize {
        self.changes.len()
    }

    /// A counter which increases with every recorded change other
    /// than the imports added and removed by materialization.
    pub fn edit_generation(&self) -> usize {
        self.changes.len() - self.materialization_changes
    }

    /// Rebuild the axiom set by applying every recorded change, in
    /// order, to an empty ontology.
    pub fn replay(&self) -> SetOntology {
        let mut so = SetOntology::new();
        *so.mut_id() = self.ont.id().clone();
        for change in self.changes.iter() {
            change.apply_to(&mut so);
        }
        so
    }

    /// The `IRI` of every directly imported ontology, in insertion
    /// order.
    pub fn imports(&self) -> Vec<IRI> {
        self.iter()
            .filter_map(|ax| match ax {
                Axiom::Import(Import(iri)) => Some(iri.clone()),
                _ => None,
            })
            .collect()
    }

    /// The `IRI`s of the transitive imports of this store.
    ///
    /// `resolve` returns the store for an imported `IRI` when it is
    /// available; imports that do not resolve are included but not
    /// followed. Each `IRI` appears once, in the order found.
    pub fn imports_closure<'a, F>(&'a self, resolve: F) -> Vec<IRI>
    where
        F: Fn(&IRI) -> Option<&'a AxiomStore>,
    {
        let mut seen: HashSet<IRI> = self.ontology_iri().cloned().into_iter().collect();
        let mut closure = vec![];
        let mut queue: VecDeque<IRI> = self.imports().into();

        while let Some(iri) = queue.pop_front() {
            if !seen.insert(iri.clone()) {
                continue;
            }
            match resolve(&iri) {
                Some(store) => queue.extend(store.imports()),
                None => debug!("Import {} not resolved", iri),
            }
            closure.push(iri);
        }
        closure
    }
}

impl Ontology for AxiomStore {
    fn id(&self) -> &OntologyID {
        self.ont.id()
    }

    fn mut_id(&mut self) -> &mut OntologyID {
        self.ont.mut_id()
    }
}

impl<'a> IntoIterator for &'a AxiomStore {
    type Item = &'a Axiom;
    type IntoIter = SetIndexIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Axiom> for AxiomStore {
    /// Every axiom is recorded as an `Add` change.
    fn from_iter<I: IntoIterator<Item = Axiom>>(iter: I) -> Self {
        let mut store = AxiomStore::new();
        for ax in iter {
            store.record_add(ax);
        }
        store
    }
}
