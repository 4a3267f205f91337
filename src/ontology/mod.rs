//! Ontology implementations
//!
//! # Overview

//! The simplest of these is
//! [`SetOntology`](set/struct.SetOntology.html), which holds an
//! `OntologyID` and a set of axioms, and does nothing else. It
//! implements [`MutableOntology`](../model/trait.MutableOntology.html)
//! and can be iterated in insertion order.

//! The [`indexed`](indexed/index.html) module provides a mechanism to
//! compose several indexes over the same axioms, through the
//! [OntologyIndex](indexed/trait.OntologyIndex.html) trait. A
//! [`SetIndex`](set/struct.SetIndex.html) mirrors the functionality
//! of `SetOntology`, while the
//! [`SubjectMappedIndex`](subject_mapped/struct.SubjectMappedIndex.html)
//! gives rapid access to the axioms about a subject.

//! Most code will want an
//! [`AxiomStore`](store/struct.AxiomStore.html), which combines both
//! indexes and records every change made to it.

pub mod indexed;
pub mod set;
pub mod store;
pub mod subject_mapped;
