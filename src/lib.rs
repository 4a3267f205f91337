//! Frame-based editing of in-memory OWL ontologies.
//!
//! # Overview
//!
//! An [`AxiomStore`](ontology/store/struct.AxiomStore.html) holds the
//! axioms of one ontology and records every change made to it. Around
//! the store, this library provides:
//!
//! - [`transform`](transform/index.html): filter and rewrite passes
//!   over the axioms of a store.
//! - [`frame`](frame/index.html): the axioms about one entity, grouped
//!   into named slots for editing.
//! - [`materialize`](materialize/index.html): named classes standing
//!   for existential restrictions, so that a subsumption reasoner can
//!   answer "what is this class related to?".
//! - [`idgen`](idgen/index.html) and [`generate`](generate/index.html):
//!   fresh identifiers, and new classes built from a genus and a
//!   differentia.
//!
//! Reasoning and the reading or writing of any syntax are left to
//! implementations of the traits in [`reasoner`](reasoner/index.html)
//! and [`io`](io/index.html).
//!
//! # Examples
//! ```
//! # use horned_frame::model::*;
//! # use horned_frame::ontology::store::AxiomStore;
//! # use horned_frame::frame::to_frame;
//! let b = Build::new();
//! let mut store = AxiomStore::new_with_build(b.clone());
//!
//! let nucleus = b.class("http://purl.obolibrary.org/obo/GO_0005634");
//! let organelle = b.class("http://purl.obolibrary.org/obo/GO_0043226");
//! store.add(SubClassOf::new(nucleus.clone(), organelle.clone())).unwrap();
//!
//! let f = to_frame(&store, &nucleus.0);
//! assert_eq!(f.sub_class_of, vec![ClassExpression::from(organelle)]);
//! ```
pub mod error;
pub mod frame;
pub mod generate;
pub mod idgen;
pub mod io;
pub mod materialize;
pub mod model;
pub mod normalize;
pub mod ontology;
pub mod query;
pub mod reasoner;
pub mod transform;
pub mod visitor;
pub mod vocab;
