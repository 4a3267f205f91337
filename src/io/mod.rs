//! Boundaries to parsers and renderers for ontologies.
//!
//! # Overview
//!
//! This library does not read or write any syntax itself. A
//! `Serializer` is handed the ontology ID and the axioms to write,
//! together with the `Format` to write them in; a `Loader` produces
//! axioms, building its `IRI`s with the `Build` of the store that
//! will hold them.
//!
//! Both traits are implemented for closures of the right shape.
//!
//! # Examples
//! ```
//! # use horned_frame::error::HornedError;
//! # use horned_frame::io::Format;
//! # use horned_frame::model::*;
//! # use horned_frame::ontology::store::AxiomStore;
//! let mut store = AxiomStore::new();
//! let mut load = |b: &Build| -> Result<Vec<Axiom>, HornedError> {
//!     Ok(vec![SubClassOf::new(b.class("http://www.example.com/b"),
//!                             b.class("http://www.example.com/a")).into()])
//! };
//! store.load_with(&mut load).unwrap();
//!
//! let mut written = 0;
//! let mut save = |_: &OntologyID, axioms: &[&Axiom], format: Format| -> Result<(), HornedError> {
//!     assert_eq!(format, Format::Turtle);
//!     written = axioms.len();
//!     Ok(())
//! };
//! store.save_with(&mut save, Some(Format::Turtle)).unwrap();
//! assert_eq!(written, 1);
//! ```
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use enum_meta::*;
use log::debug;

use crate::error::{invalid, HornedError};
use crate::frame::Frame;
use crate::model::*;
use crate::ontology::store::AxiomStore;

/// The syntaxes an ontology may be written in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// OWL Functional Syntax
    Functional,
    /// Manchester Syntax
    Manchester,
    Turtle,
    RdfXml,
    /// The OBO flat file format
    Obo,
}

lazy_meta! {
    Format, String, METAFORMAT;
    Functional, String::from("functional");
    Manchester, String::from("manchester");
    Turtle, String::from("turtle");
    RdfXml, String::from("rdfxml");
    Obo, String::from("obo");
}

impl Format {
    /// The token for this format, as accepted by `from_str`.
    pub fn name(&self) -> &str {
        self.meta().as_str()
    }

    /// The usual file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Functional => "ofn",
            Format::Manchester => "omn",
            Format::Turtle => "ttl",
            Format::RdfXml => "owl",
            Format::Obo => "obo",
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::RdfXml
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = HornedError;

    /// Accepts either the name or the extension of a format, in any
    /// case.
    fn from_str(s: &str) -> Result<Format, HornedError> {
        let s = s.to_ascii_lowercase();
        Format::all()
            .into_iter()
            .find(|f| f.name() == s || f.extension() == s)
            .ok_or_else(|| invalid!("Unknown format: {}", s))
    }
}

/// Writes axioms somewhere, in a given format.
pub trait Serializer {
    fn serialize(
        &mut self,
        id: &OntologyID,
        axioms: &[&Axiom],
        format: Format,
    ) -> Result<(), HornedError>;
}

impl<F> Serializer for F
where
    F: FnMut(&OntologyID, &[&Axiom], Format) -> Result<(), HornedError>,
{
    fn serialize(
        &mut self,
        id: &OntologyID,
        axioms: &[&Axiom],
        format: Format,
    ) -> Result<(), HornedError> {
        self(id, axioms, format)
    }
}

/// Reads axioms from somewhere.
pub trait Loader {
    fn load(&mut self, build: &Build) -> Result<Vec<Axiom>, HornedError>;
}

impl<F> Loader for F
where
    F: FnMut(&Build) -> Result<Vec<Axiom>, HornedError>,
{
    fn load(&mut self, build: &Build) -> Result<Vec<Axiom>, HornedError> {
        self(build)
    }
}

impl AxiomStore {
    /// Pass every axiom to `serializer`, in `format` or else the
    /// store's default format.
    pub fn save_with<S: Serializer>(
        &self,
        serializer: &mut S,
        format: Option<Format>,
    ) -> Result<(), HornedError> {
        let format = format.unwrap_or_else(|| self.default_format());
        let axioms: Vec<&Axiom> = self.iter().collect();
        debug!("Saving {} axioms as {}", axioms.len(), format);
        serializer.serialize(self.id(), &axioms, format)
    }

    /// Add every axiom produced by `loader`, returning the number
    /// that were new.
    pub fn load_with<L: Loader>(&mut self, loader: &mut L) -> Result<usize, HornedError> {
        let axioms = loader.load(self.build())?;
        debug!("Loaded {} axioms", axioms.len());
        self.add_all(axioms)
    }
}

impl Frame {
    /// Pass the axioms of this frame to `serializer`, as an ontology
    /// with no `IRI`.
    pub fn save_with<S: Serializer>(
        &self,
        b: &Build,
        serializer: &mut S,
        format: Format,
    ) -> Result<(), HornedError> {
        let axioms = self.to_axioms(b)?;
        let refs: Vec<&Axiom> = axioms.iter().collect();
        serializer.serialize(&OntologyID::default(), &refs, format)
    }
}
