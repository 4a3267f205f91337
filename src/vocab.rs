//! Well-known vocabularies used by frames and identifiers.
use enum_meta::*;

use crate::error::invalid;
use crate::error::HornedError;
use crate::model::{AnnotationProperty, Build};

use std::borrow::Borrow;
use std::convert::TryFrom;

macro_rules! vocabulary_traits {
    ($($enum_type:ident),+) => {
        $(
            impl TryFrom<&[u8]> for $enum_type {
                type Error = HornedError;

                fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                    $enum_type::all()
                        .into_iter()
                        .find(|variant| variant.as_bytes() == value)
                        .ok_or_else(|| invalid!("Unknown {} variant: {:?}", stringify!{$enum_type},
                                                String::from_utf8_lossy(value)))
                }
            }

            impl std::str::FromStr for $enum_type {
                type Err = HornedError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $enum_type::try_from(s.as_bytes())
                }
            }

            impl std::ops::Deref for $enum_type {
                type Target = String;

                fn deref(&self) -> &Self::Target {
                    self.meta()
                }
            }

            impl AsRef<str> for $enum_type {
                fn as_ref(&self) -> &str {
                    self.meta().as_str()
                }
            }

            impl Borrow<str> for $enum_type {
                fn borrow(&self) -> &str {
                    self.meta().as_str()
                }
            }
        )+
    };
}

/// Namespaces that are used by the ontologies this library works
/// over.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Namespace {
    /// The OBO PURL space, the default prefix for new identifiers
    OBO,
    /// The OBO-in-OWL annotation vocabulary
    OBOInOwl,
    /// Ontology Web Language
    OWL,
    /// RDF Schema
    RDFS,
    /// XML Schema datatype
    XSD,
}

lazy_meta! {
    Namespace, String, METANS;
    OBO, String::from("http://purl.obolibrary.org/obo/");
    OBOInOwl, String::from("http://www.geneontology.org/formats/oboInOwl#");
    OWL, String::from("http://www.w3.org/2002/07/owl#");
    RDFS, String::from("http://www.w3.org/2000/01/rdf-schema#");
    XSD, String::from("http://www.w3.org/2001/XMLSchema#");
}

/// Annotation properties which the frame and query layers give a
/// meaning to.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AnnotationBuiltIn {
    Label,
    Comment,
    Deprecated,
    /// IAO:0000115, "definition"
    Definition,
    HasDbXref,
    HasExactSynonym,
}

fn ns(n: Namespace, local: &str) -> String {
    let mut s = n.meta().clone();
    s.push_str(local);
    s
}

lazy_meta! {
    AnnotationBuiltIn, String, METAANNOTATION;
    Label, ns(Namespace::RDFS, "label");
    Comment, ns(Namespace::RDFS, "comment");
    Deprecated, ns(Namespace::OWL, "deprecated");
    Definition, ns(Namespace::OBO, "IAO_0000115");
    HasDbXref, ns(Namespace::OBOInOwl, "hasDbXref");
    HasExactSynonym, ns(Namespace::OBOInOwl, "hasExactSynonym");
}

vocabulary_traits! { Namespace, AnnotationBuiltIn }

impl AnnotationBuiltIn {
    /// The annotation property for this built-in, built with `b`.
    pub fn property(&self, b: &Build) -> AnnotationProperty {
        b.annotation_property(self.as_ref())
    }
}

#[inline]
pub fn is_annotation_builtin<A: AsRef<str>>(iri: A) -> bool {
    AnnotationBuiltIn::try_from(iri.as_ref().as_bytes()).is_ok()
}

/// Returns the datatype IRI for `xsd:<local>`.
pub fn xsd(local: &str) -> String {
    ns(Namespace::XSD, local)
}
