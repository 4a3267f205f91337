//! Lookup of entities and their annotations.
//!
//! These are read-only conveniences on `AxiomStore`; none of them
//! record a change.
use std::collections::BTreeSet;

use log::warn;

use crate::model::*;
use crate::ontology::store::AxiomStore;
use crate::visitor::entity::{IRIExtract, SignatureExtract};
use crate::visitor::Walk;
use crate::vocab::AnnotationBuiltIn;

/// A part of a literal built by `AxiomStore::concat_literal`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// Used as is
    Text(&'a str),
    /// Replaced by the label of the entity, or its local name
    Entity(&'a IRI),
}

impl<'a> From<&'a str> for Token<'a> {
    fn from(s: &'a str) -> Token<'a> {
        Token::Text(s)
    }
}

impl<'a> From<&'a IRI> for Token<'a> {
    fn from(iri: &'a IRI) -> Token<'a> {
        Token::Entity(iri)
    }
}

impl<'a> From<&'a Class> for Token<'a> {
    fn from(c: &'a Class) -> Token<'a> {
        Token::Entity(&c.0)
    }
}

impl<'a> From<&'a ObjectProperty> for Token<'a> {
    fn from(op: &'a ObjectProperty) -> Token<'a> {
        Token::Entity(&op.0)
    }
}

impl AxiomStore {
    /// The annotations asserted about `subject`, restricted to those
    /// with property `ap` if given.
    pub fn annotations(&self, subject: &IRI, ap: Option<&AnnotationProperty>) -> Vec<&Annotation> {
        self.axioms_about(subject)
            .filter_map(|ax| match ax {
                Axiom::AnnotationAssertion(aa) if &aa.subject == subject => Some(&aa.ann),
                _ => None,
            })
            .filter(|ann| ap.map_or(true, |ap| &ann.ap == ap))
            .collect()
    }

    fn builtin_literals(&self, subject: &IRI, builtin: AnnotationBuiltIn) -> Vec<&Literal> {
        let ap = builtin.property(self.build());
        self.annotations(subject, Some(&ap))
            .into_iter()
            .filter_map(|ann| ann.av.as_literal())
            .collect()
    }

    /// The `rdfs:label` of `subject`.
    ///
    /// An entity is expected to have at most one label. When there
    /// are more, the first asserted is returned and a warning logged.
    pub fn label(&self, subject: &IRI) -> Option<&str> {
        let labels = self.builtin_literals(subject, AnnotationBuiltIn::Label);
        if labels.len() > 1 {
            warn!("Multiple labels for {}", subject);
        }
        labels.first().map(|l| l.literal().as_str())
    }

    /// Returns true if `subject` has an `owl:deprecated` annotation
    /// with the literal "true".
    pub fn is_deprecated(&self, subject: &IRI) -> bool {
        self.builtin_literals(subject, AnnotationBuiltIn::Deprecated)
            .iter()
            .any(|l| l.literal() == "true")
    }

    fn signature(&self) -> SignatureExtract {
        let mut walk = Walk::new(SignatureExtract::default());
        walk.axioms(self.iter());
        walk.into_visit()
    }

    pub fn classes(&self) -> BTreeSet<Class> {
        self.signature().classes
    }

    pub fn object_properties(&self) -> BTreeSet<ObjectProperty> {
        self.signature().object_properties
    }

    pub fn annotation_properties(&self) -> BTreeSet<AnnotationProperty> {
        self.signature().annotation_properties
    }

    pub fn individuals(&self) -> BTreeSet<NamedIndividual> {
        self.signature().individuals
    }

    /// The classes, object properties and annotation properties in
    /// the signature, in that order.
    fn searchable(&self) -> Vec<NamedEntity> {
        let sig = self.signature();
        sig.classes
            .into_iter()
            .map(NamedEntity::from)
            .chain(sig.object_properties.into_iter().map(NamedEntity::from))
            .chain(sig.annotation_properties.into_iter().map(NamedEntity::from))
            .collect()
    }

    fn key_matches(&self, key: &str, e: &NamedEntity) -> bool {
        e.iri().as_str() == key || self.label(e.iri()) == Some(key)
    }

    /// The first entity whose `IRI` or label is `key`.
    pub fn find(&self, key: &str) -> Option<NamedEntity> {
        self.searchable()
            .into_iter()
            .find(|e| self.key_matches(key, e))
    }

    /// Every entity whose `IRI` or label is `key`.
    pub fn find_all(&self, key: &str) -> Vec<NamedEntity> {
        self.searchable()
            .into_iter()
            .filter(|e| self.key_matches(key, e))
            .collect()
    }

    /// Every entity with an annotation whose value satisfies
    /// `predicate`.
    pub fn find_where<P>(&self, mut predicate: P) -> Vec<NamedEntity>
    where
        P: FnMut(&AnnotationValue) -> bool,
    {
        self.searchable()
            .into_iter()
            .filter(|e| {
                self.annotations(e.iri(), None)
                    .iter()
                    .any(|ann| predicate(&ann.av))
            })
            .collect()
    }

    /// Every axiom that mentions `iri` anywhere, in store order.
    ///
    /// This is a superset of `axioms_about`.
    pub fn all_axioms_for(&self, iri: &IRI) -> Vec<&Axiom> {
        self.iter()
            .filter(|ax| {
                let mut walk = Walk::new(IRIExtract::default());
                walk.axiom(ax);
                walk.into_visit().into_vec().contains(iri)
            })
            .collect()
    }

    /// Join `tokens` with a single space, using the label of each
    /// entity or its local name when it has none.
    pub fn concat_literal(&self, tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| match t {
                Token::Text(s) => s.to_string(),
                Token::Entity(iri) => self
                    .label(iri)
                    .unwrap_or_else(|| iri.local_name())
                    .to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
