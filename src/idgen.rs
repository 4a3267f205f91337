//! Allocate fresh identifiers within an idspace.
//!
//! Identifiers follow the OBO convention: a prefix, the idspace, an
//! underscore and a zero-padded decimal number. For example,
//! `http://purl.obolibrary.org/obo/CL_0000001` whose CURIE form is
//! `CL:0000001`.
//!
//! The allocator holds no state of its own; the idspace and the last
//! number handed out live on the `AxiomStore` in an `IdSpace`.
use curie::PrefixMapping;
use log::debug;

use crate::error::{invalid, HornedError};
use crate::model::*;
use crate::ontology::store::AxiomStore;
use crate::vocab::Namespace;

/// The idspace and the last number handed out within it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IdSpace {
    /// For example, "CL"
    pub idspace: String,
    /// The lower bound of the numbers to allocate; incremented with
    /// every candidate.
    pub last_id: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdAllocator {
    prefix: String,
    width: usize,
    max_attempts: usize,
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator {
            prefix: Namespace::OBO.to_string(),
            width: 7,
            max_attempts: 10_000,
        }
    }
}

impl IdAllocator {
    pub fn new() -> IdAllocator {
        IdAllocator::default()
    }

    /// Use `prefix` in place of the OBO PURL space.
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::idgen::IdAllocator;
    /// assert!(IdAllocator::new().with_prefix("http://example.com/").is_ok());
    /// assert!(IdAllocator::new().with_prefix("not a prefix").is_err());
    /// ```
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Result<IdAllocator, HornedError> {
        let prefix = prefix.into();
        oxiri::Iri::parse(prefix.as_str())?;
        self.prefix = prefix;
        Ok(self)
    }

    /// The number of digits in the local part of an identifier.
    pub fn with_width(mut self, width: usize) -> IdAllocator {
        self.width = width;
        self
    }

    /// The number of candidates to try before giving up.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> IdAllocator {
        self.max_attempts = max_attempts;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn local_id(&self, n: u64) -> String {
        format!("{:0width$}", n, width = self.width)
    }

    /// Returns the next free identifier in the store's idspace.
    ///
    /// A candidate is taken when there is no annotation assertion and
    /// no class axiom about it, and no annotation assertion carries
    /// either its full `IRI` or its CURIE as a literal value.
    /// `last_id` on the store is advanced past every candidate tried.
    pub fn next(&self, store: &mut AxiomStore) -> Result<IRI, HornedError> {
        let idspace = store.id_space().idspace.clone();
        if idspace.is_empty() {
            return Err(invalid!("Cannot allocate an identifier without an idspace"));
        }

        let mut mapping = PrefixMapping::default();
        mapping
            .add_prefix(&idspace, &format!("{}{}_", self.prefix, idspace))
            .map_err(|_| invalid!("Cannot use idspace {} as a prefix", idspace))?;

        for _ in 0..self.max_attempts {
            let n = store
                .id_space()
                .last_id
                .checked_add(1)
                .ok_or_else(|| HornedError::IdentifierExhaustion {
                    idspace: idspace.clone(),
                    attempts: self.max_attempts,
                })?;
            store.id_space_mut().last_id = n;
            debug!("generating a new IRI. last_id={}", n);

            let iri_str = format!("{}{}_{}", self.prefix, idspace, self.local_id(n));
            let curie = mapping
                .shrink_iri(&iri_str)
                .map_err(|_| invalid!("Cannot shrink {} to a CURIE", iri_str))?
                .to_string();

            let iri = store.build().iri(iri_str.as_str());
            if !is_used(store, &iri, &curie) {
                return Ok(iri);
            }
            debug!("{} is used", iri);
        }

        Err(HornedError::IdentifierExhaustion {
            idspace,
            attempts: self.max_attempts,
        })
    }
}

fn is_used(store: &AxiomStore, iri: &IRI, curie: &str) -> bool {
    let described = store.axioms_about(iri).any(|ax| {
        matches!(ax, Axiom::AnnotationAssertion(_)) || ax.is_class_axiom()
    });

    described
        || store.iter().any(|ax| match ax {
            Axiom::AnnotationAssertion(AnnotationAssertion {
                ann:
                    Annotation {
                        av: AnnotationValue::Literal(l),
                        ..
                    },
                ..
            }) => l.literal() == iri.as_str() || l.literal() == curie,
            _ => false,
        })
}
