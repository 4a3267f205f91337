//! The boundary to a subsumption reasoner.
//!
//! Reasoning is not done by this library; anything that can answer
//! super-class and equivalent-class queries over a set of axioms can
//! be used through the `Reasoner` trait. A `StructuralReasoner` is
//! provided which works over told axioms only.
use std::collections::BTreeSet;

use crate::error::HornedError;
use crate::model::{Axiom, Class};

pub mod structural;

pub use structural::{StructuralReasoner, StructuralReasonerFactory};

/// Answers subsumption queries over a fixed set of axioms.
///
/// Errors from the underlying implementation are returned as
/// `HornedError::ReasonerError` and are passed on unchanged by
/// callers.
pub trait Reasoner {
    /// The named super-classes of `c`, excluding `c` and any class
    /// equivalent to it. If `direct`, only the most specific are
    /// returned.
    fn super_classes(&self, c: &Class, direct: bool) -> Result<BTreeSet<Class>, HornedError>;

    /// The named classes equivalent to `c`, excluding `c`.
    fn equivalent_classes(&self, c: &Class) -> Result<BTreeSet<Class>, HornedError>;
}

/// Creates a `Reasoner` for a set of axioms.
pub trait ReasonerFactory {
    type Reasoner: Reasoner;

    fn create(&self, axioms: &[&Axiom]) -> Result<Self::Reasoner, HornedError>;
}
