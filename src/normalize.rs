//! Transforms collections of axioms to a normalized representation

//! # Overview
//!
//! The same set of axioms may be held in many different orders, and
//! a store that has been materialized carries imports which add
//! nothing to the meaning of its own axioms.
//!
//! This module provides methods to standardize these to a single
//! representation, so that stores and change log replays can be
//! compared.
use crate::model::{Axiom, Kinded, AxiomKind};

pub fn normalize(o: Vec<Axiom>) -> Vec<Axiom> {
    let mut o = simplify(o);
    o.sort();
    o.dedup();
    o
}

pub fn normalize_and_compare(o1: Vec<Axiom>, o2: Vec<Axiom>) -> bool {
    normalize(o1).eq(&normalize(o2))
}

pub fn normalize_and_assert_eq(o1: Vec<Axiom>, o2: Vec<Axiom>) {
    assert_eq!(normalize(o1), normalize(o2))
}

/// Remove every import.
pub fn simplify(o: Vec<Axiom>) -> Vec<Axiom> {
    o.into_iter()
        .filter(|ax| ax.kind() != AxiomKind::Import)
        .collect()
}
