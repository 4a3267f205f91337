//! Materialize existential restrictions as named classes.
//!
//! # Overview
//!
//! A subsumption reasoner answers questions about named classes. To
//! ask "what is `C` related to, over `P`?" we give a name to every
//! restriction `ObjectSomeValuesFrom(P, X)` where `X` is a named class
//! in the store. Each name is a temporary class, defined in an
//! auxiliary ontology by
//!
//! ```text
//! EquivalentClasses(X-P<reflexive>, ObjectSomeValuesFrom(P, X))
//! ```
//!
//! The super-classes of `C` that are temporary classes then map back
//! to the ancestors of `C` over `P`.
//!
//! The auxiliary ontology is imported into the store with an
//! `Import` change, so the store records that it has been
//! materialized. Materializations are cached per property and
//! reflexive flag, and reused until the store is next edited; the
//! imports made here do not count as edits.
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use crate::error::{invalid, HornedError};
use crate::model::*;
use crate::ontology::set::SetOntology;
use crate::ontology::store::{AxiomStore, Change};
use crate::reasoner::{Reasoner, ReasonerFactory};
use crate::visitor::entity::SignatureExtract;
use crate::visitor::Walk;

/// Used in place of the ontology `IRI` for stores that do not have
/// one.
pub const ANONYMOUS_BASE: &str = "urn:materialized:";

/// The result of materializing one object property.
#[derive(Debug)]
pub struct Materialization {
    pub property: ObjectProperty,
    pub reflexive: bool,
    /// The auxiliary axioms defining the temporary classes
    pub ontology: SetOntology,
    /// Temporary class to the class it was made from
    pub lookup: BTreeMap<Class, Class>,
    /// The `IRI` of the auxiliary ontology, as imported by the store
    pub import: IRI,
    generation: usize,
    edit_generation: usize,
}

impl Materialization {
    /// The class that `temp` was made from, if it is a temporary
    /// class of this materialization.
    pub fn original(&self, temp: &Class) -> Option<&Class> {
        self.lookup.get(temp)
    }

    /// Replace `c` with its original class, if it is temporary.
    pub fn unfold(&self, c: Class) -> Class {
        match self.lookup.get(&c) {
            Some(orig) => orig.clone(),
            None => c,
        }
    }

    /// The store generation this materialization was made at.
    pub fn generation(&self) -> usize {
        self.generation
    }
}

/// The `IRI` of the temporary class for `c` over `p`.
pub fn temp_class_iri(c: &Class, p: &ObjectProperty, reflexive: bool) -> String {
    format!("{}-{}{}", c.0, p.0, reflexive)
}

fn import_iri(store: &AxiomStore, p: &ObjectProperty, reflexive: bool) -> IRI {
    let base = store
        .ontology_iri()
        .map_or(ANONYMOUS_BASE, |iri| iri.as_str());
    store.build().iri(format!("{}{}{}", base, p.0, reflexive))
}

impl AxiomStore {
    /// The cached materialization of `p`, if there is one.
    ///
    /// The result may be stale if the store has been edited since.
    pub fn materialization(&self, p: &ObjectProperty, reflexive: bool) -> Option<&Materialization> {
        self.materialized.get(&(p.0.clone(), reflexive))
    }
}

/// Materialize `ObjectSomeValuesFrom(p, X)` for every named class `X`
/// in the store.
///
/// If the store has not been edited since the last materialization
/// of `p` and `reflexive`, the cached result is returned. The import
/// is only added if the store does not already hold it.
pub fn materialize<'a>(
    store: &'a mut AxiomStore,
    p: &ObjectProperty,
    reflexive: bool,
) -> Result<&'a Materialization, HornedError> {
    let key = (p.0.clone(), reflexive);
    let fresh = store
        .materialized
        .get(&key)
        .map_or(false, |m| m.edit_generation == store.edit_generation());
    if fresh {
        debug!("reusing materialization of {}", p.0);
        return store
            .materialized
            .get(&key)
            .ok_or_else(|| invalid!("Materialization of {} missing from cache", p.0));
    }

    let mut walk = Walk::new(SignatureExtract::default());
    walk.axioms(store.iter());
    let classes = walk.into_visit().classes;

    let import = import_iri(store, p, reflexive);
    let mut ontology = SetOntology::new();
    ontology.mut_id().iri = Some(import.clone());
    let mut lookup = BTreeMap::new();

    for c in classes {
        let temp = Class(store.build().iri(temp_class_iri(&c, p, reflexive)));
        let eq = EquivalentClasses::new(vec![
            temp.clone().into(),
            ClassExpression::some(p.clone(), c.clone()),
        ])?;
        ontology.insert(eq);
        lookup.insert(temp, c);
    }
    info!(
        "materialized {} classes over {} as {}",
        lookup.len(),
        p.0,
        import
    );

    let import_axiom: Axiom = Import(import.clone()).into();
    store.validate(&import_axiom)?;
    if !store.contains(&import_axiom) {
        store.record_materialization(Change::Add(import_axiom));
    }

    let m = Materialization {
        property: p.clone(),
        reflexive,
        ontology,
        lookup,
        import,
        generation: store.generation(),
        edit_generation: store.edit_generation(),
    };

    Ok(match store.materialized.entry(key) {
        Entry::Occupied(mut o) => {
            o.insert(m);
            o.into_mut()
        }
        Entry::Vacant(v) => v.insert(m),
    })
}

/// Remove the materialization of `p`, and its import, from the store.
///
/// Returns true if there was one.
pub fn dematerialize(store: &mut AxiomStore, p: &ObjectProperty, reflexive: bool) -> bool {
    match store.materialized.remove(&(p.0.clone(), reflexive)) {
        Some(m) => {
            store.record_materialization(Change::Remove(Import(m.import).into()));
            true
        }
        None => false,
    }
}

/// The super-classes of `cls`; when `reflexive`, its equivalent
/// classes as well.
pub fn inferred_super_classes<R: Reasoner>(
    reasoner: &R,
    cls: &Class,
    direct: bool,
    reflexive: bool,
) -> Result<BTreeSet<Class>, HornedError> {
    let mut supers = reasoner.super_classes(cls, direct)?;
    if reflexive {
        supers.extend(reasoner.equivalent_classes(cls)?);
    }
    Ok(supers)
}

/// The ancestors of `cls` over `p`.
///
/// These are the super-classes of `cls` according to a reasoner made
/// by `factory` from the store and the materialization of `p`, with
/// temporary classes replaced by the class they were made from. A
/// temporary class that is equivalent to `cls` counts as a
/// super-class. When `reflexive`, `cls` itself is included.
pub fn ancestors_over<F: ReasonerFactory>(
    store: &mut AxiomStore,
    factory: &F,
    cls: &Class,
    p: &ObjectProperty,
    reflexive: bool,
    direct: bool,
) -> Result<BTreeSet<Class>, HornedError> {
    materialize(store, p, reflexive)?;

    let store: &AxiomStore = store;
    let m = store
        .materialization(p, reflexive)
        .ok_or_else(|| invalid!("Materialization of {} missing from cache", p.0))?;

    let axioms: Vec<&Axiom> = store.iter().chain(m.ontology.iter()).collect();
    let reasoner = factory.create(&axioms)?;

    let mut supers = reasoner.super_classes(cls, direct)?;
    for e in reasoner.equivalent_classes(cls)? {
        if m.lookup.contains_key(&e) {
            supers.insert(e);
        }
    }

    let mut ancestors: BTreeSet<Class> = supers.into_iter().map(|c| m.unfold(c)).collect();
    if reflexive {
        ancestors.insert(cls.clone());
    }
    Ok(ancestors)
}
