use std::collections::BTreeSet;

use pretty_assertions::assert_eq;

use horned_frame::error::HornedError;
use horned_frame::frame::{axioms_to_frame_map, to_frame};
use horned_frame::generate::{FrameGenerator, GenusDifferentia};
use horned_frame::idgen::IdAllocator;
use horned_frame::materialize::{ancestors_over, materialize};
use horned_frame::model::*;
use horned_frame::normalize::normalize_and_assert_eq;
use horned_frame::ontology::store::AxiomStore;
use horned_frame::reasoner::{Reasoner, ReasonerFactory, StructuralReasonerFactory};
use horned_frame::transform::{filter, rewrite, Rewrite};
use horned_frame::vocab::AnnotationBuiltIn;

const OBO: &str = "http://purl.obolibrary.org/obo/";

struct Cells {
    b: Build,
    store: AxiomStore,
    cell: Class,
    nucleus: Class,
    organelle: Class,
    part_of: ObjectProperty,
    has_part: ObjectProperty,
}

fn cells() -> Cells {
    let b = Build::new();
    let mut store = AxiomStore::new_with_build(b.clone());
    store.set_ontology_iri(b.iri("http://www.example.com/cells.owl"));

    let cell = b.class("http://www.example.com/Cell");
    let nucleus = b.class("http://www.example.com/Nucleus");
    let organelle = b.class("http://www.example.com/Organelle");
    let part_of = b.object_property("http://www.example.com/part_of");
    let has_part = b.object_property("http://www.example.com/has_part");
    let label = AnnotationBuiltIn::Label.property(&b);

    store
        .add_all(vec![
            SubClassOf::new(nucleus.clone(), organelle.clone()).into(),
            SubClassOf::new(
                nucleus.clone(),
                ClassExpression::some(part_of.clone(), cell.clone()),
            )
            .into(),
            AnnotationAssertion::new(cell.0.clone(), label.clone(), "Cell").into(),
            AnnotationAssertion::new(nucleus.0.clone(), label.clone(), "Nucleus").into(),
            AnnotationAssertion::new(has_part.0.clone(), label, "has part").into(),
        ])
        .unwrap();

    Cells {
        b,
        store,
        cell,
        nucleus,
        organelle,
        part_of,
        has_part,
    }
}

#[test]
fn add_is_idempotent() {
    let mut c = cells();
    let ax: Axiom = SubClassOf::new(c.cell.clone(), c.organelle.clone()).into();

    c.store.add(ax.clone()).unwrap();
    let once: Vec<Axiom> = c.store.iter().cloned().collect();
    c.store.add(ax).unwrap();
    let twice: Vec<Axiom> = c.store.iter().cloned().collect();

    assert_eq!(once, twice);
}

#[test]
fn second_remove_is_a_no_op() {
    let mut c = cells();
    let ax: Axiom = SubClassOf::new(c.nucleus.clone(), c.organelle.clone()).into();

    assert!(c.store.remove(&ax));
    let after: Vec<Axiom> = c.store.iter().cloned().collect();
    assert!(!c.store.remove(&ax));
    assert_eq!(c.store.iter().cloned().collect::<Vec<_>>(), after);
}

#[test]
fn replay_rebuilds_the_store() {
    let mut c = cells();
    let ax: Axiom = SubClassOf::new(c.nucleus.clone(), c.organelle.clone()).into();
    c.store.remove(&ax);
    c.store.add(ax.clone()).unwrap();
    c.store.remove(&ax);
    materialize(&mut c.store, &c.part_of, false).unwrap();

    let replayed: Vec<Axiom> = c.store.replay().into_iter().collect();
    let current: Vec<Axiom> = c.store.iter().cloned().collect();
    assert_eq!(replayed, current);
}

#[test]
fn frame_round_trip_is_contained() {
    let mut c = cells();
    c.store
        .add(
            EquivalentClasses::new(vec![
                c.organelle.clone().into(),
                c.b.class("http://www.example.com/Organelle2").into(),
            ])
            .unwrap(),
        )
        .unwrap();

    let subjects: Vec<IRI> = c.store.subjects().cloned().collect();
    assert!(!subjects.is_empty());
    for s in subjects {
        let about: BTreeSet<&Axiom> = c.store.axioms_about(&s).collect();
        for ax in to_frame(&c.store, &s).to_axioms(&c.b).unwrap() {
            assert!(about.contains(&ax), "{:?} is not about {}", ax, s);
        }
    }
}

#[test]
fn frame_map_covers_store() {
    let c = cells();
    let map = axioms_to_frame_map(c.store.iter());

    let mut rebuilt = vec![];
    for f in map.values() {
        rebuilt.extend(f.to_axioms(&c.b).unwrap());
    }
    normalize_and_assert_eq(rebuilt, c.store.iter().cloned().collect());
}

#[test]
fn materialize_is_deterministic() {
    let mut c = cells();
    let first = materialize(&mut c.store, &c.has_part, true).unwrap();
    let first: (Vec<Axiom>, Vec<(Class, Class)>) = (
        first.ontology.iter().cloned().collect(),
        first.lookup.clone().into_iter().collect(),
    );

    let mut d = cells();
    let second = materialize(&mut d.store, &d.has_part, true).unwrap();
    let second: (Vec<Axiom>, Vec<(Class, Class)>) = (
        second.ontology.iter().cloned().collect(),
        second.lookup.clone().into_iter().collect(),
    );

    assert_eq!(first, second);
}

#[test]
fn materialize_reuses_cache_until_change() {
    let mut c = cells();
    let generation = materialize(&mut c.store, &c.part_of, false)
        .unwrap()
        .generation();
    assert_eq!(
        materialize(&mut c.store, &c.part_of, false)
            .unwrap()
            .generation(),
        generation
    );

    c.store
        .add(SubClassOf::new(c.cell.clone(), c.organelle.clone()))
        .unwrap();
    let regenerated = materialize(&mut c.store, &c.part_of, false)
        .unwrap()
        .generation();
    assert!(regenerated > generation);
}

#[test]
fn reflexive_ancestors_include_class() {
    let mut c = cells();
    for cls in vec![c.cell.clone(), c.nucleus.clone(), c.organelle.clone()] {
        let ancestors = ancestors_over(
            &mut c.store,
            &StructuralReasonerFactory,
            &cls,
            &c.part_of,
            true,
            false,
        )
        .unwrap();
        assert!(ancestors.contains(&cls));
    }
}

#[test]
fn ancestors_over_part_of() {
    let mut c = cells();
    let ancestors = ancestors_over(
        &mut c.store,
        &StructuralReasonerFactory,
        &c.nucleus,
        &c.part_of,
        false,
        false,
    )
    .unwrap();

    assert!(ancestors.contains(&c.cell));
    assert!(!ancestors.contains(&c.nucleus));
}

#[test]
fn direct_ancestors_over_part_of() {
    let b = Build::new();
    let mut store = AxiomStore::new_with_build(b.clone());
    let n = b.class("http://www.example.com/N");
    let c = b.class("http://www.example.com/C");
    let t = b.class("http://www.example.com/T");
    let p = b.object_property("http://www.example.com/p");
    store
        .add_all(vec![
            SubClassOf::new(n.clone(), ClassExpression::some(p.clone(), c.clone())).into(),
            SubClassOf::new(c.clone(), t.clone()).into(),
        ])
        .unwrap();

    let direct = ancestors_over(&mut store, &StructuralReasonerFactory, &n, &p, false, true).unwrap();
    assert_eq!(direct, vec![c.clone()].into_iter().collect::<BTreeSet<_>>());

    let all = ancestors_over(&mut store, &StructuralReasonerFactory, &n, &p, false, false).unwrap();
    assert_eq!(all, vec![c, t].into_iter().collect::<BTreeSet<_>>());
}

#[derive(Debug)]
struct Unavailable;

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reasoner unavailable")
    }
}

impl std::error::Error for Unavailable {}

struct UnavailableFactory;

impl ReasonerFactory for UnavailableFactory {
    type Reasoner = UnavailableReasoner;

    fn create(&self, _: &[&Axiom]) -> Result<UnavailableReasoner, HornedError> {
        Ok(UnavailableReasoner)
    }
}

struct UnavailableReasoner;

impl Reasoner for UnavailableReasoner {
    fn super_classes(&self, _: &Class, _: bool) -> Result<BTreeSet<Class>, HornedError> {
        Err(HornedError::reasoner(Unavailable))
    }

    fn equivalent_classes(&self, _: &Class) -> Result<BTreeSet<Class>, HornedError> {
        Err(HornedError::reasoner(Unavailable))
    }
}

#[test]
fn reasoner_errors_are_passed_on() {
    let mut c = cells();
    let r = ancestors_over(
        &mut c.store,
        &UnavailableFactory,
        &c.nucleus,
        &c.part_of,
        false,
        false,
    );
    assert!(matches!(r, Err(HornedError::ReasonerError(_))));
}

#[test]
fn allocator_skips_used_identifiers() {
    let b = Build::new();
    let mut store = AxiomStore::new_with_build(b.clone());
    store.configure_id_space("CL", 0);

    let thing = b.class("http://www.example.com/Thing");
    for n in 1..=5 {
        let c = b.class(format!("{}CL_{:07}", OBO, n));
        store.add(SubClassOf::new(c, thing.clone())).unwrap();
    }

    let iri = IdAllocator::new().next(&mut store).unwrap();
    assert_eq!(iri.as_str(), format!("{}CL_0000006", OBO));
    assert_eq!(store.id_space().last_id, 6);
}

#[test]
fn allocator_checks_literal_references() {
    let b = Build::new();
    let mut store = AxiomStore::new_with_build(b.clone());
    store.configure_id_space("CL", 0);

    let xref = AnnotationBuiltIn::HasDbXref.property(&b);
    let subject = b.iri("http://www.example.com/x");
    store
        .add(AnnotationAssertion::new(subject.clone(), xref.clone(), "CL:0000001"))
        .unwrap();
    store
        .add(AnnotationAssertion::new(
            subject,
            xref,
            Literal::from(format!("{}CL_0000002", OBO)),
        ))
        .unwrap();

    let iri = IdAllocator::new().next(&mut store).unwrap();
    assert_eq!(iri.as_str(), format!("{}CL_0000003", OBO));
}

#[test]
fn allocator_exhaustion() {
    let b = Build::new();
    let mut store = AxiomStore::new_with_build(b.clone());
    store.configure_id_space("CL", 0);
    let label = AnnotationBuiltIn::Label.property(&b);
    for n in 1..=3 {
        store
            .add(AnnotationAssertion::new(
                b.iri(format!("{}CL_{:07}", OBO, n)),
                label.clone(),
                "taken",
            ))
            .unwrap();
    }

    let r = IdAllocator::new().with_max_attempts(3).next(&mut store);
    match r {
        Err(HornedError::IdentifierExhaustion { idspace, attempts }) => {
            assert_eq!(idspace, "CL");
            assert_eq!(attempts, 3);
        }
        other => panic!("Expected exhaustion, got {:?}", other),
    }
}

#[test]
fn filter_then_invert() {
    let b = Build::new();
    let mut store = AxiomStore::new_with_build(b.clone());
    let a = b.class("http://www.example.com/A");
    let bb = b.class("http://www.example.com/B");
    let ba: Axiom = SubClassOf::new(bb.clone(), a.clone()).into();
    let ab: Axiom = SubClassOf::new(a, bb).into();
    store.add(ba.clone()).unwrap();

    assert_eq!(
        filter(&mut store, |ax| matches!(ax, Axiom::SubClassOf(_)), false, false),
        vec![ba.clone()]
    );

    rewrite(&mut store, |ax| match ax {
        Axiom::SubClassOf(sc) => {
            Rewrite::Replace(SubClassOf::new(sc.sup.clone(), sc.sub.clone()).into())
        }
        _ => Rewrite::Keep,
    })
    .unwrap();

    assert!(store.contains(&ab));
    assert!(!store.contains(&ba));
}

#[test]
fn generate_cell_of_nucleus() {
    let mut c = cells();
    c.store.configure_id_space("CL", 0);
    let mut generator = FrameGenerator::new(IdAllocator::new());

    let frame = generator
        .generate(
            &mut c.store,
            &c.cell,
            &c.has_part,
            &c.nucleus,
            GenusDifferentia::default(),
        )
        .unwrap()
        .clone();

    assert_eq!(frame.id.as_str(), format!("{}CL_0000001", OBO));
    assert_eq!(frame.label, vec![Literal::from("Cell of Nucleus")]);
    assert_eq!(
        frame.definition,
        vec![Literal::from("a Cell that is has part a Nucleus")]
    );

    let expected = ClassExpression::intersection_of(vec![
        c.cell.clone().into(),
        ClassExpression::some(c.has_part.clone(), c.nucleus.clone()),
    ])
    .unwrap();
    let expected: BTreeSet<ClassExpression> = vec![expected].into_iter().collect();
    assert_eq!(frame.equivalent_to, vec![expected]);

    assert_eq!(c.store.label(&frame.id), Some("Cell of Nucleus"));
    assert_eq!(to_frame(&c.store, &frame.id).to_json(), frame.to_json());
}
