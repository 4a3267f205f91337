//! Visitor support for the statement model.
//!
//! A single `Visit` trait, with a separate `Walk` struct; this splits
//! the walking logic from the visit, so the default implementation of
//! every `Visit` method is empty and implementations override only
//! what they need.
//!
//! # Examples
//! ```
//! # use horned_frame::model::*;
//! # use horned_frame::visitor::Visit;
//! # use horned_frame::visitor::Walk;
//! # use horned_frame::ontology::set::SetOntology;
//! #
//! #[derive(Default)]
//! struct HelloClass(Option<String>);
//!
//! impl Visit for HelloClass {
//!     fn visit_class(&mut self, c: &Class) {
//!          self.0.replace(format!("Hello {}", c.0));
//!     }
//! }
//!
//! let b = Build::new();
//! let mut o = SetOntology::new();
//!
//! o.insert(SubClassOf::new(b.class("World"), b.class("World")));
//!
//! let mut walk = Walk::new(HelloClass::default());
//! walk.set_ontology(&o);
//!
//! let helloclass = walk.into_visit();
//! assert_eq!(helloclass.0, Some("Hello World".to_string()));
//! ```
use crate::model::*;
use crate::ontology::set::SetOntology;
use std::collections::BTreeSet;

pub trait Visit {
    fn visit_iri(&mut self, _: &IRI) {}
    fn visit_class(&mut self, _: &Class) {}
    fn visit_object_property(&mut self, _: &ObjectProperty) {}
    fn visit_annotation_property(&mut self, _: &AnnotationProperty) {}
    fn visit_named_individual(&mut self, _: &NamedIndividual) {}
    fn visit_axiom(&mut self, _: &Axiom) {}
    fn visit_import(&mut self, _: &Import) {}
    fn visit_sub_class_of(&mut self, _: &SubClassOf) {}
    fn visit_equivalent_classes(&mut self, _: &EquivalentClasses) {}
    fn visit_disjoint_classes(&mut self, _: &DisjointClasses) {}
    fn visit_disjoint_union(&mut self, _: &DisjointUnion) {}
    fn visit_class_assertion(&mut self, _: &ClassAssertion) {}
    fn visit_annotation_assertion(&mut self, _: &AnnotationAssertion) {}
    fn visit_literal(&mut self, _: &Literal) {}
    fn visit_annotation(&mut self, _: &Annotation) {}
    fn visit_annotation_value(&mut self, _: &AnnotationValue) {}
    fn visit_class_expression(&mut self, _: &ClassExpression) {}
    fn visit_ontology_id(&mut self, _: &OntologyID) {}
    fn visit_set_ontology(&mut self, _: &SetOntology) {}
    fn visit_class_expression_set(&mut self, _: &BTreeSet<ClassExpression>) {}
}

pub struct Walk<V>(V);

impl<V: Visit> Walk<V> {
    pub fn new(v: V) -> Self {
        Walk(v)
    }

    pub fn as_mut_visit(&mut self) -> &mut V {
        &mut self.0
    }

    pub fn into_visit(self) -> V {
        self.0
    }

    pub fn iri(&mut self, e: &IRI) {
        self.0.visit_iri(e);
    }

    pub fn class(&mut self, e: &Class) {
        self.0.visit_class(e);
        self.iri(&e.0);
    }

    pub fn object_property(&mut self, e: &ObjectProperty) {
        self.0.visit_object_property(e);
        self.iri(&e.0);
    }

    pub fn annotation_property(&mut self, e: &AnnotationProperty) {
        self.0.visit_annotation_property(e);
        self.iri(&e.0);
    }

    pub fn named_individual(&mut self, e: &NamedIndividual) {
        self.0.visit_named_individual(e);
        self.iri(&e.0);
    }

    pub fn axiom(&mut self, e: &Axiom) {
        self.0.visit_axiom(e);
        match e {
            Axiom::SubClassOf(ax) => self.sub_class_of(ax),
            Axiom::EquivalentClasses(ax) => self.equivalent_classes(ax),
            Axiom::DisjointClasses(ax) => self.disjoint_classes(ax),
            Axiom::DisjointUnion(ax) => self.disjoint_union(ax),
            Axiom::ClassAssertion(ax) => self.class_assertion(ax),
            Axiom::AnnotationAssertion(ax) => self.annotation_assertion(ax),
            Axiom::Import(ax) => self.import(ax),
        }
    }

    pub fn import(&mut self, e: &Import) {
        self.0.visit_import(e);
        self.iri(&e.0);
    }

    pub fn sub_class_of(&mut self, e: &SubClassOf) {
        self.0.visit_sub_class_of(e);
        self.class_expression(&e.sub);
        self.class_expression(&e.sup);
    }

    pub fn equivalent_classes(&mut self, e: &EquivalentClasses) {
        self.0.visit_equivalent_classes(e);
        self.class_expression_set(e.operands());
    }

    pub fn disjoint_classes(&mut self, e: &DisjointClasses) {
        self.0.visit_disjoint_classes(e);
        self.class_expression_set(e.operands());
    }

    pub fn disjoint_union(&mut self, e: &DisjointUnion) {
        self.0.visit_disjoint_union(e);
        self.class(e.class());
        self.class_expression_set(e.operands());
    }

    pub fn class_assertion(&mut self, e: &ClassAssertion) {
        self.0.visit_class_assertion(e);
        self.class_expression(&e.ce);
        self.named_individual(&e.i);
    }

    pub fn annotation_assertion(&mut self, e: &AnnotationAssertion) {
        self.0.visit_annotation_assertion(e);
        self.iri(&e.subject);
        self.annotation(&e.ann);
    }

    pub fn literal(&mut self, e: &Literal) {
        self.0.visit_literal(e);
        if let Literal::Datatype { datatype_iri, .. } = e {
            self.iri(datatype_iri);
        }
    }

    pub fn annotation(&mut self, e: &Annotation) {
        self.0.visit_annotation(e);
        self.annotation_property(&e.ap);
        self.annotation_value(&e.av);
    }

    pub fn annotation_value(&mut self, e: &AnnotationValue) {
        self.0.visit_annotation_value(e);
        match e {
            AnnotationValue::Literal(l) => self.literal(l),
            AnnotationValue::IRI(iri) => self.iri(iri),
        }
    }

    pub fn class_expression(&mut self, e: &ClassExpression) {
        self.0.visit_class_expression(e);
        match e {
            ClassExpression::Class(c) => self.class(c),
            ClassExpression::ObjectSomeValuesFrom { ope, bce } => {
                self.object_property(ope);
                self.class_expression(bce);
            }
            ClassExpression::ObjectIntersectionOf(v) => self.class_expression_set(v),
            ClassExpression::ObjectUnionOf(v) => self.class_expression_set(v),
        }
    }

    pub fn ontology_id(&mut self, e: &OntologyID) {
        self.0.visit_ontology_id(e);
        if let Some(iri) = &e.iri {
            self.iri(iri);
        }
        if let Some(viri) = &e.viri {
            self.iri(viri);
        }
    }

    pub fn set_ontology(&mut self, e: &SetOntology) {
        self.0.visit_set_ontology(e);
        for ax in e.iter() {
            self.axiom(ax);
        }
    }

    /// Walk every axiom of `axioms` in order.
    pub fn axioms<'a, I: IntoIterator<Item = &'a Axiom>>(&mut self, axioms: I) {
        for ax in axioms {
            self.axiom(ax);
        }
    }

    // Collections
    pub fn class_expression_set(&mut self, e: &BTreeSet<ClassExpression>) {
        self.0.visit_class_expression_set(e);
        for i in e.iter() {
            self.class_expression(i);
        }
    }
}

pub mod entity {
    use super::Visit;
    use crate::model::*;
    use std::collections::BTreeSet;

    /// Collect every `IRI` that is walked, in walk order.
    #[derive(Default)]
    pub struct IRIExtract(Vec<IRI>);

    impl IRIExtract {
        pub fn as_mut_vec(&mut self) -> &mut Vec<IRI> {
            &mut self.0
        }

        pub fn into_vec(self) -> Vec<IRI> {
            self.0
        }
    }

    impl Visit for IRIExtract {
        fn visit_iri(&mut self, iri: &IRI) {
            self.0.push(iri.clone())
        }
    }

    /// Collect the signature of the walked axioms, that is the named
    /// entities that they use, each kind in sorted order.
    #[derive(Debug, Default)]
    pub struct SignatureExtract {
        pub classes: BTreeSet<Class>,
        pub object_properties: BTreeSet<ObjectProperty>,
        pub annotation_properties: BTreeSet<AnnotationProperty>,
        pub individuals: BTreeSet<NamedIndividual>,
    }

    impl Visit for SignatureExtract {
        fn visit_class(&mut self, c: &Class) {
            self.classes.insert(c.clone());
        }

        fn visit_object_property(&mut self, op: &ObjectProperty) {
            self.object_properties.insert(op.clone());
        }

        fn visit_annotation_property(&mut self, ap: &AnnotationProperty) {
            self.annotation_properties.insert(ap.clone());
        }

        fn visit_named_individual(&mut self, i: &NamedIndividual) {
            self.individuals.insert(i.clone());
        }
    }
}
