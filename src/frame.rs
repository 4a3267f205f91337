//! Frames: the axioms about one subject, grouped by slot.
//!
//! # Overview
//!
//! A `Frame` presents the axioms whose subject is a single `IRI` as a
//! record with one slot per kind of statement, which is easier to
//! read and to edit than the axioms themselves. Frames can be turned
//! back into axioms, so that
//!
//! ```text
//! to_frame(store, s).to_axioms() ⊆ axioms_about(store, s)
//! ```
//!
//! Slots are named by a `FrameTag`.
//!
//! # Examples
//! ```
//! # use horned_frame::model::*;
//! # use horned_frame::frame::*;
//! # use horned_frame::ontology::store::AxiomStore;
//! let b = Build::new();
//! let mut store = AxiomStore::new_with_build(b.clone());
//! let cell = b.class("http://www.example.com/cell");
//!
//! let f = Frame::new(cell.0.clone())
//!     .with_label("cell")
//!     .with_sub_class_of(b.class("http://www.example.com/thing"));
//! store.add_all(f.to_axioms(&b).unwrap()).unwrap();
//!
//! assert_eq!(to_frame(&store, &cell.0), f);
//! ```
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use log::warn;
use serde_json::{json, Map, Value};

use crate::error::{invalid, HornedError};
use crate::model::*;
use crate::ontology::store::AxiomStore;
use crate::vocab::AnnotationBuiltIn;

/// The name of a slot of a `Frame`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FrameTag {
    Id,
    Label,
    Definition,
    EquivalentTo,
    SubClassOf,
    DisjointWith,
    DisjointUnionOf,
    Types,
    Annotations,
}

impl FrameTag {
    pub fn all() -> Vec<FrameTag> {
        vec![
            FrameTag::Id,
            FrameTag::Label,
            FrameTag::Definition,
            FrameTag::EquivalentTo,
            FrameTag::SubClassOf,
            FrameTag::DisjointWith,
            FrameTag::DisjointUnionOf,
            FrameTag::Types,
            FrameTag::Annotations,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameTag::Id => "id",
            FrameTag::Label => "label",
            FrameTag::Definition => "definition",
            FrameTag::EquivalentTo => "equivalentTo",
            FrameTag::SubClassOf => "subClassOf",
            FrameTag::DisjointWith => "disjointWith",
            FrameTag::DisjointUnionOf => "disjointUnionOf",
            FrameTag::Types => "types",
            FrameTag::Annotations => "annotations",
        }
    }
}

impl Display for FrameTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameTag {
    type Err = HornedError;

    fn from_str(s: &str) -> Result<FrameTag, HornedError> {
        FrameTag::all()
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| invalid!("Unknown frame tag: {}", s))
    }
}

/// The axioms about one subject, grouped by slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    pub id: IRI,
    pub label: Vec<Literal>,
    pub definition: Vec<Literal>,
    /// For each `EquivalentClasses` axiom, the operands other than
    /// the subject
    pub equivalent_to: Vec<BTreeSet<ClassExpression>>,
    pub sub_class_of: Vec<ClassExpression>,
    /// For each `DisjointClasses` axiom, the operands other than the
    /// subject
    pub disjoint_with: Vec<BTreeSet<ClassExpression>>,
    pub disjoint_union_of: Vec<BTreeSet<ClassExpression>>,
    pub types: Vec<ClassExpression>,
    pub annotations: Vec<Annotation>,
}

impl Frame {
    pub fn new(id: IRI) -> Frame {
        Frame {
            id,
            label: vec![],
            definition: vec![],
            equivalent_to: vec![],
            sub_class_of: vec![],
            disjoint_with: vec![],
            disjoint_union_of: vec![],
            types: vec![],
            annotations: vec![],
        }
    }

    pub fn with_label<L: Into<Literal>>(mut self, label: L) -> Frame {
        self.label.push(label.into());
        self
    }

    pub fn with_definition<L: Into<Literal>>(mut self, definition: L) -> Frame {
        self.definition.push(definition.into());
        self
    }

    /// Add an equivalence between this frame's class and `ce`.
    pub fn with_equivalent<C: Into<ClassExpression>>(mut self, ce: C) -> Frame {
        let mut s = BTreeSet::new();
        s.insert(ce.into());
        self.equivalent_to.push(s);
        self
    }

    pub fn with_sub_class_of<C: Into<ClassExpression>>(mut self, ce: C) -> Frame {
        self.sub_class_of.push(ce.into());
        self
    }

    /// Add a disjointness between this frame's class and `ce`.
    pub fn with_disjoint<C: Into<ClassExpression>>(mut self, ce: C) -> Frame {
        let mut s = BTreeSet::new();
        s.insert(ce.into());
        self.disjoint_with.push(s);
        self
    }

    pub fn with_disjoint_union_of<I>(mut self, operands: I) -> Frame
    where
        I: IntoIterator<Item = ClassExpression>,
    {
        self.disjoint_union_of.push(operands.into_iter().collect());
        self
    }

    pub fn with_type<C: Into<ClassExpression>>(mut self, ce: C) -> Frame {
        self.types.push(ce.into());
        self
    }

    pub fn with_annotation(mut self, ann: Annotation) -> Frame {
        self.annotations.push(ann);
        self
    }

    /// The tags of the slots that have a value; `Id` is always
    /// present.
    pub fn tags(&self) -> Vec<FrameTag> {
        FrameTag::all()
            .into_iter()
            .filter(|t| match t {
                FrameTag::Id => true,
                FrameTag::Label => !self.label.is_empty(),
                FrameTag::Definition => !self.definition.is_empty(),
                FrameTag::EquivalentTo => !self.equivalent_to.is_empty(),
                FrameTag::SubClassOf => !self.sub_class_of.is_empty(),
                FrameTag::DisjointWith => !self.disjoint_with.is_empty(),
                FrameTag::DisjointUnionOf => !self.disjoint_union_of.is_empty(),
                FrameTag::Types => !self.types.is_empty(),
                FrameTag::Annotations => !self.annotations.is_empty(),
            })
            .collect()
    }

    fn class(&self) -> Class {
        Class(self.id.clone())
    }

    /// Add `ax` to the appropriate slot, treating `self.id` as its
    /// subject.
    pub fn add_axiom(&mut self, ax: &Axiom) {
        let own: ClassExpression = self.class().into();
        match ax {
            Axiom::SubClassOf(sc) => self.sub_class_of.push(sc.sup.clone()),
            Axiom::EquivalentClasses(ec) => self.equivalent_to.push(ec.others(&own)),
            Axiom::DisjointClasses(dc) => self.disjoint_with.push(dc.others(&own)),
            Axiom::DisjointUnion(du) => self.disjoint_union_of.push(du.operands().clone()),
            Axiom::ClassAssertion(ca) => self.types.push(ca.ce.clone()),
            Axiom::AnnotationAssertion(aa) => {
                let ap = aa.ann.ap.0.as_str();
                match &aa.ann.av {
                    AnnotationValue::Literal(l) if ap == AnnotationBuiltIn::Label.as_ref() => {
                        self.label.push(l.clone())
                    }
                    AnnotationValue::Literal(l) if ap == AnnotationBuiltIn::Definition.as_ref() => {
                        self.definition.push(l.clone())
                    }
                    _ => self.annotations.push(aa.ann.clone()),
                }
            }
            Axiom::Import(_) => {}
        }
    }

    /// The axioms that this frame stands for.
    ///
    /// The frame's `IRI` is used as a class for the class slots, as an
    /// individual for `types`, and as the subject of annotations.
    pub fn to_axioms(&self, b: &Build) -> Result<Vec<Axiom>, HornedError> {
        let own: ClassExpression = self.class().into();
        let mut v: Vec<Axiom> = vec![];

        let label = AnnotationBuiltIn::Label.property(b);
        for l in self.label.iter() {
            v.push(AnnotationAssertion::new(self.id.clone(), label.clone(), l.clone()).into());
        }

        let definition = AnnotationBuiltIn::Definition.property(b);
        for l in self.definition.iter() {
            v.push(AnnotationAssertion::new(self.id.clone(), definition.clone(), l.clone()).into());
        }

        for others in self.equivalent_to.iter() {
            let ops = others.iter().cloned().chain(std::iter::once(own.clone()));
            v.push(EquivalentClasses::new(ops)?.into());
        }

        for sup in self.sub_class_of.iter() {
            v.push(SubClassOf::new(own.clone(), sup.clone()).into());
        }

        for others in self.disjoint_with.iter() {
            let ops = others.iter().cloned().chain(std::iter::once(own.clone()));
            v.push(DisjointClasses::new(ops)?.into());
        }

        for ops in self.disjoint_union_of.iter() {
            v.push(DisjointUnion::new(self.class(), ops.iter().cloned())?.into());
        }

        for ce in self.types.iter() {
            v.push(
                ClassAssertion {
                    ce: ce.clone(),
                    i: NamedIndividual(self.id.clone()),
                }
                .into(),
            );
        }

        for ann in self.annotations.iter() {
            v.push(
                AnnotationAssertion {
                    subject: self.id.clone(),
                    ann: ann.clone(),
                }
                .into(),
            );
        }

        Ok(v)
    }

    /// Render this frame as JSON, keyed by tag name. Empty slots are
    /// left out.
    pub fn to_json(&self) -> Value {
        let mut m = Map::new();
        for tag in self.tags() {
            let value = match tag {
                FrameTag::Id => json!(self.id.as_str()),
                FrameTag::Label => Value::Array(self.label.iter().map(literal_json).collect()),
                FrameTag::Definition => {
                    Value::Array(self.definition.iter().map(literal_json).collect())
                }
                FrameTag::EquivalentTo => sets_json(&self.equivalent_to),
                FrameTag::SubClassOf => {
                    Value::Array(self.sub_class_of.iter().map(expression_json).collect())
                }
                FrameTag::DisjointWith => sets_json(&self.disjoint_with),
                FrameTag::DisjointUnionOf => sets_json(&self.disjoint_union_of),
                FrameTag::Types => Value::Array(self.types.iter().map(expression_json).collect()),
                FrameTag::Annotations => Value::Array(
                    self.annotations
                        .iter()
                        .map(|a| {
                            json!({
                                "property": a.ap.0.as_str(),
                                "value": annotation_value_json(&a.av),
                            })
                        })
                        .collect(),
                ),
            };
            m.insert(tag.as_str().to_string(), value);
        }
        Value::Object(m)
    }
}

fn literal_json(l: &Literal) -> Value {
    match l {
        Literal::Simple { literal } => json!(literal),
        Literal::Language { literal, lang } => json!({"value": literal, "lang": lang}),
        Literal::Datatype {
            literal,
            datatype_iri,
        } => json!({"value": literal, "datatype": datatype_iri.as_str()}),
    }
}

fn annotation_value_json(av: &AnnotationValue) -> Value {
    match av {
        AnnotationValue::Literal(l) => literal_json(l),
        AnnotationValue::IRI(iri) => json!({ "iri": iri.as_str() }),
    }
}

/// A named class renders as its `IRI`, anything else as an object
/// with a `type`.
pub fn expression_json(ce: &ClassExpression) -> Value {
    match ce {
        ClassExpression::Class(c) => json!(c.0.as_str()),
        ClassExpression::ObjectSomeValuesFrom { ope, bce } => json!({
            "type": "ObjectSomeValuesFrom",
            "property": ope.0.as_str(),
            "filler": expression_json(bce),
        }),
        ClassExpression::ObjectIntersectionOf(ops) => json!({
            "type": "ObjectIntersectionOf",
            "operands": ops.iter().map(expression_json).collect::<Vec<_>>(),
        }),
        ClassExpression::ObjectUnionOf(ops) => json!({
            "type": "ObjectUnionOf",
            "operands": ops.iter().map(expression_json).collect::<Vec<_>>(),
        }),
    }
}

fn sets_json(sets: &[BTreeSet<ClassExpression>]) -> Value {
    Value::Array(
        sets.iter()
            .map(|s| Value::Array(s.iter().map(expression_json).collect()))
            .collect(),
    )
}

/// The frame for `subject`, built from the axioms about it.
pub fn to_frame(store: &AxiomStore, subject: &IRI) -> Frame {
    let mut f = Frame::new(subject.clone());
    for ax in store.axioms_about(subject) {
        f.add_axiom(ax);
    }
    f
}

/// Partition `axioms` into frames by their primary subject.
///
/// Frames are in the order their subject was first seen. Axioms with
/// no subject are dropped with a warning.
pub fn axioms_to_frame_map<'a, I>(axioms: I) -> IndexMap<IRI, Frame>
where
    I: IntoIterator<Item = &'a Axiom>,
{
    let mut map: IndexMap<IRI, Frame> = IndexMap::new();
    for ax in axioms {
        match ax.subject() {
            Some(s) => map
                .entry(s.clone())
                .or_insert_with(|| Frame::new(s))
                .add_axiom(ax),
            None => warn!("No subject for {:?}", ax),
        }
    }
    map
}

impl AxiomStore {
    /// A frame for every subject in the store.
    pub fn frame_map(&self) -> IndexMap<IRI, Frame> {
        axioms_to_frame_map(self.iter())
    }
}
