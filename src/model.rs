//! This module implements the basic data structures for the
//! statement model.
//!
//! # Overview
//!
//! The model covers the subset of OWL2 that the frame, materialization
//! and identifier machinery of this library operate over: four kinds
//! of named entity, four kinds of class expression, and seven kinds of
//! axiom.
//!
//! All values are immutable, and compared structurally. n-ary
//! constructs store their operands in a `BTreeSet`, so that order is
//! not significant and duplicates collapse.
//!
//! `IRI`s are interned through a `Build` object, which shares the
//! underlying string between all equal `IRI`s.
use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::rc::Rc;

use crate::error::{invalid, HornedError};

/// An
/// [IRI](https://www.w3.org/TR/2012/REC-owl2-syntax-20121211/#IRIs)
/// is an internationalized version of an URI/URL.
///
/// Here, we represent it as a simple string. `IRI`s should be created
/// with a `Build` instance so that they are cached.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct IRI(Rc<str>);

impl IRI {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part of the `IRI` after the last `#` or `/`.
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::model::*;
    /// let b = Build::new();
    /// let iri = b.iri("http://purl.obolibrary.org/obo/CL_0000001");
    /// assert_eq!(iri.local_name(), "CL_0000001");
    /// ```
    pub fn local_name(&self) -> &str {
        match self.0.rfind(|c| c == '#' || c == '/') {
            Some(i) if i + 1 < self.0.len() => &self.0[i + 1..],
            _ => &self.0,
        }
    }
}

impl Deref for IRI {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IRI {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IRI {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for IRI {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<IRI> for String {
    fn from(i: IRI) -> String {
        i.0.to_string()
    }
}

impl<'a> From<&'a IRI> for String {
    fn from(i: &'a IRI) -> String {
        i.0.to_string()
    }
}

/// Build creates new `IRI` and `NamedEntity` instances.
///
/// There is a single `IRI` object for any given string; `Build`
/// keeps a cache of them and clones share that cache.
#[derive(Clone, Debug, Default)]
pub struct Build(Rc<RefCell<HashSet<IRI>>>);

impl Build {
    pub fn new() -> Build {
        Build::default()
    }

    /// Constructs a new `IRI`
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::model::*;
    /// let b = Build::new();
    /// let iri = b.iri("http://www.example.com");
    /// assert_eq!("http://www.example.com", String::from(iri));
    /// ```
    pub fn iri<S: Borrow<str>>(&self, s: S) -> IRI {
        let mut cache = self.0.borrow_mut();
        if let Some(iri) = cache.get(s.borrow()) {
            return iri.clone();
        }

        let iri = IRI(Rc::from(s.borrow()));
        cache.insert(iri.clone());
        iri
    }

    /// Constructs a new `IRI`, checking that `s` is a syntactically
    /// valid absolute IRI.
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::model::*;
    /// let b = Build::new();
    /// assert!(b.parse_iri("http://www.example.com/a").is_ok());
    /// assert!(b.parse_iri("not an iri").is_err());
    /// ```
    pub fn parse_iri<S: Borrow<str>>(&self, s: S) -> Result<IRI, HornedError> {
        oxiri::Iri::parse(s.borrow())?;
        Ok(self.iri(s))
    }

    /// Constructs a new `Class`.
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::model::*;
    /// let b = Build::new();
    /// let c1 = b.class("http://www.example.com");
    /// let c2 = b.class(b.iri("http://www.example.com"));
    ///
    /// assert_eq!(c1, c2);
    /// ```
    pub fn class<S: Borrow<str>>(&self, s: S) -> Class {
        Class(self.iri(s))
    }

    pub fn object_property<S: Borrow<str>>(&self, s: S) -> ObjectProperty {
        ObjectProperty(self.iri(s))
    }

    pub fn annotation_property<S: Borrow<str>>(&self, s: S) -> AnnotationProperty {
        AnnotationProperty(self.iri(s))
    }

    pub fn named_individual<S: Borrow<str>>(&self, s: S) -> NamedIndividual {
        NamedIndividual(self.iri(s))
    }
}

macro_rules! named {
    ($($(#[$attr:meta])* $name:ident),*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
            pub struct $name(pub IRI);

            impl $name {
                pub fn iri(&self) -> &IRI {
                    &self.0
                }
            }

            impl From<$name> for IRI {
                fn from(n: $name) -> IRI {
                    n.0
                }
            }

            impl<'a> From<&'a $name> for IRI {
                fn from(n: &'a $name) -> IRI {
                    n.0.clone()
                }
            }

            impl From<$name> for NamedEntity {
                fn from(n: $name) -> NamedEntity {
                    NamedEntity::$name(n)
                }
            }

            impl TryFrom<NamedEntity> for $name {
                type Error = HornedError;

                fn try_from(ne: NamedEntity) -> Result<$name, HornedError> {
                    match ne {
                        NamedEntity::$name(n) => Ok(n),
                        other => Err(invalid!(
                            "Expected {} but found {:?}",
                            stringify!($name),
                            other
                        )),
                    }
                }
            }
        )*

        /// An entity that is identified by an `IRI`.
        ///
        /// The same `IRI` may be used with more than one kind of
        /// entity; the kind is fixed when the `NamedEntity` is made.
        #[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum NamedEntity {
            $($name($name)),*
        }

        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum NamedEntityKind {
            $($name),*
        }

        impl NamedEntity {
            pub fn iri(&self) -> &IRI {
                match self {
                    $(NamedEntity::$name(n) => &n.0),*
                }
            }

            pub fn kind(&self) -> NamedEntityKind {
                match self {
                    $(NamedEntity::$name(_) => NamedEntityKind::$name),*
                }
            }
        }
    }
}

named! {
    /// An OWL
    /// [Class](https://www.w3.org/TR/2012/REC-owl2-syntax-20121211/#Classes),
    /// a set of individuals.
    Class,
    /// An OWL
    /// [ObjectProperty](https://www.w3.org/TR/2012/REC-owl2-syntax-20121211/#Object_Properties)
    /// which relates two individuals.
    ObjectProperty,
    /// An OWL
    /// [AnnotationProperty](https://www.w3.org/TR/2012/REC-owl2-syntax-20121211/#Annotation_Properties)
    /// which carries non-logical information.
    AnnotationProperty,
    /// An OWL
    /// [NamedIndividual](https://www.w3.org/TR/2012/REC-owl2-syntax-20121211/#Named_Individuals)
    NamedIndividual
}

/// A class definition.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum ClassExpression {
    /// A named class
    Class(Class),

    /// The class of individuals related by `ope` to at least one
    /// individual of `bce`.
    ObjectSomeValuesFrom {
        ope: ObjectProperty,
        bce: Box<ClassExpression>,
    },

    /// The class of individuals that are in every operand.
    ObjectIntersectionOf(BTreeSet<ClassExpression>),

    /// The class of individuals that are in at least one operand.
    ObjectUnionOf(BTreeSet<ClassExpression>),
}

impl From<Class> for ClassExpression {
    fn from(c: Class) -> ClassExpression {
        ClassExpression::Class(c)
    }
}

impl<'a> From<&'a Class> for ClassExpression {
    fn from(c: &'a Class) -> ClassExpression {
        ClassExpression::Class(c.clone())
    }
}

fn operand_set<I>(kind: &str, operands: I) -> Result<BTreeSet<ClassExpression>, HornedError>
where
    I: IntoIterator<Item = ClassExpression>,
{
    let set: BTreeSet<ClassExpression> = operands.into_iter().collect();
    if set.len() < 2 {
        return Err(invalid!(
            "{} requires at least two distinct operands, found {}",
            kind,
            set.len()
        ));
    }
    Ok(set)
}

impl ClassExpression {
    /// Constructs an existential restriction.
    ///
    /// # Examples
    /// ```
    /// # use horned_frame::model::*;
    /// let b = Build::new();
    /// let ce = ClassExpression::some(
    ///     b.object_property("http://www.example.com/part_of"),
    ///     b.class("http://www.example.com/cell"),
    /// );
    /// assert!(ce.is_anonymous());
    /// ```
    pub fn some<C: Into<ClassExpression>>(ope: ObjectProperty, bce: C) -> ClassExpression {
        ClassExpression::ObjectSomeValuesFrom {
            ope,
            bce: Box::new(bce.into()),
        }
    }

    /// Constructs an intersection. At least two distinct operands
    /// are required.
    pub fn intersection_of<I>(operands: I) -> Result<ClassExpression, HornedError>
    where
        I: IntoIterator<Item = ClassExpression>,
    {
        Ok(ClassExpression::ObjectIntersectionOf(operand_set(
            "ObjectIntersectionOf",
            operands,
        )?))
    }

    /// Constructs a union. At least two distinct operands are
    /// required.
    pub fn union_of<I>(operands: I) -> Result<ClassExpression, HornedError>
    where
        I: IntoIterator<Item = ClassExpression>,
    {
        Ok(ClassExpression::ObjectUnionOf(operand_set(
            "ObjectUnionOf",
            operands,
        )?))
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            ClassExpression::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.as_class().is_none()
    }
}

/// A literal value, with an optional language tag or datatype.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Literal {
    Simple { literal: String },
    Language { literal: String, lang: String },
    Datatype { literal: String, datatype_iri: IRI },
}

impl Literal {
    pub fn literal(&self) -> &String {
        match self {
            Literal::Simple { literal } => literal,
            Literal::Language { literal, .. } => literal,
            Literal::Datatype { literal, .. } => literal,
        }
    }
}

impl<'a> From<&'a str> for Literal {
    fn from(s: &'a str) -> Literal {
        Literal::Simple {
            literal: s.to_string(),
        }
    }
}

impl From<String> for Literal {
    fn from(literal: String) -> Literal {
        Literal::Simple { literal }
    }
}

/// The value of an annotation
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum AnnotationValue {
    Literal(Literal),
    IRI(IRI),
}

impl AnnotationValue {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            AnnotationValue::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl From<Literal> for AnnotationValue {
    fn from(l: Literal) -> AnnotationValue {
        AnnotationValue::Literal(l)
    }
}

impl From<IRI> for AnnotationValue {
    fn from(iri: IRI) -> AnnotationValue {
        AnnotationValue::IRI(iri)
    }
}

impl<'a> From<&'a str> for AnnotationValue {
    fn from(s: &'a str) -> AnnotationValue {
        AnnotationValue::Literal(s.into())
    }
}

/// An annotation: a property and its value.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Annotation {
    pub ap: AnnotationProperty,
    pub av: AnnotationValue,
}

/// The identity of an ontology.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OntologyID {
    pub iri: Option<IRI>,
    pub viri: Option<IRI>,
}

/// A sub-class axiom: every `sub` is also a `sup`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct SubClassOf {
    pub sub: ClassExpression,
    pub sup: ClassExpression,
}

impl SubClassOf {
    /// Create a new `SubClassOf` axiom, with `sub` as the sub-class
    /// and `sup` as the super-class.
    pub fn new<S: Into<ClassExpression>, T: Into<ClassExpression>>(sub: S, sup: T) -> SubClassOf {
        SubClassOf {
            sub: sub.into(),
            sup: sup.into(),
        }
    }
}

macro_rules! nary_axiom {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
        pub struct $name(BTreeSet<ClassExpression>);

        impl $name {
            /// Create a new axiom. At least two distinct operands are
            /// required.
            pub fn new<I>(operands: I) -> Result<$name, HornedError>
            where
                I: IntoIterator<Item = ClassExpression>,
            {
                Ok($name(operand_set(stringify!($name), operands)?))
            }

            pub fn operands(&self) -> &BTreeSet<ClassExpression> {
                &self.0
            }

            /// Every operand other than `ce`.
            pub fn others(&self, ce: &ClassExpression) -> BTreeSet<ClassExpression> {
                self.0.iter().filter(|o| *o != ce).cloned().collect()
            }
        }
    };
}

nary_axiom! {
    /// The operands all describe the same set of individuals.
    EquivalentClasses
}

nary_axiom! {
    /// No two operands share an individual.
    DisjointClasses
}

/// The class is the disjoint union of the operands.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct DisjointUnion(Class, BTreeSet<ClassExpression>);

impl DisjointUnion {
    pub fn new<I>(c: Class, operands: I) -> Result<DisjointUnion, HornedError>
    where
        I: IntoIterator<Item = ClassExpression>,
    {
        Ok(DisjointUnion(c, operand_set("DisjointUnion", operands)?))
    }

    pub fn class(&self) -> &Class {
        &self.0
    }

    pub fn operands(&self) -> &BTreeSet<ClassExpression> {
        &self.1
    }
}

/// The individual `i` is an instance of `ce`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct ClassAssertion {
    pub ce: ClassExpression,
    pub i: NamedIndividual,
}

/// An annotation about the entity identified by `subject`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct AnnotationAssertion {
    pub subject: IRI,
    pub ann: Annotation,
}

impl AnnotationAssertion {
    pub fn new<V: Into<AnnotationValue>>(
        subject: IRI,
        ap: AnnotationProperty,
        av: V,
    ) -> AnnotationAssertion {
        AnnotationAssertion {
            subject,
            ann: Annotation { ap, av: av.into() },
        }
    }
}

/// An import of another ontology.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Import(pub IRI);

/// Access the `AxiomKind` of an object.
pub trait Kinded {
    fn kind(&self) -> AxiomKind;
}

macro_rules! axioms {
    ($($(#[$attr:meta])* $name:ident),*) => {
        /// An axiom, that is a single statement in an ontology.
        #[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
        pub enum Axiom {
            $($(#[$attr])* $name($name)),*
        }

        /// The kind of an `Axiom`, without its content.
        #[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
        pub enum AxiomKind {
            $($name),*
        }

        impl AxiomKind {
            pub fn all_kinds() -> Vec<AxiomKind> {
                vec![$(AxiomKind::$name),*]
            }
        }

        impl Kinded for Axiom {
            fn kind(&self) -> AxiomKind {
                match self {
                    $(Axiom::$name(_) => AxiomKind::$name),*
                }
            }
        }

        $(
            impl From<$name> for Axiom {
                fn from(ax: $name) -> Axiom {
                    Axiom::$name(ax)
                }
            }

            impl Kinded for $name {
                fn kind(&self) -> AxiomKind {
                    AxiomKind::$name
                }
            }
        )*
    }
}

axioms! {
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    DisjointUnion,
    ClassAssertion,
    AnnotationAssertion,
    Import
}

fn named_operands(ops: &BTreeSet<ClassExpression>) -> Vec<IRI> {
    ops.iter()
        .filter_map(ClassExpression::as_class)
        .map(|c| c.0.clone())
        .collect()
}

impl Axiom {
    /// Returns the `IRI`s of the entities that this axiom is about.
    ///
    /// For class axioms, these are the named classes on the left
    /// hand side (or every named operand of an n-ary axiom); for a
    /// class assertion, the individual; for an annotation assertion,
    /// its subject. Imports have no subject.
    pub fn subjects(&self) -> Vec<IRI> {
        match self {
            Axiom::SubClassOf(sc) => sc.sub.as_class().map(|c| c.0.clone()).into_iter().collect(),
            Axiom::EquivalentClasses(ec) => named_operands(ec.operands()),
            Axiom::DisjointClasses(dc) => named_operands(dc.operands()),
            Axiom::DisjointUnion(du) => vec![du.class().0.clone()],
            Axiom::ClassAssertion(ca) => vec![ca.i.0.clone()],
            Axiom::AnnotationAssertion(aa) => vec![aa.subject.clone()],
            Axiom::Import(_) => vec![],
        }
    }

    /// The first of `subjects`, if there is one.
    pub fn subject(&self) -> Option<IRI> {
        self.subjects().into_iter().next()
    }

    pub fn is_about(&self, iri: &IRI) -> bool {
        self.subjects().iter().any(|s| s == iri)
    }

    /// Returns true for axioms with a logical meaning, that is
    /// anything other than annotation assertions and imports.
    pub fn is_logical(&self) -> bool {
        !matches!(self, Axiom::AnnotationAssertion(_) | Axiom::Import(_))
    }

    /// Returns true for axioms which are about a class as a class.
    pub fn is_class_axiom(&self) -> bool {
        matches!(
            self.kind(),
            AxiomKind::SubClassOf
                | AxiomKind::EquivalentClasses
                | AxiomKind::DisjointClasses
                | AxiomKind::DisjointUnion
        )
    }
}

/// Access to the identity of an ontology.
pub trait Ontology {
    fn id(&self) -> &OntologyID;

    fn mut_id(&mut self) -> &mut OntologyID;
}

/// Add or remove axioms from an ontology without recording the
/// change.
pub trait MutableOntology {
    /// Insert an axiom into the ontology.
    ///
    /// If the ontology did not have this value present, true is returned.
    fn insert<A: Into<Axiom>>(&mut self, ax: A) -> bool;

    /// Remove an axiom from the ontology, returning it if it was present.
    fn take(&mut self, ax: &Axiom) -> Option<Axiom>;

    /// Remove an axiom from the ontology.
    ///
    /// If the ontology did have this value present, true is returned.
    fn remove(&mut self, ax: &Axiom) -> bool {
        self.take(ax).is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_iri_from_string() {
        let build = Build::new();
        let iri = build.iri("http://www.example.com");

        assert_eq!(String::from(iri), "http://www.example.com");
    }

    #[test]
    fn test_iri_creation() {
        let build = Build::new();

        let iri1 = build.iri("http://example.com".to_string());
        let iri2 = build.iri("http://example.com");

        // these are equal to each other
        assert_eq!(iri1, iri2);

        // these are the same object in memory
        assert!(Rc::ptr_eq(&iri1.0, &iri2.0));

        // iri1, iri2 and one in the cache == 3
        assert_eq!(Rc::strong_count(&iri1.0), 3);
    }

    #[test]
    fn test_iri_local_name() {
        let b = Build::new();
        assert_eq!(b.iri("http://example.com#a").local_name(), "a");
        assert_eq!(b.iri("http://example.com/b/c").local_name(), "c");
        assert_eq!(b.iri("urn:x").local_name(), "urn:x");
        assert_eq!(b.iri("http://example.com/").local_name(), "http://example.com/");
    }

    #[test]
    fn test_parse_iri() {
        let b = Build::new();
        assert!(b.parse_iri("http://example.com/a").is_ok());
        assert!(matches!(
            b.parse_iri("no scheme"),
            Err(HornedError::ParserError(_))
        ));
    }

    #[test]
    fn test_class() {
        let b = Build::new();
        let iri = b.iri("http://www.example.com");

        let c1 = b.class("http://www.example.com");
        let c2 = b.class(iri.clone());
        assert_eq!(c1, c2);
        assert_eq!(c1.iri(), &iri);
    }

    #[test]
    fn test_named_entity_conversion() {
        let b = Build::new();
        let ne: NamedEntity = b.class("http://www.example.com/c").into();
        assert_eq!(ne.kind(), NamedEntityKind::Class);

        let c = Class::try_from(ne.clone());
        assert!(c.is_ok());

        let op = ObjectProperty::try_from(ne);
        assert!(matches!(op, Err(HornedError::ValidityError(_))));
    }

    #[test]
    fn test_intersection_is_a_set() {
        let b = Build::new();
        let a: ClassExpression = b.class("http://www.example.com/a").into();
        let c: ClassExpression = b.class("http://www.example.com/c").into();

        let i1 = ClassExpression::intersection_of(vec![a.clone(), c.clone()]).unwrap();
        let i2 = ClassExpression::intersection_of(vec![c.clone(), a.clone(), c]).unwrap();
        assert_eq!(i1, i2);

        assert!(ClassExpression::intersection_of(vec![a.clone(), a]).is_err());
    }

    #[test]
    fn test_equivalent_requires_two() {
        let b = Build::new();
        let a: ClassExpression = b.class("http://www.example.com/a").into();

        assert!(matches!(
            EquivalentClasses::new(vec![a.clone(), a.clone()]),
            Err(HornedError::ValidityError(_))
        ));
        assert!(EquivalentClasses::new(vec![a.clone(), b.class("http://www.example.com/b").into()]).is_ok());
        assert!(DisjointUnion::new(b.class("http://www.example.com/u"), vec![a]).is_err());
    }

    #[test]
    fn test_subjects() {
        let b = Build::new();
        let a = b.class("http://www.example.com/a");
        let c = b.class("http://www.example.com/c");
        let r = b.object_property("http://www.example.com/r");

        let sc: Axiom = SubClassOf::new(a.clone(), c.clone()).into();
        assert_eq!(sc.subjects(), vec![a.0.clone()]);
        assert_eq!(sc.kind(), AxiomKind::SubClassOf);

        let anon: Axiom = SubClassOf::new(ClassExpression::some(r.clone(), c.clone()), a.clone()).into();
        assert_eq!(anon.subject(), None);

        let ec: Axiom = EquivalentClasses::new(vec![
            a.clone().into(),
            c.clone().into(),
            ClassExpression::some(r, a.clone()),
        ])
        .unwrap()
        .into();
        assert_eq!(ec.subjects(), vec![a.0.clone(), c.0.clone()]);
        assert!(ec.is_about(&c.0));

        let i = b.named_individual("http://www.example.com/i");
        let ca: Axiom = ClassAssertion {
            ce: a.into(),
            i: i.clone(),
        }
        .into();
        assert_eq!(ca.subject(), Some(i.0));

        let imp: Axiom = Import(b.iri("http://www.example.com/o")).into();
        assert!(imp.subjects().is_empty());
        assert!(!imp.is_logical());
    }
}
