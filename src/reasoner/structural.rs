//! A reasoner that works over told axioms.
//!
//! The `StructuralReasoner` computes, for every named class, the set
//! of named classes it is a sub-class of. It follows told
//! `SubClassOf`, `EquivalentClasses` and `DisjointUnion` axioms,
//! splits told intersections into their conjuncts, and recognises a
//! class as falling under an anonymous definition (such as
//! `EquivalentClasses(T, ObjectSomeValuesFrom(P, C))`) when its told
//! restrictions imply that definition.
//!
//! Restrictions are compared structurally, with fillers compared
//! through the named hierarchy. There is no support for property
//! hierarchies, inverses or disjointness, so this is not a complete
//! reasoner.
use std::collections::{BTreeSet, HashMap};

use log::debug;

use super::{Reasoner, ReasonerFactory};
use crate::error::HornedError;
use crate::model::*;
use crate::visitor::entity::SignatureExtract;
use crate::visitor::Walk;

#[derive(Debug, Default)]
pub struct StructuralReasoner {
    // Told super-class expressions of each named class, with
    // intersections split
    told: HashMap<Class, Vec<ClassExpression>>,
    // Anonymous sub-class expressions and their named super-class
    gcis: Vec<(ClassExpression, Class)>,
    // Named super-classes of each class, including itself
    supers: HashMap<Class, BTreeSet<Class>>,
}

fn named_conjuncts(ce: &ClassExpression) -> Vec<&Class> {
    match ce {
        ClassExpression::Class(c) => vec![c],
        ClassExpression::ObjectIntersectionOf(ops) => {
            ops.iter().flat_map(named_conjuncts).collect()
        }
        _ => vec![],
    }
}

impl StructuralReasoner {
    pub fn new(axioms: &[&Axiom]) -> StructuralReasoner {
        let mut r = StructuralReasoner::default();
        for ax in axioms {
            match ax {
                Axiom::SubClassOf(sc) => r.sub_class_of(&sc.sub, &sc.sup),
                Axiom::EquivalentClasses(ec) => {
                    for x in ec.operands() {
                        for y in ec.operands() {
                            if x != y {
                                r.sub_class_of(x, y);
                            }
                        }
                    }
                }
                Axiom::DisjointUnion(du) => {
                    let c = ClassExpression::Class(du.class().clone());
                    for op in du.operands() {
                        r.sub_class_of(op, &c);
                    }
                }
                _ => {}
            }
        }

        let mut walk = Walk::new(SignatureExtract::default());
        walk.axioms(axioms.iter().copied());
        for c in walk.into_visit().classes {
            let mut s = BTreeSet::new();
            s.insert(c.clone());
            r.supers.insert(c, s);
        }

        r.classify();
        r
    }

    fn told_super(&mut self, c: &Class, sup: &ClassExpression) {
        match sup {
            ClassExpression::ObjectIntersectionOf(ops) => {
                for op in ops {
                    self.told_super(c, op);
                }
            }
            _ => self.told.entry(c.clone()).or_default().push(sup.clone()),
        }
    }

    fn sub_class_of(&mut self, sub: &ClassExpression, sup: &ClassExpression) {
        match sub {
            ClassExpression::Class(c) => self.told_super(c, sup),
            _ => {
                for d in named_conjuncts(sup) {
                    self.gcis.push((sub.clone(), d.clone()));
                }
            }
        }
    }

    fn classify(&mut self) {
        let mut rounds = 0;
        loop {
            rounds += 1;
            let updates: Vec<(Class, BTreeSet<Class>)> = self
                .supers
                .iter()
                .filter_map(|(c, current)| {
                    let next = self.step(c, current);
                    if next.len() != current.len() {
                        Some((c.clone(), next))
                    } else {
                        None
                    }
                })
                .collect();

            if updates.is_empty() {
                break;
            }
            for (c, s) in updates {
                self.supers.insert(c, s);
            }
        }
        debug!("classified {} classes in {} rounds", self.supers.len(), rounds);
    }

    fn step(&self, c: &Class, current: &BTreeSet<Class>) -> BTreeSet<Class> {
        let mut next = current.clone();
        for s in current {
            for t in self.told_of(s) {
                if let ClassExpression::Class(d) = t {
                    next.insert(d.clone());
                    if let Some(ds) = self.supers.get(d) {
                        next.extend(ds.iter().cloned());
                    }
                }
            }
        }
        for (lhs, d) in self.gcis.iter() {
            if !next.contains(d) && self.entails(c, lhs) {
                next.insert(d.clone());
            }
        }
        next
    }

    fn told_of(&self, c: &Class) -> impl Iterator<Item = &ClassExpression> {
        self.told.get(c).into_iter().flat_map(|v| v.iter())
    }

    fn is_sub(&self, c: &Class, d: &Class) -> bool {
        c == d || self.supers.get(c).map_or(false, |s| s.contains(d))
    }

    fn existentials<'a>(&'a self, c: &'a Class) -> Vec<(&'a ObjectProperty, &'a ClassExpression)> {
        let mut v = vec![];
        let own = std::iter::once(c);
        let named = self.supers.get(c).into_iter().flat_map(|s| s.iter());
        for s in own.chain(named) {
            for t in self.told_of(s) {
                if let ClassExpression::ObjectSomeValuesFrom { ope, bce } = t {
                    v.push((ope, &**bce));
                }
            }
        }
        v
    }

    /// Does every instance of `c` fall under `ce`?
    fn entails(&self, c: &Class, ce: &ClassExpression) -> bool {
        match ce {
            ClassExpression::Class(d) => self.is_sub(c, d),
            ClassExpression::ObjectSomeValuesFrom { ope, bce } => self
                .existentials(c)
                .into_iter()
                .any(|(p, f)| p == ope && self.expr_entails(f, bce)),
            ClassExpression::ObjectIntersectionOf(ops) => ops.iter().all(|o| self.entails(c, o)),
            ClassExpression::ObjectUnionOf(ops) => ops.iter().any(|o| self.entails(c, o)),
        }
    }

    /// Does every instance of `x` fall under `y`?
    fn expr_entails(&self, x: &ClassExpression, y: &ClassExpression) -> bool {
        if x == y {
            return true;
        }

        match (x, y) {
            (ClassExpression::Class(c), _) => self.entails(c, y),
            (_, ClassExpression::ObjectIntersectionOf(yops)) => {
                yops.iter().all(|o| self.expr_entails(x, o))
            }
            (_, ClassExpression::ObjectUnionOf(yops))
                if yops.iter().any(|o| self.expr_entails(x, o)) =>
            {
                true
            }
            (ClassExpression::ObjectIntersectionOf(xops), _) => {
                xops.iter().any(|o| self.expr_entails(o, y))
            }
            (ClassExpression::ObjectUnionOf(xops), _) => {
                xops.iter().all(|o| self.expr_entails(o, y))
            }
            (
                ClassExpression::ObjectSomeValuesFrom { ope: xp, bce: xb },
                ClassExpression::ObjectSomeValuesFrom { ope: yp, bce: yb },
            ) => xp == yp && self.expr_entails(xb, yb),
            _ => false,
        }
    }

    fn strict_supers(&self, c: &Class) -> BTreeSet<Class> {
        let equivalent = self.equivalents(c);
        self.supers
            .get(c)
            .into_iter()
            .flat_map(|s| s.iter())
            .filter(|d| *d != c && !equivalent.contains(*d))
            .cloned()
            .collect()
    }

    fn equivalents(&self, c: &Class) -> BTreeSet<Class> {
        self.supers
            .get(c)
            .into_iter()
            .flat_map(|s| s.iter())
            .filter(|d| *d != c && self.is_sub(d, c))
            .cloned()
            .collect()
    }
}

impl Reasoner for StructuralReasoner {
    fn super_classes(&self, c: &Class, direct: bool) -> Result<BTreeSet<Class>, HornedError> {
        let strict = self.strict_supers(c);
        if !direct {
            return Ok(strict);
        }

        // Keep those with nothing strictly between them and c
        Ok(strict
            .iter()
            .filter(|d| {
                !strict
                    .iter()
                    .any(|e| e != *d && self.is_sub(e, d) && !self.is_sub(d, e))
            })
            .cloned()
            .collect())
    }

    fn equivalent_classes(&self, c: &Class) -> Result<BTreeSet<Class>, HornedError> {
        Ok(self.equivalents(c))
    }
}

#[derive(Debug, Default)]
pub struct StructuralReasonerFactory;

impl ReasonerFactory for StructuralReasonerFactory {
    type Reasoner = StructuralReasoner;

    fn create(&self, axioms: &[&Axiom]) -> Result<StructuralReasoner, HornedError> {
        Ok(StructuralReasoner::new(axioms))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(cs: &[&Class]) -> BTreeSet<Class> {
        cs.iter().map(|c| (*c).clone()).collect()
    }

    fn reason(axioms: &[Axiom]) -> StructuralReasoner {
        let refs: Vec<&Axiom> = axioms.iter().collect();
        StructuralReasonerFactory.create(&refs).unwrap()
    }

    #[test]
    fn test_told_hierarchy() {
        let b = Build::new();
        let a = b.class("http://www.example.com/a");
        let c = b.class("http://www.example.com/c");
        let d = b.class("http://www.example.com/d");

        let r = reason(&[
            SubClassOf::new(d.clone(), c.clone()).into(),
            SubClassOf::new(c.clone(), a.clone()).into(),
        ]);

        assert_eq!(r.super_classes(&d, false).unwrap(), set(&[&a, &c]));
        assert_eq!(r.super_classes(&d, true).unwrap(), set(&[&c]));
        assert!(r.super_classes(&a, false).unwrap().is_empty());
    }

    #[test]
    fn test_equivalent_named() {
        let b = Build::new();
        let a = b.class("http://www.example.com/a");
        let c = b.class("http://www.example.com/c");
        let d = b.class("http://www.example.com/d");

        let r = reason(&[
            EquivalentClasses::new(vec![a.clone().into(), c.clone().into()])
                .unwrap()
                .into(),
            SubClassOf::new(c.clone(), d.clone()).into(),
        ]);

        assert_eq!(r.equivalent_classes(&a).unwrap(), set(&[&c]));
        assert_eq!(r.super_classes(&a, false).unwrap(), set(&[&d]));
        assert_eq!(r.super_classes(&a, true).unwrap(), set(&[&d]));
    }

    #[test]
    fn test_existential_definition() {
        let b = Build::new();
        let nucleus = b.class("http://www.example.com/nucleus");
        let organelle = b.class("http://www.example.com/organelle");
        let cell = b.class("http://www.example.com/cell");
        let has_part = b.object_property("http://www.example.com/has_part");
        let t = b.class("http://www.example.com/has-organelle");

        let r = reason(&[
            SubClassOf::new(nucleus.clone(), organelle.clone()).into(),
            SubClassOf::new(
                cell.clone(),
                ClassExpression::some(has_part.clone(), nucleus.clone()),
            )
            .into(),
            EquivalentClasses::new(vec![
                t.clone().into(),
                ClassExpression::some(has_part, organelle),
            ])
            .unwrap()
            .into(),
        ]);

        assert_eq!(r.super_classes(&cell, false).unwrap(), set(&[&t]));
    }

    #[test]
    fn test_intersection_definition() {
        let b = Build::new();
        let a = b.class("http://www.example.com/a");
        let c = b.class("http://www.example.com/c");
        let x = b.class("http://www.example.com/x");
        let ac = b.class("http://www.example.com/ac");

        let r = reason(&[
            SubClassOf::new(x.clone(), a.clone()).into(),
            SubClassOf::new(x.clone(), c.clone()).into(),
            EquivalentClasses::new(vec![
                ac.clone().into(),
                ClassExpression::intersection_of(vec![a.clone().into(), c.clone().into()]).unwrap(),
            ])
            .unwrap()
            .into(),
        ]);

        assert_eq!(r.super_classes(&x, false).unwrap(), set(&[&a, &ac, &c]));
        assert_eq!(r.super_classes(&x, true).unwrap(), set(&[&ac]));
        assert_eq!(r.super_classes(&ac, false).unwrap(), set(&[&a, &c]));
    }

    #[test]
    fn test_disjoint_union() {
        let b = Build::new();
        let u = b.class("http://www.example.com/u");
        let a = b.class("http://www.example.com/a");
        let c = b.class("http://www.example.com/c");

        let r = reason(&[DisjointUnion::new(u.clone(), vec![a.clone().into(), c.into()])
            .unwrap()
            .into()]);

        assert_eq!(r.super_classes(&a, false).unwrap(), set(&[&u]));
    }
}
