//! Filter and rewrite passes over the axioms of a store.
//!
//! Both passes consider every axiom of the store other than imports,
//! in store order, and make their changes through the store so they
//! are recorded.
use log::debug;

use crate::error::HornedError;
use crate::model::*;
use crate::ontology::store::AxiomStore;

/// The outcome of a rewrite function for a single axiom.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rewrite {
    /// Leave the axiom alone
    Keep,
    /// Remove the axiom and add this one
    Replace(Axiom),
    /// Remove the axiom and add all of these
    ReplaceAll(Vec<Axiom>),
}

impl From<Axiom> for Rewrite {
    fn from(ax: Axiom) -> Rewrite {
        Rewrite::Replace(ax)
    }
}

impl From<Option<Axiom>> for Rewrite {
    fn from(ax: Option<Axiom>) -> Rewrite {
        ax.map_or(Rewrite::Keep, Rewrite::Replace)
    }
}

fn statements(store: &AxiomStore) -> Vec<Axiom> {
    store
        .iter()
        .filter(|ax| !matches!(ax, Axiom::Import(_)))
        .cloned()
        .collect()
}

/// Return the axioms for which `predicate` is true, or false if
/// `negate`.
///
/// If `apply`, the store is cut down to the returned axioms: every
/// axiom considered is removed and the returned axioms are then
/// added back.
pub fn filter<P>(store: &mut AxiomStore, mut predicate: P, negate: bool, apply: bool) -> Vec<Axiom>
where
    P: FnMut(&Axiom) -> bool,
{
    let all = statements(store);
    let matched: Vec<Axiom> = all
        .iter()
        .filter(|ax| predicate(ax) != negate)
        .cloned()
        .collect();

    if apply {
        debug!("filter keeps {} of {} axioms", matched.len(), all.len());
        store.remove_all(all);
        for ax in matched.iter() {
            // These were in the store already, so they are valid
            store.record_add(ax.clone());
        }
    }
    matched
}

/// Pass every axiom to `f`, replacing those for which it does not
/// return `Rewrite::Keep`.
///
/// All replaced axioms are removed first, then all replacements are
/// added; so an axiom that is replaced by itself stays in the store.
/// Every replacement is validated before the store is changed.
///
/// Returns the replacements, in the order they were added.
pub fn rewrite<F>(store: &mut AxiomStore, mut f: F) -> Result<Vec<Axiom>, HornedError>
where
    F: FnMut(&Axiom) -> Rewrite,
{
    let mut removals = vec![];
    let mut additions = vec![];

    for ax in statements(store) {
        match f(&ax) {
            Rewrite::Keep => {}
            Rewrite::ReplaceAll(news) if news.is_empty() => {}
            Rewrite::Replace(new) => {
                additions.push(new);
                removals.push(ax);
            }
            Rewrite::ReplaceAll(news) => {
                additions.extend(news);
                removals.push(ax);
            }
        }
    }

    for ax in additions.iter() {
        store.validate(ax)?;
    }

    debug!(
        "rewrite replaces {} axioms with {}",
        removals.len(),
        additions.len()
    );
    store.remove_all(removals);
    for ax in additions.iter() {
        store.record_add(ax.clone());
    }
    Ok(additions)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ontology::store::Change;
    use pretty_assertions::assert_eq;

    fn abc(b: &Build) -> (Class, Class, Class) {
        (
            b.class("http://www.example.com/a"),
            b.class("http://www.example.com/b"),
            b.class("http://www.example.com/c"),
        )
    }

    #[test]
    fn test_filter() {
        let b = Build::new();
        let (a, bb, c) = abc(&b);
        let mut store = AxiomStore::new_with_build(b.clone());
        let sc: Axiom = SubClassOf::new(bb.clone(), a.clone()).into();
        let dc: Axiom = DisjointClasses::new(vec![a.into(), c.into()]).unwrap().into();
        store.add_all(vec![sc.clone(), dc.clone()]).unwrap();

        let is_sub = |ax: &Axiom| matches!(ax, Axiom::SubClassOf(_));
        assert_eq!(filter(&mut store, is_sub, false, false), vec![sc.clone()]);
        assert_eq!(filter(&mut store, is_sub, true, false), vec![dc.clone()]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_filter_apply() {
        let b = Build::new();
        let (a, bb, c) = abc(&b);
        let mut store = AxiomStore::new_with_build(b.clone());
        let sc: Axiom = SubClassOf::new(bb.clone(), a.clone()).into();
        let dc: Axiom = DisjointClasses::new(vec![a.into(), c.into()]).unwrap().into();
        let imp: Axiom = Import(b.iri("http://www.example.com/other")).into();
        store.add_all(vec![sc.clone(), imp.clone(), dc.clone()]).unwrap();

        let kept = filter(&mut store, |ax| matches!(ax, Axiom::SubClassOf(_)), false, true);
        assert_eq!(kept, vec![sc.clone()]);

        assert!(store.contains(&sc));
        assert!(store.contains(&imp));
        assert!(!store.contains(&dc));

        // Every statement is removed before the matches are added back
        assert_eq!(
            &store.changes()[3..],
            &[
                Change::Remove(sc.clone()),
                Change::Remove(dc),
                Change::Add(sc)
            ]
        );
    }

    #[test]
    fn test_rewrite_inverts_sub_class() {
        let b = Build::new();
        let (a, bb, _) = abc(&b);
        let mut store = AxiomStore::new_with_build(b.clone());
        store.add(SubClassOf::new(bb.clone(), a.clone())).unwrap();

        let added = rewrite(&mut store, |ax| match ax {
            Axiom::SubClassOf(sc) => {
                Rewrite::Replace(SubClassOf::new(sc.sup.clone(), sc.sub.clone()).into())
            }
            _ => Rewrite::Keep,
        })
        .unwrap();

        let inverted: Axiom = SubClassOf::new(a, bb).into();
        assert_eq!(added, vec![inverted.clone()]);
        assert_eq!(store.iter().cloned().collect::<Vec<_>>(), vec![inverted]);
    }

    #[test]
    fn test_rewrite_identity_and_split() {
        let b = Build::new();
        let (a, bb, c) = abc(&b);
        let mut store = AxiomStore::new_with_build(b.clone());
        let sc: Axiom = SubClassOf::new(bb.clone(), a.clone()).into();
        let ec: Axiom = EquivalentClasses::new(vec![a.clone().into(), c.clone().into()])
            .unwrap()
            .into();
        store.add_all(vec![sc.clone(), ec.clone()]).unwrap();

        let added = rewrite(&mut store, |ax| match ax {
            Axiom::SubClassOf(_) => Rewrite::Replace(ax.clone()),
            Axiom::EquivalentClasses(_) => Rewrite::ReplaceAll(vec![
                SubClassOf::new(a.clone(), c.clone()).into(),
                SubClassOf::new(c.clone(), a.clone()).into(),
            ]),
            _ => Rewrite::Keep,
        })
        .unwrap();

        assert_eq!(added.len(), 3);
        assert!(store.contains(&sc));
        assert!(!store.contains(&ec));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_rewrite_empty_is_no_change() {
        let b = Build::new();
        let (a, bb, _) = abc(&b);
        let mut store = AxiomStore::new_with_build(b.clone());
        let sc: Axiom = SubClassOf::new(bb, a).into();
        store.add(sc.clone()).unwrap();

        let added = rewrite(&mut store, |_| Rewrite::ReplaceAll(vec![])).unwrap();
        assert!(added.is_empty());
        assert!(store.contains(&sc));
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn test_rewrite_invalid_leaves_store() {
        let b = Build::new();
        let (a, bb, _) = abc(&b);
        let mut store = AxiomStore::new_with_build(b.clone());
        store.set_ontology_iri(b.iri("http://www.example.com/o"));
        store.add(SubClassOf::new(bb, a)).unwrap();

        let self_import: Axiom = Import(b.iri("http://www.example.com/o")).into();
        let r = rewrite(&mut store, |_| Rewrite::Replace(self_import.clone()));
        assert!(r.is_err());
        assert_eq!(store.generation(), 1);
        assert_eq!(store.len(), 1);
    }
}
