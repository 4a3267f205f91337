//! Generate class frames from a genus-differentia pattern.
//!
//! A generated class is defined as the genus restricted by a single
//! differentia:
//!
//! ```text
//! EquivalentClasses(new, ObjectIntersectionOf(genus, ObjectSomeValuesFrom(relation, filler)))
//! ```
//!
//! with a label and a text definition built from the labels of the
//! parts.
use log::info;

use crate::error::{invalid, HornedError};
use crate::frame::Frame;
use crate::idgen::IdAllocator;
use crate::model::*;
use crate::ontology::store::AxiomStore;
use crate::query::Token;

/// Values that replace the generated ones.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenusDifferentia {
    pub label: Option<String>,
    pub definition: Option<String>,
    /// Added to every generated frame, for example a creator
    pub annotations: Vec<Annotation>,
}

/// Generates new classes and keeps the frames it has made.
#[derive(Debug, Default)]
pub struct FrameGenerator {
    allocator: IdAllocator,
    generated: Vec<Frame>,
}

impl FrameGenerator {
    pub fn new(allocator: IdAllocator) -> FrameGenerator {
        FrameGenerator {
            allocator,
            generated: vec![],
        }
    }

    /// Every frame generated so far, oldest first.
    pub fn generated(&self) -> &[Frame] {
        &self.generated
    }

    /// Make a new class which is `genus` related over `relation` to
    /// some `filler`, and add its axioms to `store`.
    ///
    /// The label defaults to "<genus> of <filler>" and the definition
    /// to "a <genus> that is <relation> a <filler>", using the label
    /// of each entity or its local name.
    pub fn generate(
        &mut self,
        store: &mut AxiomStore,
        genus: &Class,
        relation: &ObjectProperty,
        filler: &Class,
        overrides: GenusDifferentia,
    ) -> Result<&Frame, HornedError> {
        let iri = self.allocator.next(store)?;
        info!("Generating {} from {} and {}", iri, genus.0, filler.0);

        let label = overrides.label.unwrap_or_else(|| {
            store.concat_literal(&[genus.into(), Token::Text("of"), filler.into()])
        });
        let definition = overrides.definition.unwrap_or_else(|| {
            store.concat_literal(&[
                Token::Text("a"),
                genus.into(),
                Token::Text("that is"),
                relation.into(),
                Token::Text("a"),
                filler.into(),
            ])
        });
        let equivalent = ClassExpression::intersection_of(vec![
            genus.into(),
            ClassExpression::some(relation.clone(), filler),
        ])?;

        let mut frame = Frame::new(iri)
            .with_label(label)
            .with_definition(definition)
            .with_equivalent(equivalent);
        frame.annotations.extend(overrides.annotations);

        let axioms = frame.to_axioms(store.build())?;
        store.add_all(axioms)?;

        self.generated.push(frame);
        self.generated
            .last()
            .ok_or_else(|| invalid!("Generated frame missing"))
    }
}
