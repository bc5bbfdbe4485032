//! Operation registry.
//!
//! A fixed table from [`OperationId`] to a pure function over a document.
//! Lookup indexes the table by the id's slot, so it is constant time. Adding
//! an operation means one new id, one table entry and one function.

use textlab_core::Document;

use crate::{OperationId, Report, operations};

/// Pure analysis of a document.
pub type OperationFn = fn(&Document) -> Report;

/// A registry entry.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    id: OperationId,
    run: OperationFn,
}

impl Operation {
    /// Pair an id with its implementation.
    pub const fn new(id: OperationId, run: OperationFn) -> Self {
        Self { id, run }
    }

    /// Operation identifier.
    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Run the operation. Never mutates `doc`.
    pub fn run(&self, doc: &Document) -> Report {
        (self.run)(doc)
    }
}

/// Table of all operations in menu order.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    entries: [Operation; OperationId::COUNT],
}

impl OperationRegistry {
    /// Registry with the eight standard operations.
    pub const fn standard() -> Self {
        Self {
            entries: [
                Operation::new(OperationId::Tokenize, operations::tokenize),
                Operation::new(OperationId::Annotate, operations::annotate),
                Operation::new(OperationId::Lemmatize, operations::lemmatize),
                Operation::new(OperationId::SegmentSentences, operations::segment_sentences),
                Operation::new(OperationId::TagPos, operations::tag_pos),
                Operation::new(OperationId::RecognizeEntities, operations::recognize_entities),
                Operation::new(OperationId::RemoveStopwords, operations::remove_stopwords),
                Operation::new(OperationId::ParseDependencies, operations::parse_dependencies),
            ],
        }
    }

    /// Entry for `id`. `None` if the slot does not hold that id.
    pub fn get(&self, id: OperationId) -> Option<&Operation> {
        self.entries.get(id.index()).filter(|op| op.id == id)
    }

    /// Run `id` against `doc`. `None` if `id` is not registered.
    pub fn invoke(&self, id: OperationId, doc: &Document) -> Option<Report> {
        self.get(id).map(|op| op.run(doc))
    }

    /// Entries in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.entries.iter()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_all_ids_in_order() {
        let registry = OperationRegistry::standard();
        let ids: Vec<_> = registry.iter().map(Operation::id).collect();
        assert_eq!(ids, OperationId::ALL);

        for id in OperationId::ALL {
            assert_eq!(registry.get(id).map(Operation::id), Some(id));
        }
    }

    #[test]
    fn invoke_runs_the_matching_entry() {
        let registry = OperationRegistry::standard();
        let doc = Document::new("", vec![], vec![], vec![]).unwrap();

        let report = registry.invoke(OperationId::RecognizeEntities, &doc);
        assert_eq!(report.as_ref().and_then(Report::as_text), Some(operations::NO_ENTITIES));

        let report = registry.invoke(OperationId::Tokenize, &doc);
        assert_eq!(report.as_ref().and_then(Report::as_table).map(|t| t.columns().len()), Some(2));
    }
}
