//! Processed document model.
//!
//! A [`Document`] is the fixed-shape outcome of running one piece of text
//! through a model gateway: ordered tokens with their annotations, sentence
//! spans and named-entity spans. Documents are validated once on construction
//! and never mutated afterwards; a new analysis produces a new Document.
//!
//! Spans are half-open token ranges `[start, end)`. Token heads are indices
//! into the same token sequence, with a sentence root pointing at itself.

use serde::{Deserialize, Serialize};

use crate::DocumentError;

/// A single token with its linguistic annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Verbatim token text.
    pub text: String,
    /// Coarse part-of-speech tag (e.g. `NOUN`).
    pub pos: String,
    /// Fine-grained tag (e.g. `NN`).
    pub tag: String,
    /// Human-readable gloss of [`Token::tag`], when the engine provides one.
    #[serde(default)]
    pub tag_explanation: Option<String>,
    /// Base form of the token.
    pub lemma: String,
    /// Dependency relation to the head token.
    pub dep: String,
    /// Index of the syntactic head token.
    pub head: usize,
    /// Entity type this token belongs to, if any.
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Token is a stop word.
    #[serde(default)]
    pub is_stop: bool,
}

/// A sentence span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Full sentence text.
    pub text: String,
    /// First token index.
    pub start: usize,
    /// One past the last token index.
    pub end: usize,
}

/// A named-entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity surface text.
    pub text: String,
    /// Entity label (e.g. `ORG`).
    pub label: String,
    /// Human-readable gloss of [`Entity::label`], when the engine provides one.
    #[serde(default)]
    pub label_explanation: Option<String>,
    /// First token index.
    pub start: usize,
    /// One past the last token index.
    pub end: usize,
}

/// Immutable result of processing one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentParts", into = "DocumentParts")]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
    entities: Vec<Entity>,
}

/// Unvalidated wire shape of a [`Document`].
#[derive(Serialize, Deserialize)]
struct DocumentParts {
    text: String,
    tokens: Vec<Token>,
    #[serde(default, alias = "sents")]
    sentences: Vec<Sentence>,
    #[serde(default, alias = "ents")]
    entities: Vec<Entity>,
}

impl Document {
    /// Build a document, validating head indices and spans.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if a token head or a sentence/entity span
    /// points outside the token sequence.
    pub fn new(
        text: impl Into<String>,
        tokens: Vec<Token>,
        sentences: Vec<Sentence>,
        entities: Vec<Entity>,
    ) -> Result<Self, DocumentError> {
        let len = tokens.len();

        for (index, token) in tokens.iter().enumerate() {
            if token.head >= len {
                return Err(DocumentError::HeadOutOfRange { index, head: token.head, len });
            }
        }

        for (index, sentence) in sentences.iter().enumerate() {
            if sentence.start > sentence.end || sentence.end > len {
                return Err(DocumentError::SentenceSpan {
                    index,
                    start: sentence.start,
                    end: sentence.end,
                    len,
                });
            }
        }

        for (index, entity) in entities.iter().enumerate() {
            if entity.start >= entity.end || entity.end > len {
                return Err(DocumentError::EntitySpan {
                    index,
                    start: entity.start,
                    end: entity.end,
                    len,
                });
            }
        }

        Ok(Self { text: text.into(), tokens, sentences, entities })
    }

    /// The processed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tokens in document order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Sentences in document order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Named entities in document order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Syntactic head of the token at `index`. `None` if `index` is out of
    /// range.
    pub fn head_of(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index).and_then(|token| self.tokens.get(token.head))
    }
}

impl TryFrom<DocumentParts> for Document {
    type Error = DocumentError;

    fn try_from(parts: DocumentParts) -> Result<Self, Self::Error> {
        Self::new(parts.text, parts.tokens, parts.sentences, parts.entities)
    }
}

impl From<Document> for DocumentParts {
    fn from(document: Document) -> Self {
        Self {
            text: document.text,
            tokens: document.tokens,
            sentences: document.sentences,
            entities: document.entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, head: usize) -> Token {
        Token {
            text: text.into(),
            pos: "X".into(),
            tag: "XX".into(),
            tag_explanation: None,
            lemma: text.to_lowercase(),
            dep: "dep".into(),
            head,
            entity_type: None,
            is_stop: false,
        }
    }

    #[test]
    fn head_of_follows_head_index() {
        let doc = Document::new(
            "big dog",
            vec![token("big", 1), token("dog", 1)],
            vec![Sentence { text: "big dog".into(), start: 0, end: 2 }],
            vec![],
        )
        .unwrap();

        assert_eq!(doc.head_of(0).map(|t| t.text.as_str()), Some("dog"));
        assert_eq!(doc.head_of(1).map(|t| t.text.as_str()), Some("dog"));
        assert!(doc.head_of(2).is_none());
    }

    #[test]
    fn rejects_head_out_of_range() {
        let result = Document::new("a", vec![token("a", 3)], vec![], vec![]);
        assert_eq!(result, Err(DocumentError::HeadOutOfRange { index: 0, head: 3, len: 1 }));
    }

    #[test]
    fn rejects_sentence_past_end() {
        let result = Document::new(
            "a",
            vec![token("a", 0)],
            vec![Sentence { text: "a".into(), start: 0, end: 2 }],
            vec![],
        );
        assert!(matches!(result, Err(DocumentError::SentenceSpan { index: 0, .. })));
    }

    #[test]
    fn rejects_empty_entity_span() {
        let result = Document::new(
            "a",
            vec![token("a", 0)],
            vec![],
            vec![Entity {
                text: String::new(),
                label: "ORG".into(),
                label_explanation: None,
                start: 0,
                end: 0,
            }],
        );
        assert!(matches!(result, Err(DocumentError::EntitySpan { index: 0, .. })));
    }

    #[test]
    fn empty_document_is_valid() {
        let doc = Document::new("", vec![], vec![], vec![]).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }
}
