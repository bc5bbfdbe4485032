//! Operation identifiers.
//!
//! The closed set of analyses a user can request. Declaration order is the
//! menu order and the registry index; it has no effect on behavior.

use std::{fmt, str::FromStr};

use crate::UnknownOperation;

/// One of the eight analyses over a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationId {
    /// Token list with 1-based indices.
    Tokenize,
    /// Per-token POS, lemma, dependency and entity type.
    Annotate,
    /// Token to lemma.
    Lemmatize,
    /// Sentence list with 1-based indices.
    SegmentSentences,
    /// Coarse and fine tags with tag glosses.
    TagPos,
    /// Named entities with label glosses.
    RecognizeEntities,
    /// Text with stop words removed, plus counts.
    RemoveStopwords,
    /// Dependency relation and head per token.
    ParseDependencies,
}

impl OperationId {
    /// Number of operations.
    pub const COUNT: usize = 8;

    /// All operations in menu order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Tokenize,
        Self::Annotate,
        Self::Lemmatize,
        Self::SegmentSentences,
        Self::TagPos,
        Self::RecognizeEntities,
        Self::RemoveStopwords,
        Self::ParseDependencies,
    ];

    /// Registry slot.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1-based menu number.
    pub const fn menu_number(self) -> u8 {
        self as u8 + 1
    }

    /// Operation for a 1-based menu number.
    pub fn from_menu_number(number: u8) -> Option<Self> {
        let index = usize::from(number).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Canonical machine name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tokenize => "tokenize",
            Self::Annotate => "annotate",
            Self::Lemmatize => "lemmatize",
            Self::SegmentSentences => "sentences",
            Self::TagPos => "pos",
            Self::RecognizeEntities => "ner",
            Self::RemoveStopwords => "stopwords",
            Self::ParseDependencies => "dependencies",
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tokenize => "Tokenization",
            Self::Annotate => "Linguistic annotation",
            Self::Lemmatize => "Lemmatization",
            Self::SegmentSentences => "Sentence detection",
            Self::TagPos => "POS tagging",
            Self::RecognizeEntities => "Named Entity Recognition (NER)",
            Self::RemoveStopwords => "Stop words removal",
            Self::ParseDependencies => "Dependency parsing",
        }
    }

    /// Heading shown above the report.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Tokenize => "Printing all tokens",
            Self::Annotate => "Printing linguistic annotations",
            Self::Lemmatize => "Printing lemmatization of all tokens",
            Self::SegmentSentences => "Detecting sentences in the given text",
            Self::TagPos => "Printing POS, tag and explanation of all tokens",
            Self::RecognizeEntities => "Printing named entities",
            Self::RemoveStopwords => "Removing stop words from the given text",
            Self::ParseDependencies => "Dependency relationships",
        }
    }

    /// Extra names accepted by [`FromStr`].
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Tokenize => &["tokens", "tokenization", "tokenise"],
            Self::Annotate => &["annotation", "annotations", "linguistic"],
            Self::Lemmatize => &["lemmas", "lemmatization", "lemma"],
            Self::SegmentSentences => &["sentence", "sents", "segment"],
            Self::TagPos => &["tags", "tagging", "postag"],
            Self::RecognizeEntities => &["entities", "ents", "entity"],
            Self::RemoveStopwords => &["stop", "stopword", "stop-words"],
            Self::ParseDependencies => &["deps", "dependency", "parse"],
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationId {
    type Err = UnknownOperation;

    /// Accepts a menu number (`1`..`8`), the canonical name or an alias,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();

        if let Ok(number) = needle.parse::<u8>() {
            return Self::from_menu_number(number).ok_or_else(|| UnknownOperation(s.to_owned()));
        }

        Self::ALL
            .into_iter()
            .find(|op| op.name() == needle || op.aliases().contains(&needle.as_str()))
            .ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}
