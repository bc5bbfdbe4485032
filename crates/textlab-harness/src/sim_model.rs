//! Rule-based stand-in for the language engine.
//!
//! [`analyze`] turns text into a [`Document`] with a handful of deterministic
//! rules. The output is not meant to be linguistically accurate, only stable
//! and shaped like real engine output: every token has a head inside its
//! sentence, sentence roots point at themselves, and entity spans are
//! non-empty.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use textlab_core::{Document, DocumentError, Entity, ModelHandle, ProcessError, Sentence, Token};

/// Name reported by [`SimModel`].
pub const SIM_MODEL_NAME: &str = "sim_rules";

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has", "have",
    "he", "her", "his", "i", "in", "is", "it", "its", "me", "my", "not", "of", "on", "or", "our",
    "over", "she", "so", "that", "the", "their", "them", "they", "this", "to", "was", "we", "were",
    "will", "with", "you", "your",
];

const DETERMINERS: &[&str] = &["a", "an", "every", "some", "that", "the", "these", "this", "those"];
const ADPOSITIONS: &[&str] =
    &["about", "at", "by", "for", "from", "in", "into", "of", "on", "over", "to", "under", "with"];
const PRONOUNS: &[&str] =
    &["he", "her", "him", "i", "it", "me", "she", "them", "they", "us", "we", "you"];
const AUXILIARIES: &[&str] =
    &["am", "are", "be", "been", "can", "had", "has", "have", "is", "was", "were", "will"];
const CONJUNCTIONS: &[&str] = &["and", "but", "or"];
const ADJECTIVES: &[&str] = &["big", "brown", "good", "great", "lazy", "new", "old", "quick", "small"];

const GAZETTEER: &[(&str, &str)] = &[
    ("Alice", "PERSON"),
    ("Apple", "ORG"),
    ("Berlin", "GPE"),
    ("Bob", "PERSON"),
    ("Google", "ORG"),
    ("London", "GPE"),
    ("Microsoft", "ORG"),
    ("Paris", "GPE"),
];

/// Deterministic model handle.
///
/// Clones share the call budget set by [`SimModel::disconnecting_after`].
#[derive(Debug, Clone, Default)]
pub struct SimModel {
    fail_on: Option<String>,
    calls_left: Option<Arc<AtomicUsize>>,
}

impl SimModel {
    /// Model that processes every text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Model that rejects any text containing `needle`.
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self { fail_on: Some(needle.into()), calls_left: None }
    }

    /// Process `calls` texts, then report a lost engine connection on every
    /// later call.
    #[must_use]
    pub fn disconnecting_after(mut self, calls: usize) -> Self {
        self.calls_left = Some(Arc::new(AtomicUsize::new(calls)));
        self
    }
}

impl ModelHandle for SimModel {
    fn name(&self) -> &str {
        SIM_MODEL_NAME
    }

    fn process(&self, text: &str) -> Result<Document, ProcessError> {
        if let Some(left) = &self.calls_left
            && left.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_err()
        {
            return Err(ProcessError::Disconnected { reason: "engine worker exited".to_owned() });
        }
        if let Some(needle) = &self.fail_on
            && text.contains(needle.as_str())
        {
            return Err(ProcessError::Rejected { reason: format!("injected failure on '{needle}'") });
        }
        analyze(text).map_err(ProcessError::from)
    }
}

/// Token with its byte range in the source text.
struct Piece<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

/// Analyze `text` with the simulation rules.
///
/// # Errors
///
/// Never fails for rule output; the `Result` carries document validation.
pub fn analyze(text: &str) -> Result<Document, DocumentError> {
    let pieces = split(text);
    let tagged = {
        let mut out: Vec<(&'static str, &'static str)> = Vec::with_capacity(pieces.len());
        let mut sentence_initial = true;
        for piece in &pieces {
            let prev = out.last().map(|&(pos, _)| pos);
            out.push(tag(piece.text, prev, sentence_initial));
            sentence_initial = is_sentence_closer(piece.text);
        }
        out
    };

    let mut tokens: Vec<Token> = pieces
        .iter()
        .zip(&tagged)
        .enumerate()
        .map(|(index, (piece, &(pos, tag)))| {
            let lower = piece.text.to_lowercase();
            Token {
                text: piece.text.to_owned(),
                pos: pos.to_owned(),
                tag: tag.to_owned(),
                tag_explanation: tag_gloss(tag).map(str::to_owned),
                lemma: lemmatize(piece.text, &lower, pos),
                dep: "dep".to_owned(),
                head: index,
                entity_type: None,
                is_stop: STOP_WORDS.contains(&lower.as_str()),
            }
        })
        .collect();

    let sentences = segment(text, &pieces);
    for sentence in &sentences {
        parse(&mut tokens, sentence.start, sentence.end);
    }
    let entities = recognize(text, &pieces, &mut tokens);

    Document::new(text, tokens, sentences, entities)
}

fn is_split_punct(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '"' | '(' | ')' | '\'')
}

fn is_punct(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_split_punct)
}

fn is_sentence_closer(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| matches!(c, '.' | '!' | '?'))
}

/// Split on whitespace, then peel punctuation off both ends of each word.
fn split(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut offset = 0;

    for word in text.split_whitespace() {
        let Some(found) = text[offset..].find(word) else { continue };
        let mut start = offset + found;
        let mut end = start + word.len();
        offset = end;

        while let Some(c) = text[start..end].chars().next() {
            if !is_split_punct(c) {
                break;
            }
            let next = start + c.len_utf8();
            pieces.push(Piece { text: &text[start..next], start, end: next });
            start = next;
        }

        let mut trailing = Vec::new();
        while let Some(c) = text[start..end].chars().next_back() {
            if !is_split_punct(c) {
                break;
            }
            let prev = end - c.len_utf8();
            trailing.push(Piece { text: &text[prev..end], start: prev, end });
            end = prev;
        }

        if start < end {
            pieces.push(Piece { text: &text[start..end], start, end });
        }
        pieces.extend(trailing.into_iter().rev());
    }

    pieces
}

fn tag(word: &str, prev: Option<&str>, sentence_initial: bool) -> (&'static str, &'static str) {
    let lower = word.to_lowercase();
    let lower = lower.as_str();
    let capitalized = word.chars().next().is_some_and(char::is_uppercase);
    let plural = lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss");

    if is_punct(word) {
        let tag = match word.chars().next() {
            Some('.' | '!' | '?') => ".",
            Some(',') => ",",
            Some(';' | ':') => ":",
            Some('(') => "-LRB-",
            Some(')') => "-RRB-",
            _ => "''",
        };
        ("PUNCT", tag)
    } else if word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        ("NUM", "CD")
    } else if DETERMINERS.contains(&lower) {
        ("DET", "DT")
    } else if ADPOSITIONS.contains(&lower) {
        ("ADP", "IN")
    } else if PRONOUNS.contains(&lower) {
        ("PRON", "PRP")
    } else if AUXILIARIES.contains(&lower) {
        let tag = match lower {
            "is" | "has" => "VBZ",
            "was" | "were" | "had" => "VBD",
            "will" | "can" => "MD",
            "been" => "VBN",
            "be" => "VB",
            _ => "VBP",
        };
        ("AUX", tag)
    } else if CONJUNCTIONS.contains(&lower) {
        ("CCONJ", "CC")
    } else if ADJECTIVES.contains(&lower) {
        ("ADJ", "JJ")
    } else if gazetteer_label(word).is_some() || (capitalized && !sentence_initial) {
        ("PROPN", "NNP")
    } else if lower.len() > 3 && lower.ends_with("ly") {
        ("ADV", "RB")
    } else if lower.len() > 4 && lower.ends_with("ing") {
        ("VERB", "VBG")
    } else if lower.len() > 3 && lower.ends_with("ed") {
        ("VERB", "VBD")
    } else if plural && matches!(prev, Some("NOUN" | "PROPN" | "PRON")) {
        ("VERB", "VBZ")
    } else if plural {
        ("NOUN", "NNS")
    } else {
        ("NOUN", "NN")
    }
}

fn tag_gloss(tag: &str) -> Option<&'static str> {
    let gloss = match tag {
        "." => "punctuation mark, sentence closer",
        "," => "punctuation mark, comma",
        ":" => "punctuation mark, colon or ellipsis",
        "-LRB-" => "left round bracket",
        "-RRB-" => "right round bracket",
        "''" => "closing quotation mark",
        "CC" => "conjunction, coordinating",
        "CD" => "cardinal number",
        "DT" => "determiner",
        "IN" => "conjunction, subordinating or preposition",
        "JJ" => "adjective",
        "MD" => "verb, modal auxiliary",
        "NN" => "noun, singular or mass",
        "NNS" => "noun, plural",
        "NNP" => "noun, proper singular",
        "PRP" => "pronoun, personal",
        "RB" => "adverb",
        "VB" => "verb, base form",
        "VBD" => "verb, past tense",
        "VBG" => "verb, gerund or present participle",
        "VBN" => "verb, past participle",
        "VBP" => "verb, non-3rd person singular present",
        "VBZ" => "verb, 3rd person singular present",
        _ => return None,
    };
    Some(gloss)
}

fn lemmatize(word: &str, lower: &str, pos: &str) -> String {
    match pos {
        "PUNCT" | "NUM" | "PROPN" => word.to_owned(),
        "AUX" => match lower {
            "am" | "are" | "be" | "been" | "is" | "was" | "were" => "be".to_owned(),
            "had" | "has" | "have" => "have".to_owned(),
            other => other.to_owned(),
        },
        "VERB" => {
            for suffix in ["ing", "ed"] {
                if let Some(stem) = lower.strip_suffix(suffix) {
                    return stem.to_owned();
                }
            }
            singular(lower)
        },
        "NOUN" => singular(lower),
        _ => lower.to_owned(),
    }
}

fn singular(lower: &str) -> String {
    if let Some(stem) = lower.strip_suffix("ies") {
        format!("{stem}y")
    } else if lower.len() > 3 && !lower.ends_with("ss") {
        lower.strip_suffix('s').unwrap_or(lower).to_owned()
    } else {
        lower.to_owned()
    }
}

/// Sentences end after `.`, `!` or `?`. Trailing tokens form a final sentence.
fn segment(text: &str, pieces: &[Piece<'_>]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (index, piece) in pieces.iter().enumerate() {
        let last = index + 1 == pieces.len();
        if is_sentence_closer(piece.text) || last {
            let end = index + 1;
            let span = &text[pieces[start].start..piece.end];
            sentences.push(Sentence { text: span.to_owned(), start, end });
            start = end;
        }
    }

    sentences
}

/// Attach heads and relations within the sentence `[start, end)`.
fn parse(tokens: &mut [Token], start: usize, end: usize) {
    let is_nominal = |pos: &str| matches!(pos, "NOUN" | "PROPN" | "PRON");

    let root = (start..end)
        .find(|&i| tokens[i].pos == "VERB")
        .or_else(|| (start..end).find(|&i| tokens[i].pos == "AUX"))
        .or_else(|| (start..end).find(|&i| tokens[i].pos != "PUNCT"))
        .unwrap_or(start);

    for i in start..end {
        let pos = tokens[i].pos.clone();
        let next_nominal = (i + 1..end)
            .take_while(|&j| !matches!(tokens[j].pos.as_str(), "VERB" | "AUX" | "ADP" | "PUNCT"))
            .find(|&j| is_nominal(&tokens[j].pos));
        let governing_adp = (start..i)
            .rev()
            .take_while(|&j| {
                !matches!(tokens[j].pos.as_str(), "NOUN" | "PROPN" | "PRON" | "VERB" | "AUX")
            })
            .find(|&j| tokens[j].pos == "ADP");

        let (dep, head) = if i == root {
            ("ROOT", i)
        } else {
            match pos.as_str() {
                "PUNCT" => ("punct", root),
                "DET" => ("det", next_nominal.unwrap_or(root)),
                "ADJ" => next_nominal.map_or(("acomp", root), |n| ("amod", n)),
                "NUM" => next_nominal.map_or(("nummod", root), |n| ("nummod", n)),
                "ADP" => ("prep", root),
                "NOUN" | "PROPN" | "PRON" => {
                    let compound = i + 1 < end && tokens[i + 1].pos == pos && pos != "PRON";
                    if compound {
                        ("compound", i + 1)
                    } else if let Some(adp) = governing_adp {
                        ("pobj", adp)
                    } else if i < root {
                        ("nsubj", root)
                    } else {
                        ("dobj", root)
                    }
                },
                "AUX" => ("aux", root),
                "ADV" => ("advmod", root),
                "CCONJ" => ("cc", root),
                "VERB" => ("conj", root),
                _ => ("dep", root),
            }
        };

        tokens[i].dep = dep.to_owned();
        tokens[i].head = head;
    }
}

fn gazetteer_label(word: &str) -> Option<&'static str> {
    GAZETTEER.iter().find(|(name, _)| *name == word).map(|&(_, label)| label)
}

fn label_gloss(label: &str) -> Option<&'static str> {
    let gloss = match label {
        "PERSON" => "People, including fictional",
        "ORG" => "Companies, agencies, institutions, etc.",
        "GPE" => "Countries, cities, states",
        "CARDINAL" => "Numerals that do not fall under another type",
        _ => return None,
    };
    Some(gloss)
}

/// Gazetteer names and bare numbers. Adjacent tokens with the same label
/// merge into one entity.
fn recognize(text: &str, pieces: &[Piece<'_>], tokens: &mut [Token]) -> Vec<Entity> {
    let labels: Vec<Option<&'static str>> = tokens
        .iter()
        .map(|t| if t.pos == "NUM" { Some("CARDINAL") } else { gazetteer_label(&t.text) })
        .collect();

    let mut entities = Vec::new();
    let mut i = 0;
    while i < labels.len() {
        let Some(label) = labels[i] else {
            i += 1;
            continue;
        };
        let start = i;
        while i < labels.len() && labels[i] == Some(label) {
            tokens[i].entity_type = Some(label.to_owned());
            i += 1;
        }
        entities.push(Entity {
            text: text[pieces[start].start..pieces[i - 1].end].to_owned(),
            label: label.to_owned(),
            label_explanation: label_gloss(label).map(str::to_owned),
            start,
            end: i,
        });
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &Document) -> Vec<&str> {
        doc.tokens().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_trailing_and_leading_punctuation() {
        let doc = analyze("(Hello), world!").unwrap();
        assert_eq!(texts(&doc), ["(", "Hello", ")", ",", "world", "!"]);
    }

    #[test]
    fn fox_sentence_annotations() {
        let doc = analyze("The quick brown fox jumps over the lazy dog.").unwrap();
        assert_eq!(doc.len(), 10);

        let fox = &doc.tokens()[3];
        assert_eq!((fox.pos.as_str(), fox.dep.as_str()), ("NOUN", "nsubj"));
        assert_eq!(doc.head_of(3).map(|t| t.text.as_str()), Some("jumps"));

        let jumps = &doc.tokens()[4];
        assert_eq!((jumps.dep.as_str(), jumps.head, jumps.lemma.as_str()), ("ROOT", 4, "jump"));

        let dog = &doc.tokens()[8];
        assert_eq!(dog.dep, "pobj");
        assert_eq!(doc.head_of(8).map(|t| t.text.as_str()), Some("over"));

        assert!(doc.tokens()[0].is_stop);
        assert!(!doc.tokens()[3].is_stop);
        assert!(doc.entities().is_empty());
    }

    #[test]
    fn sentences_and_entities() {
        let doc = analyze("Apple opened in London. Alice bought 3 phones!").unwrap();
        let sentences: Vec<_> = doc.sentences().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(sentences, ["Apple opened in London.", "Alice bought 3 phones!"]);

        let entities: Vec<_> =
            doc.entities().iter().map(|e| (e.text.as_str(), e.label.as_str())).collect();
        assert_eq!(
            entities,
            [("Apple", "ORG"), ("London", "GPE"), ("Alice", "PERSON"), ("3", "CARDINAL")]
        );
        assert_eq!(doc.tokens()[0].entity_type.as_deref(), Some("ORG"));
    }

    #[test]
    fn text_without_closer_is_one_sentence() {
        let doc = analyze("no full stop here").unwrap();
        assert_eq!(doc.sentences().len(), 1);
        assert_eq!(doc.sentences()[0].text, "no full stop here");
    }

    #[test]
    fn injected_failure() {
        let model = SimModel::failing_on("boom");
        assert!(matches!(model.process("it went boom"), Err(ProcessError::Rejected { .. })));
        assert!(model.process("quiet").is_ok());
    }

    #[test]
    fn disconnect_is_permanent_and_shared_by_clones() {
        let model = SimModel::new().disconnecting_after(1);
        let twin = model.clone();
        assert!(model.process("first").is_ok());
        assert!(matches!(twin.process("second"), Err(ProcessError::Disconnected { .. })));
        assert!(matches!(model.process("third"), Err(ProcessError::Disconnected { .. })));
    }
}
