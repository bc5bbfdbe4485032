//! The eight analyses.
//!
//! Each function is a pure read of a [`Document`] into a [`Report`]. Output
//! shapes are fixed: column names, row order and text layout are part of the
//! contract front ends and golden tests rely on.

use textlab_core::Document;

use crate::Report;

/// Placeholder for absent entity types and glosses.
pub(crate) const MISSING: &str = "-";

/// Body of the entity report when the document has none.
pub(crate) const NO_ENTITIES: &str = "No named entities found in the text.";

fn or_missing(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(MISSING).to_owned()
}

pub(crate) fn tokenize(doc: &Document) -> Report {
    let rows = doc
        .tokens()
        .iter()
        .enumerate()
        .map(|(i, token)| vec![(i + 1).to_string(), token.text.clone()]);

    Report::table(["Index", "Token"], rows)
}

pub(crate) fn annotate(doc: &Document) -> Report {
    let rows = doc.tokens().iter().map(|token| {
        vec![
            token.text.clone(),
            token.pos.clone(),
            token.lemma.clone(),
            token.dep.clone(),
            or_missing(token.entity_type.as_deref()),
        ]
    });

    Report::table(["Token", "POS", "Lemma", "Dependency", "Entity"], rows)
}

pub(crate) fn lemmatize(doc: &Document) -> Report {
    let rows = doc.tokens().iter().map(|token| vec![token.text.clone(), token.lemma.clone()]);

    Report::table(["Token", "Lemma"], rows)
}

pub(crate) fn segment_sentences(doc: &Document) -> Report {
    let rows = doc
        .sentences()
        .iter()
        .enumerate()
        .map(|(i, sentence)| vec![(i + 1).to_string(), sentence.text.clone()]);

    Report::table(["Index", "Sentence"], rows)
}

pub(crate) fn tag_pos(doc: &Document) -> Report {
    let rows = doc.tokens().iter().map(|token| {
        vec![
            token.text.clone(),
            token.pos.clone(),
            token.tag.clone(),
            or_missing(token.tag_explanation.as_deref()),
        ]
    });

    Report::table(["Token", "POS", "Tag", "Detail"], rows)
}

pub(crate) fn recognize_entities(doc: &Document) -> Report {
    if doc.entities().is_empty() {
        return Report::text(NO_ENTITIES);
    }

    let rows = doc.entities().iter().map(|entity| {
        vec![
            entity.text.clone(),
            entity.label.clone(),
            or_missing(entity.label_explanation.as_deref()),
        ]
    });

    Report::table(["Entity", "Type", "Explanation"], rows)
}

pub(crate) fn remove_stopwords(doc: &Document) -> Report {
    let kept: Vec<&str> =
        doc.tokens().iter().filter(|t| !t.is_stop).map(|t| t.text.as_str()).collect();
    let total = doc.len();
    let removed = total - kept.len();

    Report::text(format!(
        "Original Text:\n{original}\n\n\
         After Stop Word Removal:\n{filtered}\n\n\
         Statistics:\n  \
         Original tokens: {total}\n  \
         After removal: {kept}\n  \
         Stop words removed: {removed}",
        original = doc.text(),
        filtered = kept.join(" "),
        kept = kept.len(),
    ))
}

pub(crate) fn parse_dependencies(doc: &Document) -> Report {
    let rows = doc.tokens().iter().enumerate().map(|(i, token)| {
        let head = doc.head_of(i).map_or(MISSING, |h| h.text.as_str());
        vec![token.text.clone(), token.dep.clone(), head.to_owned(), token.pos.clone()]
    });

    Report::table(["Token", "Dependency", "Head", "POS"], rows)
}

#[cfg(test)]
mod tests {
    use textlab_core::{Entity, Sentence, Token};

    use super::*;

    fn token(text: &str, pos: &str, tag: &str, head: usize, is_stop: bool) -> Token {
        Token {
            text: text.into(),
            pos: pos.into(),
            tag: tag.into(),
            tag_explanation: None,
            lemma: text.to_lowercase(),
            dep: if text == "runs" { "ROOT".into() } else { "dep".into() },
            head,
            entity_type: None,
            is_stop,
        }
    }

    /// "The Acme runs." with Acme as an ORG entity.
    fn acme() -> Document {
        let mut tokens = vec![
            token("The", "DET", "DT", 1, true),
            token("Acme", "PROPN", "NNP", 2, false),
            token("runs", "VERB", "VBZ", 2, false),
            token(".", "PUNCT", ".", 2, false),
        ];
        tokens[1].entity_type = Some("ORG".into());
        tokens[0].tag_explanation = Some("determiner".into());

        Document::new(
            "The Acme runs.",
            tokens,
            vec![Sentence { text: "The Acme runs.".into(), start: 0, end: 4 }],
            vec![Entity {
                text: "Acme".into(),
                label: "ORG".into(),
                label_explanation: None,
                start: 1,
                end: 2,
            }],
        )
        .unwrap()
    }

    fn cells(report: &Report, column: &str) -> Vec<String> {
        report
            .as_table()
            .and_then(|t| t.column(column))
            .map(|c| c.into_iter().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    #[test]
    fn tokenize_numbers_from_one() {
        let report = tokenize(&acme());
        assert_eq!(cells(&report, "Index"), ["1", "2", "3", "4"]);
        assert_eq!(cells(&report, "Token"), ["The", "Acme", "runs", "."]);
    }

    #[test]
    fn annotate_marks_tokens_outside_entities() {
        let report = annotate(&acme());
        assert_eq!(cells(&report, "Entity"), ["-", "ORG", "-", "-"]);
        assert_eq!(report.as_table().map(|t| t.columns().len()), Some(5));
    }

    #[test]
    fn tag_pos_falls_back_to_dash() {
        let report = tag_pos(&acme());
        assert_eq!(cells(&report, "Detail"), ["determiner", "-", "-", "-"]);
    }

    #[test]
    fn entities_table_uses_dash_for_missing_explanation() {
        let report = recognize_entities(&acme());
        let table = report.as_table().unwrap();
        assert_eq!(table.rows(), [vec!["Acme".to_string(), "ORG".into(), "-".into()]]);
    }

    #[test]
    fn entities_text_when_none() {
        let doc = Document::new("x", vec![token("x", "X", "XX", 0, false)], vec![], vec![]).unwrap();
        assert_eq!(recognize_entities(&doc), Report::text(NO_ENTITIES));
    }

    #[test]
    fn stopword_report_layout() {
        let report = remove_stopwords(&acme());
        assert_eq!(
            report.as_text(),
            Some(
                "Original Text:\nThe Acme runs.\n\n\
                 After Stop Word Removal:\nAcme runs .\n\n\
                 Statistics:\n  Original tokens: 4\n  After removal: 3\n  Stop words removed: 1"
            )
        );
    }

    #[test]
    fn dependencies_show_head_text() {
        let report = parse_dependencies(&acme());
        assert_eq!(cells(&report, "Head"), ["Acme", "runs", "runs", "runs"]);
        assert_eq!(cells(&report, "Dependency")[2], "ROOT");
    }

    #[test]
    fn sentences_numbered_from_one() {
        let report = segment_sentences(&acme());
        assert_eq!(cells(&report, "Index"), ["1"]);
        assert_eq!(cells(&report, "Sentence"), ["The Acme runs."]);
    }
}
