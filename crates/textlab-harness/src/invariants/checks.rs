//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use textlab_app::{Mode, OperationId, SessionState};

use super::{Invariant, InvariantKind, InvariantResult, SessionSnapshot, Violation};

fn violation(kind: InvariantKind, message: String) -> InvariantResult {
    Err(Violation { invariant: kind, message })
}

/// A document and its text exist if and only if the state is Ready.
pub struct DocumentPresentIffReady;

impl Invariant for DocumentPresentIffReady {
    fn kind(&self) -> InvariantKind {
        InvariantKind::DocumentPresentIffReady
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let ready = state.state == SessionState::Ready;
        if state.document.is_some() != ready || state.text.is_some() != ready {
            return violation(
                self.kind(),
                format!(
                    "state {:?} with document={} text={}",
                    state.state,
                    state.document.is_some(),
                    state.text.is_some()
                ),
            );
        }
        Ok(())
    }
}

/// A model is installed if and only if text can be submitted.
///
/// A partially initialized model must never be visible while loading, and a
/// failed load must not leave a stale handle behind.
pub struct ModelPresentWhenUsable;

impl Invariant for ModelPresentWhenUsable {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ModelPresentWhenUsable
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        if state.model_loaded != state.state.accepts_text() {
            return violation(
                self.kind(),
                format!("state {:?} with model_loaded={}", state.state, state.model_loaded),
            );
        }
        Ok(())
    }
}

/// Tokenize lists every token once, numbered 1..N in order.
pub struct TokenizeMatchesDocument;

impl Invariant for TokenizeMatchesDocument {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TokenizeMatchesDocument
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let (Some(doc), Some(report)) = (&state.document, state.report(OperationId::Tokenize))
        else {
            return Ok(());
        };
        let Some(table) = report.as_table() else {
            return violation(self.kind(), "tokenize produced text".to_owned());
        };

        if table.len() != doc.len() {
            return violation(
                self.kind(),
                format!("{} rows for {} tokens", table.len(), doc.len()),
            );
        }
        for (i, (row, token)) in table.rows().iter().zip(doc.tokens()).enumerate() {
            let expected = (i + 1).to_string();
            if row[0] != expected || row[1] != token.text {
                return violation(
                    self.kind(),
                    format!("row {i} is {row:?}, expected [{expected}, {:?}]", token.text),
                );
            }
        }
        Ok(())
    }
}

/// RemoveStopwords statistics add up: kept + removed == total == tokens.
pub struct StopwordAccounting;

impl StopwordAccounting {
    fn stat(body: &str, label: &str) -> Option<usize> {
        body.lines()
            .find_map(|line| line.trim().strip_prefix(label))
            .and_then(|rest| rest.trim().parse().ok())
    }
}

impl Invariant for StopwordAccounting {
    fn kind(&self) -> InvariantKind {
        InvariantKind::StopwordAccounting
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let (Some(doc), Some(report)) =
            (&state.document, state.report(OperationId::RemoveStopwords))
        else {
            return Ok(());
        };
        let Some(body) = report.as_text() else {
            return violation(self.kind(), "stop word removal produced a table".to_owned());
        };

        let total = Self::stat(body, "Original tokens:");
        let kept = Self::stat(body, "After removal:");
        let removed = Self::stat(body, "Stop words removed:");
        let (Some(total), Some(kept), Some(removed)) = (total, kept, removed) else {
            return violation(self.kind(), format!("missing statistics in {body:?}"));
        };

        let expected_kept = doc.tokens().iter().filter(|t| !t.is_stop).count();
        if kept + removed != total || total != doc.len() || kept != expected_kept {
            return violation(
                self.kind(),
                format!(
                    "total={total} kept={kept} removed={removed}, document has {} tokens \
                     ({expected_kept} kept)",
                    doc.len()
                ),
            );
        }
        Ok(())
    }
}

/// RecognizeEntities is text iff there are no entities, else one row each.
pub struct EntityReportShape;

impl Invariant for EntityReportShape {
    fn kind(&self) -> InvariantKind {
        InvariantKind::EntityReportShape
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let (Some(doc), Some(report)) =
            (&state.document, state.report(OperationId::RecognizeEntities))
        else {
            return Ok(());
        };

        let entities = doc.entities().len();
        let ok = match report.as_table() {
            Some(table) => entities > 0 && table.len() == entities,
            None => entities == 0,
        };
        if !ok {
            return violation(self.kind(), format!("{report:?} for {entities} entities"));
        }
        Ok(())
    }
}

/// The App offers the operation menu iff a document is current, and only
/// shows reports over a current document.
pub struct ModeMatchesState;

impl Invariant for ModeMatchesState {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ModeMatchesState
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let Some(mode) = state.mode else {
            return Ok(());
        };

        let ready = state.state == SessionState::Ready;
        if (mode == Mode::ChooseOperation) != ready {
            return violation(self.kind(), format!("mode {mode:?} in state {:?}", state.state));
        }
        if let Some(shown) = &state.shown
            && !ready
        {
            return violation(
                self.kind(),
                format!("{} report shown in state {:?}", shown.operation, state.state),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use textlab_app::Report;
    use textlab_core::{Document, Sentence, Token};

    use super::*;

    fn doc(words: &[(&str, bool)]) -> Document {
        let tokens = words
            .iter()
            .map(|&(text, is_stop)| Token {
                text: text.into(),
                pos: "X".into(),
                tag: "X".into(),
                tag_explanation: None,
                lemma: text.into(),
                dep: "dep".into(),
                head: 0,
                entity_type: None,
                is_stop,
            })
            .collect();
        Document::new("t", tokens, vec![Sentence { text: "t".into(), start: 0, end: words.len() }], vec![])
            .unwrap()
    }

    fn ready(document: Document, reports: Vec<(OperationId, Report)>) -> SessionSnapshot {
        SessionSnapshot {
            state: SessionState::Ready,
            model_loaded: true,
            document: Some(document),
            text: Some("t".into()),
            reports,
            ..SessionSnapshot::loading()
        }
    }

    #[test]
    fn document_without_ready_is_violation() {
        let mut snapshot = ready(doc(&[("a", true)]), vec![]);
        snapshot.state = SessionState::Idle;
        assert!(DocumentPresentIffReady.check(&snapshot).is_err());
    }

    #[test]
    fn model_missing_while_idle_is_violation() {
        let snapshot = SessionSnapshot {
            state: SessionState::Idle,
            ..SessionSnapshot::loading()
        };
        assert!(ModelPresentWhenUsable.check(&snapshot).is_err());
    }

    #[test]
    fn tokenize_with_wrong_numbering_is_violation() {
        let report = Report::table(["Index", "Token"], [vec!["0".to_owned(), "a".to_owned()]]);
        let snapshot = ready(doc(&[("a", true)]), vec![(OperationId::Tokenize, report)]);
        assert!(TokenizeMatchesDocument.check(&snapshot).is_err());
    }

    #[test]
    fn stopword_counts_must_add_up() {
        let body = "Original Text:\nt\n\nAfter Stop Word Removal:\nb\n\nStatistics:\n  \
                    Original tokens: 2\n  After removal: 1\n  Stop words removed: 0";
        let snapshot = ready(
            doc(&[("a", true), ("b", false)]),
            vec![(OperationId::RemoveStopwords, Report::text(body))],
        );
        let err = StopwordAccounting.check(&snapshot).unwrap_err();
        assert_eq!(err.invariant, InvariantKind::StopwordAccounting);
    }

    #[test]
    fn entity_table_without_entities_is_violation() {
        let report = Report::table(["Entity", "Type", "Explanation"], [vec![
            "x".to_owned(),
            "ORG".to_owned(),
            "-".to_owned(),
        ]]);
        let snapshot = ready(doc(&[("x", false)]), vec![(OperationId::RecognizeEntities, report)]);
        assert!(EntityReportShape.check(&snapshot).is_err());
    }

    #[test]
    fn menu_without_document_is_violation() {
        let snapshot = SessionSnapshot {
            state: SessionState::Idle,
            model_loaded: true,
            mode: Some(Mode::ChooseOperation),
            ..SessionSnapshot::loading()
        };
        assert!(ModeMatchesState.check(&snapshot).is_err());
    }
}
