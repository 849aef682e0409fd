//! Interactive known/unknown triage.
//!
//! The review loop is terminal-agnostic: decisions come from a [`DecisionSource`]
//! and words are shown through a [`Prompter`]. Progress is saved however the loop
//! ends: on completion, on interrupt, on an input error, or while unwinding.

use vokab_types::{Decision, WordEntry, WordMap};

use crate::error::{ClassifyError, StoreError};
use crate::store::{ClassificationStore, KnownSource};

pub const PROMPT: &str = "Press LEFT if you know the word, RIGHT if you don't.";

/// Blocks until the user picks known, unknown, or interrupts
pub trait DecisionSource {
    fn next_decision(&mut self) -> Result<Decision, ClassifyError>;
}

pub trait Prompter {
    /// Present one word: `ordinal from total`, the word and its sentence
    fn show(&mut self, ordinal: usize, total: usize, entry: &WordEntry) -> Result<(), ClassifyError>;

    fn notice(&mut self, message: &str) -> Result<(), ClassifyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordState {
    Pending,
    Known,
    Unknown,
}

impl WordState {
    /// Only a pending word moves, and an interrupt leaves it pending
    pub fn apply(self, decision: Decision) -> WordState {
        match (self, decision) {
            (WordState::Pending, Decision::Known) => WordState::Known,
            (WordState::Pending, Decision::Unknown) => WordState::Unknown,
            (state, _) => state,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyOutcome {
    /// Words that needed a decision
    pub total: usize,
    pub known: usize,
    pub unknown: usize,
    pub interrupted: bool,
}

/// Candidates not yet known, unknown, or listed by another source, in original order
pub fn pending_words(
    candidates: &WordMap,
    store: &ClassificationStore,
    sources: &[KnownSource],
) -> WordMap {
    candidates
        .iter()
        .filter(|(word, _)| {
            !store.is_classified(word) && !sources.iter().any(|source| source.contains(word))
        })
        .map(|(word, entry)| (word.clone(), entry.clone()))
        .collect()
}

/// Scoped write access to the store that persists it when released
pub struct ReviewSession<'s> {
    store: &'s mut ClassificationStore,
    finished: bool,
}

impl<'s> ReviewSession<'s> {
    pub fn begin(store: &'s mut ClassificationStore) -> Self {
        Self {
            store,
            finished: false,
        }
    }

    pub fn record(&mut self, entry: &WordEntry, decision: Decision) -> WordState {
        let state = WordState::Pending.apply(decision);
        match state {
            WordState::Known => self.store.mark_known(&entry.word),
            WordState::Unknown => self.store.mark_unknown(&entry.word, &entry.sentence),
            WordState::Pending => {}
        }
        state
    }

    /// Save and surface any write error to the caller
    pub fn finish(mut self) -> Result<(), StoreError> {
        self.finished = true;
        self.store.save()
    }
}

impl Drop for ReviewSession<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        match self.store.save() {
            Ok(()) => tracing::info!("Progress saved after an aborted review"),
            Err(e) => tracing::error!("Failed to save progress: {}", e),
        }
    }
}

pub fn classify<I, P>(
    candidates: &WordMap,
    store: &mut ClassificationStore,
    sources: &[KnownSource],
    input: &mut I,
    prompter: &mut P,
) -> Result<ClassifyOutcome, ClassifyError>
where
    I: DecisionSource + ?Sized,
    P: Prompter + ?Sized,
{
    let pending = pending_words(candidates, store, sources);
    let mut outcome = ClassifyOutcome {
        total: pending.len(),
        ..ClassifyOutcome::default()
    };
    tracing::info!(
        "{} of {} words need a decision",
        outcome.total,
        candidates.len()
    );

    let mut session = ReviewSession::begin(store);

    for (index, entry) in pending.values().enumerate() {
        prompter.show(index + 1, outcome.total, entry)?;

        match session.record(entry, input.next_decision()?) {
            WordState::Known => outcome.known += 1,
            WordState::Unknown => outcome.unknown += 1,
            WordState::Pending => {
                outcome.interrupted = true;
                break;
            }
        }
    }

    if outcome.interrupted {
        prompter.notice("Exiting and saving progress...")?;
    }

    session.finish()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;

    use tempfile::TempDir;

    use super::*;
    use crate::store::{StorePaths, load_known_words, load_unknown_words};

    struct Scripted(VecDeque<Result<Decision, ClassifyError>>);

    impl Scripted {
        fn new(decisions: &[Decision]) -> Self {
            Self(decisions.iter().copied().map(Ok).collect())
        }
    }

    impl DecisionSource for Scripted {
        fn next_decision(&mut self) -> Result<Decision, ClassifyError> {
            self.0.pop_front().unwrap_or(Ok(Decision::Interrupt))
        }
    }

    #[derive(Default)]
    struct Recorder {
        shown: Vec<(usize, usize, String)>,
        notices: Vec<String>,
    }

    impl Prompter for Recorder {
        fn show(&mut self, ordinal: usize, total: usize, entry: &WordEntry) -> Result<(), ClassifyError> {
            self.shown.push((ordinal, total, entry.word.clone()));
            Ok(())
        }

        fn notice(&mut self, message: &str) -> Result<(), ClassifyError> {
            self.notices.push(message.to_string());
            Ok(())
        }
    }

    fn candidates(words: &[&str]) -> WordMap {
        words
            .iter()
            .map(|w| (w.to_string(), WordEntry::new(*w, format!("sentence with {w}"))))
            .collect()
    }

    fn open_store() -> (TempDir, StorePaths, ClassificationStore) {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths {
            known_words: dir.path().join(".KNOWN_WORDS.txt"),
            unknown_words: dir.path().join("book.csv"),
        };
        let store = ClassificationStore::open(paths.clone()).unwrap();
        (dir, paths, store)
    }

    #[test]
    fn test_state_transitions() {
        assert_eq!(WordState::Pending.apply(Decision::Known), WordState::Known);
        assert_eq!(WordState::Pending.apply(Decision::Unknown), WordState::Unknown);
        assert_eq!(WordState::Pending.apply(Decision::Interrupt), WordState::Pending);
        assert_eq!(WordState::Known.apply(Decision::Unknown), WordState::Known);
    }

    #[test]
    fn test_full_review_saves_both_stores() {
        let (_dir, paths, mut store) = open_store();
        let words = candidates(&["comet", "nebula", "quasar"]);
        let mut input = Scripted::new(&[Decision::Known, Decision::Unknown, Decision::Known]);
        let mut prompter = Recorder::default();

        let outcome = classify(&words, &mut store, &[], &mut input, &mut prompter).unwrap();
        assert_eq!(
            outcome,
            ClassifyOutcome { total: 3, known: 2, unknown: 1, interrupted: false }
        );
        assert_eq!(
            prompter.shown,
            vec![
                (1, 3, "comet".to_string()),
                (2, 3, "nebula".to_string()),
                (3, 3, "quasar".to_string()),
            ]
        );

        let known = load_known_words(&paths.known_words).unwrap();
        assert!(known.contains("comet") && known.contains("quasar"));
        let unknown = load_unknown_words(&paths.unknown_words).unwrap();
        assert_eq!(unknown["nebula"].sentence, "sentence with nebula");
        assert_eq!(std::fs::read_to_string(paths.sidecar()).unwrap(), "nebula\n");
    }

    #[test]
    fn test_interrupt_keeps_earlier_decisions() {
        let (_dir, paths, mut store) = open_store();
        let words = candidates(&["comet", "nebula", "quasar"]);
        let mut input = Scripted::new(&[Decision::Unknown, Decision::Interrupt]);
        let mut prompter = Recorder::default();

        let outcome = classify(&words, &mut store, &[], &mut input, &mut prompter).unwrap();
        assert!(outcome.interrupted);
        assert_eq!(outcome.unknown, 1);
        assert_eq!(prompter.shown.len(), 2);
        assert_eq!(prompter.notices, vec!["Exiting and saving progress...".to_string()]);

        let unknown = load_unknown_words(&paths.unknown_words).unwrap();
        assert_eq!(unknown.keys().collect::<Vec<_>>(), vec!["comet"]);
        assert!(load_known_words(&paths.known_words).unwrap().is_empty());
        assert!(paths.known_words.exists());
    }

    #[test]
    fn test_input_error_still_saves() {
        let (_dir, paths, mut store) = open_store();
        let words = candidates(&["comet", "nebula"]);
        let mut input = Scripted(VecDeque::from(vec![
            Ok(Decision::Known),
            Err(ClassifyError::Terminal(io::Error::other("tty gone"))),
        ]));
        let mut prompter = Recorder::default();

        let result = classify(&words, &mut store, &[], &mut input, &mut prompter);
        assert!(matches!(result, Err(ClassifyError::Terminal(_))));

        let known = load_known_words(&paths.known_words).unwrap();
        assert!(known.contains("comet"));
        assert!(!known.contains("nebula"));
    }

    #[test]
    fn test_already_classified_and_other_books_are_skipped() {
        let (_dir, _paths, mut store) = open_store();
        store.mark_known("comet");
        store.mark_unknown("nebula", "old sentence");
        let sources = vec![KnownSource::new("other.words", ["quasar"])];

        let words = candidates(&["comet", "nebula", "quasar", "pulsar"]);
        let pending = pending_words(&words, &store, &sources);
        assert_eq!(pending.keys().collect::<Vec<_>>(), vec!["pulsar"]);

        let mut input = Scripted::new(&[Decision::Unknown]);
        let mut prompter = Recorder::default();
        let outcome = classify(&words, &mut store, &sources, &mut input, &mut prompter).unwrap();

        assert_eq!(outcome.total, 1);
        assert_eq!(store.unknown["nebula"].sentence, "old sentence");
        assert!(!store.known.contains("quasar") && !store.unknown.contains_key("quasar"));
    }

    #[test]
    fn test_session_never_adds_words_from_other_sources() {
        let (_dir, _paths, mut store) = open_store();
        let sources = vec![
            KnownSource::new("a.words", ["alpha", "gamma"]),
            KnownSource::new("b.words", ["delta"]),
        ];
        let words = candidates(&["alpha", "beta", "gamma", "delta", "epsilon"]);
        let mut input = Scripted::new(&[Decision::Known, Decision::Unknown]);

        classify(&words, &mut store, &sources, &mut input, &mut Recorder::default()).unwrap();

        for source in &sources {
            for word in store.known.iter().chain(store.unknown.keys()) {
                assert!(!source.contains(word), "{word} came from {}", source.name);
            }
        }
        assert!(store.known.contains("beta"));
        assert!(store.unknown.contains_key("epsilon"));
    }

    #[test]
    fn test_nothing_pending_still_writes_files() {
        let (_dir, paths, mut store) = open_store();
        let outcome = classify(
            &WordMap::new(),
            &mut store,
            &[],
            &mut Scripted::new(&[]),
            &mut Recorder::default(),
        )
        .unwrap();

        assert_eq!(outcome.total, 0);
        assert!(paths.known_words.exists());
        assert!(paths.unknown_words.exists());
    }

    #[test]
    fn test_dropped_session_saves() {
        let (_dir, paths, mut store) = open_store();
        {
            let mut session = ReviewSession::begin(&mut store);
            session.record(&WordEntry::new("comet", "s"), Decision::Known);
        }
        assert!(load_known_words(&paths.known_words).unwrap().contains("comet"));
    }
}
