//! Selector state and its transition function.
//!
//! Everything here is free of terminal I/O so the selector can be driven by
//! synthetic event sequences in tests.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;

/// Maximum number of rows shown at once
pub const MAX_VISIBLE_ITEMS: usize = 10;

/// Input the selector reacts to, already decoded from raw key events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorEvent {
    Cancel,
    Confirm,
    Up,
    Down,
    Backspace,
    Input(char),
}

/// Result of feeding one event to the selector.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// Keep going with the updated state.
    Continue(SelectorState),
    /// The loop is over. An empty string means nothing was chosen.
    Done(String),
}

/// Everything the selector knows between two key presses.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorState {
    candidates: Vec<String>,
    query: String,
    /// Indexes into `candidates`, best match first
    filtered: Vec<usize>,
    cursor: usize,
}

impl SelectorState {
    pub fn new(candidates: Vec<String>) -> Self {
        let filtered = (0..candidates.len()).collect();
        Self {
            candidates,
            query: String::new(),
            filtered,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Candidates matching the current query, in display order.
    pub fn filtered(&self) -> impl Iterator<Item = &str> {
        self.filtered.iter().map(move |&i| self.candidates[i].as_str())
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The candidate under the cursor, if anything matches.
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.filtered
            .get(self.cursor)
            .map(|&i| self.candidates[i].as_str())
    }

    /// First filtered index to draw so the cursor row stays on screen.
    #[must_use]
    pub fn window_start(&self) -> usize {
        self.cursor.saturating_sub(MAX_VISIBLE_ITEMS - 1)
    }

    /// The rows to draw as `(text, is_highlighted)`.
    pub fn visible_rows(&self) -> impl Iterator<Item = (&str, bool)> {
        let start = self.window_start();
        self.filtered()
            .enumerate()
            .skip(start)
            .take(MAX_VISIBLE_ITEMS)
            .map(move |(i, item)| (item, i == self.cursor))
    }

    fn refilter(&mut self) {
        self.filtered = filter_candidates(&self.candidates, &self.query);

        if self.cursor >= self.filtered.len() {
            self.cursor = 0;
        }
    }
}

/// Applies one event to the selector.
#[must_use]
pub fn update(mut state: SelectorState, event: SelectorEvent) -> Step {
    match event {
        SelectorEvent::Cancel => return Step::Done(String::new()),
        SelectorEvent::Confirm => {
            let selection = state.highlighted().unwrap_or_default().to_string();
            return Step::Done(selection);
        }
        SelectorEvent::Up => {
            state.cursor = state.cursor.saturating_sub(1);
        }
        SelectorEvent::Down => {
            if state.cursor + 1 < state.filtered.len() {
                state.cursor += 1;
            }
        }
        SelectorEvent::Backspace => {
            if state.query.pop().is_some() {
                state.refilter();
            }
        }
        SelectorEvent::Input(c) => {
            state.query.push(c);
            state.refilter();
        }
    }

    Step::Continue(state)
}

/// Indexes of the candidates matching `query`, best first.
///
/// An empty query keeps every candidate in its original order. Otherwise every
/// subsequence match is kept, even one whose score went negative over a long
/// gap. A candidate equal to the query (ignoring case) comes first, the rest
/// are ranked by fuzzy score, and ties keep their original order.
pub fn filter_candidates(candidates: &[String], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..candidates.len()).collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let lowercase_query = query.to_lowercase();

    candidates
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| {
            matcher
                .fuzzy_match(candidate, query)
                .map(|score| (i, candidate.to_lowercase() == lowercase_query, score))
        })
        .sorted_by(|(_, exact_1, score_1), (_, exact_2, score_2)| {
            exact_2.cmp(exact_1).then(score_2.cmp(score_1))
        })
        .map(|(i, _, _)| i)
        .collect()
}
