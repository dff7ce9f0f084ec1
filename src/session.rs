//! Typing session state machine.
//!
//! A session walks through a fixed list of multi-line templates one line at
//! a time. Keystrokes only touch the input buffer of the current line;
//! counters move when a line is submitted. The timer starts on the first
//! submission and stops on the last one.

use std::fmt;
use std::time::Instant;

use crate::category::Category;
use crate::clock::{Clock, SystemClock};
use crate::metrics::{self, TimeSeriesPoint, WpmTracker};

/// One line of a template, stored as chars so positions line up with keystrokes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line(Vec<char>);

impl Line {
    pub fn new(text: &str) -> Self {
        Self(text.chars().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn get(&self, pos: usize) -> Option<char> {
        self.0.get(pos).copied()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    lines: Vec<Line>,
}

impl Template {
    /// Split a raw body into lines. `\r\n` endings are accepted.
    pub fn parse(body: &str) -> Self {
        let lines = body
            .split('\n')
            .map(|l| Line::new(l.strip_suffix('\r').unwrap_or(l)))
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }
}

/// Rendering hint for a single position of the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    /// not typed yet, past the end of the line, or no current line
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Complete,
}

/// Snapshot of where the session stands, in 1-based display terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub template: usize,
    pub total_templates: usize,
    /// 0 when the current template has no lines
    pub line: usize,
    pub total_lines: usize,
    pub completed_chars: usize,
    pub total_chars: usize,
}

impl Progress {
    pub fn as_tuple(&self) -> (usize, usize, usize, usize, usize, usize) {
        (
            self.template,
            self.total_templates,
            self.line,
            self.total_lines,
            self.completed_chars,
            self.total_chars,
        )
    }

    /// Fraction of all characters completed, in `[0, 1]`
    pub fn ratio(&self) -> f64 {
        if self.total_chars == 0 {
            0.0
        } else {
            self.completed_chars as f64 / self.total_chars as f64
        }
    }
}

#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    category: Category,
    templates: Vec<Template>,
    template_index: usize,
    line_index: usize,
    input: Vec<char>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    correct_chars: usize,
    total_chars: usize,
    completed_chars: usize,
    total_chars_all_lines: usize,
    wpm: WpmTracker,
    clock: C,
}

impl Session<SystemClock> {
    pub fn new<I, S>(category: Category, bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_clock(category, bodies, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    /// An empty body list produces one template with no lines, which has
    /// nothing to type and never completes.
    pub fn with_clock<I, S>(category: Category, bodies: I, clock: C) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut templates: Vec<Template> = bodies
            .into_iter()
            .map(|b| Template::parse(b.as_ref()))
            .collect();
        if templates.is_empty() {
            templates.push(Template::default());
        }
        let total_chars_all_lines = templates.iter().map(Template::char_count).sum();

        Self {
            category,
            templates,
            template_index: 0,
            line_index: 0,
            input: Vec::new(),
            started_at: None,
            finished_at: None,
            correct_chars: 0,
            total_chars: 0,
            completed_chars: 0,
            total_chars_all_lines,
            wpm: WpmTracker::new(),
            clock,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Template being typed. After completion this stays on the last one.
    pub fn current_template(&self) -> &Template {
        let idx = self.template_index.min(self.templates.len() - 1);
        &self.templates[idx]
    }

    pub fn current_line(&self) -> Option<&Line> {
        if self.is_complete() {
            return None;
        }
        self.templates
            .get(self.template_index)
            .and_then(|t| t.lines.get(self.line_index))
    }

    pub fn current_line_text(&self) -> String {
        self.current_line().map(Line::to_string).unwrap_or_default()
    }

    /// Index of the current line within the current template
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn template_index(&self) -> usize {
        self.template_index
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    pub fn has_lines(&self) -> bool {
        self.templates.iter().any(|t| !t.lines.is_empty())
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.started_at, self.finished_at) {
            (_, Some(_)) => SessionPhase::Complete,
            (Some(_), None) => SessionPhase::InProgress,
            (None, None) => SessionPhase::NotStarted,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    pub fn correct_chars(&self) -> usize {
        self.correct_chars
    }

    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn completed_chars(&self) -> usize {
        self.completed_chars
    }

    pub fn total_chars_all_lines(&self) -> usize {
        self.total_chars_all_lines
    }

    /// Printable characters only; the caller filters control keys
    pub fn append_char(&mut self, c: char) {
        let capacity = match self.current_line() {
            Some(line) => line.len(),
            None => return,
        };
        if self.input.len() < capacity {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn is_line_complete(&self) -> bool {
        let len = self.current_line().map_or(0, Line::len);
        self.input.len() >= len
    }

    /// Score the current line and move on. Returns `true` exactly once,
    /// when the last line of the last template is submitted.
    ///
    /// An incomplete line is accepted here; callers that want to insist on
    /// a full line check [`Session::is_line_complete`] first. An empty input
    /// is only accepted for an empty line.
    pub fn submit_line(&mut self) -> bool {
        let Some(line) = self.current_line() else {
            return false;
        };
        if self.input.is_empty() && !line.is_empty() {
            return false;
        }

        let line_len = line.len();
        let line_correct = line
            .chars()
            .iter()
            .zip(&self.input)
            .filter(|(expected, typed)| expected == typed)
            .count();

        let now = self.clock.now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.wpm.start(now);
        }

        self.correct_chars += line_correct;
        self.total_chars += line_len;
        self.completed_chars += line_len;

        self.advance(now)
    }

    fn advance(&mut self, now: Instant) -> bool {
        self.line_index += 1;
        self.input.clear();

        let lines_in_template = self.templates[self.template_index].lines.len();
        if self.line_index < lines_in_template {
            return false;
        }

        self.template_index += 1;
        self.line_index = 0;
        if self.template_index < self.templates.len() {
            return false;
        }

        self.finished_at = Some(now);
        tracing::debug!(
            category = %self.category,
            correct = self.correct_chars,
            total = self.total_chars,
            "session complete"
        );
        true
    }

    pub fn check_character(&self, pos: usize) -> CharStatus {
        let Some(line) = self.current_line() else {
            return CharStatus::Pending;
        };
        match (self.input.get(pos), line.get(pos)) {
            (Some(typed), Some(expected)) if *typed == expected => CharStatus::Correct,
            (Some(_), Some(_)) => CharStatus::Incorrect,
            _ => CharStatus::Pending,
        }
    }

    pub fn progress(&self) -> Progress {
        let total_templates = self.templates.len();
        let total_lines = self.current_template().lines.len();
        let (template, line) = if self.is_complete() {
            (total_templates, total_lines)
        } else if total_lines == 0 {
            (self.template_index + 1, 0)
        } else {
            (self.template_index + 1, self.line_index + 1)
        };

        Progress {
            template,
            total_templates,
            line,
            total_lines,
            completed_chars: self.completed_chars,
            total_chars: self.total_chars_all_lines,
        }
    }

    /// Time used for metrics: pinned to the finish once complete
    fn metrics_now(&self) -> Instant {
        self.finished_at.unwrap_or_else(|| self.clock.now())
    }

    /// Current WPM. Also feeds the per-second sample window.
    pub fn instant_wpm(&mut self) -> f64 {
        let now = self.metrics_now();
        self.wpm.observe(self.completed_chars, now)
    }

    /// Trailing average over the last samples
    pub fn average_wpm(&self) -> f64 {
        self.wpm.average()
    }

    pub fn accuracy(&self) -> f64 {
        metrics::accuracy(self.correct_chars, self.total_chars)
    }

    pub fn elapsed_seconds(&self) -> f64 {
        match self.started_at {
            Some(start) => self
                .metrics_now()
                .saturating_duration_since(start)
                .as_secs_f64(),
            None => 0.0,
        }
    }

    pub fn wpm_history(&self) -> Vec<f64> {
        self.wpm.history().collect()
    }

    pub fn wpm_timeline(&self) -> &[TimeSeriesPoint] {
        self.wpm.timeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use assert_matches::assert_matches;

    fn session(bodies: &[&str]) -> (Session<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let s = Session::with_clock(Category::Easy, bodies.iter().copied(), clock.clone());
        (s, clock)
    }

    fn type_str<C: Clock>(s: &mut Session<C>, text: &str) {
        text.chars().for_each(|c| s.append_char(c));
    }

    #[test]
    fn new_session_starts_at_first_line() {
        let (s, _) = session(&["abc\nde", "fgh"]);

        assert_eq!(s.current_line_text(), "abc");
        assert_eq!(s.total_chars_all_lines(), 8);
        assert_eq!(s.phase(), SessionPhase::NotStarted);
        assert_eq!(s.progress().as_tuple(), (1, 2, 1, 2, 0, 8));
        assert_eq!(s.accuracy(), 100.0);
        assert_eq!(s.elapsed_seconds(), 0.0);
    }

    #[test]
    fn append_is_capped_at_line_length() {
        let (mut s, _) = session(&["ab"]);

        type_str(&mut s, "abcdef");

        assert_eq!(s.input_text(), "ab");
        assert!(s.is_line_complete());
    }

    #[test]
    fn backspace_on_empty_input_is_noop() {
        let (mut s, _) = session(&["ab"]);

        s.backspace();
        assert!(s.input().is_empty());

        type_str(&mut s, "a");
        s.backspace();
        s.backspace();
        assert!(s.input().is_empty());
    }

    #[test]
    fn two_line_template_scenario() {
        let (mut s, _) = session(&["abc\nde"]);

        type_str(&mut s, "abc");
        assert!(!s.submit_line());
        assert_eq!(s.progress().as_tuple(), (1, 1, 2, 2, 3, 5));
        assert_eq!(s.phase(), SessionPhase::InProgress);

        type_str(&mut s, "de");
        assert!(s.submit_line());
        assert_eq!(s.correct_chars(), 5);
        assert_eq!(s.total_chars(), 5);
        assert_eq!(s.accuracy(), 100.0);
        assert_eq!(s.phase(), SessionPhase::Complete);
    }

    #[test]
    fn mismatches_lower_accuracy() {
        let (mut s, _) = session(&["cat"]);

        type_str(&mut s, "cbt");
        s.submit_line();

        assert_eq!(s.correct_chars(), 2);
        assert_eq!(s.total_chars(), 3);
        assert_eq!(s.accuracy(), 66.7);
    }

    #[test]
    fn empty_input_submit_is_noop() {
        let (mut s, _) = session(&["abc"]);

        assert!(!s.submit_line());
        assert_eq!(s.progress().as_tuple(), (1, 1, 1, 1, 0, 3));
        assert_eq!(s.total_chars(), 0);
        assert!(s.started_at().is_none());
    }

    #[test]
    fn partial_line_submission_counts_full_line() {
        let (mut s, _) = session(&["abcd\nx"]);

        type_str(&mut s, "ab");
        assert!(!s.is_line_complete());
        assert!(!s.submit_line());

        assert_eq!(s.correct_chars(), 2);
        assert_eq!(s.total_chars(), 4);
        assert_eq!(s.completed_chars(), 4);
        assert_eq!(s.accuracy(), 50.0);
    }

    #[test]
    fn blank_lines_are_submitted_empty() {
        let (mut s, _) = session(&["a\n\nb"]);

        type_str(&mut s, "a");
        s.submit_line();
        assert_eq!(s.current_line_text(), "");
        assert!(s.is_line_complete());

        assert!(!s.submit_line());
        type_str(&mut s, "b");
        assert!(s.submit_line());
        assert_eq!(s.accuracy(), 100.0);
    }

    #[test]
    fn advances_across_templates() {
        let (mut s, _) = session(&["ab", "cd\nef"]);

        type_str(&mut s, "ab");
        assert!(!s.submit_line());
        assert_eq!(s.template_index(), 1);
        assert_eq!(s.line_index(), 0);
        assert_eq!(s.progress().as_tuple(), (2, 2, 1, 2, 2, 6));

        type_str(&mut s, "cd");
        assert!(!s.submit_line());
        type_str(&mut s, "ef");
        assert!(s.submit_line());
    }

    #[test]
    fn completion_is_signalled_once() {
        let (mut s, clock) = session(&["a\nb", "c"]);
        let mut results = Vec::new();

        for c in ['a', 'b', 'c'] {
            s.append_char(c);
            clock.advance_secs(1.0);
            results.push(s.submit_line());
        }
        assert_eq!(results, vec![false, false, true]);
        let finished = s.finished_at();
        assert!(finished.is_some());

        clock.advance_secs(5.0);
        s.append_char('x');
        assert!(s.input().is_empty());
        assert!(!s.submit_line());
        assert_eq!(s.finished_at(), finished);
        assert_eq!(s.progress().as_tuple(), (2, 2, 1, 1, 3, 3));
    }

    #[test]
    fn check_character_is_tri_state() {
        let (mut s, _) = session(&["cat"]);
        type_str(&mut s, "cb");

        assert_matches!(s.check_character(0), CharStatus::Correct);
        assert_matches!(s.check_character(1), CharStatus::Incorrect);
        assert_matches!(s.check_character(2), CharStatus::Pending);
        assert_matches!(s.check_character(10), CharStatus::Pending);
    }

    #[test]
    fn check_character_without_line_is_pending() {
        let (mut s, _) = session(&["a"]);
        s.append_char('a');
        s.submit_line();

        assert_eq!(s.check_character(0), CharStatus::Pending);
    }

    #[test]
    fn empty_template_list_is_degenerate() {
        let mut s = Session::new(Category::Custom, Vec::<String>::new());

        assert!(!s.has_lines());
        assert_eq!(s.templates().len(), 1);
        assert_eq!(s.progress().as_tuple(), (1, 1, 0, 0, 0, 0));
        assert_eq!(s.accuracy(), 100.0);

        s.append_char('a');
        assert!(s.input().is_empty());
        assert!(!s.submit_line());
        assert_eq!(s.phase(), SessionPhase::NotStarted);
        assert_eq!(s.instant_wpm(), 0.0);
    }

    #[test]
    fn crlf_bodies_are_normalised() {
        let (s, _) = session(&["ab\r\ncd"]);
        assert_eq!(s.current_line_text(), "ab");
        assert_eq!(s.total_chars_all_lines(), 4);
    }

    #[test]
    fn timer_starts_on_first_submission() {
        let (mut s, clock) = session(&["abcde\nfghij"]);

        clock.advance_secs(3.0);
        type_str(&mut s, "abcde");
        assert_eq!(s.instant_wpm(), 0.0);
        assert!(s.started_at().is_none());

        s.submit_line();
        assert_eq!(s.elapsed_seconds(), 0.0);

        clock.advance_secs(6.0);
        // 5 chars = 1 word in 0.1 minutes
        assert_eq!(s.instant_wpm(), 10.0);
        assert_eq!(s.elapsed_seconds(), 6.0);
    }

    #[test]
    fn metrics_freeze_after_completion() {
        let (mut s, clock) = session(&["abcde\nfghij"]);

        type_str(&mut s, "abcde");
        s.submit_line();
        clock.advance_secs(12.0);
        type_str(&mut s, "fghij");
        assert!(s.submit_line());

        let wpm = s.instant_wpm();
        assert_eq!(wpm, 10.0);
        assert_eq!(s.elapsed_seconds(), 12.0);

        clock.advance_secs(60.0);
        assert_eq!(s.instant_wpm(), wpm);
        assert_eq!(s.elapsed_seconds(), 12.0);
    }

    #[test]
    fn average_tracks_sampled_history() {
        let (mut s, clock) = session(&["abcde\nabcde\nabcde\nx"]);

        type_str(&mut s, "abcde");
        s.submit_line();
        clock.advance_secs(1.0);
        assert_eq!(s.instant_wpm(), 60.0);

        type_str(&mut s, "abcde");
        s.submit_line();
        clock.advance_secs(1.0);
        assert_eq!(s.instant_wpm(), 60.0);

        type_str(&mut s, "abcde");
        s.submit_line();
        clock.advance_secs(1.0);
        assert_eq!(s.instant_wpm(), 60.0);

        assert_eq!(s.wpm_history(), vec![60.0, 60.0, 60.0]);
        assert_eq!(s.average_wpm(), 60.0);
        assert_eq!(s.wpm_timeline().len(), 3);
    }
}
