use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, Section};
use super::validation::{validate_step, ErrorMap};

pub const TOTAL_STEPS: u8 = 4;

/// Sequential stages of the form. Each step edits exactly one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    BasicDetails,
    Documents,
    StatementOfPurpose,
    InterviewAvailability,
}

impl Step {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BasicDetails,
            Self::Documents,
            Self::StatementOfPurpose,
            Self::InterviewAvailability,
        ]
    }

    pub const fn first() -> Self {
        Self::BasicDetails
    }

    pub const fn terminal() -> Self {
        Self::InterviewAvailability
    }

    /// One-based position in the form.
    pub const fn index(self) -> u8 {
        match self {
            Self::BasicDetails => 1,
            Self::Documents => 2,
            Self::StatementOfPurpose => 3,
            Self::InterviewAvailability => 4,
        }
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::BasicDetails),
            2 => Some(Self::Documents),
            3 => Some(Self::StatementOfPurpose),
            4 => Some(Self::InterviewAvailability),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicDetails => "Basic Details",
            Self::Documents => "Document Collection",
            Self::StatementOfPurpose => "Statement of Purpose",
            Self::InterviewAvailability => "Interview Availability",
        }
    }

    pub const fn section(self) -> Section {
        match self {
            Self::BasicDetails => Section::BasicDetails,
            Self::Documents => Section::Documents,
            Self::StatementOfPurpose => Section::StatementOfPurpose,
            Self::InterviewAvailability => Section::InterviewAvailability,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::InterviewAvailability)
    }

    /// Following step, saturating at the terminal step.
    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1).min(TOTAL_STEPS)).unwrap_or(self)
    }

    /// Preceding step, saturating at the first step.
    pub fn previous(self) -> Self {
        Self::from_index(self.index().saturating_sub(1).max(1)).unwrap_or(self)
    }

    pub fn progress_percent(self) -> u8 {
        let ratio = f32::from(self.index()) / f32::from(TOTAL_STEPS);
        (ratio * 100.0).round() as u8
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} of {} ({})", self.index(), TOTAL_STEPS, self.title())
    }
}

/// Result of a forward transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: Step, to: Step },
    Blocked { step: Step, error_count: usize },
}

impl Transition {
    pub fn is_advanced(self) -> bool {
        matches!(self, Transition::Advanced { .. })
    }
}

/// Navigation state: the current step plus the errors currently on display.
#[derive(Debug, Clone)]
pub struct StepController {
    current: Step,
    errors: ErrorMap,
}

impl Default for StepController {
    fn default() -> Self {
        Self::new()
    }
}

impl StepController {
    pub fn new() -> Self {
        Self {
            current: Step::first(),
            errors: ErrorMap::new(),
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Re-validate the current step, replacing the displayed errors wholesale.
    pub fn validate_current(&mut self, record: &ApplicantRecord) -> bool {
        self.errors = validate_step(self.current, record);
        self.errors.is_empty()
    }

    /// Move forward when the current step validates. The terminal step stays terminal.
    pub fn advance(&mut self, record: &ApplicantRecord) -> Transition {
        let from = self.current;
        if !self.validate_current(record) {
            return Transition::Blocked {
                step: from,
                error_count: self.errors.len(),
            };
        }

        self.current = from.next();
        Transition::Advanced {
            from,
            to: self.current,
        }
    }

    /// Move back one step unconditionally. Displayed errors are left as they are.
    pub fn retreat(&mut self) -> Step {
        self.current = self.current.previous();
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for step in Step::ordered() {
            assert_eq!(Step::from_index(step.index()), Some(step));
        }
        assert_eq!(Step::from_index(0), None);
        assert_eq!(Step::from_index(5), None);
    }

    #[test]
    fn next_and_previous_saturate() {
        assert_eq!(Step::terminal().next(), Step::terminal());
        assert_eq!(Step::first().previous(), Step::first());
        assert_eq!(Step::Documents.next(), Step::StatementOfPurpose);
        assert_eq!(Step::StatementOfPurpose.previous(), Step::Documents);
    }

    #[test]
    fn progress_matches_step_position() {
        let progress: Vec<u8> = Step::ordered()
            .into_iter()
            .map(Step::progress_percent)
            .collect();
        assert_eq!(progress, vec![25, 50, 75, 100]);
    }
}
