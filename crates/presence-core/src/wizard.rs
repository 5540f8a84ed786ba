//! Six-step survey wizard.
//!
//! Steps move one at a time through [`TRANSITIONS`]. A step with a gate
//! cannot be left forward until its gate passes. `Review` is left only by
//! attaching a completed analysis ([`Wizard::complete`]).

use std::fmt;

use serde::Serialize;

use crate::error::{GateError, SurveyError, WizardError};
use crate::insight::InsightResult;
use crate::scoring::{compute_snapshot, ScoreSnapshot};
use crate::survey::{CompetitorEdit, CompetitorId, LeadField, SurveyInput, TopicList};
use crate::vocab::{EngagementBucket, FrequencyBucket, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Activity,
    Competitors,
    Themes,
    Contact,
    Review,
    Dashboard,
}

impl Step {
    pub const ALL: [Self; 6] = [
        Self::Activity,
        Self::Competitors,
        Self::Themes,
        Self::Contact,
        Self::Review,
        Self::Dashboard,
    ];

    /// 1-based position, as shown on the progress bar.
    #[must_use]
    pub fn number(self) -> usize {
        self as usize + 1
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Activity => "Your Activity",
            Self::Competitors => "Competitors",
            Self::Themes => "Content Themes",
            Self::Contact => "Final Details",
            Self::Review => "Ready for Analysis",
            Self::Dashboard => "Analysis Dashboard",
        }
    }

    fn transition(self) -> &'static Transition {
        &TRANSITIONS[self as usize]
    }

    #[must_use]
    pub fn next(self) -> Option<Step> {
        self.transition().next
    }

    #[must_use]
    pub fn previous(self) -> Option<Step> {
        self.transition().previous
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

type Gate = fn(&SurveyInput) -> Result<(), GateError>;

struct Transition {
    next: Option<Step>,
    previous: Option<Step>,
    gate: Option<Gate>,
    /// Forward move happens through a submission, not `advance`.
    needs_submission: bool,
}

/// Indexed by `Step as usize`.
static TRANSITIONS: [Transition; 6] = [
    Transition {
        next: Some(Step::Competitors),
        previous: None,
        gate: None,
        needs_submission: false,
    },
    Transition {
        next: Some(Step::Themes),
        previous: Some(Step::Activity),
        gate: Some(SurveyInput::competitor_gate as Gate),
        needs_submission: false,
    },
    Transition {
        next: Some(Step::Contact),
        previous: Some(Step::Competitors),
        gate: None,
        needs_submission: false,
    },
    Transition {
        next: Some(Step::Review),
        previous: Some(Step::Themes),
        gate: Some(SurveyInput::contact_gate as Gate),
        needs_submission: false,
    },
    Transition {
        next: Some(Step::Dashboard),
        previous: Some(Step::Contact),
        gate: None,
        needs_submission: true,
    },
    Transition {
        next: None,
        previous: None,
        gate: None,
        needs_submission: false,
    },
];

/// Survey answers plus the step cursor. No persistence, no network.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    input: SurveyInput,
    analysis: Option<InsightResult>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            step: Step::Activity,
            input: SurveyInput::default(),
            analysis: None,
        }
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a wizard at the first step with pre-filled answers.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::CompetitorCount`] if the competitor list is
    /// empty or longer than the edit operations allow.
    pub fn from_input(input: SurveyInput) -> Result<Self, SurveyError> {
        input.check_bounds()?;
        Ok(Self {
            step: Step::Activity,
            input,
            analysis: None,
        })
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn input(&self) -> &SurveyInput {
        &self.input
    }

    /// Score for the current answers, recomputed on every call.
    #[must_use]
    pub fn snapshot(&self) -> ScoreSnapshot {
        compute_snapshot(&self.input)
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&InsightResult> {
        self.analysis.as_ref()
    }

    /// Checks whether the current step may be left forward.
    ///
    /// # Errors
    ///
    /// See [`Wizard::advance`].
    pub fn can_advance(&self) -> Result<Step, WizardError> {
        let step = self.step();
        let transition = step.transition();
        let next = transition.next.ok_or(WizardError::NoNextStep(step))?;
        if transition.needs_submission {
            return Err(WizardError::SubmissionRequired(step));
        }
        if let Some(gate) = transition.gate {
            gate(&self.input).map_err(|source| WizardError::Gate { step, source })?;
        }
        Ok(next)
    }

    /// Moves one step forward.
    ///
    /// # Errors
    ///
    /// - [`WizardError::Gate`] if the current step's gate fails.
    /// - [`WizardError::SubmissionRequired`] at `Review`.
    /// - [`WizardError::NoNextStep`] at `Dashboard`.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        let next = self.can_advance()?;
        tracing::debug!(from = %self.step(), to = %next, "wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Moves one step back. Never gated.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoPreviousStep`] at `Activity` and `Dashboard`.
    pub fn back(&mut self) -> Result<Step, WizardError> {
        let step = self.step();
        let previous = step.previous().ok_or(WizardError::NoPreviousStep(step))?;
        self.step = previous;
        Ok(previous)
    }

    /// Advances until `Review`, stopping at the first failing gate.
    ///
    /// # Errors
    ///
    /// Returns the first [`WizardError::Gate`] encountered.
    pub fn advance_to_review(&mut self) -> Result<(), WizardError> {
        while self.step() != Step::Review {
            self.advance()?;
        }
        Ok(())
    }

    /// Attaches a finished analysis and moves to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NotReady`] unless the wizard is at `Review`.
    pub fn complete(&mut self, analysis: InsightResult) -> Result<(), WizardError> {
        if self.step() != Step::Review {
            return Err(WizardError::NotReady {
                expected: Step::Review,
                actual: self.step(),
            });
        }
        self.analysis = Some(analysis);
        self.step = Step::Dashboard;
        Ok(())
    }

    pub fn set_frequency(&mut self, frequency: FrequencyBucket) {
        self.input = self.input.with_frequency(frequency);
    }

    pub fn set_engagement(&mut self, engagement: EngagementBucket) {
        self.input = self.input.with_engagement(engagement);
    }

    /// # Errors
    ///
    /// Returns [`SurveyError::CompetitorLimit`] once five rows exist.
    pub fn add_competitor(&mut self) -> Result<CompetitorId, SurveyError> {
        let (next, id) = self.input.with_competitor_added()?;
        self.input = next;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`SurveyError::LastCompetitor`] or [`SurveyError::UnknownCompetitor`].
    pub fn remove_competitor(&mut self, id: &CompetitorId) -> Result<(), SurveyError> {
        self.input = self.input.without_competitor(id)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SurveyError::UnknownCompetitor`] if no row has `id`.
    pub fn edit_competitor(
        &mut self,
        id: &CompetitorId,
        edit: CompetitorEdit,
    ) -> Result<(), SurveyError> {
        self.input = self.input.with_competitor_edit(id, edit)?;
        Ok(())
    }

    pub fn toggle_topic(&mut self, list: TopicList, topic: Topic) {
        self.input = self.input.with_topic_toggled(list, topic);
    }

    pub fn set_lead_field(&mut self, field: LeadField, value: impl Into<String>) {
        self.input = self.input.with_lead_field(field, value.into());
    }
}
