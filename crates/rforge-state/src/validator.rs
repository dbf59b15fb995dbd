//! # Section Validator
//!
//! Pure mapping `(section, answers) -> errors`. Each input section owns a
//! rule table; a table is evaluated top to bottom and every failed rule
//! contributes exactly one message, so the error order is the table order.
//!
//! Conditional requirements are expressed as predicates rather than as
//! branching: the forensic evidence location carries
//! [`Predicate::NotBlankWhenYes`] gated on the tri-state that precedes it.

use rforge_core::{AnswerSet, Field, Section, TriState};

/// The condition a single rule checks against its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Text with at least one non-whitespace character.
    NotBlank,
    /// A single-choice value that is not the empty string.
    Chosen,
    /// A multi-choice set with at least one member.
    AnySelected,
    /// A tri-state that is not `Unset`.
    Answered,
    /// `NotBlank`, but only while the gating tri-state is `Yes`.
    NotBlankWhenYes(Field),
}

impl Predicate {
    /// Whether `field` satisfies this predicate in `answers`.
    ///
    /// A predicate applied to a field of the wrong kind never holds, so a
    /// mis-declared table fails closed.
    pub fn holds(&self, field: Field, answers: &AnswerSet) -> bool {
        match self {
            Self::NotBlank => not_blank(answers, field),
            Self::Chosen => answers.text(field).is_some_and(|v| !v.is_empty()),
            Self::AnySelected => answers.choices(field).is_some_and(|c| !c.is_empty()),
            Self::Answered => answers.tri_state(field).is_some_and(|t| t.is_set()),
            Self::NotBlankWhenYes(gate) => {
                answers.tri_state(*gate) != Some(TriState::Yes) || not_blank(answers, field)
            }
        }
    }
}

fn not_blank(answers: &AnswerSet, field: Field) -> bool {
    answers.text(field).is_some_and(|v| !v.trim().is_empty())
}

/// One row of a section's rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: Field,
    pub check: Predicate,
    pub message: &'static str,
}

impl Rule {
    const fn new(field: Field, check: Predicate, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
        }
    }

    pub fn is_satisfied(&self, answers: &AnswerSet) -> bool {
        self.check.holds(self.field, answers)
    }
}

// ─── Rule tables ─────────────────────────────────────────────────────

const ORGANIZATION: &[Rule] = &[
    Rule::new(
        Field::OrganizationName,
        Predicate::NotBlank,
        "Organization name is required",
    ),
    Rule::new(Field::Industry, Predicate::NotBlank, "Industry is required"),
    Rule::new(
        Field::InfrastructureEnvironment,
        Predicate::Chosen,
        "Infrastructure environment is required",
    ),
];

const TEAM: &[Rule] = &[
    Rule::new(
        Field::IncidentCommander,
        Predicate::NotBlank,
        "Incident Commander is required",
    ),
    Rule::new(
        Field::SocAnalysts,
        Predicate::NotBlank,
        "SOC Analysts information is required",
    ),
    Rule::new(
        Field::CloudRemediationOwner,
        Predicate::NotBlank,
        "Cloud/Infrastructure Remediation Owner is required",
    ),
    Rule::new(
        Field::LegalComplianceOwner,
        Predicate::NotBlank,
        "Legal/Compliance Owner is required",
    ),
];

const SEVERITY: &[Rule] = &[
    Rule::new(
        Field::SeverityLevels,
        Predicate::AnySelected,
        "At least one severity level must be selected",
    ),
    Rule::new(
        Field::SeverityDetermination,
        Predicate::NotBlank,
        "Severity determination criteria is required",
    ),
];

const ESCALATION: &[Rule] = &[
    Rule::new(
        Field::EscalationMatrix,
        Predicate::NotBlank,
        "Escalation matrix is required",
    ),
    Rule::new(
        Field::CommunicationChannels,
        Predicate::AnySelected,
        "At least one communication channel must be selected",
    ),
    Rule::new(
        Field::CriticalIncidentNotifications,
        Predicate::NotBlank,
        "Critical incident notification list is required",
    ),
];

const EXECUTION: &[Rule] = &[
    Rule::new(
        Field::MaintainsForensicEvidence,
        Predicate::Answered,
        "Please indicate if forensic evidence is maintained",
    ),
    Rule::new(
        Field::ForensicEvidenceLocation,
        Predicate::NotBlankWhenYes(Field::MaintainsForensicEvidence),
        "Forensic evidence location is required",
    ),
    Rule::new(
        Field::ConductPostIncidentReviews,
        Predicate::Answered,
        "Please indicate if post-incident reviews are conducted",
    ),
];

const OUTPUT: &[Rule] = &[Rule::new(
    Field::OutputFormat,
    Predicate::Chosen,
    "Output format is required",
)];

/// The rule table for `section`. Preview has none.
pub fn rules_for(section: Section) -> &'static [Rule] {
    match section {
        Section::Organization => ORGANIZATION,
        Section::Team => TEAM,
        Section::Severity => SEVERITY,
        Section::Escalation => ESCALATION,
        Section::Execution => EXECUTION,
        Section::Output => OUTPUT,
        Section::Preview => &[],
    }
}

// ─── Validation ──────────────────────────────────────────────────────

/// Messages for every rule of `section` that `answers` violates, in table order.
pub fn validate(section: Section, answers: &AnswerSet) -> Vec<String> {
    rules_for(section)
        .iter()
        .filter(|rule| !rule.is_satisfied(answers))
        .map(|rule| rule.message.to_string())
        .collect()
}

/// Errors of every input section concatenated in section order.
pub fn validate_all(answers: &AnswerSet) -> Vec<String> {
    Section::INPUT
        .iter()
        .flat_map(|section| validate(*section, answers))
        .collect()
}
