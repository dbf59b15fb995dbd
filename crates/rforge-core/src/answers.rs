//! # Answer Set
//!
//! The single mutable record holding every questionnaire answer for one
//! session. It is created with defaults at session start, mutated by
//! field-level edits, and replaced wholesale on reset.
//!
//! ## Field Kinds
//!
//! | Kind | Rust type | Wire form |
//! |------|-----------|-----------|
//! | Text / multi-line text | `String` | string, may be empty |
//! | Single choice | `String` | string, empty when unset |
//! | Multi choice | `MultiChoice` | list of strings, no duplicates |
//! | Tri-state | `TriState` | `true` / `false`, omitted when unset |
//!
//! Keys on the wire are camelCase (`organizationName`, `socAnalysts`, ...),
//! matching what the document generator expects.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ForgeError;

/// Maximum length (in characters) of a single-line text answer after sanitization.
pub const MAX_TEXT_LENGTH: usize = 500;

/// Maximum length (in characters) of a multi-line text answer after sanitization.
pub const MAX_MULTILINE_LENGTH: usize = 2000;

/// Output format selected in a fresh answer set.
pub const DEFAULT_OUTPUT_FORMAT: &str = "md";

// ─── TriState ────────────────────────────────────────────────────────

/// A yes/no answer that may not have been given yet.
///
/// `Unset` is distinct from `No`: a section owning an unset tri-state
/// cannot be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    /// No answer given.
    #[default]
    Unset,
    /// Answered yes.
    Yes,
    /// Answered no.
    No,
}

impl TriState {
    /// Whether an answer (yes or no) has been given.
    pub fn is_set(&self) -> bool {
        !self.is_unset()
    }

    /// Whether no answer has been given.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Whether the answer is yes.
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }

    /// The answer as an optional bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Yes => Some(true),
            Self::No => Some(false),
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::Yes,
            Some(false) => Self::No,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        Self::from(Some(value))
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unset => "unset",
            Self::Yes => "yes",
            Self::No => "no",
        };
        f.write_str(s)
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Self::from)
    }
}

// ─── MultiChoice ─────────────────────────────────────────────────────

/// A duplicate-free set of selected option values.
///
/// Insertion order carries no meaning; the set serializes as a sorted list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiChoice(BTreeSet<String>);

impl MultiChoice {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a value. Returns `false` if it was already selected.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.0.insert(value.into())
    }

    /// Deselect a value. Returns `false` if it was not selected.
    pub fn remove(&mut self, value: &str) -> bool {
        self.0.remove(value)
    }

    /// Select or deselect a value, as a checkbox toggle would.
    pub fn set(&mut self, value: impl Into<String>, checked: bool) {
        let value = value.into();
        if checked {
            self.0.insert(value);
        } else {
            self.0.remove(&value);
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the selected values in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for MultiChoice {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// ─── Fields ──────────────────────────────────────────────────────────

/// The semantic kind of a questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    MultilineText,
    /// One value drawn from an option list.
    SingleChoice,
    /// Any number of values drawn from an option list.
    MultiChoice,
    /// Yes / no / unset.
    TriState,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::MultilineText => "multi-line text",
            Self::SingleChoice => "single choice",
            Self::MultiChoice => "multi choice",
            Self::TriState => "tri-state",
        };
        f.write_str(s)
    }
}

/// Every field of the answer set, in questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    OrganizationName,
    Industry,
    InfrastructureEnvironment,
    IncidentCommander,
    SocAnalysts,
    CloudRemediationOwner,
    LegalComplianceOwner,
    SeverityLevels,
    SeverityDetermination,
    EscalationMatrix,
    CommunicationChannels,
    CriticalIncidentNotifications,
    MaintainsForensicEvidence,
    ForensicEvidenceLocation,
    ConductPostIncidentReviews,
    OutputFormat,
}

impl Field {
    /// All fields, in questionnaire order.
    pub const ALL: [Field; 16] = [
        Field::OrganizationName,
        Field::Industry,
        Field::InfrastructureEnvironment,
        Field::IncidentCommander,
        Field::SocAnalysts,
        Field::CloudRemediationOwner,
        Field::LegalComplianceOwner,
        Field::SeverityLevels,
        Field::SeverityDetermination,
        Field::EscalationMatrix,
        Field::CommunicationChannels,
        Field::CriticalIncidentNotifications,
        Field::MaintainsForensicEvidence,
        Field::ForensicEvidenceLocation,
        Field::ConductPostIncidentReviews,
        Field::OutputFormat,
    ];

    /// The camelCase key used on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            Self::OrganizationName => "organizationName",
            Self::Industry => "industry",
            Self::InfrastructureEnvironment => "infrastructureEnvironment",
            Self::IncidentCommander => "incidentCommander",
            Self::SocAnalysts => "socAnalysts",
            Self::CloudRemediationOwner => "cloudRemediationOwner",
            Self::LegalComplianceOwner => "legalComplianceOwner",
            Self::SeverityLevels => "severityLevels",
            Self::SeverityDetermination => "severityDetermination",
            Self::EscalationMatrix => "escalationMatrix",
            Self::CommunicationChannels => "communicationChannels",
            Self::CriticalIncidentNotifications => "criticalIncidentNotifications",
            Self::MaintainsForensicEvidence => "maintainsForensicEvidence",
            Self::ForensicEvidenceLocation => "forensicEvidenceLocation",
            Self::ConductPostIncidentReviews => "conductPostIncidentReviews",
            Self::OutputFormat => "outputFormat",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::OrganizationName
            | Self::Industry
            | Self::IncidentCommander
            | Self::CloudRemediationOwner
            | Self::LegalComplianceOwner
            | Self::ForensicEvidenceLocation => FieldKind::Text,
            Self::SocAnalysts
            | Self::SeverityDetermination
            | Self::EscalationMatrix
            | Self::CriticalIncidentNotifications => FieldKind::MultilineText,
            Self::InfrastructureEnvironment | Self::OutputFormat => FieldKind::SingleChoice,
            Self::SeverityLevels | Self::CommunicationChannels => FieldKind::MultiChoice,
            Self::MaintainsForensicEvidence | Self::ConductPostIncidentReviews => {
                FieldKind::TriState
            }
        }
    }

    /// The question shown to the person filling in the questionnaire.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::OrganizationName => "What is the name of your organization?",
            Self::Industry => "Which industry does your organization operate in?",
            Self::InfrastructureEnvironment => "What is your primary infrastructure environment?",
            Self::IncidentCommander => "Who is the Incident Commander for security incidents?",
            Self::SocAnalysts => "Who are the SOC Analysts involved in incident response?",
            Self::CloudRemediationOwner => {
                "Who is responsible for cloud or infrastructure remediation?"
            }
            Self::LegalComplianceOwner => {
                "Who handles legal, compliance, or regulatory coordination?"
            }
            Self::SeverityLevels => "What incident severity levels does your organization use?",
            Self::SeverityDetermination => {
                "Briefly describe how severity is determined in your organization."
            }
            Self::EscalationMatrix => "What is the escalation matrix for security incidents?",
            Self::CommunicationChannels => {
                "Which communication channels are used during incidents?"
            }
            Self::CriticalIncidentNotifications => {
                "Who must be notified during a critical security incident?"
            }
            Self::MaintainsForensicEvidence => {
                "Does your organization maintain forensic evidence during incidents?"
            }
            Self::ForensicEvidenceLocation => "Where is forensic evidence stored?",
            Self::ConductPostIncidentReviews => {
                "Does your organization conduct post-incident reviews?"
            }
            Self::OutputFormat => "Which output format should the plan use?",
        }
    }

    /// Parse a wire key into a field.
    pub fn from_key(key: &str) -> Result<Self, ForgeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key() == key)
            .ok_or_else(|| ForgeError::UnknownField(key.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

// ─── Edits ───────────────────────────────────────────────────────────

/// A single field-level edit, as produced by one user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Replace a text or multi-line text answer.
    SetText { field: Field, value: String },
    /// Replace a single-choice answer. An empty value clears it.
    SetChoice { field: Field, value: String },
    /// Check or uncheck one value of a multi-choice answer.
    Toggle {
        field: Field,
        choice: String,
        checked: bool,
    },
    /// Answer (or clear) a tri-state question.
    SetTriState { field: Field, value: TriState },
}

impl FieldEdit {
    pub fn text(field: Field, value: impl Into<String>) -> Self {
        Self::SetText {
            field,
            value: value.into(),
        }
    }

    pub fn choice(field: Field, value: impl Into<String>) -> Self {
        Self::SetChoice {
            field,
            value: value.into(),
        }
    }

    pub fn toggle(field: Field, choice: impl Into<String>, checked: bool) -> Self {
        Self::Toggle {
            field,
            choice: choice.into(),
            checked,
        }
    }

    pub fn tri_state(field: Field, value: impl Into<TriState>) -> Self {
        Self::SetTriState {
            field,
            value: value.into(),
        }
    }

    /// The field this edit targets.
    pub fn field(&self) -> Field {
        match self {
            Self::SetText { field, .. }
            | Self::SetChoice { field, .. }
            | Self::Toggle { field, .. }
            | Self::SetTriState { field, .. } => *field,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::SetText { .. } => "text",
            Self::SetChoice { .. } => "choice",
            Self::Toggle { .. } => "toggle",
            Self::SetTriState { .. } => "tri-state",
        }
    }
}

// ─── AnswerSet ───────────────────────────────────────────────────────

/// The full questionnaire answer record.
///
/// `Default` yields the session-start state: empty text, empty selections,
/// unset tri-states and `outputFormat = "md"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSet {
    // Organization
    pub organization_name: String,
    pub industry: String,
    pub infrastructure_environment: String,

    // Team
    pub incident_commander: String,
    pub soc_analysts: String,
    pub cloud_remediation_owner: String,
    pub legal_compliance_owner: String,

    // Severity
    pub severity_levels: MultiChoice,
    pub severity_determination: String,

    // Escalation
    pub escalation_matrix: String,
    pub communication_channels: MultiChoice,
    pub critical_incident_notifications: String,

    // Execution
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub maintains_forensic_evidence: TriState,
    pub forensic_evidence_location: String,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub conduct_post_incident_reviews: TriState,

    // Output
    pub output_format: String,
}

impl Default for AnswerSet {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            industry: String::new(),
            infrastructure_environment: String::new(),
            incident_commander: String::new(),
            soc_analysts: String::new(),
            cloud_remediation_owner: String::new(),
            legal_compliance_owner: String::new(),
            severity_levels: MultiChoice::new(),
            severity_determination: String::new(),
            escalation_matrix: String::new(),
            communication_channels: MultiChoice::new(),
            critical_incident_notifications: String::new(),
            maintains_forensic_evidence: TriState::Unset,
            forensic_evidence_location: String::new(),
            conduct_post_incident_reviews: TriState::Unset,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

impl AnswerSet {
    /// A fresh answer set with session-start defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one field-level edit.
    ///
    /// Fails without modifying anything if the edit kind does not fit the
    /// field kind (e.g. toggling a text field).
    pub fn apply(&mut self, edit: FieldEdit) -> Result<(), ForgeError> {
        let field = edit.field();
        let kind = field.kind();
        let mismatch = |edit: &FieldEdit| ForgeError::InvalidEdit {
            field: field.key(),
            kind,
            edit: edit.name(),
        };

        match (kind, &edit) {
            (FieldKind::Text | FieldKind::MultilineText, FieldEdit::SetText { value, .. })
            | (FieldKind::SingleChoice, FieldEdit::SetChoice { value, .. }) => {
                let slot = self.text_slot_mut(field).ok_or_else(|| mismatch(&edit))?;
                slot.clone_from(value);
            }
            (FieldKind::MultiChoice, FieldEdit::Toggle { choice, checked, .. }) => {
                let slot = self.choice_slot_mut(field).ok_or_else(|| mismatch(&edit))?;
                slot.set(choice.clone(), *checked);
            }
            (FieldKind::TriState, FieldEdit::SetTriState { value, .. }) => {
                let slot = self.tri_state_slot_mut(field).ok_or_else(|| mismatch(&edit))?;
                *slot = *value;
            }
            _ => return Err(mismatch(&edit)),
        }
        Ok(())
    }

    /// The value of a text or single-choice field.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::OrganizationName => Some(&self.organization_name),
            Field::Industry => Some(&self.industry),
            Field::InfrastructureEnvironment => Some(&self.infrastructure_environment),
            Field::IncidentCommander => Some(&self.incident_commander),
            Field::SocAnalysts => Some(&self.soc_analysts),
            Field::CloudRemediationOwner => Some(&self.cloud_remediation_owner),
            Field::LegalComplianceOwner => Some(&self.legal_compliance_owner),
            Field::SeverityDetermination => Some(&self.severity_determination),
            Field::EscalationMatrix => Some(&self.escalation_matrix),
            Field::CriticalIncidentNotifications => Some(&self.critical_incident_notifications),
            Field::ForensicEvidenceLocation => Some(&self.forensic_evidence_location),
            Field::OutputFormat => Some(&self.output_format),
            Field::SeverityLevels
            | Field::CommunicationChannels
            | Field::MaintainsForensicEvidence
            | Field::ConductPostIncidentReviews => None,
        }
        .map(String::as_str)
    }

    /// The selection of a multi-choice field.
    pub fn choices(&self, field: Field) -> Option<&MultiChoice> {
        match field {
            Field::SeverityLevels => Some(&self.severity_levels),
            Field::CommunicationChannels => Some(&self.communication_channels),
            _ => None,
        }
    }

    /// The answer of a tri-state field.
    pub fn tri_state(&self, field: Field) -> Option<TriState> {
        match field {
            Field::MaintainsForensicEvidence => Some(self.maintains_forensic_evidence),
            Field::ConductPostIncidentReviews => Some(self.conduct_post_incident_reviews),
            _ => None,
        }
    }

    /// A one-line rendering of a field's current value, for display.
    pub fn display_value(&self, field: Field) -> String {
        if let Some(text) = self.text(field) {
            return text.to_string();
        }
        if let Some(choices) = self.choices(field) {
            return choices.iter().collect::<Vec<_>>().join(", ");
        }
        self.tri_state(field)
            .map(|t| t.to_string())
            .unwrap_or_default()
    }

    /// A copy with every text answer trimmed and capped at its length limit.
    ///
    /// Single-line answers keep at most [`MAX_TEXT_LENGTH`] characters,
    /// multi-line answers at most [`MAX_MULTILINE_LENGTH`].
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for field in Field::ALL {
            let limit = match field.kind() {
                FieldKind::Text | FieldKind::SingleChoice => MAX_TEXT_LENGTH,
                FieldKind::MultilineText => MAX_MULTILINE_LENGTH,
                FieldKind::MultiChoice | FieldKind::TriState => continue,
            };
            if let Some(slot) = out.text_slot_mut(field) {
                *slot = truncate_chars(slot.trim(), limit);
            }
        }
        out
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::OrganizationName => Some(&mut self.organization_name),
            Field::Industry => Some(&mut self.industry),
            Field::InfrastructureEnvironment => Some(&mut self.infrastructure_environment),
            Field::IncidentCommander => Some(&mut self.incident_commander),
            Field::SocAnalysts => Some(&mut self.soc_analysts),
            Field::CloudRemediationOwner => Some(&mut self.cloud_remediation_owner),
            Field::LegalComplianceOwner => Some(&mut self.legal_compliance_owner),
            Field::SeverityDetermination => Some(&mut self.severity_determination),
            Field::EscalationMatrix => Some(&mut self.escalation_matrix),
            Field::CriticalIncidentNotifications => {
                Some(&mut self.critical_incident_notifications)
            }
            Field::ForensicEvidenceLocation => Some(&mut self.forensic_evidence_location),
            Field::OutputFormat => Some(&mut self.output_format),
            _ => None,
        }
    }

    fn choice_slot_mut(&mut self, field: Field) -> Option<&mut MultiChoice> {
        match field {
            Field::SeverityLevels => Some(&mut self.severity_levels),
            Field::CommunicationChannels => Some(&mut self.communication_channels),
            _ => None,
        }
    }

    fn tri_state_slot_mut(&mut self, field: Field) -> Option<&mut TriState> {
        match field {
            Field::MaintainsForensicEvidence => Some(&mut self.maintains_forensic_evidence),
            Field::ConductPostIncidentReviews => Some(&mut self.conduct_post_incident_reviews),
            _ => None,
        }
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sanitized text never exceeds its limit and has no outer whitespace.
        #[test]
        fn sanitized_respects_limits(name in "\\PC{0,700}", matrix in "\\PC{0,2300}") {
            let mut answers = AnswerSet::new();
            answers.organization_name = name;
            answers.escalation_matrix = matrix;
            let clean = answers.sanitized();
            prop_assert!(clean.organization_name.chars().count() <= MAX_TEXT_LENGTH);
            prop_assert!(clean.escalation_matrix.chars().count() <= MAX_MULTILINE_LENGTH);
            prop_assert_eq!(clean.industry.as_str(), "");
        }

        /// Sanitizing an already-short, trimmed answer changes nothing.
        #[test]
        fn sanitized_keeps_clean_short_text(name in "[A-Za-z][A-Za-z ]{0,40}[A-Za-z]") {
            let mut answers = AnswerSet::new();
            answers.organization_name = name.clone();
            prop_assert_eq!(answers.sanitized().organization_name, name);
        }
    }

    #[test]
    fn default_answer_set_matches_session_start_state() {
        let answers = AnswerSet::new();
        assert!(answers.organization_name.is_empty());
        assert!(answers.severity_levels.is_empty());
        assert_eq!(answers.maintains_forensic_evidence, TriState::Unset);
        assert_eq!(answers.conduct_post_incident_reviews, TriState::Unset);
        assert_eq!(answers.output_format, "md");
    }

    #[test]
    fn apply_text_edit() {
        let mut answers = AnswerSet::new();
        answers
            .apply(FieldEdit::text(Field::OrganizationName, "Acme Corp"))
            .unwrap();
        assert_eq!(answers.organization_name, "Acme Corp");
    }

    #[test]
    fn apply_choice_edit() {
        let mut answers = AnswerSet::new();
        answers
            .apply(FieldEdit::choice(Field::InfrastructureEnvironment, "AWS"))
            .unwrap();
        assert_eq!(answers.infrastructure_environment, "AWS");
    }

    #[test]
    fn toggle_adds_and_removes_without_duplicates() {
        let mut answers = AnswerSet::new();
        answers
            .apply(FieldEdit::toggle(Field::SeverityLevels, "High", true))
            .unwrap();
        answers
            .apply(FieldEdit::toggle(Field::SeverityLevels, "High", true))
            .unwrap();
        assert_eq!(answers.severity_levels.len(), 1);

        answers
            .apply(FieldEdit::toggle(Field::SeverityLevels, "High", false))
            .unwrap();
        assert!(answers.severity_levels.is_empty());
    }

    #[test]
    fn tri_state_edit() {
        let mut answers = AnswerSet::new();
        answers
            .apply(FieldEdit::tri_state(Field::MaintainsForensicEvidence, false))
            .unwrap();
        assert_eq!(answers.maintains_forensic_evidence, TriState::No);
        assert!(answers.maintains_forensic_evidence.is_set());
    }

    #[test]
    fn mismatched_edit_is_rejected_and_leaves_answers_untouched() {
        let mut answers = AnswerSet::new();
        let result = answers.apply(FieldEdit::toggle(Field::OrganizationName, "x", true));
        assert!(matches!(result, Err(ForgeError::InvalidEdit { .. })));

        let result = answers.apply(FieldEdit::text(Field::OutputFormat, "pdf"));
        assert!(result.is_err());
        assert_eq!(answers, AnswerSet::new());
    }

    #[test]
    fn field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()).unwrap(), field);
        }
        assert!(Field::from_key("organizationLogo").is_err());
    }

    #[test]
    fn unset_tri_state_is_absent_on_the_wire() {
        let json = serde_json::to_value(AnswerSet::new()).unwrap();
        assert!(json.get("maintainsForensicEvidence").is_none());
        assert!(json.get("conductPostIncidentReviews").is_none());
        assert_eq!(json["severityLevels"], serde_json::json!([]));
        assert_eq!(json["outputFormat"], "md");
    }

    #[test]
    fn set_tri_state_serializes_as_bool() {
        let mut answers = AnswerSet::new();
        answers.maintains_forensic_evidence = TriState::Yes;
        answers.conduct_post_incident_reviews = TriState::No;
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["maintainsForensicEvidence"], true);
        assert_eq!(json["conductPostIncidentReviews"], false);
    }

    #[test]
    fn null_tri_state_deserializes_as_unset() {
        let answers: AnswerSet = serde_json::from_value(serde_json::json!({
            "organizationName": "Acme",
            "maintainsForensicEvidence": null,
            "severityLevels": ["High", "Low", "High"]
        }))
        .unwrap();
        assert_eq!(answers.organization_name, "Acme");
        assert_eq!(answers.maintains_forensic_evidence, TriState::Unset);
        assert_eq!(answers.severity_levels.len(), 2);
        assert_eq!(answers.output_format, "md");
    }

    #[test]
    fn sanitized_trims_and_caps_text() {
        let mut answers = AnswerSet::new();
        answers.organization_name = format!("  {}  ", "é".repeat(MAX_TEXT_LENGTH + 10));
        answers.escalation_matrix = "x".repeat(MAX_MULTILINE_LENGTH + 1);
        answers.industry = "  Finance\n".into();

        let clean = answers.sanitized();
        assert_eq!(clean.organization_name.chars().count(), MAX_TEXT_LENGTH);
        assert_eq!(clean.escalation_matrix.len(), MAX_MULTILINE_LENGTH);
        assert_eq!(clean.industry, "Finance");
    }

    #[test]
    fn display_value_covers_every_kind() {
        let mut answers = AnswerSet::new();
        answers.communication_channels = ["Slack", "Email"].into_iter().collect();
        answers.conduct_post_incident_reviews = TriState::Yes;
        assert_eq!(
            answers.display_value(Field::CommunicationChannels),
            "Email, Slack"
        );
        assert_eq!(answers.display_value(Field::ConductPostIncidentReviews), "yes");
        assert_eq!(answers.display_value(Field::OutputFormat), "md");
    }
}
