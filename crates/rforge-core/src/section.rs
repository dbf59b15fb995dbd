//! # Questionnaire Sections
//!
//! The fixed sequence of seven stages a session moves through:
//!
//! ```text
//! Organization ─▶ Team ─▶ Severity ─▶ Escalation ─▶ Execution ─▶ Output ══▶ Preview
//!      0           1         2            3             4           5          6
//! ```
//!
//! Stages 0..=5 collect input. Preview (6) is terminal and is entered only
//! by a successful submission (`══▶`), never by ordinary navigation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::Field;
use crate::error::ForgeError;

/// One stage of the questionnaire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Organization information.
    #[default]
    Organization,
    /// Security team structure.
    Team,
    /// Incident severity classification.
    Severity,
    /// Escalation and communication.
    Escalation,
    /// Incident response execution.
    Execution,
    /// Output preferences.
    Output,
    /// Preview and download (terminal).
    Preview,
}

impl Section {
    /// All sections in order.
    pub const ALL: [Section; 7] = [
        Section::Organization,
        Section::Team,
        Section::Severity,
        Section::Escalation,
        Section::Execution,
        Section::Output,
        Section::Preview,
    ];

    /// The input sections (everything but Preview), in order.
    pub const INPUT: [Section; 6] = [
        Section::Organization,
        Section::Team,
        Section::Severity,
        Section::Escalation,
        Section::Execution,
        Section::Output,
    ];

    /// The last section reachable by ordinary forward navigation.
    pub const LAST_INPUT: Section = Section::Output;

    pub fn index(&self) -> usize {
        match self {
            Self::Organization => 0,
            Self::Team => 1,
            Self::Severity => 2,
            Self::Escalation => 3,
            Self::Execution => 4,
            Self::Output => 5,
            Self::Preview => 6,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, ForgeError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ForgeError::InvalidSection(index))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Organization => "Organization Information",
            Self::Team => "Security Team Structure",
            Self::Severity => "Incident Severity",
            Self::Escalation => "Escalation & Communication",
            Self::Execution => "Response Execution",
            Self::Output => "Output Preferences",
            Self::Preview => "Preview & Download",
        }
    }

    /// The following section, if any. `Output.next()` is `Preview`.
    pub fn next(&self) -> Option<Section> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The preceding section, if any.
    pub fn previous(&self) -> Option<Section> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Preview)
    }

    /// The answer-set fields owned by this section, in prompt order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Organization => &[
                Field::OrganizationName,
                Field::Industry,
                Field::InfrastructureEnvironment,
            ],
            Self::Team => &[
                Field::IncidentCommander,
                Field::SocAnalysts,
                Field::CloudRemediationOwner,
                Field::LegalComplianceOwner,
            ],
            Self::Severity => &[Field::SeverityLevels, Field::SeverityDetermination],
            Self::Escalation => &[
                Field::EscalationMatrix,
                Field::CommunicationChannels,
                Field::CriticalIncidentNotifications,
            ],
            Self::Execution => &[
                Field::MaintainsForensicEvidence,
                Field::ForensicEvidenceLocation,
                Field::ConductPostIncidentReviews,
            ],
            Self::Output => &[Field::OutputFormat],
            Self::Preview => &[],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
