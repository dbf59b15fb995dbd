//! Answers-file generation and scripted wizard sessions against stub generators.

use std::sync::atomic::{AtomicUsize, Ordering};

use rforge_cli::generate::generate_document;
use rforge_cli::wizard::Wizard;
use rforge_core::{AnswerSet, GeneratedDocument, Section, TemplateOptions, TriState};
use rforge_state::{DocumentGenerator, FormSession, GenerationOutcome};

struct StubGenerator {
    outcome: GenerationOutcome,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn new(outcome: GenerationOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    fn plan() -> Self {
        Self::new(GenerationOutcome::Generated(GeneratedDocument::text(
            "PLAN BODY", "plan.txt",
        )))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentGenerator for StubGenerator {
    async fn generate(&self, _answers: &AnswerSet) -> GenerationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

fn complete_answers() -> AnswerSet {
    let mut a = AnswerSet::new();
    a.organization_name = "Acme".into();
    a.industry = "Finance".into();
    a.infrastructure_environment = "AWS".into();
    a.incident_commander = "Dana".into();
    a.soc_analysts = "Lee\nKim".into();
    a.cloud_remediation_owner = "Ops".into();
    a.legal_compliance_owner = "Legal".into();
    a.severity_levels = ["High"].into_iter().collect();
    a.severity_determination = "Impact based".into();
    a.escalation_matrix = "L1 -> L2".into();
    a.communication_channels = ["Email"].into_iter().collect();
    a.critical_incident_notifications = "CISO".into();
    a.maintains_forensic_evidence = TriState::No;
    a.conduct_post_incident_reviews = TriState::Yes;
    a.output_format = "txt".into();
    a
}

// ── generate ─────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_saves_document_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::plan();
    let mut out = Vec::new();

    let code = generate_document(complete_answers(), &generator, dir.path(), &mut out)
        .await
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(generator.calls(), 1);
    let saved = dir.path().join("plan.txt");
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "PLAN BODY");
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Saved"), "{out}");
    assert!(out.contains("plan.txt"), "{out}");
}

#[tokio::test]
async fn generate_stops_at_first_incomplete_section() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::plan();
    let mut answers = complete_answers();
    answers.incident_commander = "   ".into();
    answers.severity_levels = Default::default();
    let mut out = Vec::new();

    let code = generate_document(answers, &generator, dir.path(), &mut out)
        .await
        .unwrap();

    assert_eq!(code, 1);
    assert_eq!(generator.calls(), 0);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Section 2."), "{out}");
    assert!(out.contains("Incident Commander is required"), "{out}");
    assert!(!out.contains("At least one severity level"), "{out}");
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn generate_reports_backend_rejection() {
    let dir = tempfile::tempdir().unwrap();
    let generator =
        StubGenerator::new(GenerationOutcome::Rejected(vec!["Industry is invalid".into()]));
    let mut out = Vec::new();

    let code = generate_document(complete_answers(), &generator, dir.path(), &mut out)
        .await
        .unwrap();

    assert_eq!(code, 1);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("rejected"), "{out}");
    assert!(out.contains("Industry is invalid"), "{out}");
}

#[tokio::test]
async fn generate_reports_unreachable_backend() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::new(GenerationOutcome::Unreachable("backend down".into()));
    let mut out = Vec::new();

    let code = generate_document(complete_answers(), &generator, dir.path(), &mut out)
        .await
        .unwrap();

    assert_eq!(code, 1);
    assert!(String::from_utf8(out).unwrap().contains("backend down"));
}

// ── wizard ───────────────────────────────────────────────────────────

async fn run_script(
    script: &str,
    session: &mut FormSession,
    generator: &StubGenerator,
    output_dir: &std::path::Path,
) -> String {
    let mut out = Vec::new();
    {
        let mut wizard = Wizard::new(
            script.as_bytes(),
            &mut out,
            TemplateOptions::default(),
            output_dir.to_path_buf(),
        );
        wizard.run(session, generator).await.unwrap();
    }
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn wizard_walks_the_questionnaire_and_saves_the_plan() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::plan();
    let mut session = FormSession::new();

    let script = "\
1 Acme Corp
2 Finance
3 1
:next
1 Dana
2 Lee\\nKim
3 Ops
4 Legal
:next
1 4
2 Impact based
:next
1 L1 -> L2
2 3
3 CISO
:next
1 no
3 yes
:next
1 2
:next
:submit
";
    let out = run_script(script, &mut session, &generator, dir.path()).await;

    assert_eq!(generator.calls(), 1, "{out}");
    assert_eq!(session.section(), Section::Preview);
    assert_eq!(session.answers().soc_analysts, "Lee\nKim");
    assert_eq!(session.answers().infrastructure_environment, "AWS");
    assert_eq!(session.answers().output_format, "txt");
    assert!(session.answers().severity_levels.contains("Critical"));
    assert!(session.answers().communication_channels.contains("Slack"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("plan.txt")).unwrap(),
        "PLAN BODY"
    );
    assert!(out.contains("All sections are filled in"), "{out}");
    assert!(out.contains("  | PLAN BODY"), "{out}");
    assert!(out.trim_end().ends_with("Bye."), "{out}");
}

#[tokio::test]
async fn wizard_shows_errors_and_holds_the_section() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::plan();
    let mut session = FormSession::new();

    let out = run_script(":next\n:jump 3\n", &mut session, &generator, dir.path()).await;

    assert_eq!(session.section(), Section::Organization);
    assert!(out.contains("Please fix:"), "{out}");
    assert!(out.contains("  ! Organization name is required"), "{out}");
    assert!(out.contains("Section 3 has not been reached yet."), "{out}");
}

#[tokio::test]
async fn wizard_submit_with_gaps_never_calls_the_generator() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::plan();
    let mut session = FormSession::new();

    let out = run_script("1 Acme\n:submit\n:quit\n", &mut session, &generator, dir.path()).await;

    assert_eq!(generator.calls(), 0);
    assert!(out.contains("Submission failed:"), "{out}");
    assert!(out.contains("  ! Industry is required"), "{out}");
    assert_eq!(session.answers().organization_name, "Acme");
}

#[tokio::test]
async fn wizard_reset_after_preview_starts_over() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::plan();
    let mut session = FormSession::with_answers(complete_answers());

    let out = run_script(":submit\n:reset\n", &mut session, &generator, dir.path()).await;

    assert_eq!(generator.calls(), 1, "{out}");
    assert_eq!(session.section(), Section::Organization);
    assert!(session.document().is_none());
    assert_eq!(session.answers(), &AnswerSet::new());
}

#[tokio::test]
async fn wizard_rejects_unknown_input_and_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::plan();
    let mut session = FormSession::new();

    let out = run_script("hello\n:launch\n9 x\n", &mut session, &generator, dir.path()).await;

    assert!(out.contains("expected `<field number> <value>`"), "{out}");
    assert!(out.contains("unknown command: :launch"), "{out}");
    assert!(out.contains("There is no field 9 in this section."), "{out}");
    assert_eq!(session.answers(), &AnswerSet::new());
}
