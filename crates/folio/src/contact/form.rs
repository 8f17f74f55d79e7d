use super::submit::{Ack, SubmissionError, Submitter};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::future::Future;
use std::sync::Arc;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Your Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormDraft {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn is_blank(&self) -> bool {
        FormField::iter().all(|f| self.get(f).is_empty())
    }

    /// Every field is required. Any non-empty value counts, whitespace included.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::iter()
            .filter(|&f| self.get(f).is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Outcome of the last submission, shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub draft: FormDraft,
    pub phase: SubmitPhase,
    pub notice: Option<Notice>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("A message is already being sent")]
    AlreadySubmitting,
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<FormField>),
    #[error("Contact form was closed before the submission finished")]
    Stale,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

struct Shared {
    state: FormState,
    live: bool,
}

/// Contact form state and its submission lifecycle.
///
/// Clones share one form. Once [`ContactForm::close`] is called, late
/// completions are dropped instead of touching the closed form.
pub struct ContactForm<S> {
    submitter: Arc<S>,
    shared: Arc<Mutex<Shared>>,
}

impl<S> Clone for ContactForm<S> {
    fn clone(&self) -> Self {
        Self {
            submitter: self.submitter.clone(),
            shared: self.shared.clone(),
        }
    }
}

impl<S: Submitter> ContactForm<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            submitter: Arc::new(submitter),
            shared: Arc::new(Mutex::new(Shared {
                state: FormState::default(),
                live: true,
            })),
        }
    }

    pub fn state(&self) -> FormState {
        self.shared.lock().state.clone()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.shared.lock().state.phase
    }

    pub fn draft(&self) -> FormDraft {
        self.shared.lock().state.draft.clone()
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Returns false when the edit was ignored because a send is in flight.
    pub fn update(&self, field: FormField, value: impl Into<String>) -> bool {
        let mut shared = self.shared.lock();
        if shared.state.phase == SubmitPhase::Submitting {
            return false;
        }
        shared.state.draft.set(field, value);
        true
    }

    pub fn dismiss_notice(&self) {
        self.shared.lock().state.notice = None;
    }

    /// Switches to `Submitting` right away and returns the future that
    /// delivers the draft and settles the form.
    pub fn submit(
        &self,
    ) -> Result<impl Future<Output = Result<Ack, FormError>> + Send + use<S>, FormError> {
        let draft = {
            let mut shared = self.shared.lock();
            if !shared.live {
                return Err(FormError::Stale);
            }
            if shared.state.phase == SubmitPhase::Submitting {
                return Err(FormError::AlreadySubmitting);
            }
            let missing = shared.state.draft.missing_fields();
            if !missing.is_empty() {
                return Err(FormError::MissingFields(missing));
            }
            shared.state.phase = SubmitPhase::Submitting;
            shared.state.notice = None;
            shared.state.draft.clone()
        };

        let submitter = self.submitter.clone();
        let shared = self.shared.clone();

        Ok(async move {
            let result = submitter.submit(draft).await;

            let mut shared = shared.lock();
            if !shared.live {
                log::debug!("Dropping submission result for a closed contact form");
                return Err(FormError::Stale);
            }
            shared.state.phase = SubmitPhase::Idle;
            match result {
                Ok(ack) => {
                    log::info!("Message {} sent", ack.id);
                    shared.state.draft = FormDraft::default();
                    shared.state.notice = Some(Notice::Sent);
                    Ok(ack)
                }
                Err(e) => {
                    log::error!("Failed to send message: {}", e);
                    shared.state.notice = Some(Notice::Failed(e.to_string()));
                    Err(FormError::Submission(e))
                }
            }
        })
    }

    /// Marks the form as discarded. Idempotent.
    pub fn close(&self) {
        self.shared.lock().live = false;
    }

    pub fn is_closed(&self) -> bool {
        !self.shared.lock().live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::submit::SimulatedSubmitter;
    use std::time::Duration;
    use tokio::time;

    struct FailingSubmitter;

    impl Submitter for FailingSubmitter {
        async fn submit(&self, _draft: FormDraft) -> Result<Ack, SubmissionError> {
            time::sleep(Duration::from_millis(10)).await;
            Err(SubmissionError::Unavailable("offline".to_string()))
        }
    }

    fn filled<S: Submitter>(form: &ContactForm<S>) {
        form.update(FormField::Name, "Ann");
        form.update(FormField::Email, "a@x.com");
        form.update(FormField::Subject, "Hi");
        form.update(FormField::Message, "Hello");
    }

    #[test]
    fn test_field_deserialization() {
        let cases = vec![
            ("\"name\"", FormField::Name),
            ("\"Email\"", FormField::Email),
            ("\"SUBJECT\"", FormField::Subject),
            ("\"message\"", FormField::Message),
        ];

        for (json, expected) in cases {
            let deserialized: FormField = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_draft_set_and_missing() {
        let mut draft = FormDraft::default();
        assert!(draft.is_blank());
        assert_eq!(draft.missing_fields().len(), 4);

        draft.set(FormField::Email, "a@x.com");
        draft.set(FormField::Subject, "   ");
        assert_eq!(draft.get(FormField::Email), "a@x.com");
        assert_eq!(
            draft.missing_fields(),
            vec![FormField::Name, FormField::Message]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_lifecycle_resets_draft() {
        let form = ContactForm::new(SimulatedSubmitter::new(Duration::from_millis(1500)));
        filled(&form);
        assert_eq!(
            form.draft(),
            FormDraft {
                name: "Ann".into(),
                email: "a@x.com".into(),
                subject: "Hi".into(),
                message: "Hello".into(),
            }
        );

        let pending = form.submit().unwrap();
        assert_eq!(form.phase(), SubmitPhase::Submitting);
        assert_eq!(form.submit().err(), Some(FormError::AlreadySubmitting));
        assert!(!form.update(FormField::Name, "Bob"));

        let ack = pending.await.unwrap();
        assert_eq!(ack.id, 1);

        let state = form.state();
        assert_eq!(state.phase, SubmitPhase::Idle);
        assert_eq!(state.draft, FormDraft::default());
        assert_eq!(state.notice, Some(Notice::Sent));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_fields_block_submit() {
        let form = ContactForm::new(SimulatedSubmitter::default());
        form.update(FormField::Name, "Ann");

        let err = form.submit().err();
        assert_eq!(
            err,
            Some(FormError::MissingFields(vec![
                FormField::Email,
                FormField::Subject,
                FormField::Message
            ]))
        );
        assert_eq!(form.phase(), SubmitPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_values_submit() {
        let form = ContactForm::new(SimulatedSubmitter::default());
        filled(&form);
        form.update(FormField::Subject, " ");

        let pending = form.submit().unwrap();
        assert_eq!(form.phase(), SubmitPhase::Submitting);
        pending.await.unwrap();
        assert_eq!(form.draft(), FormDraft::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_draft_and_reports() {
        let form = ContactForm::new(FailingSubmitter);
        filled(&form);
        let before = form.draft();

        let result = form.submit().unwrap().await;
        assert!(matches!(result, Err(FormError::Submission(_))));

        let state = form.state();
        assert_eq!(state.phase, SubmitPhase::Idle);
        assert_eq!(state.draft, before);
        assert!(matches!(state.notice, Some(Notice::Failed(ref msg)) if msg.contains("offline")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_after_close_is_dropped() {
        let form = ContactForm::new(SimulatedSubmitter::default());
        filled(&form);

        let task = tokio::spawn(form.submit().unwrap());
        time::sleep(Duration::from_millis(100)).await;
        form.close();
        form.close();

        let result = task.await.unwrap();
        assert_eq!(result, Err(FormError::Stale));

        let state = form.state();
        assert_eq!(state.phase, SubmitPhase::Submitting);
        assert_eq!(state.draft.name, "Ann");
        assert!(form.is_closed());
        assert_eq!(form.submit().err(), Some(FormError::Stale));
    }

    #[test]
    fn test_error_messages() {
        let err = FormError::MissingFields(vec![FormField::Name, FormField::Email]);
        assert_eq!(err.to_string(), "Missing required fields: name, email");
    }
}
