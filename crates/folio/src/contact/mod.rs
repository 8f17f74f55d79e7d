use std::time::Duration;

pub mod form;
pub mod info;
pub mod submit;

pub use form::{ContactForm, FormDraft, FormError, FormField, FormState, Notice, SubmitPhase};
pub use info::{ContactDetail, ContactInfo, DetailKind, SocialKind, SocialLink};
pub use submit::{Ack, SimulatedSubmitter, SubmissionError, Submitter};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);
pub const FIELD_STAGGER: Duration = Duration::from_millis(100);
pub const FIELD_DELAY: Duration = Duration::from_millis(200);
pub const DETAIL_STAGGER: Duration = Duration::from_millis(200);
