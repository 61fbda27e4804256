//! Contact form: field state and the submission lifecycle.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──1500ms, Ok──▶ Submitted ──3000ms──▶ Idle
//!                       │
//!                       └──1500ms, Err──▶ Failed ──submit──▶ Submitting
//! ```
//!
//! Both delays are [`Scheduler`] tasks owned by the form. `teardown()`
//! cancels whatever is pending, and a torn-down form ignores every later
//! call, so no transition can land after its owner is gone.

use std::fmt;

use crate::scheduler::{Scheduler, TaskHandle};

/// Delay between `submit()` and the submission result.
pub const SUBMIT_DELAY_MS: f64 = 1500.0;

/// How long the "Message Sent!" acknowledgement stays before the form returns.
pub const ACKNOWLEDGE_MS: f64 = 3000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// All fields in tab order.
    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::Email, Field::Subject, Field::Message]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "Your email",
            Field::Subject => "Subject",
            Field::Message => "Your message",
        }
    }

    /// Next field in tab order, None after the last.
    pub fn next(&self) -> Option<Field> {
        let all = Field::all();
        let i = all.iter().position(|f| f == self)?;
        all.get(i + 1).copied()
    }

    /// Previous field in tab order, None before the first.
    pub fn prev(&self) -> Option<Field> {
        let all = Field::all();
        let i = all.iter().position(|f| f == self)?;
        i.checked_sub(1).map(|j| all[j])
    }

    pub fn index(&self) -> usize {
        Field::all().iter().position(|f| f == self).unwrap_or(0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Why a field would block submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    MalformedEmail,
}

impl FieldProblem {
    pub fn hint(&self) -> &'static str {
        match self {
            FieldProblem::Missing => "Please fill out this field.",
            FieldProblem::MalformedEmail => "Please include an '@' in the email address.",
        }
    }
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        Field::all().iter().all(|f| self.get(*f).is_empty())
    }

    /// First field, in tab order, that would block submission: every field
    /// is required and the email needs a `local@domain` shape.
    pub fn first_problem(&self) -> Option<(Field, FieldProblem)> {
        for field in Field::all() {
            let value = self.get(*field);
            if value.trim().is_empty() {
                return Some((*field, FieldProblem::Missing));
            }
            if *field == Field::Email && !looks_like_email(value) {
                return Some((*field, FieldProblem::MalformedEmail));
            }
        }
        None
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Submitted,
    /// Only reachable through a `Submitter` that reports an error.
    Failed,
}

/// User-visible acknowledgement.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn message_sent() -> Self {
        Self {
            title: "Message sent!".to_string(),
            description: "I'll get back to you as soon as possible.".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmitError(pub String);

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission failed: {}", self.0)
    }
}

/// Delivers a completed form. Called once per accepted submission, when the
/// submit delay elapses.
pub trait Submitter {
    fn submit(&mut self, fields: &ContactFields) -> Result<(), SubmitError>;
}

/// No network: every submission succeeds.
pub struct SimulatedSubmitter;

impl Submitter for SimulatedSubmitter {
    fn submit(&mut self, _fields: &ContactFields) -> Result<(), SubmitError> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ContactTimer {
    Complete,
    Reset,
}

/// Things the owner must surface after [`ContactForm::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum ContactEvent {
    Acknowledged(Toast),
    Failed(SubmitError),
    Ready,
}

pub struct ContactForm<S: Submitter = SimulatedSubmitter> {
    fields: ContactFields,
    state: SubmissionState,
    timers: Scheduler<ContactTimer>,
    pending: Option<TaskHandle>,
    submitter: S,
    torn_down: bool,
}

impl ContactForm<SimulatedSubmitter> {
    pub fn new() -> Self {
        Self::with_submitter(SimulatedSubmitter)
    }
}

impl<S: Submitter> ContactForm<S> {
    pub fn with_submitter(submitter: S) -> Self {
        Self {
            fields: ContactFields::default(),
            state: SubmissionState::Idle,
            timers: Scheduler::new(),
            pending: None,
            submitter,
            torn_down: false,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether a delayed transition is still scheduled.
    #[cfg(test)]
    pub fn has_pending_transition(&self) -> bool {
        self.pending.is_some_and(|h| self.timers.is_pending(h))
    }

    /// Replace one field's value. Refused while submitting.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.torn_down || self.state == SubmissionState::Submitting {
            return false;
        }
        *self.fields.slot(field) = value.into();
        true
    }

    /// Start a submission. A second call while one is in flight is dropped.
    /// Returns whether the call was accepted.
    pub fn submit(&mut self, now_ms: f64) -> bool {
        if self.torn_down || self.state == SubmissionState::Submitting {
            return false;
        }
        // A pending Submitted → Idle reset must not fire into the new attempt.
        self.cancel_pending();
        self.state = SubmissionState::Submitting;
        self.pending = Some(self.timers.schedule(now_ms, SUBMIT_DELAY_MS, ContactTimer::Complete));
        true
    }

    /// Fire every transition due at `now_ms`.
    pub fn advance(&mut self, now_ms: f64) -> Vec<ContactEvent> {
        if self.torn_down {
            return Vec::new();
        }
        let mut events = Vec::new();
        for timer in self.timers.take_due(now_ms) {
            self.pending = None;
            match (timer, self.state) {
                (ContactTimer::Complete, SubmissionState::Submitting) => {
                    match self.submitter.submit(&self.fields) {
                        Ok(()) => {
                            self.state = SubmissionState::Submitted;
                            self.fields = ContactFields::default();
                            self.pending = Some(self.timers.schedule(
                                now_ms,
                                ACKNOWLEDGE_MS,
                                ContactTimer::Reset,
                            ));
                            events.push(ContactEvent::Acknowledged(Toast::message_sent()));
                        }
                        Err(e) => {
                            self.state = SubmissionState::Failed;
                            events.push(ContactEvent::Failed(e));
                        }
                    }
                }
                (ContactTimer::Reset, SubmissionState::Submitted) => {
                    self.state = SubmissionState::Idle;
                    events.push(ContactEvent::Ready);
                }
                _ => {}
            }
        }
        events
    }

    fn cancel_pending(&mut self) {
        if let Some(h) = self.pending.take() {
            self.timers.cancel(h);
        }
    }

    /// Owner is going away: cancel pending transitions and freeze.
    pub fn teardown(&mut self) {
        self.cancel_pending();
        self.timers.cancel_all();
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.edit(Field::Name, "Ada");
        form.edit(Field::Email, "ada@x.com");
        form.edit(Field::Subject, "Hi");
        form.edit(Field::Message, "Hello");
        form
    }

    struct FailingSubmitter;

    impl Submitter for FailingSubmitter {
        fn submit(&mut self, _fields: &ContactFields) -> Result<(), SubmitError> {
            Err(SubmitError("offline".into()))
        }
    }

    // ── fields ─────────────────────────────────────────────────

    #[test]
    fn fields_start_empty() {
        let form = ContactForm::new();
        assert!(form.fields().is_empty());
        assert_eq!(form.state(), SubmissionState::Idle);
    }

    #[test]
    fn edit_touches_only_named_field() {
        let mut form = filled();
        assert!(form.edit(Field::Subject, "Hello there"));
        assert_eq!(
            form.fields(),
            &ContactFields {
                name: "Ada".into(),
                email: "ada@x.com".into(),
                subject: "Hello there".into(),
                message: "Hello".into(),
            }
        );
    }

    #[test]
    fn latest_edit_wins() {
        let mut form = ContactForm::new();
        for v in ["A", "Ad", "Ada", "Ad"] {
            form.edit(Field::Name, v);
        }
        assert_eq!(form.fields().name, "Ad");
    }

    #[test]
    fn field_order() {
        assert_eq!(Field::Name.next(), Some(Field::Email));
        assert_eq!(Field::Message.next(), None);
        assert_eq!(Field::Name.prev(), None);
        assert_eq!(Field::Message.prev(), Some(Field::Subject));
    }

    #[test]
    fn first_problem_follows_tab_order() {
        let mut fields = ContactFields::default();
        assert_eq!(fields.first_problem(), Some((Field::Name, FieldProblem::Missing)));
        fields.name = "Ada".into();
        fields.email = "ada".into();
        assert_eq!(
            fields.first_problem(),
            Some((Field::Email, FieldProblem::MalformedEmail))
        );
        fields.email = "ada@x.com".into();
        fields.subject = "   ".into();
        assert_eq!(fields.first_problem(), Some((Field::Subject, FieldProblem::Missing)));
        fields.subject = "Hi".into();
        fields.message = "Hello".into();
        assert_eq!(fields.first_problem(), None);
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b"));
        assert!(!looks_like_email("@b"));
        assert!(!looks_like_email("a@"));
        assert!(!looks_like_email("a@b@c"));
        assert!(!looks_like_email("plain"));
    }

    // ── lifecycle ──────────────────────────────────────────────

    #[test]
    fn end_to_end_submission() {
        let mut form = filled();
        assert!(form.submit(0.0));
        assert_eq!(form.state(), SubmissionState::Submitting);
        // Fields are not cleared yet
        assert_eq!(form.fields().name, "Ada");

        assert!(form.advance(1499.0).is_empty());
        assert_eq!(form.state(), SubmissionState::Submitting);

        let events = form.advance(1500.0);
        assert_eq!(events, vec![ContactEvent::Acknowledged(Toast::message_sent())]);
        assert_eq!(form.state(), SubmissionState::Submitted);
        assert!(form.fields().is_empty());

        assert!(form.advance(4499.0).is_empty());
        assert_eq!(form.state(), SubmissionState::Submitted);
        assert_eq!(form.advance(4500.0), vec![ContactEvent::Ready]);
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(!form.has_pending_transition());
    }

    #[test]
    fn double_submit_is_dropped() {
        let mut form = filled();
        assert!(form.submit(0.0));
        let before = form.fields().clone();
        assert!(!form.submit(100.0));
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert_eq!(form.fields(), &before);
        // Completion still lands at the first call's deadline, only once
        assert_eq!(form.advance(1500.0).len(), 1);
        assert!(form.advance(1600.0).is_empty());
    }

    #[test]
    fn edits_refused_while_submitting() {
        let mut form = filled();
        form.submit(0.0);
        assert!(!form.edit(Field::Message, "changed"));
        assert_eq!(form.fields().message, "Hello");
    }

    #[test]
    fn edits_allowed_after_acknowledgement() {
        let mut form = filled();
        form.submit(0.0);
        form.advance(1500.0);
        assert!(form.edit(Field::Name, "Grace"));
        assert_eq!(form.fields().name, "Grace");
    }

    #[test]
    fn resubmit_while_acknowledged_cancels_reset() {
        let mut form = filled();
        form.submit(0.0);
        form.advance(1500.0);
        form.edit(Field::Name, "Grace");
        assert!(form.submit(2000.0));
        // The old Submitted → Idle reset (due at 4500) must not fire
        assert!(form.advance(3400.0).is_empty());
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert_eq!(form.advance(3500.0).len(), 1);
        assert_eq!(form.state(), SubmissionState::Submitted);
    }

    #[test]
    fn teardown_while_submitting_freezes_everything() {
        let mut form = filled();
        form.submit(0.0);
        assert!(form.has_pending_transition());
        form.teardown();
        assert!(!form.has_pending_transition());

        assert!(form.advance(1500.0).is_empty());
        assert!(form.advance(10_000.0).is_empty());
        assert_ne!(form.state(), SubmissionState::Submitted);
        assert_eq!(form.fields().name, "Ada");
        assert!(!form.edit(Field::Name, "x"));
        assert!(!form.submit(20_000.0));
    }

    #[test]
    fn teardown_while_acknowledged_cancels_reset() {
        let mut form = filled();
        form.submit(0.0);
        form.advance(1500.0);
        form.teardown();
        assert!(form.advance(5000.0).is_empty());
        assert_eq!(form.state(), SubmissionState::Submitted);
    }

    #[test]
    fn failed_submission_keeps_fields_and_allows_retry() {
        let mut form = ContactForm::with_submitter(FailingSubmitter);
        form.edit(Field::Name, "Ada");
        form.submit(0.0);
        let events = form.advance(1500.0);
        assert_eq!(events, vec![ContactEvent::Failed(SubmitError("offline".into()))]);
        assert_eq!(form.state(), SubmissionState::Failed);
        assert_eq!(form.fields().name, "Ada");
        // No automatic retry
        assert!(form.advance(60_000.0).is_empty());
        assert!(form.submit(60_000.0));
        assert_eq!(form.state(), SubmissionState::Submitting);
    }
}
