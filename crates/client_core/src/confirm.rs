//! Two-step confirmation: a screen hands out a prompt, the UI suspends on it, and
//! the action only proceeds once the prompt is resolved as confirmed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation<T> {
    subject: T,
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl<T> Confirmation<T> {
    pub fn new(
        subject: T,
        title: impl Into<String>,
        text: impl Into<String>,
        confirm_label: impl Into<String>,
        cancel_label: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            title: title.into(),
            text: text.into(),
            confirm_label: confirm_label.into(),
            cancel_label: cancel_label.into(),
        }
    }

    pub fn subject(&self) -> &T {
        &self.subject
    }

    /// Consumes the prompt; yields the subject only when the user confirmed.
    pub fn resolve(self, decision: Decision) -> Option<T> {
        match decision {
            Decision::Confirmed => Some(self.subject),
            Decision::Cancelled => None,
        }
    }
}
