//! User-facing notifications. Every outcome the screens report ends up as one of
//! these; the GUI shows them as modal alerts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
    pub button: String,
}

impl Notice {
    pub fn new(
        kind: NoticeKind,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            text: text.into(),
            button: "OK".to_string(),
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, text)
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, text)
    }

    pub fn with_button(mut self, button: impl Into<String>) -> Self {
        self.button = button.into();
        self
    }
}
