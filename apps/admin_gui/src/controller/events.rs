//! UI/backend events and error modeling for the admin GUI controller.

use std::path::PathBuf;

use client_core::{notice::Notice, ClientError, ClientResult, ErrorKind};
use shared::{
    domain::{EventId, OrderId},
    protocol::{Event, Order},
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    EventsLoaded {
        activation: u64,
        result: ClientResult<Vec<Event>>,
    },
    EventDeleted {
        activation: u64,
        id: EventId,
        result: ClientResult<()>,
    },
    OrdersLoaded {
        activation: u64,
        result: ClientResult<Vec<Order>>,
    },
    OrderDelivered {
        activation: u64,
        id: OrderId,
        result: ClientResult<()>,
    },
    ResetEmailSent(ClientResult<()>),
    PasswordReset(ClientResult<()>),
    ReportSaved(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Rejected,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Events,
    Orders,
    Account,
    Report,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err.kind() {
            ErrorKind::Transport => UiErrorCategory::Transport,
            ErrorKind::Rejected => UiErrorCategory::Rejected,
            ErrorKind::Validation => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.user_message(),
        }
    }

    /// Classifies free-form failures (IO, startup, queue) by their wording.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
            || message_lower.contains("conexión")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn to_notice(&self) -> Notice {
        let title = match (self.context, self.category) {
            (UiErrorContext::BackendStartup, _) => "Error al iniciar",
            (UiErrorContext::Report, _) => "No se pudo guardar el reporte",
            (_, UiErrorCategory::Validation) => "Error de validación",
            (_, UiErrorCategory::Transport) => "Error del sistema",
            _ => "Error",
        };
        Notice::error(title, self.message.clone())
    }
}

#[cfg(test)]
mod tests {
    use shared::error::{ApiException, ErrorCode};

    use super::*;

    #[test]
    fn client_errors_keep_their_kind() {
        let rejected: ClientError = ApiException::rejected("Correo no registrado").into();
        let err = UiError::from_client_error(UiErrorContext::Account, &rejected);
        assert_eq!(err.category(), UiErrorCategory::Rejected);
        assert_eq!(err.message(), "Correo no registrado");

        let invalid = ClientError::Validation("La contraseña es corta".to_string());
        let err = UiError::from_client_error(UiErrorContext::Account, &invalid);
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.to_notice().title, "Error de validación");

        let status: ClientError = ApiException::new(ErrorCode::Server, "HTTP 500").into();
        let err = UiError::from_client_error(UiErrorContext::Events, &status);
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::Events);
    }

    #[test]
    fn classifies_lost_command_queue_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            crate::controller::orchestration::QUEUE_DISCONNECTED,
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.to_notice().title, "Error al iniciar");
    }

    #[test]
    fn report_failures_get_their_own_title() {
        let err = UiError::from_message(UiErrorContext::Report, "failed to write report: denied");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.to_notice().title, "No se pudo guardar el reporte");
    }
}
