//! Account recovery: reset e-mail request and new-password submission.

use crate::{
    error::{ClientError, ClientResult, ErrorKind},
    notice::Notice,
};

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_PASSWORD_CHARS: usize = 10;

/// Checked before any request goes out.
pub fn validate_new_password(password: &str) -> ClientResult<()> {
    let chars = password.chars().count();
    if (MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(ClientError::Validation(format!(
            "La contraseña debe tener entre {MIN_PASSWORD_CHARS} y {MAX_PASSWORD_CHARS} caracteres."
        )))
    }
}

pub fn reset_email_notice(result: &ClientResult<()>) -> Notice {
    match result {
        Ok(()) => Notice::success(
            "Correo enviado",
            "Se ha enviado un correo para restablecer tu contraseña.",
        ),
        Err(err) => failure_notice(
            err,
            "Ocurrió un error al intentar enviar el correo. Intenta nuevamente más tarde.",
        ),
    }
}

pub fn password_reset_notice(result: &ClientResult<()>) -> Notice {
    match result {
        Ok(()) => Notice::success("Éxito", "Tu contraseña ha sido restablecida."),
        Err(err) => failure_notice(
            err,
            "Ocurrió un error al intentar restablecer la contraseña. Intenta nuevamente más tarde.",
        ),
    }
}

fn failure_notice(err: &ClientError, system_text: &str) -> Notice {
    match err.kind() {
        ErrorKind::Validation => {
            Notice::error("Error de validación", err.user_message()).with_button("Reintentar")
        }
        ErrorKind::Rejected => Notice::error("Error", err.user_message()).with_button("Reintentar"),
        ErrorKind::Transport => {
            tracing::error!("account request failed: {err}");
            Notice::error("Error del sistema", system_text).with_button("Entendido")
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::error::{ApiException, ErrorCode};

    use super::*;
    use crate::notice::NoticeKind;

    #[test]
    fn accepts_six_to_ten_characters() {
        assert!(validate_new_password("12345").is_err());
        assert!(validate_new_password("123456").is_ok());
        assert!(validate_new_password("ñandú1234").is_ok());
        assert!(validate_new_password("1234567890").is_ok());
        assert!(validate_new_password("12345678901").is_err());
    }

    #[test]
    fn maps_each_failure_kind_to_its_own_notice() {
        let validation = password_reset_notice(&validate_new_password("abc"));
        assert_eq!(validation.title, "Error de validación");
        assert_eq!(validation.button, "Reintentar");

        let rejected = password_reset_notice(&Err(ApiException::rejected("Token vencido").into()));
        assert_eq!(rejected.title, "Error");
        assert_eq!(rejected.text, "Token vencido");

        let system = reset_email_notice(&Err(ApiException::new(ErrorCode::Server, "HTTP 502").into()));
        assert_eq!(system.kind, NoticeKind::Error);
        assert_eq!(system.title, "Error del sistema");
        assert_eq!(system.button, "Entendido");
    }

    #[test]
    fn success_notices_use_success_kind() {
        assert_eq!(reset_email_notice(&Ok(())).kind, NoticeKind::Success);
        assert_eq!(password_reset_notice(&Ok(())).title, "Éxito");
    }
}
