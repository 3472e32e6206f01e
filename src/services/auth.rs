//! Auth service — login/register form validation.
//!
//! DESIGN
//! ======
//! There is no account store. A submitted form is validated locally, then
//! handed to the remote service; on success the shopper is redirected to the
//! shop after a short delay that the client performs.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures never touch session state. The only cross-field rule
//! is that a registration's confirm-password must equal its password.

use serde::{Deserialize, Serialize};

use super::notify::Notification;
use super::remote::{Credentials, Registration, RemoteError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthForm {
    #[serde(default)]
    pub mode: AuthMode,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// The shopper shown in the header after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedInUser {
    pub name: String,
    pub email: String,
}

/// Client-side navigation to perform after a delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub path: String,
    pub after_ms: u64,
}

/// Check required fields and the confirm-password rule.
///
/// # Errors
///
/// `MissingField` for a blank email, password, or (when registering) name;
/// `PasswordMismatch` when a registration's passwords differ.
pub fn validate(form: &AuthForm) -> Result<(), AuthError> {
    if form.mode == AuthMode::Register && form.name.trim().is_empty() {
        return Err(AuthError::MissingField("name"));
    }
    if form.email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if form.password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    if form.mode == AuthMode::Register && form.password != form.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    Ok(())
}

impl AuthForm {
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials { email: self.email.trim().to_owned(), password: self.password.clone() }
    }

    #[must_use]
    pub fn registration(&self) -> Registration {
        Registration {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        }
    }

    /// Registrations use the entered name; logins fall back to the email's
    /// local part since no account lookup exists.
    #[must_use]
    pub fn signed_in_user(&self) -> SignedInUser {
        let email = self.email.trim().to_owned();
        let name = match self.mode {
            AuthMode::Register => self.name.trim().to_owned(),
            AuthMode::Login => email.split('@').next().unwrap_or_default().to_owned(),
        };
        SignedInUser { name, email }
    }
}

#[must_use]
pub fn success_notification(mode: AuthMode) -> Notification {
    match mode {
        AuthMode::Login => Notification::info("Login realizado!", "Bem-vindo(a) de volta à Doces da Ana!"),
        AuthMode::Register => Notification::info("Conta criada!", "Sua conta foi criada com sucesso!"),
    }
}

/// Destructive notification describing a rejected form.
#[must_use]
pub fn rejection_notification(err: &AuthError) -> Notification {
    match err {
        AuthError::PasswordMismatch => Notification::destructive("Erro", "As senhas não coincidem."),
        AuthError::MissingField(field) => {
            Notification::destructive("Erro", format!("Preencha o campo obrigatório: {}.", field_label(field)))
        }
        AuthError::Remote(_) => Notification::destructive("Erro", "Não foi possível entrar agora. Tente novamente."),
    }
}

fn field_label(field: &str) -> &'static str {
    match field {
        "name" => "Nome completo",
        "email" => "Email",
        _ => "Senha",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(password: &str, confirm: &str) -> AuthForm {
        AuthForm {
            mode: AuthMode::Register,
            name: "Ana Souza".into(),
            email: "ana@doces.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn register_with_matching_passwords_is_valid() {
        assert_eq!(validate(&register_form("segredo", "segredo")), Ok(()));
    }

    #[test]
    fn register_with_mismatched_passwords_is_rejected() {
        assert_eq!(validate(&register_form("segredo", "outro")), Err(AuthError::PasswordMismatch));
    }

    #[test]
    fn login_ignores_confirm_password() {
        let form = AuthForm {
            mode: AuthMode::Login,
            email: "ana@doces.com".into(),
            password: "segredo".into(),
            confirm_password: "lixo".into(),
            ..AuthForm::default()
        };
        assert_eq!(validate(&form), Ok(()));
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let mut form = register_form("a", "a");
        form.name = "  ".into();
        assert_eq!(validate(&form), Err(AuthError::MissingField("name")));

        let form = AuthForm { mode: AuthMode::Login, password: "x".into(), ..AuthForm::default() };
        assert_eq!(validate(&form), Err(AuthError::MissingField("email")));

        let form = AuthForm { mode: AuthMode::Login, email: "a@b.c".into(), ..AuthForm::default() };
        assert_eq!(validate(&form), Err(AuthError::MissingField("password")));
    }

    #[test]
    fn signed_in_user_uses_name_or_email_local_part() {
        assert_eq!(register_form("a", "a").signed_in_user().name, "Ana Souza");
        let login = AuthForm { email: " maria@doces.com ".into(), password: "x".into(), ..AuthForm::default() };
        let user = login.signed_in_user();
        assert_eq!(user.name, "maria");
        assert_eq!(user.email, "maria@doces.com");
    }

    #[test]
    fn mismatch_notification_is_destructive() {
        let n = rejection_notification(&AuthError::PasswordMismatch);
        assert_eq!(n.description, "As senhas não coincidem.");
        assert_eq!(n.variant, crate::services::notify::Variant::Destructive);
    }

    #[test]
    fn mode_defaults_to_login_when_absent() {
        let form: AuthForm = serde_json::from_str(r#"{"email":"a@b.c","password":"x"}"#).unwrap();
        assert_eq!(form.mode, AuthMode::Login);
    }
}
