use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{format, ApiClient};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::navigation::Navigation;
use crate::session::TokenStore;

pub const LOGIN_ENDPOINT: &str = "/api/v1/auth/login";
pub const REGISTER_ENDPOINT: &str = "/api/v1/auth/register";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> ClientResult<()> {
        if self.password != self.confirm_password {
            return Err(ClientError::validation("Passwords do not match"));
        }
        Ok(())
    }
}

/// Exchange credentials for a session token and store it
pub async fn login(client: &ApiClient, email: &str, password: &str) -> ClientResult<String> {
    let response = client
        .post_json(LOGIN_ENDPOINT, &LoginRequest { email, password })
        .await?;
    let status = response.status();
    let body = format::read_json_lenient(response).await?;

    if !status.is_success() {
        let message = format::error_message(&body).unwrap_or_else(|| "Login failed".to_string());
        return Err(ClientError::api(status.as_u16(), message));
    }

    match body.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => {
            client.store().set_token(Some(token));
            tracing::info!("logged in as {}", email);
            Ok(token.to_string())
        }
        _ => Err(ClientError::api(status.as_u16(), "No token received from server")),
    }
}

/// Create an account. Does not log in; the caller moves on to the login page.
pub async fn register(client: &ApiClient, form: &RegisterForm) -> ClientResult<Value> {
    form.validate()?;

    let response = client.post_json(REGISTER_ENDPOINT, form).await?;
    let body = format::expect_success(response, "Registration failed").await?;
    tracing::info!("registered {}", form.email);
    Ok(body)
}

/// Drop the session and return the in-app navigation to the login page
pub fn logout(store: &dyn TokenStore, config: &ClientConfig) -> Navigation {
    store.clear_token();
    Navigation::push(config.routes.login_path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationKind;
    use crate::session::MemoryTokenStore;

    #[test]
    fn mismatched_passwords_rejected() {
        let form = RegisterForm {
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            password: "one".into(),
            confirm_password: "two".into(),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn register_payload_omits_confirmation() {
        let form = RegisterForm {
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"full_name": "Asha Rao", "email": "asha@example.com", "password": "secret"})
        );
    }

    #[test]
    fn logout_clears_and_pushes_login() {
        let store = MemoryTokenStore::with_token("abc");
        let nav = logout(&store, &ClientConfig::with_base_url("http://localhost:3000"));
        assert_eq!(store.get_token(), None);
        assert_eq!(nav.path, "/login");
        assert_eq!(nav.kind, NavigationKind::Push);
    }
}
