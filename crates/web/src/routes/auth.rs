//! Authentication route handlers.
//!
//! Login, registration and logout. Failures redirect back to the form with a
//! short error code in the query string; the page handler maps codes to
//! user-facing messages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Map an error code from the query string to a user-facing message.
fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid username or password.".to_string(),
        "username_taken" => "This username is already taken.".to_string(),
        "invalid_username" => {
            "Usernames may only contain letters, digits, '.', '-' and '_'.".to_string()
        }
        "password_too_short" => "The password must be at least 8 characters.".to_string(),
        _ => "Something went wrong, please try again.".to_string(),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(error_message),
        success: query
            .success
            .map(|_| "Account created, you can sign in now.".to_string()),
    }
}

/// Handle login form submission.
///
/// On success a fresh session is issued, bound to the user's id and username
/// and pinned to a fixed one-hour expiry.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                username: user.username,
            };

            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/login?error=session").into_response();
            }

            Redirect::to("/studio").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            Redirect::to("/login?error=internal").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle registration form submission.
///
/// The new account is not logged in; the user is sent to the login page.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.register(&form.username, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "new user registered");
            Redirect::to("/login?success=registered").into_response()
        }
        Err(AuthError::DuplicateUsername) => {
            Redirect::to("/register?error=username_taken").into_response()
        }
        Err(AuthError::InvalidUsername(_)) => {
            Redirect::to("/register?error=invalid_username").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/register?error=password_too_short").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            Redirect::to("/register?error=internal").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the server-side session record, not just the cookie.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/").into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_known_codes() {
        assert!(error_message("credentials").contains("Invalid username"));
        assert!(error_message("username_taken").contains("already taken"));
        assert!(error_message("password_too_short").contains("8 characters"));
    }

    #[test]
    fn test_error_message_unknown_code_is_generic() {
        assert!(error_message("whatever").contains("try again"));
    }

    #[test]
    fn test_login_template_renders_error() {
        let template = LoginTemplate {
            error: Some("Invalid username or password.".to_string()),
            success: None,
        };
        let html = template.render().unwrap();
        assert!(html.contains("Invalid username or password."));
    }

    #[test]
    fn test_register_template_renders() {
        let template = RegisterTemplate { error: None };
        assert!(template.render().is_ok());
    }
}
