use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, LoginResponse, SessionProbe, SignupRequest};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub student_id: Option<String>,
    pub major: Option<String>,
}

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Sends credentials; on success the session store records the user and backend session id.
/// Failure leaves the session untouched.
pub async fn login(state: &AppState, form: &LoginForm) -> AppResult<LoginResponse> {
    require(&form.email, "Email")?;
    require(&form.password, "Password")?;

    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };
    let response = state.api.login(&request).await?;
    state
        .session
        .login(response.user_id.clone(), state.api.session_id())?;
    Ok(response)
}

/// Message shown under the login form.
pub fn login_error_message(err: &AppError) -> String {
    match err {
        AppError::Unauthorized(_) => "Email or password is incorrect.".to_string(),
        other => other.user_message(),
    }
}

pub async fn signup(state: &AppState, form: &SignupForm) -> AppResult<()> {
    require(&form.name, "Name")?;
    require(&form.email, "Email")?;
    require(&form.password, "Password")?;
    if form.password != form.password_confirm {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }

    let request = SignupRequest {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        student_id: form.student_id.clone(),
        major: form.major.clone(),
    };
    match state.api.signup(&request).await {
        Ok(()) => {
            info!("signed up {}", request.email);
            Ok(())
        }
        Err(AppError::Conflict(_)) => Err(AppError::Conflict(
            "an account with this email already exists".to_string(),
        )),
        Err(e) => Err(e),
    }
}

pub fn logout(state: &AppState) -> AppResult<()> {
    state.session.logout()
}

/// Asks the backend whether the stored session is still valid and drops it locally if not.
pub async fn whoami(state: &AppState) -> AppResult<SessionProbe> {
    let probe = match state.api.probe_session().await {
        Ok(probe) => probe,
        Err(AppError::Unauthorized(_)) => SessionProbe {
            logged_in: false,
            user_id: None,
        },
        Err(e) => return Err(e),
    };
    if !probe.logged_in && state.session.is_logged_in() {
        warn!("backend no longer recognises the stored session; clearing it");
        state.session.logout()?;
    }
    Ok(probe)
}
