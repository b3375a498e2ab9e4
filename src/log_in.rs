//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The auth module handles the lower level credential and cookie logic.

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState,
    auth::{AdminCredentials, AuthContext, invalidate_session_cookie, set_session_cookie},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, form_card, password_input, text_input},
    navigation::NavBar,
};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect user ID or password.";
const INTERNAL_ERROR_MSG: &str = "An internal error occurred. Please try again later.";

fn log_in_form(user_id: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::LOG_IN)
            class="space-y-4 md:space-y-6"
        {
            (text_input("userid", "userid", "User ID", "text", user_id))

            (password_input(error_message))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Log in"
            }
        }
    }
}

fn log_in_view(user_id: &str, error_message: Option<&str>, is_admin: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::LOG_IN, is_admin).into_html();
    let form = log_in_form(user_id, error_message);

    let content = html! {
        (nav_bar)
        (form_card("Log in as admin", &form))
    };

    base("Log In", &content)
}

/// Display the log-in page.
pub async fn get_log_in_page(context: AuthContext) -> Markup {
    log_in_view("", None, context.is_admin)
}

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which the session cookie is valid.
    pub cookie_duration: Duration,
    /// The credentials to check the form against.
    pub admin_credentials: AdminCredentials,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            admin_credentials: state.admin_credentials.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation here since
/// it will be compared against the configured password hash.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInForm {
    /// The admin user ID.
    pub userid: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client is redirected to the dashboard.
/// Otherwise, the form is returned with an error message and any existing session is cleared.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(form): Form<LogInForm>,
) -> Response {
    let is_valid = match state.admin_credentials.verify(&form.userid, &form.password) {
        Ok(is_valid) => is_valid,
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return log_in_view(&form.userid, Some(INTERNAL_ERROR_MSG), false).into_response();
        }
    };

    if !is_valid {
        tracing::warn!("Failed log-in attempt for user ID {:?}", form.userid);
        return (
            invalidate_session_cookie(jar),
            log_in_view(&form.userid, Some(INVALID_CREDENTIALS_ERROR_MSG), false),
        )
            .into_response();
    }

    match set_session_cookie(jar.clone(), state.cookie_duration) {
        Ok(jar) => {
            tracing::info!("Admin logged in");
            (jar, Redirect::to(endpoints::ROOT)).into_response()
        }
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (
                invalidate_session_cookie(jar),
                log_in_view(&form.userid, Some(INTERNAL_ERROR_MSG), false),
            )
                .into_response()
        }
    }
}
