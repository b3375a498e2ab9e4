//! Full-page responses for requests that cannot be served normally.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

const DEFAULT_SERVER_ERROR_DESCRIPTION: &str = "Sorry, something went wrong.";
const DEFAULT_SERVER_ERROR_FIX: &str = "Try again later or check the server logs";

/// Router fallback for paths that match no route.
pub async fn get_404_not_found() -> Response {
    not_found_page()
}

/// The 404 page, also used for unknown record types and missing records.
pub fn not_found_page() -> Response {
    error_page(
        StatusCode::NOT_FOUND,
        "Not Found",
        "Something's missing.",
        "Sorry, we can't find that page or record.",
    )
}

/// The 400 page for form data that could not be used.
pub fn bad_request_page(message: &str) -> Response {
    error_page(
        StatusCode::BAD_REQUEST,
        "Bad Request",
        "Invalid form data",
        message,
    )
}

/// The 500 page. Pass `None` for a generic message that reveals nothing about the cause.
pub fn internal_server_error_page(description_and_fix: Option<(&str, &str)>) -> Response {
    let (description, fix) =
        description_and_fix.unwrap_or((DEFAULT_SERVER_ERROR_DESCRIPTION, DEFAULT_SERVER_ERROR_FIX));

    error_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        description,
        fix,
    )
}

fn error_page(status: StatusCode, title: &str, description: &str, fix: &str) -> Response {
    let markup = error_view(title, status.as_str(), description, fix);

    (status, Html(markup.into_string())).into_response()
}

#[cfg(test)]
mod error_page_tests {
    use axum::http::StatusCode;

    use crate::test_utils::{assert_valid_html, must_get_text, parse_html_document};

    use super::{bad_request_page, get_404_not_found, internal_server_error_page};

    #[tokio::test]
    async fn fallback_is_not_found() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(must_get_text(&document, "h1"), "404");
    }

    #[tokio::test]
    async fn bad_request_shows_message() {
        let response = bad_request_page("Amount is not a number");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let document = parse_html_document(response).await;
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("Amount is not a number"));
    }

    #[tokio::test]
    async fn internal_server_error_defaults_to_generic_message() {
        let response = internal_server_error_page(None);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let document = parse_html_document(response).await;
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("Sorry, something went wrong."));
    }
}
