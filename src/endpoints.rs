//! The endpoint URIs.
//!
//! For endpoints that take parameters, e.g., '/edit/{kind}/{id}', use [format_endpoint].

use std::fmt::Display;

/// The dashboard, visible to everyone.
pub const ROOT: &str = "/";
/// The route for getting the log-in form and submitting it.
pub const LOG_IN: &str = "/login";
/// The route for ending the admin session.
pub const LOG_OUT: &str = "/logout";
/// The route for adding a collection record.
pub const ADD_COLLECTION: &str = "/add_collection";
/// The route for adding an expense record.
pub const ADD_EXPENSE: &str = "/add_expense";
/// The route for deleting a record of either kind.
pub const DELETE_RECORD: &str = "/delete/{kind}/{id}";
/// The route for the edit form of a record and for submitting it.
pub const EDIT_RECORD: &str = "/edit/{kind}/{id}";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameters in `endpoint_path` with `params`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/edit/{kind}/{id}', '{kind}' and '{id}' are parameters.
///
/// Parameters without a matching value are left as is, and extra values are ignored.
pub fn format_endpoint(endpoint_path: &str, params: &[&dyn Display]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut params = params.iter();
    let mut rest = endpoint_path;

    while let Some(param_start) = rest.find('{') {
        let Some(param_len) = rest[param_start..].find('}') else {
            break;
        };
        let param_end = param_start + param_len + 1;

        formatted.push_str(&rest[..param_start]);
        match params.next() {
            Some(value) => formatted.push_str(&value.to_string()),
            None => formatted.push_str(&rest[param_start..param_end]),
        }
        rest = &rest[param_end..];
    }

    formatted.push_str(rest);
    formatted
}
