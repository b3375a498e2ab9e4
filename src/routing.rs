//! Application router configuration with public and admin-only route definitions.

use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{AuthState, admin_guard},
    dashboard::get_dashboard_page,
    endpoints,
    error_pages::get_404_not_found,
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    record::{
        create_collection_endpoint, create_expense_endpoint, delete_record_endpoint,
        get_edit_record_page, update_record_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::LOG_IN, get(get_log_in_page).post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out));

    // `route_layer` so that unknown paths still fall through to the 404 page
    // instead of being redirected by the guard.
    let admin_routes = Router::new()
        .route(endpoints::ADD_COLLECTION, post(create_collection_endpoint))
        .route(endpoints::ADD_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::DELETE_RECORD, get(delete_record_endpoint))
        .route(
            endpoints::EDIT_RECORD,
            get(get_edit_record_page).post(update_record_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(
            AuthState::from_ref(&state),
            admin_guard,
        ));

    admin_routes
        .merge(public_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
