//! Router for the billed pages

use crate::server::handlers::{
    AppState, bills_page, dashboard_page, health_check, login_page, logout, new_bill_file,
    new_bill_input, new_bill_page, receipt_preview, submit_new_bill,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the page routes
///
/// - GET /health - Health check
/// - GET / - Login page
/// - GET /employee/bills - Bills list
/// - GET /employee/bills/receipt?url=..&width=.. - Receipt preview
/// - GET /employee/bill/new - New-bill form
/// - POST /employee/bill/new/input - Required-fields gate
/// - POST /employee/bill/new/file - File-format gate and upload
/// - POST /employee/bill/new - Submit
/// - GET /admin/dashboard - Admin landing page
/// - POST /logout - Drop the session
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(login_page))
        .route("/employee/bills", get(bills_page))
        .route("/employee/bills/receipt", get(receipt_preview))
        .route("/employee/bill/new", get(new_bill_page).post(submit_new_bill))
        .route("/employee/bill/new/input", post(new_bill_input))
        .route("/employee/bill/new/file", post(new_bill_file))
        .route("/admin/dashboard", get(dashboard_page))
        .route("/logout", post(logout))
        .with_state(state)
}
