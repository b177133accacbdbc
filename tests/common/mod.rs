//! Shared helpers for integration tests
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use std::sync::Arc;

use billed::prelude::*;

pub const BASE_URL: &str = "https://localhost:3456/images";

pub fn employee() -> Session {
    Session::new(UserType::Employee, "a@a")
}

pub fn user() -> Session {
    Session::new(UserType::User, "a@a")
}

pub fn admin() -> Session {
    Session::new(UserType::Admin, "admin@company.tld")
}

pub fn seeded_store() -> InMemoryBillStore {
    InMemoryBillStore::with_records(BASE_URL, fixtures::bill_records())
}

/// Session header as the browser side sends it
pub fn session_header(session: &Session) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(SESSION_HEADER),
        HeaderValue::from_str(&session.to_json()).expect("session JSON is a valid header"),
    )
}

/// Test server over `store`; the store's clone stays inspectable from the test
pub fn create_test_server(store: InMemoryBillStore) -> TestServer {
    let shared: Arc<dyn BillStore> = Arc::new(store);
    let app = ServerBuilder::new()
        .with_shared_store(shared)
        .build()
        .expect("Failed to build app");

    TestServer::try_new(app).expect("Failed to create test server")
}

/// `data-date` values of the rendered rows, in page order
pub fn rendered_dates(html: &str) -> Vec<String> {
    html.split(r#"data-testid="formatted-date" data-date=""#)
        .skip(1)
        .filter_map(|chunk| chunk.split('"').next())
        .map(str::to_string)
        .collect()
}

/// A filled-in new-bill form
pub fn filled_form() -> NewBillForm {
    let mut form = NewBillForm::from_config(&AppConfig::default_config());
    form.set(FormField::ExpenseType, "Transports");
    form.set(FormField::Name, "Taxi");
    form.set(FormField::Date, "2022-01-25");
    form.set(FormField::Amount, "100");
    form.set(FormField::Vat, "80");
    form.set(FormField::Pct, "20");
    form.set(FormField::Commentary, "Test de Julien");
    form
}
