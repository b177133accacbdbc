//! # Billed
//!
//! Employee expense-report front end: a bill list, a new-bill form with
//! receipt upload gating, and session-guarded routing, backed by a mock
//! bill store.
//!
//! ## Features
//!
//! - **Pure containers**: page handlers take a view-model and return an
//!   [`Intent`](core::Intent); no DOM, no globals
//! - **Explicit session**: the signed-in user is a [`Session`](core::Session)
//!   value passed to whoever needs it
//! - **Two form gates**: required fields enable the receipt input, and the
//!   receipt extension is checked against a whitelist
//! - **Template views**: pages rendered with Tera, carrying `data-testid` hooks
//! - **Mock store**: in-memory [`BillStore`](core::BillStore) with call
//!   counting and one-shot failure injection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billed::prelude::*;
//!
//! let store = InMemoryBillStore::with_records("https://localhost:3456/images", fixtures::bill_records());
//! let session = Session::new(UserType::Employee, "a@a");
//!
//! let mut form = NewBillForm::from_config(&AppConfig::default_config());
//! form.handle_input(FormField::Name, "Taxi");
//!
//! let page = NewBill::new(&store, &session);
//! page.change_file(&mut form, Some(SelectedFile { name: "receipt.png".into(), content: vec![] })).await;
//! let next = page.submit(&form).await; // Intent::Navigate { route: Route::Bills }
//! ```

pub mod config;
pub mod containers;
pub mod core;
pub mod server;
pub mod storage;
pub mod views;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Access, AccessPolicy, Bill, BillStatus, BillStore, BilledError, EXPENSE_TYPES, Intent,
        Route, Session, StoreError, UploadReceipt, UploadRequest, UserType, guard,
    };

    // === Containers ===
    pub use crate::containers::{
        BillRow, Bills, BillsList, FormField, NewBill, NewBillForm, SelectedFile,
        handle_click_logout,
    };

    // === Views ===
    pub use crate::views::{BillsPage, Views};

    // === Storage ===
    pub use crate::storage::{InMemoryBillStore, StoreCalls, fixtures};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, SESSION_HEADER, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
