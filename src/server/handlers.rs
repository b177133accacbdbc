//! HTTP handlers for the billed pages
//!
//! Each handler guards its route with the request's session, feeds the
//! event into a container and turns the resulting intent into a response.

use axum::{
    Json,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::containers::{
    Bills, BillsList, FormField, NewBill, NewBillForm, SelectedFile, handle_click_logout,
};
use crate::core::error::{BilledError, SessionError};
use crate::core::{Access, BillStore, Intent, Route, Session, guard};
use crate::server::extractors::{CurrentSession, SubmitBody};
use crate::views::{BillsPage, Views};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BillStore>,
    pub views: Arc<Views>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    fn new_form(&self) -> NewBillForm {
        NewBillForm::from_config(&self.config)
    }
}

/// Turn an intent into the matching HTTP answer
pub fn intent_response(intent: Intent) -> Response {
    match intent {
        Intent::Navigate { route } => Redirect::to(route.http_path()).into_response(),
        Intent::Logout => Redirect::to(Route::Login.http_path()).into_response(),
        other => Json(other).into_response(),
    }
}

/// Run the guard; `Err` carries the redirect to answer with
fn authorize(route: Route, session: &CurrentSession) -> Result<&Session, Response> {
    match guard(route, session.get()) {
        Access::Allow => session
            .get()
            .ok_or_else(|| BilledError::from(SessionError::Missing).into_response()),
        Access::Redirect(target) => Err(intent_response(Intent::navigate(target))),
    }
}

/// Form fields as posted by the page
#[derive(Debug, Default, Deserialize)]
pub struct FieldsRequest {
    #[serde(default)]
    pub fields: IndexMap<FormField, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsResponse {
    pub file_input_enabled: bool,
}

/// Receipt picked in the file input
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRequest {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub accepted: bool,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Submitted form plus the upload it refers to
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub fields: IndexMap<FormField, String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// The same submission as the page's url-encoded form sends it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitForm {
    #[serde(default, rename = "type")]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: String,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl From<SubmitForm> for SubmitRequest {
    fn from(form: SubmitForm) -> Self {
        let fields = IndexMap::from([
            (FormField::ExpenseType, form.expense_type),
            (FormField::Name, form.name),
            (FormField::Date, form.date),
            (FormField::Amount, form.amount),
            (FormField::Vat, form.vat),
            (FormField::Pct, form.pct),
            (FormField::Commentary, form.commentary),
        ]);

        Self {
            fields,
            key: non_empty(form.key),
            file_url: non_empty(form.file_url),
            file_name: non_empty(form.file_name),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReceiptQuery {
    pub url: String,
    #[serde(default = "default_modal_width")]
    pub width: u32,
}

fn default_modal_width() -> u32 {
    800
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "billed"
    }))
}

pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>, BilledError> {
    Ok(Html(state.views.login_page()?))
}

pub async fn bills_page(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, BilledError> {
    if let Err(redirect) = authorize(Route::Bills, &session) {
        return Ok(redirect);
    }

    let wait = Duration::from_millis(state.config.bills.list_timeout_ms);
    let page = match tokio::time::timeout(wait, Bills.get_bills(state.store.as_ref())).await {
        Ok(Ok(rows)) => BillsPage::Loaded(rows),
        Ok(Err(error)) => BillsPage::Error(error.to_string()),
        Err(_) => {
            tracing::warn!(timeout_ms = state.config.bills.list_timeout_ms, "bills still loading");
            BillsPage::Loading
        }
    };

    Ok(Html(state.views.bills_page(&page)?).into_response())
}

pub async fn receipt_preview(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<ReceiptQuery>,
) -> Result<Response, BilledError> {
    if let Err(redirect) = authorize(Route::Bills, &session) {
        return Ok(redirect);
    }

    let html = state.views.receipt_preview(&query.url, query.width)?;
    Ok(Html(html).into_response())
}

pub async fn new_bill_page(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, BilledError> {
    if let Err(redirect) = authorize(Route::NewBill, &session) {
        return Ok(redirect);
    }

    Ok(Html(state.views.new_bill_page(&state.new_form())?).into_response())
}

pub async fn new_bill_input(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<FieldsRequest>,
) -> Response {
    if let Err(redirect) = authorize(Route::NewBill, &session) {
        return redirect;
    }

    let mut form = state.new_form();
    for (field, value) in request.fields {
        form.handle_input(field, value);
    }

    Json(FieldsResponse {
        file_input_enabled: form.file_input_enabled(),
    })
    .into_response()
}

pub async fn new_bill_file(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<FileRequest>,
) -> Response {
    let session = match authorize(Route::NewBill, &session) {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let file = request.file_name.map(|name| SelectedFile {
        name,
        content: request.content.unwrap_or_default().into_bytes(),
    });

    let mut form = state.new_form();
    let intent = NewBill::new(state.store.as_ref(), session)
        .change_file(&mut form, file)
        .await;

    let response = match intent {
        Intent::Upload { file_name } => FileResponse {
            accepted: true,
            file_name,
            key: form.bill_id().map(str::to_string),
            file_url: form.file_url().map(str::to_string),
            error: None,
        },
        Intent::RejectFile { file_name } => FileResponse {
            accepted: false,
            file_name,
            key: None,
            file_url: None,
            error: Some(crate::core::validation::BAD_FORMAT_MESSAGE.to_string()),
        },
        other => return intent_response(other),
    };

    Json(response).into_response()
}

pub async fn submit_new_bill(
    State(state): State<AppState>,
    session: CurrentSession,
    SubmitBody(request): SubmitBody,
) -> Response {
    let session = match authorize(Route::NewBill, &session) {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let mut form = state.new_form();
    for (field, value) in request.fields {
        form.set(field, value);
    }
    if let (Some(key), Some(file_url), Some(file_name)) =
        (request.key, request.file_url, request.file_name)
    {
        form.restore_upload(key, file_url, file_name);
    }

    let intent = NewBill::new(state.store.as_ref(), session)
        .submit(&form)
        .await;
    intent_response(intent)
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, BilledError> {
    if let Err(redirect) = authorize(Route::Dashboard, &session) {
        return Ok(redirect);
    }

    let records = state.store.list().await?;
    let pending = BillsList::from_records(&records).pending_count();

    Ok(Html(state.views.dashboard_page(pending)?).into_response())
}

pub async fn logout(CurrentSession(mut session): CurrentSession) -> Response {
    intent_response(handle_click_logout(&mut session))
}
