//! New-bill page container
//!
//! [`NewBillForm`] is the page's view-model. Its handlers are pure: they
//! update the model and return an [`Intent`]. [`NewBill`] runs the intents
//! that need the store (receipt upload, bill update).
//!
//! Two gates are evaluated independently:
//! - required fields: the file input stays disabled while any required
//!   field is empty;
//! - file format: a selected receipt must have an accepted extension,
//!   otherwise it is cleared and the inline error is shown.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::core::validation::{
    MISSING_FILE_NAME, extension_in, parse_amount, parse_pct, required,
};
use crate::core::{
    Bill, BillStatus, BillStore, EXPENSE_TYPES, Intent, Route, Session, UploadReceipt,
    UploadRequest,
};

/// Required fields of the new-bill form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    #[serde(rename = "type")]
    ExpenseType,
    Name,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::ExpenseType,
        FormField::Name,
        FormField::Date,
        FormField::Amount,
        FormField::Vat,
        FormField::Pct,
        FormField::Commentary,
    ];

    /// Test hook of the matching input
    pub fn test_id(&self) -> &'static str {
        match self {
            FormField::ExpenseType => "expense-type",
            FormField::Name => "expense-name",
            FormField::Date => "datepicker",
            FormField::Amount => "amount",
            FormField::Vat => "vat",
            FormField::Pct => "pct",
            FormField::Commentary => "commentary",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            FormField::ExpenseType => "type",
            FormField::Name => "name",
            FormField::Date => "date",
            FormField::Amount => "amount",
            FormField::Vat => "vat",
            FormField::Pct => "pct",
            FormField::Commentary => "commentary",
        }
    }
}

/// A file picked in the receipt input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Vec<u8>,
}

/// View-model of the new-bill form
#[derive(Debug, Clone)]
pub struct NewBillForm {
    fields: IndexMap<FormField, String>,
    accepted_extensions: Vec<String>,
    default_pct: u32,
    selected_file: Option<String>,
    file_error: bool,
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<String>,
}

impl NewBillForm {
    /// Empty form; the expense type select starts on its first option
    pub fn new(accepted_extensions: Vec<String>, default_pct: u32) -> Self {
        let mut fields: IndexMap<FormField, String> = FormField::ALL
            .iter()
            .map(|field| (*field, String::new()))
            .collect();
        fields.insert(FormField::ExpenseType, EXPENSE_TYPES[0].to_string());

        Self {
            fields,
            accepted_extensions,
            default_pct,
            selected_file: None,
            file_error: false,
            file_url: None,
            file_name: None,
            bill_id: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.uploads.accepted_extensions.clone(),
            config.bills.default_pct,
        )
    }

    pub fn value(&self, field: FormField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Fields in display order
    pub fn fields(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Set a field without re-evaluating anything
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Input event on a field: store the value and re-evaluate the
    /// required-fields gate
    ///
    /// Returns whether the file input is enabled afterwards.
    pub fn handle_input(&mut self, field: FormField, value: impl Into<String>) -> bool {
        self.set(field, value);
        self.file_input_enabled()
    }

    /// `true` when every required field is non-empty
    pub fn file_input_enabled(&self) -> bool {
        let check = required();
        self.fields
            .iter()
            .all(|(field, value)| check(field.key(), value).is_ok())
    }

    /// Change event on the receipt input
    ///
    /// A missing file is checked as `NULL.NULL`, which always fails.
    pub fn handle_change_file(&mut self, file_name: Option<&str>) -> Intent {
        let file_name = file_name
            .filter(|name| !name.is_empty())
            .unwrap_or(MISSING_FILE_NAME)
            .to_string();
        let check = extension_in(self.accepted_extensions.clone());

        match check("file", &file_name) {
            Ok(()) => {
                self.file_error = false;
                self.selected_file = Some(file_name.clone());
                Intent::Upload { file_name }
            }
            Err(_) => {
                self.file_error = true;
                self.selected_file = None;
                Intent::RejectFile { file_name }
            }
        }
    }

    /// Record the store's answer to an upload
    pub fn apply_upload(&mut self, receipt: UploadReceipt) {
        self.bill_id = Some(receipt.key);
        self.file_url = Some(receipt.file_url);
        self.file_name = self.selected_file.clone();
    }

    /// Restore a previous upload (the HTTP shell keeps no form state)
    pub fn restore_upload(&mut self, key: String, file_url: String, file_name: String) {
        self.selected_file = Some(file_name.clone());
        self.bill_id = Some(key);
        self.file_url = Some(file_url);
        self.file_name = Some(file_name);
    }

    pub fn file_error_visible(&self) -> bool {
        self.file_error
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    /// Whether an upload has completed
    pub fn file_uploaded(&self) -> bool {
        self.bill_id.is_some()
    }

    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    /// The bill this form submits, always pending
    pub fn bill(&self, session: &Session) -> Bill {
        let text = |field: FormField| Some(self.value(field).to_string());

        Bill {
            id: None,
            email: Some(session.email.clone()),
            expense_type: text(FormField::ExpenseType),
            name: text(FormField::Name),
            amount: parse_amount(self.value(FormField::Amount)),
            date: text(FormField::Date),
            vat: text(FormField::Vat),
            pct: Some(parse_pct(self.value(FormField::Pct), self.default_pct)),
            commentary: text(FormField::Commentary),
            file_url: self.file_url.clone(),
            file_name: self.file_name.clone(),
            comment_admin: None,
            status: Some(BillStatus::Pending),
        }
    }

    /// Submit event: update the draft created by the upload
    pub fn handle_submit(&self, session: &Session) -> Intent {
        Intent::Update {
            selector: self.bill_id.clone(),
            bill: self.bill(session),
        }
    }
}

/// Runs the new-bill intents that talk to the store
pub struct NewBill<'a> {
    store: &'a dyn BillStore,
    session: &'a Session,
}

impl<'a> NewBill<'a> {
    pub fn new(store: &'a dyn BillStore, session: &'a Session) -> Self {
        Self { store, session }
    }

    /// Run the file-format gate and upload an accepted receipt
    ///
    /// Upload failures are logged; the form then simply has no upload.
    pub async fn change_file(
        &self,
        form: &mut NewBillForm,
        file: Option<SelectedFile>,
    ) -> Intent {
        let intent = form.handle_change_file(file.as_ref().map(|f| f.name.as_str()));

        let file_name = match intent {
            Intent::Upload { ref file_name } => file_name.clone(),
            _ => {
                tracing::info!(intent = ?intent, "receipt rejected");
                return intent;
            }
        };

        let upload = UploadRequest {
            file_name: file_name.clone(),
            content: file.map(|f| f.content).unwrap_or_default(),
            email: self.session.email.clone(),
        };

        match self.store.create(upload).await {
            Ok(receipt) => {
                tracing::info!(key = %receipt.key, file = %file_name, "receipt uploaded");
                form.apply_upload(receipt);
            }
            Err(error) => {
                tracing::error!(%error, file = %file_name, "receipt upload failed");
            }
        }

        intent
    }

    /// Submit the form and return where to go next
    ///
    /// The update is awaited before navigating. A failed update is logged
    /// and the user still lands on the bills page.
    pub async fn submit(&self, form: &NewBillForm) -> Intent {
        if let Intent::Update { selector, bill } = form.handle_submit(self.session) {
            match self.store.update(selector.as_deref(), bill).await {
                Ok(stored) => {
                    tracing::info!(id = ?stored.id, "bill submitted");
                }
                Err(error) => {
                    tracing::error!(%error, selector = ?selector, "bill update failed");
                }
            }
        }

        Intent::navigate(Route::Bills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StoreError, UserType};
    use crate::storage::InMemoryBillStore;

    fn form() -> NewBillForm {
        NewBillForm::from_config(&AppConfig::default_config())
    }

    fn filled_form() -> NewBillForm {
        let mut form = form();
        form.set(FormField::ExpenseType, "Transports");
        form.set(FormField::Name, "Taxi");
        form.set(FormField::Date, "2022-01-25");
        form.set(FormField::Amount, "100");
        form.set(FormField::Vat, "80");
        form.set(FormField::Pct, "20");
        form.set(FormField::Commentary, "Test de Julien");
        form
    }

    fn session() -> Session {
        Session::new(UserType::Employee, "a@a")
    }

    fn png() -> SelectedFile {
        SelectedFile {
            name: "johnDoe.png".to_string(),
            content: "(⌐□_□)".as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_new_form_is_empty_except_type() {
        let form = form();

        for (field, value) in form.fields() {
            if field == FormField::ExpenseType {
                assert_eq!(value, "Transports");
            } else {
                assert!(value.is_empty(), "{:?} should start empty", field);
            }
        }
        assert!(!form.file_input_enabled());
    }

    #[test]
    fn test_file_input_disabled_while_a_field_is_empty() {
        let mut form = filled_form();

        assert!(!form.handle_input(FormField::Name, ""));
        assert!(form.handle_input(FormField::Name, "Test de Julien"));
    }

    #[test]
    fn test_every_required_field_gates_the_file_input() {
        for field in FormField::ALL {
            let mut form = filled_form();
            assert!(!form.handle_input(field, ""), "{:?} should gate", field);
        }
    }

    #[test]
    fn test_good_format_requests_upload() {
        let mut form = form();
        form.handle_change_file(Some("bad.webp"));
        assert!(form.file_error_visible());

        let intent = form.handle_change_file(Some("johnDoe.png"));

        assert_eq!(
            intent,
            Intent::Upload {
                file_name: "johnDoe.png".to_string()
            }
        );
        assert!(!form.file_error_visible());
        assert_eq!(form.selected_file(), Some("johnDoe.png"));
    }

    #[test]
    fn test_bad_format_clears_file_and_shows_error() {
        let mut form = form();
        form.handle_change_file(Some("johnDoe.png"));

        let intent = form.handle_change_file(Some("johnDoe.webp"));

        assert!(matches!(intent, Intent::RejectFile { .. }));
        assert!(form.file_error_visible());
        assert!(form.selected_file().is_none());
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let mut form = form();
        assert_eq!(
            form.handle_change_file(None),
            Intent::RejectFile {
                file_name: MISSING_FILE_NAME.to_string()
            }
        );
    }

    #[test]
    fn test_submitted_bill_is_pending() {
        let mut form = filled_form();
        form.handle_change_file(Some("johnDoe.png"));
        form.apply_upload(UploadReceipt {
            file_url: "https://localhost:3456/images/test.jpg".to_string(),
            key: "1234".to_string(),
        });

        let Intent::Update { selector, bill } = form.handle_submit(&session()) else {
            panic!("submit should produce an update");
        };

        assert_eq!(selector.as_deref(), Some("1234"));
        assert_eq!(bill.status, Some(BillStatus::Pending));
        assert_eq!(bill.email.as_deref(), Some("a@a"));
        assert_eq!(bill.amount, Some(100));
        assert_eq!(bill.pct, Some(20));
        assert_eq!(bill.file_name.as_deref(), Some("johnDoe.png"));
        assert_eq!(
            bill.file_url.as_deref(),
            Some("https://localhost:3456/images/test.jpg")
        );
    }

    #[test]
    fn test_pct_defaults_to_20() {
        let mut form = filled_form();
        for raw in ["", "abc", "0"] {
            form.set(FormField::Pct, raw);
            assert_eq!(form.bill(&session()).pct, Some(20), "pct {:?}", raw);
        }
        form.set(FormField::Pct, "10");
        assert_eq!(form.bill(&session()).pct, Some(10));
    }

    #[test]
    fn test_amount_parses_leading_integer() {
        let mut form = filled_form();
        form.set(FormField::Amount, "100.75");
        assert_eq!(form.bill(&session()).amount, Some(100));
        form.set(FormField::Amount, "cent");
        assert_eq!(form.bill(&session()).amount, None);
    }

    #[tokio::test]
    async fn test_change_file_uploads_accepted_receipt() {
        let store = InMemoryBillStore::new("https://localhost:3456/images");
        let session = session();
        let mut form = filled_form();

        let intent = NewBill::new(&store, &session)
            .change_file(&mut form, Some(png()))
            .await;

        assert!(matches!(intent, Intent::Upload { .. }));
        assert_eq!(store.calls().create, 1);
        assert!(form.file_uploaded());
        assert_eq!(
            form.file_url(),
            Some("https://localhost:3456/images/johnDoe.png")
        );
        let draft = store.get(form.bill_id().unwrap()).unwrap();
        assert_eq!(draft.email.as_deref(), Some("a@a"));
    }

    #[tokio::test]
    async fn test_change_file_rejects_without_upload() {
        let store = InMemoryBillStore::new("https://localhost:3456/images");
        let session = session();
        let mut form = filled_form();
        let webp = SelectedFile {
            name: "johnDoe.webp".to_string(),
            content: Vec::new(),
        };

        let intent = NewBill::new(&store, &session)
            .change_file(&mut form, Some(webp))
            .await;

        assert!(matches!(intent, Intent::RejectFile { .. }));
        assert_eq!(store.calls().create, 0);
        assert!(form.file_error_visible());
        assert!(!form.file_uploaded());
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_form_without_upload() {
        let store = InMemoryBillStore::new("https://localhost:3456/images");
        store.fail_next_create(StoreError::Remote { status: 500 });
        let session = session();
        let mut form = filled_form();

        NewBill::new(&store, &session)
            .change_file(&mut form, Some(png()))
            .await;

        assert_eq!(store.calls().create, 1);
        assert!(!form.file_uploaded());
        assert!(!form.file_error_visible());
    }

    #[tokio::test]
    async fn test_submit_updates_then_navigates() {
        let store = InMemoryBillStore::new("https://localhost:3456/images");
        let session = session();
        let page = NewBill::new(&store, &session);
        let mut form = filled_form();
        page.change_file(&mut form, Some(png())).await;

        let intent = page.submit(&form).await;

        assert_eq!(intent, Intent::navigate(Route::Bills));
        assert_eq!(store.calls().update, 1);
        let stored = store.get(form.bill_id().unwrap()).unwrap();
        assert_eq!(stored.status, Some(BillStatus::Pending));
        assert_eq!(stored.name.as_deref(), Some("Taxi"));
    }

    #[tokio::test]
    async fn test_failed_update_still_navigates() {
        let store = InMemoryBillStore::new("https://localhost:3456/images");
        store.fail_next_update(StoreError::Remote { status: 500 });
        let session = session();

        let intent = NewBill::new(&store, &session).submit(&filled_form()).await;

        assert_eq!(intent, Intent::navigate(Route::Bills));
        assert_eq!(store.calls().update, 1);
        assert!(store.list().await.unwrap().is_empty());
    }
}
