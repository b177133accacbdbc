//! Views: pure functions from data to markup
//!
//! Templates are compiled into the binary and rendered with Tera. A view
//! holds no state beyond the parsed templates and has no behavior; the
//! interactive elements carry `data-testid` hooks.

use serde::Serialize;
use tera::{Context, Tera};

use crate::containers::{BillRow, NewBillForm};
use crate::core::EXPENSE_TYPES;
use crate::core::error::RenderError;
use crate::core::validation::BAD_FORMAT_MESSAGE;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("bills.html", include_str!("../../templates/bills.html")),
    ("new_bill.html", include_str!("../../templates/new_bill.html")),
    ("loading.html", include_str!("../../templates/loading.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("receipt.html", include_str!("../../templates/receipt.html")),
];

/// State of the bills page
#[derive(Debug, Clone, PartialEq)]
pub enum BillsPage {
    Loading,
    Error(String),
    Loaded(Vec<BillRow>),
}

/// Highlighted icon of the vertical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveIcon {
    Window,
    Mail,
    None,
}

impl ActiveIcon {
    fn as_str(&self) -> &'static str {
        match self {
            ActiveIcon::Window => "window",
            ActiveIcon::Mail => "mail",
            ActiveIcon::None => "",
        }
    }
}

#[derive(Serialize)]
struct RowView<'a> {
    expense_type: &'a str,
    name: &'a str,
    date: &'a str,
    formatted_date: &'a str,
    amount: String,
    status: &'a str,
    file_url: &'a str,
}

impl<'a> From<&'a BillRow> for RowView<'a> {
    fn from(row: &'a BillRow) -> Self {
        Self {
            expense_type: &row.expense_type,
            name: &row.name,
            date: &row.date,
            formatted_date: &row.formatted_date,
            amount: row.amount.map(|a| format!("{} €", a)).unwrap_or_default(),
            status: &row.status,
            file_url: &row.file_url,
        }
    }
}

/// Template renderer for every page
#[derive(Clone)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Parse the embedded templates
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(RenderError::Load)?;
        Ok(Self { tera })
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        self.tera
            .render(template, context)
            .map_err(|source| RenderError::Template {
                template: template.to_string(),
                source,
            })
    }

    fn layout(title: &str, active: ActiveIcon, signed_in: bool) -> Context {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("active", active.as_str());
        context.insert("signed_in", &signed_in);
        context
    }

    /// Bills page: loading state, error message, or the sorted table
    pub fn bills_page(&self, page: &BillsPage) -> Result<String, RenderError> {
        match page {
            BillsPage::Loading => self.loading_page(),
            BillsPage::Error(message) => self.error_page(message),
            BillsPage::Loaded(rows) => {
                let rows: Vec<RowView<'_>> = rows.iter().map(RowView::from).collect();
                let mut context = Self::layout("Mes notes de frais", ActiveIcon::Window, true);
                context.insert("rows", &rows);
                self.render("bills.html", &context)
            }
        }
    }

    /// New-bill page for the given form state
    pub fn new_bill_page(&self, form: &NewBillForm) -> Result<String, RenderError> {
        let values: indexmap::IndexMap<&str, &str> =
            form.fields().map(|(field, value)| (field.key(), value)).collect();

        let mut context = Self::layout("Nouvelle note de frais", ActiveIcon::Mail, true);
        context.insert("values", &values);
        context.insert("expense_types", EXPENSE_TYPES);
        context.insert("file_input_enabled", &form.file_input_enabled());
        context.insert("file_error", &form.file_error_visible());
        context.insert("file_uploaded", &form.file_uploaded());
        context.insert("bad_format_message", BAD_FORMAT_MESSAGE);
        self.render("new_bill.html", &context)
    }

    pub fn loading_page(&self) -> Result<String, RenderError> {
        let context = Self::layout("Chargement", ActiveIcon::None, true);
        self.render("loading.html", &context)
    }

    /// Error page showing `message` verbatim
    pub fn error_page(&self, message: &str) -> Result<String, RenderError> {
        let mut context = Self::layout("Erreur", ActiveIcon::None, true);
        context.insert("message", message);
        self.render("error.html", &context)
    }

    pub fn login_page(&self) -> Result<String, RenderError> {
        let context = Self::layout("Connexion", ActiveIcon::None, false);
        self.render("login.html", &context)
    }

    pub fn dashboard_page(&self, pending: usize) -> Result<String, RenderError> {
        let mut context = Self::layout("Validations", ActiveIcon::None, true);
        context.insert("pending", &pending);
        self.render("dashboard.html", &context)
    }

    /// Receipt preview shown in the modal; the image takes half the modal
    pub fn receipt_preview(&self, file_url: &str, modal_width: u32) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("file_url", file_url);
        context.insert("width", &(modal_width / 2));
        self.render("receipt.html", &context)
    }
}
