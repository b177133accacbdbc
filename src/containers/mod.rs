//! Page containers: view-models and their event handlers

pub mod bills;
pub mod logout;
pub mod new_bill;

pub use bills::{BillRow, Bills, BillsList};
pub use logout::handle_click_logout;
pub use new_bill::{FormField, NewBill, NewBillForm, SelectedFile};
