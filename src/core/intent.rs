//! What a container asks the shell to do next

use serde::Serialize;

use crate::core::bill::Bill;
use crate::core::route::Route;

/// Outcome of a UI event handler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Go to another page
    Navigate { route: Route },

    /// Open the receipt preview modal
    ShowReceipt { file_url: String },

    /// Upload the selected receipt
    Upload { file_name: String },

    /// The selected file has a forbidden extension and was cleared
    RejectFile { file_name: String },

    /// Persist the submitted bill under the upload key
    Update {
        selector: Option<String>,
        bill: Bill,
    },

    /// Drop the session and return to the login page
    Logout,
}

impl Intent {
    pub fn navigate(route: Route) -> Self {
        Intent::Navigate { route }
    }
}
