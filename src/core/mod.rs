//! Core module containing the domain types shared by containers and views

pub mod bill;
pub mod error;
pub mod intent;
pub mod route;
pub mod session;
pub mod store;
pub mod validation;

pub use bill::{Bill, BillStatus, EXPENSE_TYPES};
pub use error::{BilledError, ConfigError, RenderError, RequestError, SessionError, StoreError};
pub use intent::Intent;
pub use route::{Access, AccessPolicy, Route, guard};
pub use session::{Session, UserType};
pub use store::{BillStore, UploadReceipt, UploadRequest};
