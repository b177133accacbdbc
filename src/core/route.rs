//! Application routes and the session guard

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::session::Session;

/// Pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    /// Hash path used by the browser side
    pub fn hash_path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }

    /// Path served by the HTTP shell
    pub fn http_path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "/employee/bills",
            Route::NewBill => "/employee/bill/new",
            Route::Dashboard => "/admin/dashboard",
        }
    }

    /// Access rule guarding this route
    pub fn policy(&self) -> AccessPolicy {
        match self {
            Route::Login => AccessPolicy::Public,
            Route::Bills | Route::NewBill => AccessPolicy::EmployeeOnly,
            Route::Dashboard => AccessPolicy::AdminOnly,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hash_path())
    }
}

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No session required
    Public,

    /// Employee or plain user session
    EmployeeOnly,

    /// Admin session
    AdminOnly,
}

/// Outcome of the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

impl AccessPolicy {
    /// Check a session against this policy
    ///
    /// A missing session always lands on the login page.
    pub fn check(&self, session: Option<&Session>) -> Access {
        match (self, session) {
            (AccessPolicy::Public, _) => Access::Allow,
            (_, None) => Access::Redirect(Route::Login),
            (AccessPolicy::EmployeeOnly, Some(s)) if s.user_type.is_employee() => Access::Allow,
            (AccessPolicy::EmployeeOnly, Some(_)) => Access::Redirect(Route::Dashboard),
            (AccessPolicy::AdminOnly, Some(s)) if s.user_type.is_admin() => Access::Allow,
            (AccessPolicy::AdminOnly, Some(_)) => Access::Redirect(Route::Bills),
        }
    }
}

/// Guard a navigation to `route`
pub fn guard(route: Route, session: Option<&Session>) -> Access {
    let access = route.policy().check(session);
    if let Access::Redirect(target) = access {
        tracing::debug!(from = %route, to = %target, "navigation redirected");
    }
    access
}
