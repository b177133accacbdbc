//! Logout handler shared by every signed-in page

use crate::core::{Intent, Session};

/// Disconnect button in the vertical layout
///
/// Drops the session and sends the user back to the login page.
pub fn handle_click_logout(session: &mut Option<Session>) -> Intent {
    if let Some(previous) = session.take() {
        tracing::info!(email = %previous.email, "user logged out");
    }
    Intent::Logout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserType;

    #[test]
    fn test_logout_clears_session() {
        let mut session = Some(Session::new(UserType::Employee, "a@a"));

        assert_eq!(handle_click_logout(&mut session), Intent::Logout);
        assert!(session.is_none());
    }

    #[test]
    fn test_logout_without_session_is_harmless() {
        let mut session = None;
        assert_eq!(handle_click_logout(&mut session), Intent::Logout);
    }
}
