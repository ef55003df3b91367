use crate::ports::outbound::AuthRedirect;
use owo_colors::OwoColorize;

/// ConsoleAuthRedirect adapter sending the user back to `docscan login`
///
/// A CLI cannot navigate anywhere, so the redirect is a prompt on stderr.
pub struct ConsoleAuthRedirect;

impl ConsoleAuthRedirect {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleAuthRedirect {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthRedirect for ConsoleAuthRedirect {
    fn redirect_to_login(&self, reason: &str) {
        log::info!("Session cleared: {}", reason);
        eprintln!("🔐 {}", reason.yellow());
        eprintln!("   Run `docscan login -u <username>` to sign in again.");
    }
}
