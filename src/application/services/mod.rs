/// Application services holding process-wide state
///
/// The session guard and the notifier are shared by every use case.
mod notifier;
mod session_guard;

pub use notifier::{EphemeralNotifier, DEFAULT_NOTICE_TTL};
pub use session_guard::SessionGuard;
