/// AuthRedirect port for sending the user back to authentication
///
/// Invoked by the session guard after it cleared an expired session. The
/// guard guarantees at most one call per cleared credential.
pub trait AuthRedirect: Send + Sync {
    fn redirect_to_login(&self, reason: &str);
}
