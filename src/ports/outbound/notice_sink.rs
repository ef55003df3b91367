use crate::scan_submission::domain::Notice;

/// NoticeSink port for surfacing transient notices
///
/// The notifier decides when a notice appears and disappears; the sink
/// only draws it. Calls are fire-and-forget.
pub trait NoticeSink: Send + Sync {
    /// Shows a notice, replacing whatever was shown before
    fn display(&self, notice: &Notice);

    /// Removes a notice that is no longer active
    fn retract(&self, notice: &Notice);
}
