/// Console adapters writing to stderr
mod auth_redirect;
mod notice_sink;
mod progress_reporter;

pub use auth_redirect::ConsoleAuthRedirect;
pub use notice_sink::ConsoleNoticeSink;
pub use progress_reporter::StderrProgressReporter;
