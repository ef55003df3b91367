mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod scan_submission;
mod shared;

use adapters::outbound::console::{ConsoleAuthRedirect, ConsoleNoticeSink, StderrProgressReporter};
use adapters::outbound::filesystem::{
    CredentialFileStore, FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use adapters::outbound::network::{
    AnalysisClient, AssistantClient, AuthClient, DashboardClient, PredictClient,
};
use application::dto::OutputFormat;
use application::factories::{FormatterFactory, PresenterFactory};
use application::services::{EphemeralNotifier, SessionGuard};
use application::use_cases::{
    AskAssistantUseCase, LoadAnalysisUseCase, LoadDashboardUseCase, LoginUseCase,
    SubmitScanUseCase,
};
use cli::{Args, Command};
use config::{ConfigFile, Overrides, Settings};
use ports::outbound::OutputPresenter;
use scan_submission::domain::{AssistantPrompt, NoticeSeverity};
use shared::error::ExitCode;
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(
        config,
        Overrides {
            api_base_url: args.api_url,
            session_file: args.session_file,
        },
    )?;
    log::debug!("Using API base URL {}", settings.api_base_url);

    // Create shared services (Dependency Injection)
    let notifier =
        EphemeralNotifier::with_default_ttl(ConsoleNoticeSink::new(), settings.notice_ttl);
    let session = Arc::new(SessionGuard::initialize(
        CredentialFileStore::new(settings.session_file.clone()),
        ConsoleAuthRedirect::new(),
    ));

    match args.command {
        Command::Scan {
            file,
            format,
            output,
        } => run_scan(&settings, session, notifier, &file, format, output).await,
        Command::Login { username, password } => {
            let gateway = AuthClient::new(&settings.api_base_url, settings.login_timeout)?;
            let identity = LoginUseCase::new(gateway, session, notifier)
                .execute(&username, &password)
                .await?;
            log::info!("Session stored for {}", identity.email);
            Ok(ExitCode::Success)
        }
        Command::Logout => {
            session.logout()?;
            notifier.notify("Logged out", NoticeSeverity::Info);
            Ok(ExitCode::Success)
        }
        Command::Dashboard { format } => {
            let repository = DashboardClient::new(&settings.api_base_url, settings.request_timeout)?;
            let snapshot = LoadDashboardUseCase::new(repository, session, notifier)
                .execute()
                .await?;

            let formatted = FormatterFactory::create(format).format_dashboard(&snapshot)?;
            StdoutPresenter::new().present(&formatted)?;
            Ok(ExitCode::Success)
        }
        Command::Analysis { format, image } => {
            let repository = AnalysisClient::new(&settings.api_base_url, settings.request_timeout)?;
            let use_case = LoadAnalysisUseCase::new(repository, session, notifier);
            let snapshot = use_case.execute().await?;

            let formatted = FormatterFactory::create(format).format_analysis(&snapshot)?;
            StdoutPresenter::new().present(&formatted)?;

            if let Some(path) = image {
                use_case
                    .save_evaluation_image(&snapshot.report, &FileSystemWriter::new(path))
                    .await?;
            }
            Ok(ExitCode::Success)
        }
        Command::Ai {
            prompt,
            max_tokens,
            temperature,
            format,
        } => {
            let gateway = AssistantClient::new(&settings.api_base_url, settings.ai_timeout)?;
            let prompt = AssistantPrompt::new(prompt)
                .with_max_tokens(max_tokens)
                .with_temperature(temperature);
            let reply = AskAssistantUseCase::new(gateway, session, notifier)
                .execute(&prompt)
                .await?;

            let formatted = FormatterFactory::create(format).format_reply(&reply)?;
            StdoutPresenter::new().present(&formatted)?;
            Ok(ExitCode::Success)
        }
    }
}

/// Explicit `--config` must exist; otherwise the working directory is searched.
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => config::load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(config::discover_config(&cwd)?.unwrap_or_default())
        }
    }
}

async fn run_scan(
    settings: &Settings,
    session: Arc<SessionGuard>,
    notifier: EphemeralNotifier,
    file: &Path,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    // Rejected files are never read into memory
    let candidate = FileSystemReader::new().read_candidate(file, &settings.file_policy)?;

    let gateway = PredictClient::new(&settings.api_base_url, settings.request_timeout)?;
    let use_case = SubmitScanUseCase::new(
        gateway,
        StderrProgressReporter::new(),
        session,
        notifier,
        settings.file_policy.clone(),
        settings.retry_policy,
    );

    let submission = use_case.submit(&candidate);
    tokio::pin!(submission);
    let result = tokio::select! {
        result = &mut submission => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            use_case.cancel();
            submission.await
        }
    }?;

    let formatted = FormatterFactory::create(format).format_result(&result)?;
    PresenterFactory::for_output(output).present(&formatted)?;

    if result.is_malicious() {
        Ok(ExitCode::MaliciousDetected)
    } else {
        Ok(ExitCode::Success)
    }
}
