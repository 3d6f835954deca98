//! Questionnaire engine server.
//!
//! Loads configuration from `QUESTIONNAIRE__*` environment variables, fetches
//! the question graph and serves the respondent API.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use questionnaire_engine::adapters::document::{PdfRenderer, TextRenderer};
use questionnaire_engine::adapters::http::{app_router, QuestionnaireHandlers};
use questionnaire_engine::adapters::source::{FileGraphSource, HttpGraphSource};
use questionnaire_engine::application::handlers::questionnaire::{
    ActiveSession, ExportReportHandler, LoadQuestionnaireHandler, RespondentActionHandler,
};
use questionnaire_engine::config::{AppConfig, SourceLocation};
use questionnaire_engine::domain::report::LayoutConfig;
use questionnaire_engine::ports::GraphSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let source: Arc<dyn GraphSource> = match config.source.resolve() {
        SourceLocation::Url(url) => Arc::new(HttpGraphSource::new(url, config.source.fetch_timeout())?),
        SourceLocation::File(path) => Arc::new(FileGraphSource::new(path)),
    };

    let session = ActiveSession::new();
    let loader = Arc::new(LoadQuestionnaireHandler::new(source, session.clone()));

    // A failed initial load is shown to the respondent; POST /reload retries.
    if let Err(e) = loader.handle().await {
        tracing::error!(error = %e, "Initial questionnaire load failed");
    }

    let layout = LayoutConfig::default();
    let mut export = ExportReportHandler::new(session.clone(), layout.clone())
        .with_base_filename(config.report.filename.trim());
    if config.report.enable_pdf {
        export = export.with_renderer(Arc::new(PdfRenderer::new()));
    }
    if config.report.enable_text {
        export = export.with_renderer(Arc::new(TextRenderer::new(layout.line_height_mm)));
    }

    let handlers = QuestionnaireHandlers::new(
        Arc::new(RespondentActionHandler::new(session)),
        loader,
        Arc::new(export),
        config.site.app_title.as_str(),
    );
    let app = app_router(handlers, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Questionnaire server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` overrides the configured filter. Production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
