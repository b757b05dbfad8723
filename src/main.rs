use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use grant_advisor::config::AppConfig;
use grant_advisor::error::AppError;
use grant_advisor::telemetry;
use grant_advisor::workflows::advisory::{
    advisory_router, AdvisoryService, BusinessProfile, EligibilityVerdict, GrantCatalog,
    NumericInput, RankedMatch, ReviewReport, SfecDetails,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Smart Grant Advisor",
    about = "Check Singapore SME grant eligibility from the command line or as an HTTP service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the advisory evaluators and print a text report
    Advise {
        #[command(subcommand)]
        command: AdviseCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum AdviseCommand {
    /// Evaluate programme eligibility for a business profile
    Eligibility(EligibilityArgs),
    /// Score the grant catalog against a business profile
    Match(MatchArgs),
    /// Review an extracted grant application document
    Review(ReviewArgs),
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Industry or sector the business operates in
    #[arg(long, default_value = "")]
    sector: String,
    /// Annual revenue in SGD (free text; thousands separators accepted)
    #[arg(long, default_value = "")]
    revenue: String,
    /// Number of full-time employees
    #[arg(long, default_value = "")]
    employees: String,
    /// Years the business has been operating
    #[arg(long, default_value = "")]
    years: String,
    /// Local ownership is 30% or more
    #[arg(long)]
    local_ownership: bool,
    /// Primary grant objective, e.g. "adopt digital tools"
    #[arg(long, default_value = "")]
    goal: String,
    /// Skills Development Levy paid last year in SGD
    #[arg(long, default_value = "")]
    skills_levy: String,
    /// Number of local (citizen/PR) employees
    #[arg(long, default_value = "")]
    local_employees: String,
    /// Outstanding MOM or IRAS violations exist
    #[arg(long)]
    violations: bool,
}

impl ProfileArgs {
    fn into_profile(self) -> BusinessProfile {
        BusinessProfile {
            sector: self.sector.trim().to_string(),
            annual_revenue: NumericInput::parse(&self.revenue),
            employee_count: NumericInput::parse(&self.employees),
            years_in_operation: NumericInput::parse(&self.years),
            local_ownership_at_least_30: self.local_ownership,
            primary_goal: self.goal.trim().to_string(),
            digital_adoption: None,
            sfec: SfecDetails {
                skills_levy_paid_last_year: NumericInput::parse(&self.skills_levy),
                local_employee_count: NumericInput::parse(&self.local_employees),
                has_outstanding_violations: self.violations,
            },
        }
    }
}

#[derive(Args, Debug)]
struct EligibilityArgs {
    #[command(flatten)]
    profile: ProfileArgs,
    /// Programme codes to evaluate (PSG, EDG, SFEC); all when omitted
    #[arg(long = "program")]
    programs: Vec<String>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[command(flatten)]
    profile: ProfileArgs,
    /// Optional CSV file overriding the built-in grant catalog
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReviewArgs {
    #[command(flatten)]
    profile: ProfileArgs,
    /// Path to a plain-text file with the extracted document text
    #[arg(long)]
    document: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Advise { command } => run_advise(command),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = match &config.catalog.csv_path {
        Some(path) => GrantCatalog::from_csv_path(path)?,
        None => GrantCatalog::builtin(),
    };
    let service = Arc::new(AdvisoryService::new(Default::default(), catalog));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(advisory_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "grant advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_advise(command: AdviseCommand) -> Result<(), AppError> {
    match command {
        AdviseCommand::Eligibility(args) => {
            let service = AdvisoryService::standard();
            let profile = args.profile.into_profile();

            let verdicts = if args.programs.is_empty() {
                service.eligibility_matrix(&profile)
            } else {
                let mut verdicts = Vec::with_capacity(args.programs.len());
                for program in &args.programs {
                    verdicts.push(service.check_eligibility(&profile, program)?);
                }
                verdicts
            };

            render_verdicts(&verdicts);
            Ok(())
        }
        AdviseCommand::Match(args) => {
            let catalog = match &args.catalog {
                Some(path) => GrantCatalog::from_csv_path(path)?,
                None => GrantCatalog::builtin(),
            };
            let service = AdvisoryService::new(Default::default(), catalog);
            let profile = args.profile.into_profile();

            render_matches(&service.match_scores(&profile));
            Ok(())
        }
        AdviseCommand::Review(args) => {
            let text = std::fs::read_to_string(&args.document)?;
            let service = AdvisoryService::standard();
            let profile = args.profile.into_profile();

            render_review(&service.review_document(&text, &profile));
            Ok(())
        }
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_verdicts(verdicts: &[EligibilityVerdict]) {
    println!("Eligibility matrix");
    for verdict in verdicts {
        println!("\n{} - {}", verdict.program, verdict.status.label());
        if verdict.unmet_requirements.is_empty() {
            println!("  Missing requirements: none");
        } else {
            println!("  Missing requirements:");
            for requirement in &verdict.unmet_requirements {
                println!("  - {requirement}");
            }
        }
    }
}

fn render_matches(matches: &[RankedMatch]) {
    println!("Matched grants, best fit first");
    for entry in matches {
        println!("\n{} - score {}/100", entry.name, entry.score.score);
        if !entry.summary.is_empty() {
            println!("  {}", entry.summary);
        }
        for reason in &entry.score.reasons {
            println!("  {reason}");
        }
        if !entry.link.is_empty() {
            println!("  More: {}", entry.link);
        }
    }
}

fn render_review(report: &ReviewReport) {
    if !report.recognized_as_grant_application {
        println!("This document does not appear to be a grant application.");
    }

    println!("Extracted sections");
    if report.fields.is_empty() {
        println!("- none recognized");
    }
    for (section, value) in &report.fields {
        let first_line = value.lines().next().unwrap_or_default();
        println!("- {section}: {first_line}");
    }

    println!("\nEligibility matrix");
    for verdict in &report.matrix {
        let missing = if verdict.unmet_requirements.is_empty() {
            "-".to_string()
        } else {
            verdict.unmet_requirements.join(", ")
        };
        println!(
            "- {}: {} (missing: {})",
            verdict.program,
            verdict.status.label(),
            missing
        );
    }

    println!("\nRecommendations");
    if report.feedback.recommendations.is_empty() {
        println!("- none");
    }
    for rec in &report.feedback.recommendations {
        println!("- [{}] {}", rec.severity.label(), rec.message);
    }

    if !report.feedback.strengths.is_empty() {
        println!("\nStrengths");
        for strength in &report.feedback.strengths {
            println!("- {strength}");
        }
    }
}
