//! gpu-cordon: request the cordon of a faulty EC2 GPU host via AWS Support
//!
//! Uploads diagnostic logs, describes this instance from IMDS, and opens a
//! support case referencing both.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gpu_cordon::attachments::AttachmentNaming;
use gpu_cordon::aws::{AwsContext, MetadataClient, SupportClient};
use gpu_cordon::config::{self, AwsConfig, RequestOptions, SettingsOverrides};
use gpu_cordon::workflow::CordonRequester;
use gpu_cordon_common::CaseBodyTemplate;
use gpu_cordon_common::defaults::{DEFAULT_LANGUAGE, DEFAULT_LOG_PATH, SUPPORT_API_REGION};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gpu-cordon")]
#[command(about = "Request the cordon of a faulty EC2 GPU host via AWS Support")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Arguments for the request command
#[derive(clap::Args, Debug)]
struct RequestArgs {
    /// Log file to attach (repeatable)
    #[arg(short, long = "log", default_value = DEFAULT_LOG_PATH)]
    logs: Vec<PathBuf>,

    /// JSON file with case settings (subject, cc_emails, codes)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Case subject (overrides the settings file)
    #[arg(long)]
    subject: Option<String>,

    /// CC email address (repeatable, replaces the configured list)
    #[arg(long = "cc")]
    cc_emails: Vec<String>,

    /// Severity code (overrides the settings file)
    #[arg(long)]
    severity: Option<String>,

    /// Region of the AWS Support endpoint
    #[arg(long, default_value = SUPPORT_API_REGION)]
    region: String,

    /// AWS profile to use
    #[arg(long, env = "AWS_PROFILE")]
    aws_profile: Option<String>,

    /// How uploaded logs are named in the attachment set
    #[arg(long, value_enum, default_value_t = AttachmentNaming::BaseName)]
    attachment_names: AttachmentNaming,

    /// Check service, category and severity codes against the support catalog first
    #[arg(long)]
    verify_codes: bool,

    /// Render and validate the case without uploading or creating it
    #[arg(long)]
    dry_run: bool,
}

impl RequestArgs {
    fn into_config(self) -> Result<config::RequestConfig> {
        let overrides = SettingsOverrides {
            subject: self.subject,
            cc_emails: self.cc_emails,
            severity_code: self.severity,
        };
        let settings = config::resolve_settings(self.settings.as_deref(), overrides)?;

        Ok(config::RequestConfig {
            aws: AwsConfig {
                region: self.region,
                aws_profile: self.aws_profile,
            },
            log_paths: self.logs,
            settings,
            options: RequestOptions {
                attachment_naming: self.attachment_names,
                verify_codes: self.verify_codes,
            },
            dry_run: self.dry_run,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload logs and open a cordon request case
    Request(Box<RequestArgs>),

    /// List support services, categories and severity levels
    Catalog {
        /// Region of the AWS Support endpoint
        #[arg(long, default_value = SUPPORT_API_REGION)]
        region: String,

        /// AWS profile to use
        #[arg(long, env = "AWS_PROFILE")]
        aws_profile: Option<String>,

        /// Only show these service codes (repeatable)
        #[arg(long = "service")]
        services: Vec<String>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = gpu_cordon::aws::classify_anyhow_error(e).suggestion() {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {hint}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the case body and ID
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Request(request_args) => handle_request((*request_args).into_config()?).await,
        Command::Catalog {
            region,
            aws_profile,
            services,
            format,
        } => handle_catalog(region, aws_profile, services, format).await,
    }
}

/// Handle the request command
async fn handle_request(config: config::RequestConfig) -> Result<()> {
    if let Some(profile) = &config.aws.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }
    info!(
        logs = ?config.log_paths,
        region = %config.aws.region,
        severity_code = %config.settings.severity_code,
        dry_run = config.dry_run,
        "Starting cordon request"
    );

    let aws = AwsContext::with_profile(&config.aws.region, config.aws.aws_profile.as_deref()).await;
    let requester = CordonRequester::new(
        SupportClient::from_context(&aws),
        MetadataClient::new(),
        config.settings,
        CaseBodyTemplate::builtin()?,
        config.options,
    );

    if config.dry_run {
        let report = requester.dry_run(&config.log_paths).await?;
        println!("{}", report.request.communication_body);
        for attachment in &report.attachments {
            println!(
                "Would attach: {} ({} bytes)",
                attachment.file_name, attachment.size
            );
        }
        println!("Dry run: no attachment set or case was created");
        return Ok(());
    }

    let outcome = requester.run(&config.log_paths).await?;
    println!("{}", outcome.case_body);
    println!("Case Id: {}", outcome.case_id);

    Ok(())
}

/// Handle the catalog command
async fn handle_catalog(
    region: String,
    aws_profile: Option<String>,
    services: Vec<String>,
    format: String,
) -> Result<()> {
    info!(region = %region, services = ?services, "Fetching support catalog");

    let aws = AwsContext::with_profile(&region, aws_profile.as_deref()).await;
    let support = SupportClient::from_context(&aws);
    let services = support.describe_services(services, DEFAULT_LANGUAGE).await?;
    let severity_levels = support.describe_severity_levels(DEFAULT_LANGUAGE).await?;

    if format == "json" {
        let catalog = gpu_cordon_common::SupportCatalog {
            services,
            severity_levels,
        };
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("{:<45} {:<35} {:<40}", "SERVICE", "CATEGORY", "NAME");
    println!("{}", "-".repeat(120));
    for service in &services {
        for category in &service.categories {
            println!(
                "{:<45} {:<35} {:<40}",
                service.code, category.code, category.name
            );
        }
    }

    println!();
    println!("{:<15} {:<40}", "SEVERITY", "NAME");
    println!("{}", "-".repeat(55));
    for level in &severity_levels {
        println!("{:<15} {:<40}", level.code, level.name);
    }

    Ok(())
}
