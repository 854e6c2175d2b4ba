//! Warden CLI
//!
//! Wires the authentication core from configuration and resolves the
//! identity of one simulated request.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use authn_dispatcher_sdk::{
    AuthnDispatcherError, Challenge, RequestCredentials, RequestIdentitySource,
    SecurityContextOverride,
};
use authz_gate_sdk::{Admission, RequestContext};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use warden_security::{Credential, IdentityRecord};

mod config;
mod logging;
mod wiring;

use config::WardenConfig;
use logging::LogFormat;
use wiring::{AssertedCaller, Warden};

/// Exit code for requests that were not admitted.
const EXIT_DENIED: u8 = 2;

/// Warden - pluggable authentication and identity augmentation
#[derive(Parser)]
#[command(name = "warden-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and authorize the identity of one request
    Authenticate(AuthenticateArgs),

    /// Print the effective configuration with secrets redacted
    ShowConfig,
}

#[derive(Args)]
struct AuthenticateArgs {
    /// Bearer token presented by the caller
    #[arg(long)]
    bearer: Option<String>,

    /// Skip authentication and assert the caller's principal
    #[arg(long, conflicts_with = "bearer")]
    as_user: Option<String>,

    /// Role held by the asserted caller
    #[arg(long = "user-role", requires = "as_user")]
    user_roles: Vec<String>,

    /// Request method
    #[arg(long, default_value = "GET")]
    method: String,

    /// Request path
    #[arg(long, default_value = "/")]
    path: String,

    /// Role admitting the request; any one suffices
    #[arg(long = "require-role")]
    required_roles: Vec<String>,
}

#[derive(Serialize)]
struct AuthenticateReport<'a> {
    identity: &'a IdentityRecord,
    authorization: &'a Admission,
}

#[derive(Serialize)]
struct FailureReport<'a> {
    error: String,
    status: u16,
    challenge: Option<&'a Challenge>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    logging::init(level, cli.log_format);

    let cfg = WardenConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Authenticate(args) => {
            let warden = wiring::build(&cfg)?;
            authenticate(&warden, &args).await
        }
        Commands::ShowConfig => {
            print_json(&cfg.redacted())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn authenticate(warden: &Warden, args: &AuthenticateArgs) -> anyhow::Result<ExitCode> {
    let source = identity_source(args);

    let identity = match warden.authn.resolve(source).await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::debug!(error = %err, "Request rejected");
            print_json(&failure_report(&err))?;
            return Ok(ExitCode::from(EXIT_DENIED));
        }
    };

    let ctx = RequestContext::new(&args.method, &args.path);
    let required: Vec<&str> = args.required_roles.iter().map(String::as_str).collect();
    let admission = warden.authz.check(&ctx, &identity, &required);

    print_json(&AuthenticateReport {
        identity: &identity,
        authorization: &admission,
    })?;

    if admission.is_admitted() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DENIED))
    }
}

fn identity_source(args: &AuthenticateArgs) -> RequestIdentitySource {
    if let Some(user) = &args.as_user {
        let caller = AssertedCaller {
            principal: Some(user.clone()),
            roles: args.user_roles.clone(),
        };
        let candidates: Vec<&str> = args.user_roles.iter().map(String::as_str).collect();
        return RequestIdentitySource::Prebuilt(caller.to_identity(&candidates));
    }

    let mut request = RequestCredentials::new()
        .with_attribute("method", &args.method)
        .with_attribute("path", &args.path);
    if let Some(token) = &args.bearer {
        request = request.with_credential(Credential::bearer(token.clone()));
    }
    RequestIdentitySource::Credentials(request)
}

fn failure_report(err: &AuthnDispatcherError) -> FailureReport<'_> {
    FailureReport {
        error: err.to_string(),
        status: err.status_code(),
        challenge: err.challenge(),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bearer_and_asserted_user_conflict() {
        let parsed = Cli::try_parse_from([
            "warden-cli",
            "authenticate",
            "--bearer",
            "t",
            "--as-user",
            "alice",
        ]);

        assert!(parsed.is_err());
    }

    #[test]
    fn bearer_becomes_request_credential() {
        let cli = Cli::try_parse_from([
            "warden-cli",
            "--config",
            "warden.yaml",
            "authenticate",
            "--bearer",
            "root-token",
            "--path",
            "/orders",
        ])
        .unwrap();
        let Commands::Authenticate(args) = cli.command else {
            panic!("expected authenticate");
        };

        let RequestIdentitySource::Credentials(request) = identity_source(&args) else {
            panic!("expected credentials");
        };

        assert_eq!(cli.config, Some(PathBuf::from("warden.yaml")));
        assert_eq!(request.credentials, vec![Credential::bearer("root-token")]);
        assert_eq!(request.attributes.get("path").map(String::as_str), Some("/orders"));
    }

    #[test]
    fn asserted_user_becomes_prebuilt_identity() {
        let cli = Cli::try_parse_from([
            "warden-cli",
            "authenticate",
            "--as-user",
            "ops",
            "--user-role",
            "admin",
        ])
        .unwrap();
        let Commands::Authenticate(args) = cli.command else {
            panic!("expected authenticate");
        };

        let RequestIdentitySource::Prebuilt(identity) = identity_source(&args) else {
            panic!("expected prebuilt identity");
        };

        assert_eq!(identity.principal_name(), "ops");
        assert!(identity.has_role("admin"));
    }

    #[test]
    fn failure_report_carries_challenge() {
        let err = AuthnDispatcherError::Unauthenticated {
            challenge: Challenge::bearer(Some("warden")),
        };

        let report = serde_json::to_value(failure_report(&err)).unwrap();

        assert_eq!(report["status"], 401);
        assert_eq!(report["error"], "unauthenticated");
        assert_eq!(
            report["challenge"]["headers"][0][1],
            "Bearer realm=\"warden\""
        );
    }
}
