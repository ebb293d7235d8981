/**
 * LifeBridge Check
 *
 * Command-line access to the client rules, for support and for testing
 * backend fixtures.
 *
 *   lifebridge-check token <jwt>
 *   lifebridge-check validate <patient|doctor|feedback|login> <create|update> <file.json>
 *   lifebridge-check config
 *   lifebridge-check login <email> <password>
 *
 * Settings come from `lifebridge.toml` (or `$LIFEBRIDGE_CONFIG`) when
 * present, then `LIFEBRIDGE_*` environment variables.
 */

use std::process::ExitCode;
use std::sync::Arc;

use lifebridge::client::{AuthService, LoginRequest};
use lifebridge::session::{decode, is_expired, route_for, SessionStore};
use lifebridge::shared::AppConfig;
use lifebridge::validation::{FieldSet, FormKind, FormMode};

const USAGE: &str = "usage:
  lifebridge-check token <jwt>
  lifebridge-check validate <patient|doctor|feedback|login> <create|update> <file.json>
  lifebridge-check config
  lifebridge-check login <email> <password>";

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    lifebridge::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = match args.as_slice() {
        ["token", token] => token_command(token),
        ["validate", form, mode, path] => validate_command(form, mode, path),
        ["config"] => config_command(),
        ["login", email, password] => login_command(email, password).await,
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn token_command(token: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let claims = decode(token)?;
    println!("{}", serde_json::to_string_pretty(&claims)?);

    let expired = is_expired(token);
    println!("expired: {expired}");
    match route_for(claims.role.as_deref()) {
        Ok(route) => println!("route: {route}"),
        Err(e) => println!("route: none ({e})"),
    }

    Ok(if expired {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn validate_command(
    form: &str,
    mode: &str,
    path: &str,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let form: FormKind = form.parse()?;
    let mode = match mode {
        "create" => FormMode::Create,
        "update" => FormMode::Update,
        other => return Err(format!("unknown mode '{other}', expected create or update").into()),
    };

    let record: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let fields = FieldSet::from_json(&record);
    let outcome = form.validate(&fields, mode);
    tracing::debug!(?form, ?mode, "validated {}", path);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(if outcome.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn config_command() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}

async fn login_command(email: &str, password: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = SessionStore::from_config(&config)?;
    let auth = AuthService::connect(
        config,
        store,
        Arc::new(|route: &str| println!("navigate: {route}")),
    )?;

    match auth.login(&LoginRequest::new(email, password)).await {
        Ok(session) => {
            println!("role: {}", session.role);
            println!("route: {}", session.route);
            if let Some(name) = session.doctor_name {
                println!("doctor: {name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
