use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use taskboard::auth::keys::KeyMaterial;
use taskboard::bootstrap::seed::seed_admin;
use taskboard::middleware::auth_guard::AuthGuard;
use taskboard::routes;
use taskboard::state::app_state::AppState;
use taskboard::state::security_config::SecurityConfig;
use taskboard::store::memory::MemoryUsers;
use taskboard::store::UserStore;

mod telemetry;

/// Build the process key material from the environment.
///
/// With both `TASKBOARD_PRIVATE_KEY_FILE` and `TASKBOARD_PUBLIC_KEY_FILE`
/// set, the pair is loaded from disk and any problem with the files is
/// fatal. Without them an ephemeral pair is generated; tokens then become
/// invalid on restart.
fn load_key_material() -> Result<KeyMaterial, taskboard::AppError> {
    let private = std::env::var("TASKBOARD_PRIVATE_KEY_FILE").ok();
    let public = std::env::var("TASKBOARD_PUBLIC_KEY_FILE").ok();

    match (private, public) {
        (Some(private), Some(public)) => {
            KeyMaterial::from_pem_files(&PathBuf::from(private), &PathBuf::from(public))
        }
        (None, None) => {
            tracing::warn!("no key files configured; generating an ephemeral signing keypair");
            KeyMaterial::generate()
        }
        _ => Err(taskboard::AppError::config(
            "TASKBOARD_PRIVATE_KEY_FILE and TASKBOARD_PUBLIC_KEY_FILE must be set together"
                .to_string(),
        )),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("TASKBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("TASKBOARD_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ TASKBOARD_PORT must be a valid port number");
            std::process::exit(1);
        });

    // Key material is loaded exactly once; a bad key source aborts startup.
    let keys = match load_key_material() {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("❌ Failed to initialize signing keys: {e}");
            std::process::exit(1);
        }
    };
    let security = SecurityConfig::new(keys);

    let users: Arc<dyn UserStore> = Arc::new(MemoryUsers::new());

    let seed_email = std::env::var("TASKBOARD_SEED_EMAIL")
        .unwrap_or_else(|_| "admin@example.com".to_string());
    let seed_password =
        std::env::var("TASKBOARD_SEED_PASSWORD").unwrap_or_else(|_| "qwerty".to_string());
    if let Err(e) = seed_admin(&*users, &seed_email, &seed_password) {
        eprintln!("❌ Failed to seed initial user: {e}");
        std::process::exit(1);
    }

    println!("🚀 Starting Taskboard backend on http://{}:{}", host, port);

    let data = web::Data::new(AppState::new(users, security));

    HttpServer::new(move || {
        App::new()
            .wrap(AuthGuard)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
