mod config;
mod relay;
mod services;
mod store;

use std::io;
use std::path::PathBuf;

use crate::config::load_config;
use crate::relay::state::{redeliver_outbox, start_report_dispatcher, ReportRelay};
use crate::services::auth::password::hash_password;
use crate::services::auth::SessionSettings;
use crate::services::lookup::load_lookup;
use crate::store::Database;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clap::{Parser, Subcommand};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info, warn};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Inventarium registry server: JSON API plus the embedded web frontend.
#[derive(Debug, Parser)]
#[command(name = "inventarium", version, about)]
struct Args {
    /// Path to a TOML config file; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the argon2 hash of a password read from stdin, for `auth.accounts`.
    HashPassword,
}

fn print_password_hash() -> io::Result<()> {
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);
    let hash = hash_password(password)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    println!("{}", hash);
    Ok(())
}

/// Serves the bundled frontend. Unknown paths get `index.html` so that the
/// client-side router can handle deep links such as `/record/{id}`.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();
    if let Some(Command::HashPassword) = args.command {
        return print_password_hash();
    }

    let config = load_config(args.config.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let db = Database::new(&config.db.path);
    db.init().map_err(io::Error::other)?;
    info!("Using database {}", db.path().display());
    match db.seed_admins(&config.moderation.admins) {
        Ok(0) => {}
        Ok(added) => info!("Seeded {} administrator(s)", added),
        Err(e) => error!("Failed to seed administrators: {}", e),
    }
    for account in &config.auth.accounts {
        if let Err(e) = db.upsert_account(account.id.trim(), &account.password_hash) {
            error!("Failed to seed account {}: {}", account.id, e);
        }
    }
    for admin in &config.moderation.admins {
        if !config.auth.accounts.iter().any(|a| a.id.trim() == admin.trim()) {
            warn!("Administrator {} has no account in auth.accounts and cannot sign in", admin);
        }
    }
    match db.purge_expired_sessions() {
        Ok(0) => {}
        Ok(purged) => info!("Purged {} expired session(s)", purged),
        Err(e) => error!("Failed to purge sessions: {}", e),
    }
    redeliver_outbox(&db);

    let lookup = web::Data::new(load_lookup(&config.lookup.path));

    // Report relay: handlers enqueue, a single task stores and delivers
    let (relay, rx) = ReportRelay::new(config.reports.queue_capacity);
    let dispatcher_db = db.clone();
    tokio::spawn(async move {
        start_report_dispatcher(dispatcher_db, rx).await;
    });

    let host = config.server.host.clone();
    let port = config.server.port;
    let json_limit = config.server.json_limit_bytes;
    let db = web::Data::new(db);
    let relay = web::Data::new(relay);
    let sessions = web::Data::new(SessionSettings {
        ttl_hours: config.auth.session_ttl_hours,
        secure_cookie: config.auth.secure_cookie,
    });

    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(db.clone())
            .app_data(lookup.clone())
            .app_data(relay.clone())
            .app_data(sessions.clone())
            .service(services::auth::configure_routes())
            .service(services::lookup::configure_routes())
            .service(services::records::configure_routes())
            .service(services::map::configure_routes())
            .service(services::stats::configure_routes())
            .service(services::reports::configure_routes())
            .service(services::moderation::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
