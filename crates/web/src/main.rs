//! FASTAflow Web Server
//!
//! Serveur web pour l'upload de fichiers FASTA, le calcul des statistiques
//! de séquences et l'affichage des résultats et des plots.

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

mod config;
mod models;
mod plots;
mod routes;

use config::AppConfig;
use fastaflow_storage::{DatabaseManager, FastaEntryRepository};
use models::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Charger la configuration
    let config = match AppConfig::load_from_file("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Erreur de chargement de la configuration: {}. Utilisation des valeurs par défaut.",
                e
            );
            AppConfig::default()
        }
    };

    // Initialiser le logging
    init_logging(&config.logging);

    // Initialiser la base de données
    let mut db_manager = DatabaseManager::new(fastaflow_storage::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
    });

    if let Err(e) = db_manager.initialize().await {
        eprintln!("Erreur d'initialisation de la base de données: {}", e);
        std::process::exit(1);
    }

    let pool = match db_manager.pool() {
        Ok(pool) => pool.clone(),
        Err(e) => {
            eprintln!("Pool de base de données indisponible: {}", e);
            std::process::exit(1);
        }
    };
    let repository = FastaEntryRepository::new(pool);

    // Initialiser Tera
    let tera = match tera::Tera::new(&format!("{}/**/*.html", config.server.templates.display())) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Erreur d'initialisation de Tera: {}", e);
            std::process::exit(1);
        }
    };

    // Créer l'état de l'application
    let app_state = web::Data::new(AppState {
        tera,
        config: config.clone(),
        repository,
    });

    tracing::info!(
        "🧬 Démarrage du serveur FASTAflow sur http://{}:{}",
        config.server.host,
        config.server.port
    );

    let static_files = config.server.static_files.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(app_state.clone())
            .service(routes::home)
            .service(routes::about)
            .service(routes::import_fasta)
            .service(routes::handle_upload)
            .service(routes::results)
            .service(routes::plots_page)
            .service(routes::health_check)
            .service(Files::new("/static", &static_files))
    })
    .workers(config.server.workers)
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await
}

/// Initialise le système de logging
fn init_logging(config: &crate::config::LoggingConfig) {
    let filter = match config.level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    match config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
    }
}
