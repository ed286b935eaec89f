//! Routes de l'application web

use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, Responder};
use actix_multipart::Multipart;
use futures::StreamExt;
use tracing::{error, info, instrument, warn};

use fastaflow_core::{allowed_extension, parse_fasta, SequenceStats};
use fastaflow_storage::FastaEntry;

use crate::models::{AppState, EntryView, ErrorResponse};
use crate::plots;

/// Rend un template avec le contexte fourni
fn render_template(
    data: &web::Data<AppState>,
    template: &str,
    ctx: &tera::Context,
    status: StatusCode,
) -> HttpResponse {
    match data.tera.render(template, ctx) {
        Ok(rendered) => HttpResponse::build(status)
            .content_type("text/html")
            .body(rendered),
        Err(e) => {
            error!("Erreur de rendu du template {}: {}", template, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Erreur de rendu".to_string(), 500))
        }
    }
}

/// Rend la page d'erreur avec un message visible par l'utilisateur
fn render_error(data: &web::Data<AppState>, status: StatusCode, message: &str) -> HttpResponse {
    let mut ctx = tera::Context::new();
    ctx.insert("error", message);
    render_template(data, "error.html", &ctx, status)
}

/// Route pour la page d'accueil
#[get("/")]
#[instrument(skip(data))]
pub async fn home(data: web::Data<AppState>) -> impl Responder {
    let mut ctx = tera::Context::new();
    ctx.insert("version", env!("CARGO_PKG_VERSION"));
    render_template(&data, "home.html", &ctx, StatusCode::OK)
}

/// Route pour la page « à propos »
#[get("/about")]
#[instrument(skip(data))]
pub async fn about(data: web::Data<AppState>) -> impl Responder {
    render_template(&data, "about.html", &tera::Context::new(), StatusCode::OK)
}

/// Route pour le formulaire d'upload
#[get("/import")]
#[instrument(skip(data))]
pub async fn import_fasta(data: web::Data<AppState>) -> impl Responder {
    render_template(&data, "import_fasta.html", &tera::Context::new(), StatusCode::OK)
}

/// Fichier uploadé, accumulé en mémoire
struct Upload {
    filename: String,
    data: Vec<u8>,
}

/// Lit le fichier depuis le payload multipart, en respectant la limite de taille
async fn read_upload(payload: &mut Multipart, upload_limit: usize) -> Result<Upload, String> {
    let mut upload: Option<Upload> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Erreur de champ multipart: {}", e))?;

        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|name| name.to_string())
        else {
            continue;
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| format!("Erreur de lecture du fichier: {}", e))?;
            data.extend_from_slice(&chunk);

            if data.len() > upload_limit {
                return Err(format!(
                    "Fichier trop volumineux (limite: {} Mo)",
                    upload_limit / (1024 * 1024)
                ));
            }
        }

        upload = Some(Upload { filename, data });
    }

    upload.ok_or_else(|| "Le fichier FASTA est introuvable dans la requête".to_string())
}

/// Route de soumission: upload → parsing → statistiques → persistance → rendu
///
/// En cas de fichier invalide, rien n'est persisté et l'ancien jeu de
/// données reste en place.
#[post("/upload")]
#[instrument(skip(data, payload))]
pub async fn handle_upload(data: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    info!("Nouvelle requête d'upload FASTA");

    let upload = match read_upload(&mut payload, data.config.server.upload_limit).await {
        Ok(upload) => upload,
        Err(message) => {
            warn!("Upload rejeté: {}", message);
            return render_error(&data, StatusCode::BAD_REQUEST, &message);
        }
    };

    if upload.filename.is_empty() {
        return render_error(
            &data,
            StatusCode::BAD_REQUEST,
            "Aucun fichier sélectionné, veuillez choisir un fichier avant de continuer",
        );
    }

    if !allowed_extension(&upload.filename) {
        return render_error(
            &data,
            StatusCode::BAD_REQUEST,
            &format!(
                "Type de fichier invalide: {}, veuillez choisir un fichier FASTA",
                upload.filename
            ),
        );
    }

    // Parsing + calcul des statistiques pour chaque enregistrement
    let records = match parse_fasta(&upload.data) {
        Ok(records) => records,
        Err(e) => {
            warn!("Fichier FASTA illisible: {}", e);
            return render_error(
                &data,
                StatusCode::BAD_REQUEST,
                &format!("Impossible de lire le fichier FASTA: {}", e),
            );
        }
    };

    let mut entries = Vec::with_capacity(records.len());
    for record in &records {
        let stats = SequenceStats::compute(&record.sequence);
        match FastaEntry::from_record(record, &stats, &upload.filename) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                error!("Erreur de préparation de l'entrée {}: {}", record.id, e);
                return render_error(
                    &data,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Une erreur inattendue est survenue, veuillez réessayer",
                );
            }
        }
    }

    // Le nouvel upload remplace le jeu de données complet, en une transaction
    if let Err(e) = data.repository.replace_all(&entries).await {
        error!("Erreur de persistance: {}", e);
        return render_error(
            &data,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Échec de l'enregistrement des résultats, veuillez réessayer",
        );
    }

    info!(
        "{} séquence(s) analysée(s) depuis {}",
        entries.len(),
        upload.filename
    );

    render_results(&data).await
}

/// Route pour la table des résultats
#[get("/results")]
#[instrument(skip(data))]
pub async fn results(data: web::Data<AppState>) -> impl Responder {
    render_results(&data).await
}

/// Rend la table des résultats depuis le store
async fn render_results(data: &web::Data<AppState>) -> HttpResponse {
    let entries = match data.repository.list().await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Erreur de lecture de la base de données: {}", e);
            return render_error(
                data,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Échec de la lecture des résultats",
            );
        }
    };

    let mut views = Vec::with_capacity(entries.len());
    for entry in &entries {
        match EntryView::try_from(entry) {
            Ok(view) => views.push(view),
            Err(e) => {
                error!("Entrée {} illisible: {}", entry.id, e);
                return render_error(
                    data,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Échec de la lecture des résultats",
                );
            }
        }
    }

    let mut ctx = tera::Context::new();
    ctx.insert("entries", &views);
    render_template(data, "results.html", &ctx, StatusCode::OK)
}

/// Route des plots pour une séquence, identifiée par sa description
#[get("/plots/{description}")]
#[instrument(skip(data))]
pub async fn plots_page(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let description = path.into_inner();

    let entry = match data.repository.find_by_description(&description).await {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            return render_error(
                &data,
                StatusCode::NOT_FOUND,
                &format!("Séquence non trouvée: {}", description),
            );
        }
        Err(e) => {
            error!("Erreur de lecture de la base de données: {}", e);
            return render_error(
                &data,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Échec de la lecture des résultats",
            );
        }
    };

    let (nuc_freq, amino_freq) = match (entry.nucleotide_frequency(), entry.amino_acid_frequency())
    {
        (Ok(nuc), Ok(amino)) => (nuc, amino),
        (Err(e), _) | (_, Err(e)) => {
            error!("Fréquences illisibles pour {}: {}", entry.id, e);
            return render_error(
                &data,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Échec de la lecture des résultats",
            );
        }
    };

    let mut ctx = tera::Context::new();
    ctx.insert("header", &description);
    ctx.insert("pie_plot", &plots::pie_plot(&description, &nuc_freq));
    ctx.insert("bar_plot", &plots::bar_plot(&description, &amino_freq));
    ctx.insert("gc_plot", &plots::gc_plot(&description, &entry.sequence));

    render_template(&data, "plots.html", &ctx, StatusCode::OK)
}

/// Route pour la santé de l'application
#[get("/health")]
#[instrument]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
