mod config;
mod errors;
mod services;
mod state;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;

use crate::config::AppConfig;
use crate::state::{open_database, AppState};

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

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
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let conn = open_database(&config.db_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let bind = config.bind.clone();
    let state = AppState::new(conn, config);

    info!("Server running at http://{}", bind);

    HttpServer::new(move || {
        App::new()
            // Inline data-URL proofs can push a JSON body past the default
            // limit; 16 MB clears an 8 MiB file after base64 expansion.
            .app_data(web::JsonConfig::default().limit(16 * 1024 * 1024))
            .app_data(web::Data::new(state.clone()))
            .service(services::registrations::configure_routes())
            .service(services::proofs::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind.as_str())?
    .run()
    .await
}
