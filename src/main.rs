use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use gigflow_backend::auth::middleware::JwtSecret;
use gigflow_backend::create_pool;
use gigflow_backend::handlers;
use gigflow_backend::lifecycle::{BidLifecycle, Notifier};
use gigflow_backend::realtime::server::EventServer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    let db_data = web::Data::new(db.clone());

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let jwt_data = web::Data::new(JwtSecret(jwt_secret));

    // Shared room registry for WebSocket connections; the lifecycle
    // engine publishes bid events through it.
    let event_server = Arc::new(EventServer::new());
    let event_data = web::Data::new(event_server.clone());

    let notifier: Arc<dyn Notifier> = event_server;
    let engine_data = web::Data::new(BidLifecycle::new(db, notifier));

    // Pinned origin enables cookie auth from the SPA; without one, fall
    // back to open CORS for clients sending the token header.
    let frontend_origin = std::env::var("FRONTEND_ORIGIN").ok();

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = match &frontend_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    actix_web::http::header::AUTHORIZATION,
                    actix_web::http::header::CONTENT_TYPE,
                    actix_web::http::header::ACCEPT,
                ])
                .supports_credentials()
                .max_age(3600),
            None => Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    actix_web::http::header::AUTHORIZATION,
                    actix_web::http::header::CONTENT_TYPE,
                    actix_web::http::header::ACCEPT,
                ])
                .max_age(3600),
        };

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(jwt_data.clone())
            .app_data(event_data.clone())
            .app_data(engine_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
