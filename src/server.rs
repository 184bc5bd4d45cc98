use crate::{
    config::Config,
    error::ProxyError,
    logger,
    models::ImageStyle,
    proxy::GenerationProxy,
};
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use serde_json::json;
use std::sync::Arc;

/// Registers the HTTP surface. The body limit applies to `/api/generate`,
/// whose base64 canvas payloads exceed actix's default.
pub fn routes(max_body_bytes: usize) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::PayloadConfig::new(max_body_bytes))
            .route("/api/generate", web::post().to(generate))
            .route("/api/styles", web::get().to(styles))
            .route("/health", web::get().to(health));
    }
}

async fn generate(
    proxy: web::Data<GenerationProxy>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let result = proxy.handle(&body).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn styles() -> HttpResponse {
    HttpResponse::Ok().json(ImageStyle::supported_styles())
}

async fn health(proxy: web::Data<GenerationProxy>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "gatewayConfigured": proxy.is_configured(),
    }))
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let proxy = GenerationProxy::from_config(&config.gateway)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let proxy = web::Data::from(Arc::new(proxy));

    let (host, port) = config.bind_address();
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &host, port);
    logger::log_config_info(&config);

    let max_body_bytes = config.max_body_bytes;
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::new("%r %s %b bytes %Dms"))
            .app_data(proxy.clone())
            .configure(routes(max_body_bytes))
    })
    .bind((host, port))?
    .run()
    .await
}
