use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;

use estate_bridge::bundle::ModelBundle;
use estate_bridge::config::ServerConfig;
use estate_bridge::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let bundle = ModelBundle::load(&config.artifacts).with_context(|| {
        format!(
            "failed to load model artifacts from {}",
            config.artifacts.model.display()
        )
    })?;
    log::info!("model expects {} features", bundle.layout().len());

    let state = web::Data::new(AppState::new(bundle, config.city.clone()));

    log::info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(estate_bridge::routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("cannot bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
