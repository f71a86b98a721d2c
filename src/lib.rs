//! Bridges an ESP32 sensor and a person at a browser to a trained
//! real-estate price regressor.

pub mod bundle;
pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod models;
pub mod preprocess;
pub mod registry;
pub mod regressor;
pub mod state;
pub mod views;

use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(handlers::index)))
        .service(
            web::resource("/initialize-request")
                .route(web::post().to(handlers::initialize_request)),
        )
        .service(web::resource("/input/{request_id}").route(web::get().to(handlers::user_input)))
        .service(web::resource("/predict").route(web::post().to(handlers::predict)));
}
