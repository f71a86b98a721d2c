use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::{InitializeRequest, InitializeResponse, PredictForm};
use crate::state::AppState;
use crate::views;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body("ESP32 and price server are running!")
}

/// Called by the device to open a request before a person fills in the form.
pub async fn initialize_request(
    state: web::Data<AppState>,
    body: web::Json<InitializeRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    let request_id = body.request_id();
    let pending = body.pending();

    log::info!(
        "initialized request {:?} (district {:?}, building type {:?})",
        request_id,
        pending.district,
        pending.building_type
    );
    if state
        .registry
        .register(request_id.clone().unwrap_or_default(), pending)
        .is_some()
    {
        log::debug!("request {:?} overwritten", request_id);
    }

    HttpResponse::Ok().json(InitializeResponse::success(request_id))
}

pub async fn user_input(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();
    let pending = state.registry.lookup(&request_id).ok_or_else(|| {
        log::warn!("form requested for unknown request {}", request_id);
        AppError::UnknownRequest(request_id.clone())
    })?;

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(views::input_form(&request_id, &pending, &state.city)))
}

pub async fn predict(
    state: web::Data<AppState>,
    form: web::Form<PredictForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let pending = state.registry.lookup(&form.request_id).ok_or_else(|| {
        log::warn!("prediction requested for unknown request {}", form.request_id);
        AppError::UnknownRequest(form.request_id.clone())
    })?;
    let details = form.details()?;

    let price = state.bundle.predict(&pending, &details).map_err(|e| {
        log::error!("prediction for {} failed: {}", form.request_id, e);
        AppError::from(e)
    })?;
    log::info!("request {} predicted price {:.2}", form.request_id, price);

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(views::result(price)))
}
