mod arrivals;
mod directory;
mod error;
mod geo;
mod uwave;

#[cfg(test)]
mod test_utils;

use std::env;
use std::sync::Arc;

use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use directory::RouteDirectory;
use error::{EtaError, EtaResult};
use serde::Deserialize;
use serde_json::json;
use uwave::client::UwaveClient;
use uwave::TransitSource;

use crate::arrivals::estimate_arrivals;

#[derive(Clone)]
pub struct ContextData<S = UwaveClient> {
    source: S,
    directory: Arc<RouteDirectory>,
}

impl<S: TransitSource> ContextData<S> {
    pub fn new(source: S) -> ContextData<S> {
        ContextData {
            source,
            directory: Arc::new(RouteDirectory::new()),
        }
    }
}

#[derive(Deserialize)]
struct ArrivalsQuery {
    route: Option<String>,
}

#[get("/ok")]
async fn ok() -> EtaResult<impl Responder> {
    Ok(HttpResponse::Ok().finish())
}

async fn get_route_stops<S: TransitSource>(
    params: web::Path<(String,)>,
    ctx: web::Data<ContextData<S>>,
) -> EtaResult<impl Responder> {
    let (bus_line_id,) = params.into_inner();

    let bus = ctx
        .directory
        .find_route(&ctx.source, &bus_line_id)
        .await?
        .ok_or_else(|| EtaError::NotFound(format!("bus line {}", bus_line_id)))?;

    let response = web::Json(json!({
        "stops": bus.bus_stops,
    }));
    Ok(response)
}

async fn get_route_positions<S: TransitSource>(
    params: web::Path<(String,)>,
    ctx: web::Data<ContextData<S>>,
) -> EtaResult<impl Responder> {
    let (bus_line_id,) = params.into_inner();

    let positions = ctx.source.get_bus_positions(&bus_line_id).await?;
    let response = web::Json(json!({
        "status": positions.status,
        "positions": positions.payload,
    }));
    Ok(response)
}

async fn get_stop<S: TransitSource>(
    params: web::Path<(String,)>,
    ctx: web::Data<ContextData<S>>,
) -> EtaResult<impl Responder> {
    let (stop_id,) = params.into_inner();

    let stop = ctx
        .directory
        .resolve_stop(&ctx.source, &stop_id)
        .await?
        .ok_or_else(|| EtaError::NotFound(format!("stop {}", stop_id)))?;

    Ok(web::Json(stop))
}

async fn get_stop_routes<S: TransitSource>(
    params: web::Path<(String,)>,
    ctx: web::Data<ContextData<S>>,
) -> EtaResult<impl Responder> {
    let (stop_id,) = params.into_inner();

    let routes = ctx
        .directory
        .find_buses_serving_stop(&ctx.source, &stop_id)
        .await?;
    let response = web::Json(json!({
        "routes": routes,
    }));
    Ok(response)
}

/// `{"arrivals": [-1]}` when the line does not stop here
async fn get_stop_arrivals<S: TransitSource>(
    params: web::Path<(String,)>,
    query: web::Query<ArrivalsQuery>,
    ctx: web::Data<ContextData<S>>,
) -> EtaResult<impl Responder> {
    let (stop_id,) = params.into_inner();
    let bus_line_id = query
        .route
        .as_deref()
        .ok_or_else(|| EtaError::Response(400, "route is required".to_string()))?;

    let arrivals = estimate_arrivals(&ctx.source, &ctx.directory, &stop_id, bus_line_id).await?;
    let response = web::Json(json!({
        "arrivals": arrivals.into_minutes(),
    }));
    Ok(response)
}

/// Routes served against `ContextData<S>` app data
fn configure<S: TransitSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(ok)
        .route("/routes/{bus_line_id}/stops", web::get().to(get_route_stops::<S>))
        .route(
            "/routes/{bus_line_id}/positions",
            web::get().to(get_route_positions::<S>),
        )
        .route("/stops/{stop_id}", web::get().to(get_stop::<S>))
        .route("/stops/{stop_id}/routes", web::get().to(get_stop_routes::<S>))
        .route(
            "/stops/{stop_id}/arrivals",
            web::get().to(get_stop_arrivals::<S>),
        );
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::try_init().ok();

    log::debug!("Debug logging enabled");

    dotenvy::from_filename(".env").ok();

    let ctx = ContextData::new(UwaveClient::from_env()?);

    let listen_address = env::var("LISTEN_ADDRESS").unwrap_or("127.0.0.1:8080".to_string());

    log::info!("Starting server at {}", listen_address);

    HttpServer::new(move || {
        let logger = Logger::default();

        let mut cors = actix_cors::Cors::default()
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec!["accept"]);

        if let Ok(allowed_origin) = env::var("ALLOW_ORIGIN") {
            if allowed_origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(&allowed_origin);
            }
        }

        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(web::Data::new(ctx.clone()))
            .configure(configure::<UwaveClient>)
    })
    .bind(listen_address)?
    .run()
    .await?;

    log::info!("Server stopped");

    Ok(())
}
