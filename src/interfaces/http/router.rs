//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{FromRef, OriginalUri},
    http::{Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::booking::SharedBookingUseCase;
use crate::application::events::SharedEventBus;
use crate::interfaces::ws::{ws_notifications_handler, NotificationState};

use super::common::{ApiError, ErrorResponse};
use super::modules::bookings::{self, BookingAppState, BookingDto, CreateBookingRequest};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{self, http_metrics_middleware, MetricsState};
use super::modules::request_id::request_id_middleware;

/// Everything the HTTP layer needs. Handlers extract their own slice of it
/// through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub bookings: SharedBookingUseCase,
    pub event_bus: SharedEventBus,
    pub db: Option<DatabaseConnection>,
    pub prometheus: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

impl FromRef<ApiState> for BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        BookingAppState {
            bookings: Arc::clone(&s.bookings),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        MetricsState {
            handle: s.prometheus.clone(),
        }
    }
}

impl FromRef<ApiState> for NotificationState {
    fn from_ref(s: &ApiState) -> Self {
        NotificationState {
            event_bus: s.event_bus.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        metrics::prometheus_metrics,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::delete_booking,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ComponentHealth,
            CreateBookingRequest,
            BookingDto,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and metrics"),
        (name = "Bookings", description = "Court reservations"),
    ),
    info(
        title = "Court Booking API",
        version = "0.1.0",
        description = "Reserve the tennis court within opening hours without overlaps",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/ws/notifications", get(ws_notifications_handler))
        .route(
            "/api/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/api/bookings/{id}",
            get(bookings::get_booking).delete(bookings::delete_booking),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .merge(swagger_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND,
        format!("No endpoint at {}", uri.path()),
        uri.path(),
    )
}

async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {} is not supported on {}", method, uri.path()),
        uri.path(),
    )
}

// ── Tests ──────────────────────────────────────────────────────
