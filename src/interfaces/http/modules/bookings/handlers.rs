//! Booking HTTP handlers

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::booking::SharedBookingUseCase;
use crate::interfaces::http::common::{ApiError, ErrorResponse, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: SharedBookingUseCase,
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 400, description = "Invalid slot, outside opening hours, or overlapping", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingDto>), ApiError> {
    let created = state
        .bookings
        .reserve(request.into())
        .await
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    params(BookingsQuery),
    responses(
        (status = 200, description = "Bookings on the given day, oldest first", body = Vec<BookingDto>),
        (status = 400, description = "Missing or malformed date", body = ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<BookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<BookingDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text(), uri.path()))?;

    let bookings = state
        .bookings
        .bookings_on(query.date)
        .await
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;

    Ok(Json(bookings.into_iter().map(BookingDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDto),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookingDto>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text(), uri.path()))?;

    let booking = state
        .bookings
        .find_booking(id)
        .await
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;

    Ok(Json(booking.into()))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn delete_booking(
    State(state): State<BookingAppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text(), uri.path()))?;

    state
        .bookings
        .cancel_booking(id)
        .await
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
