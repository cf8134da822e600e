// File: crates/agenda_gcal/src/handlers.rs
use crate::logic::{
    format_slot, parse_instant, suggest_slots, AvailabilityQuery, AvailableSlotsResponse,
    SchedulingPolicy,
};
use agenda_common::services::{BoxedError, CalendarService};
use agenda_config::AppConfig;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

// Shared state needed by the availability handler
#[derive(Clone)]
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub policy: SchedulingPolicy,
    pub calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
}

/// Handler to get the next available time slots around a requested instant.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability", // Path relative to /api
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Available slot starts, earliest first", body = AvailableSlotsResponse),
        (status = 500, description = "Calendar id not configured"),
        (status = 503, description = "Calendar integration disabled")
    ),
    tag = "Availability"
))]
pub async fn get_availability_handler(
    State(state): State<Arc<GcalState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, (StatusCode, String)> {
    // Ensure GCal feature is enabled via runtime config
    let calendar_service = match (&state.calendar_service, state.config.use_gcal) {
        (Some(service), true) => service.clone(),
        _ => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                "GCal service is disabled.".to_string(),
            ))
        }
    };

    let calendar_id = state
        .config
        .gcal
        .as_ref()
        .and_then(|gcal| gcal.calendar_id.as_deref())
        .ok_or_else(|| {
            info!("GCal calendar_id missing in GcalConfig.");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error: GCal calendar ID missing.".to_string(),
            )
        })?;

    let response = |slots: Vec<String>| AvailableSlotsResponse {
        slots,
        time_zone: state.policy.provider_time_zone().name().to_string(),
        slot_duration_minutes: state.policy.slot_duration().num_minutes(),
    };

    let now = Utc::now();
    let requested_time = match query.requested_time.as_deref() {
        None => now,
        Some(raw) => match parse_instant(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Ignoring availability request: {}", e);
                return Ok(Json(response(Vec::new())));
            }
        },
    };

    let slots = suggest_slots(
        calendar_service.as_ref(),
        calendar_id,
        requested_time,
        query.time_zone.as_deref(),
        &state.policy,
        now,
    )
    .await;

    Ok(Json(response(slots.iter().map(format_slot).collect())))
}
