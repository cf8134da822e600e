// File: crates/agenda_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{AvailabilityQuery, AvailableSlotsResponse};

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("requested_time" = Option<String>, Query, description = "Instant to search around (RFC3339). Defaults to now.", example = "2024-04-29T10:00:00-03:00"),
        ("time_zone" = Option<String>, Query, description = "Requester's IANA time zone, logged only", example = "Europe/Lisbon")
    ),
    responses(
        (status = 200, description = "Available slot starts", body = AvailableSlotsResponse,
         example = json!({
             "slots": ["2024-04-29T14:00:00Z", "2024-04-29T15:00:00Z", "2024-04-29T16:00:00Z"],
             "time_zone": "America/Sao_Paulo",
             "slot_duration_minutes": 60
         })
        ),
        (status = 500, description = "Calendar id not configured", body = String),
        (status = 503, description = "Calendar integration disabled", body = String)
    ),
    tag = "availability"
)]
fn doc_get_availability_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_get_availability_handler),
    components(schemas(AvailabilityQuery, AvailableSlotsResponse)),
    tags(
        (name = "availability", description = "Free slot search over the provider's calendar")
    ),
    servers(
        (url = "/api", description = "Agenda API server")
    )
)]
pub struct GcalApiDoc;
