// --- File: crates/agenda_gcal/src/service.rs ---
//! Google Calendar implementation of the free/busy port.

use std::sync::Arc;

use agenda_common::services::{BoxFuture, CalendarService};
use agenda_common::BusyInterval;
use chrono::{DateTime, Utc};
use google_calendar3::api::{FreeBusyRequest, FreeBusyRequestItem};
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Calendar {calendar_id} could not be queried: {reason}")]
    CalendarUnavailable { calendar_id: String, reason: String },
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Queries the free/busy endpoint for one calendar.
    ///
    /// Busy periods come back sorted by start. Periods missing a start or end
    /// are skipped. A calendar the API reports errors for (not found, no
    /// access) is an error, never an empty list.
    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        time_zone: &str,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let time_zone = time_zone.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let req = FreeBusyRequest {
                time_min: Some(start_time),
                time_max: Some(end_time),
                time_zone: Some(time_zone),
                items: Some(vec![FreeBusyRequestItem {
                    id: Some(calendar_id.clone()),
                    ..Default::default()
                }]),
                ..Default::default()
            };

            debug!(
                "FreeBusy query for {} from {} to {}",
                calendar_id, start_time, end_time
            );
            let (_response, freebusy_response) = calendar_hub.freebusy().query(req).doit().await?;

            let calendar = freebusy_response
                .calendars
                .and_then(|mut calendars| calendars.remove(&calendar_id))
                .ok_or_else(|| GcalServiceError::CalendarUnavailable {
                    calendar_id: calendar_id.clone(),
                    reason: "missing from response".to_string(),
                })?;

            if let Some(errors) = calendar.errors.filter(|errors| !errors.is_empty()) {
                return Err(GcalServiceError::CalendarUnavailable {
                    calendar_id,
                    reason: format!("{:?}", errors),
                });
            }

            let mut busy_periods = Vec::new();
            for period in calendar.busy.unwrap_or_default() {
                match (period.start, period.end) {
                    (Some(start), Some(end)) => busy_periods.push(BusyInterval::new(start, end)),
                    _ => warn!("Skipping busy period with missing start/end: {:?}", period),
                }
            }
            busy_periods.sort_by_key(|interval| interval.start);

            Ok(busy_periods)
        })
    }
}
