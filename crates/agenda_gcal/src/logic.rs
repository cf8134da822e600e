// --- File: crates/agenda_gcal/src/logic.rs ---
use agenda_common::services::CalendarService;
use agenda_common::BusyInterval;
use agenda_config::SchedulingConfig;
use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDateTime, SecondsFormat, TimeZone,
    Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Upper bound for a single slot; anything longer is a configuration mistake.
pub const MAX_SLOT_DURATION_MINUTES: i64 = 24 * 60;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum GcalError {
    #[error("Invalid scheduling policy: {0}")]
    InvalidPolicy(String),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
}

// --- Data Structures ---
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Instant to search around, RFC3339. Defaults to now.
    #[cfg_attr(feature = "openapi", schema(example = "2024-04-29T10:00:00-03:00"))]
    pub requested_time: Option<String>,

    /// Requester's IANA time zone. Logged only.
    #[cfg_attr(feature = "openapi", schema(example = "Europe/Lisbon"))]
    pub time_zone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableSlotsResponse {
    /// Slot starts in UTC, earliest first.
    #[cfg_attr(feature = "openapi", schema(example = json!(["2024-04-29T14:00:00Z"])))]
    pub slots: Vec<String>,
    /// The provider time zone working hours are expressed in.
    #[cfg_attr(feature = "openapi", schema(example = "America/Sao_Paulo"))]
    pub time_zone: String,
    #[cfg_attr(feature = "openapi", schema(example = 60))]
    pub slot_duration_minutes: i64,
}

// --- Scheduling Policy ---

/// Working-hour rules for one provider.
///
/// Only constructible through [`SchedulingPolicy::new`] (or `TryFrom` on the
/// config section), so a value in hand always satisfies
/// `work_start_hour < work_end_hour <= 24` and has a positive duration,
/// suggestion cap and horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingPolicy {
    provider_time_zone: Tz,
    work_start_hour: u32,
    work_end_hour: u32,
    slot_duration: Duration,
    max_suggestions: usize,
    search_horizon_days: u32,
}

impl SchedulingPolicy {
    pub fn new(
        provider_time_zone: Tz,
        work_start_hour: u32,
        work_end_hour: u32,
        slot_duration_minutes: i64,
        max_suggestions: usize,
        search_horizon_days: u32,
    ) -> Result<Self, GcalError> {
        if work_end_hour > 24 {
            return Err(GcalError::InvalidPolicy(format!(
                "work_end_hour must be at most 24, got {work_end_hour}"
            )));
        }
        if work_start_hour >= work_end_hour {
            return Err(GcalError::InvalidPolicy(format!(
                "work_start_hour ({work_start_hour}) must be before work_end_hour ({work_end_hour})"
            )));
        }
        if slot_duration_minutes <= 0 || slot_duration_minutes > MAX_SLOT_DURATION_MINUTES {
            return Err(GcalError::InvalidPolicy(format!(
                "slot_duration_minutes must be between 1 and {MAX_SLOT_DURATION_MINUTES}, got {slot_duration_minutes}"
            )));
        }
        if max_suggestions == 0 {
            return Err(GcalError::InvalidPolicy(
                "max_suggestions must be positive".to_string(),
            ));
        }
        if search_horizon_days == 0 {
            return Err(GcalError::InvalidPolicy(
                "search_horizon_days must be positive".to_string(),
            ));
        }

        Ok(Self {
            provider_time_zone,
            work_start_hour,
            work_end_hour,
            slot_duration: Duration::minutes(slot_duration_minutes),
            max_suggestions,
            search_horizon_days,
        })
    }

    pub fn provider_time_zone(&self) -> Tz {
        self.provider_time_zone
    }

    pub fn work_start_hour(&self) -> u32 {
        self.work_start_hour
    }

    pub fn work_end_hour(&self) -> u32 {
        self.work_end_hour
    }

    pub fn slot_duration(&self) -> Duration {
        self.slot_duration
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn search_horizon_days(&self) -> u32 {
        self.search_horizon_days
    }

    /// Weekday and start hour inside working hours. Duration is not checked.
    pub fn is_working_hour(&self, weekday: Weekday, hour: u32) -> bool {
        !is_weekend(weekday) && (self.work_start_hour..self.work_end_hour).contains(&hour)
    }
}

impl Default for SchedulingPolicy {
    /// Monday to Friday, 09:00–18:00 in São Paulo, three one-hour slots within two weeks.
    fn default() -> Self {
        Self {
            provider_time_zone: chrono_tz::America::Sao_Paulo,
            work_start_hour: 9,
            work_end_hour: 18,
            slot_duration: Duration::minutes(60),
            max_suggestions: 3,
            search_horizon_days: 14,
        }
    }
}

impl TryFrom<&SchedulingConfig> for SchedulingPolicy {
    type Error = GcalError;

    fn try_from(config: &SchedulingConfig) -> Result<Self, Self::Error> {
        let time_zone: Tz = config.provider_time_zone.trim().parse().map_err(|_| {
            GcalError::InvalidPolicy(format!(
                "unknown provider_time_zone: {}",
                config.provider_time_zone
            ))
        })?;

        Self::new(
            time_zone,
            config.work_start_hour,
            config.work_end_hour,
            config.slot_duration_minutes,
            config.max_suggestions,
            config.search_horizon_days,
        )
    }
}

// --- Availability Logic ---

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Maps a provider wall-clock time to an instant.
///
/// Ambiguous times (DST fold) take the earlier instant; times that do not
/// exist (DST gap) yield `None`.
fn resolve_local(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(value) => Some(value),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

fn truncate_to_hour(local: NaiveDateTime) -> NaiveDateTime {
    local
        .date()
        .and_hms_opt(local.hour(), 0, 0)
        .unwrap_or(local)
}

/// First working instant the search may start from.
///
/// A request at or before `now` starts one whole hour after `now`'s hour;
/// otherwise the request itself is the starting point. The result is then
/// moved forward hour by hour into working hours, jumping to the next
/// morning at closing time. Gives up after `search_horizon_days * 24` steps.
pub fn search_start(
    requested_time: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: &SchedulingPolicy,
) -> Option<DateTime<Tz>> {
    let tz = policy.provider_time_zone;
    let mut cursor = if requested_time <= now {
        truncate_to_hour(now.with_timezone(&tz).naive_local()) + Duration::hours(1)
    } else {
        requested_time.with_timezone(&tz).naive_local()
    };

    let max_steps = policy.search_horizon_days.saturating_mul(24);
    for _ in 0..max_steps {
        if policy.is_working_hour(cursor.weekday(), cursor.hour()) {
            // A wall-clock time skipped by DST is not a valid start; keep going.
            if let Some(start) = resolve_local(&tz, cursor) {
                return Some(start);
            }
        }

        cursor = truncate_to_hour(cursor) + Duration::hours(1);
        if cursor.hour() >= policy.work_end_hour {
            cursor = cursor
                .date()
                .succ_opt()?
                .and_hms_opt(policy.work_start_hour, 0, 0)?;
        }
    }

    None
}

/// The `[time_min, time_max)` window to fetch busy intervals for.
///
/// Ends at closing time on the day `search_horizon_days` after the start.
pub fn search_window(
    search_start: &DateTime<Tz>,
    policy: &SchedulingPolicy,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = policy.provider_time_zone;
    let closing = search_start
        .date_naive()
        .checked_add_days(Days::new(u64::from(policy.search_horizon_days)))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight + Duration::hours(i64::from(policy.work_end_hour)))
        .and_then(|local| {
            resolve_local(&tz, local).or_else(|| resolve_local(&tz, local + Duration::hours(1)))
        });

    let time_min = search_start.with_timezone(&Utc);
    let time_max = closing.map(|c| c.with_timezone(&Utc)).unwrap_or_else(|| {
        time_min + Duration::days(i64::from(policy.search_horizon_days) + 1)
    });

    (time_min, time_max)
}

fn collect_candidates(
    search_start: &DateTime<Tz>,
    policy: &SchedulingPolicy,
    busy_intervals: &[BusyInterval],
) -> Vec<DateTime<Utc>> {
    let tz = policy.provider_time_zone;
    let first_day = search_start.date_naive();
    let mut slots = Vec::with_capacity(policy.max_suggestions);

    for offset in 0..policy.search_horizon_days {
        let Some(day) = first_day.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        if is_weekend(day.weekday()) {
            continue;
        }

        for hour in policy.work_start_hour..policy.work_end_hour {
            let Some(candidate) = day
                .and_hms_opt(hour, 0, 0)
                .and_then(|local| resolve_local(&tz, local))
            else {
                continue;
            };
            if candidate < *search_start {
                continue;
            }

            let start = candidate.with_timezone(&Utc);
            let end = start + policy.slot_duration;
            if busy_intervals
                .iter()
                .any(|interval| interval.overlaps(start, end))
            {
                continue;
            }

            slots.push(start);
            if slots.len() >= policy.max_suggestions {
                return slots;
            }
        }
    }

    slots
}

/// Finds up to `max_suggestions` free slot starts nearest to a request.
///
/// Candidates are whole provider-local hours on weekdays within working
/// hours, not earlier than [`search_start`], whose `[start, start + duration)`
/// does not overlap any busy interval. Results are strictly increasing.
/// `requester_time_zone` is only logged. Returns an empty list when nothing
/// fits within the horizon.
pub fn find_available_slots(
    requested_time: DateTime<Utc>,
    requester_time_zone: Option<&str>,
    policy: &SchedulingPolicy,
    busy_intervals: &[BusyInterval],
    now: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    debug!(
        "Finding slots for {} (requester tz: {}), now {}, {} busy intervals",
        requested_time,
        requester_time_zone.unwrap_or("unknown"),
        now,
        busy_intervals.len()
    );

    let Some(start) = search_start(requested_time, now, policy) else {
        warn!(
            "No working hour found within {} days of {}",
            policy.search_horizon_days, requested_time
        );
        return Vec::new();
    };

    let slots = collect_candidates(&start, policy, busy_intervals);
    debug!("Found {} slots searching from {}", slots.len(), start);
    slots
}

/// Fetches busy intervals for the search window and runs the slot search.
///
/// Any calendar failure yields no slots rather than guessing availability.
pub async fn suggest_slots<C>(
    calendar: &C,
    calendar_id: &str,
    requested_time: DateTime<Utc>,
    requester_time_zone: Option<&str>,
    policy: &SchedulingPolicy,
    now: DateTime<Utc>,
) -> Vec<DateTime<Utc>>
where
    C: CalendarService + ?Sized,
{
    let Some(start) = search_start(requested_time, now, policy) else {
        warn!("Search start could not be placed for {}", requested_time);
        return Vec::new();
    };
    let (time_min, time_max) = search_window(&start, policy);

    let busy_intervals = match calendar
        .get_busy_times(
            calendar_id,
            time_min,
            time_max,
            policy.provider_time_zone.name(),
        )
        .await
    {
        Ok(intervals) => intervals,
        Err(err) => {
            error!("Free/busy lookup for {} failed: {}", calendar_id, err);
            return Vec::new();
        }
    };

    let slots = find_available_slots(
        requested_time,
        requester_time_zone,
        policy,
        &busy_intervals,
        now,
    );
    info!(
        "Suggested {} slots for {} between {} and {}",
        slots.len(),
        calendar_id,
        time_min,
        time_max
    );
    slots
}

/// Parses an RFC3339 instant, e.g. `2024-04-29T10:00:00-03:00`.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, GcalError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| GcalError::TimeParseError(format!("{value}: {err}")))
}

/// Formats a slot start the way the API returns it, e.g. `2024-04-29T14:00:00Z`.
pub fn format_slot(slot: &DateTime<Utc>) -> String {
    slot.to_rfc3339_opts(SecondsFormat::Secs, true)
}
