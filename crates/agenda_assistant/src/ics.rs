// --- File: crates/agenda_assistant/src/ics.rs ---
//! iCalendar invite for a confirmed slot.

use chrono::{DateTime, Duration, Utc};
use icalendar::{Calendar, Component, Event, EventLike, Property};
use uuid::Uuid;

/// Invites always block one hour.
pub const INVITE_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
pub struct Invite<'a> {
    pub start: DateTime<Utc>,
    pub subject: &'a str,
    pub attendee_name: &'a str,
    pub attendee_email: &'a str,
    pub organizer_name: &'a str,
    pub organizer_email: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IcsFile {
    pub content: String,
    pub file_name: String,
}

/// Renders a VCALENDAR with a single VEVENT; `now` becomes DTSTAMP.
pub fn generate_ics(invite: &Invite<'_>, now: DateTime<Utc>) -> IcsFile {
    let end = invite.start + Duration::minutes(INVITE_DURATION_MINUTES);
    let uid = format!("{}@agenda-ai.com", Uuid::new_v4());
    let description = format!(
        "Your appointment scheduled via {}.\n\nThis is a meeting with {}.",
        invite.organizer_name, invite.attendee_name
    );

    let organizer = Property::new("ORGANIZER", format!("mailto:{}", invite.organizer_email))
        .add_parameter("CN", invite.organizer_name)
        .done();
    let attendee = Property::new("ATTENDEE", format!("mailto:{}", invite.attendee_email))
        .add_parameter("CUTYPE", "INDIVIDUAL")
        .add_parameter("ROLE", "REQ-PARTICIPANT")
        .add_parameter("PARTSTAT", "NEEDS-ACTION")
        .add_parameter("RSVP", "TRUE")
        .add_parameter("CN", invite.attendee_name)
        .add_parameter("X-NUM-GUESTS", "0")
        .done();

    let event = Event::new()
        .uid(&uid)
        .timestamp(now)
        .starts(invite.start)
        .ends(end)
        .summary(invite.subject)
        .description(&description)
        .append_property(organizer)
        .append_property(attendee)
        .done();

    let mut calendar = Calendar::new();
    calendar.push(event);

    IcsFile {
        content: calendar.to_string(),
        file_name: file_name_for(invite.subject, invite.start),
    }
}

/// `appointment-<subject>-<YYYY-MM-DD>.ics`.
///
/// The subject keeps ASCII letters, digits, underscores and whitespace;
/// whitespace runs become `_`. An empty result becomes `event`.
pub fn file_name_for(subject: &str, start: DateTime<Utc>) -> String {
    let mut safe = String::with_capacity(subject.len());
    let mut in_whitespace = false;
    for c in subject.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                safe.push('_');
            }
            in_whitespace = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            safe.push(c);
            in_whitespace = false;
        }
    }
    if safe.is_empty() {
        safe.push_str("event");
    }

    format!("appointment-{}-{}.ics", safe, start.format("%Y-%m-%d"))
}
