use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};

use crate::models::Booking;

/// Start of the appointment, or `None` when the backend's time label is not `HH:MM`.
pub fn appointment_start(booking: &Booking) -> Option<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(&booking.time, "%H:%M").ok()?;
    Some(booking.date.and_time(time))
}

/// RFC 5545 TEXT escaping. Line breaks become a literal `\n`, so a value can
/// never start a new property line.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

fn dtstamp(booking: &Booking) -> String {
    booking
        .created_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
        .format("%Y%m%dT%H%M%SZ")
        .to_string()
}

pub fn generate_ics(
    booking: &Booking,
    duration_minutes: u32,
    business_name: &str,
    address: &str,
) -> Option<String> {
    let start = appointment_start(booking)?;
    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = (start + Duration::minutes(i64::from(duration_minutes)))
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtstamp = dtstamp(booking);
    let uid = format!("{}@detailing", escape_text(&booking.id));

    let summary = escape_text(&format!("{} - {}", booking.service_name, business_name));
    let location = escape_text(address);
    let description = escape_text(&format!(
        "Veículo: {} ({}). Chegue com 10 minutos de antecedência.",
        booking.vehicle_model, booking.vehicle_plate
    ));

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Detailing//Booking//PT".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{dtstamp}"),
        format!("DTSTART:{dtstart}"),
        format!("DTEND:{dtend}"),
        format!("SUMMARY:{summary}"),
        format!("LOCATION:{location}"),
        format!("DESCRIPTION:{description}"),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    Some(lines.iter().map(|line| fold_line(line) + "\r\n").collect())
}

/// Folds a content line at 75 octets, never splitting a UTF-8 character.
fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + line.len() / 74 * 3);
    let mut width = 0;
    for c in line.chars() {
        if width + c.len_utf8() > 75 {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += c.len_utf8();
    }
    out
}
