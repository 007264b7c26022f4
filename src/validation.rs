use crate::models::{NewActivity, wire_date};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Raw text as typed into the add-activity form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityForm {
    pub activity: String,
    pub points: String,
    pub date: String,
}

impl ActivityForm {
    /// A blank form dated today.
    pub fn today() -> Self {
        Self::starting_on(Local::now().date_naive())
    }

    /// A blank form with the date prefilled.
    pub fn starting_on(date: NaiveDate) -> Self {
        Self {
            date: date.format(wire_date::FORMAT).to_string(),
            ..Self::default()
        }
    }
}

/// Per-field messages; a field is `None` when it passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub activity: Option<String>,
    pub points: Option<String>,
    pub date: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.activity.is_none() && self.points.is_none() && self.date.is_none()
    }
}

pub fn validate_activity_form(form: &ActivityForm) -> Result<NewActivity, FormErrors> {
    let mut errors = FormErrors::default();

    let label = form.activity.trim();
    if label.is_empty() {
        errors.activity = Some("Activity is required.".to_string());
    }

    let points = match parse_points(&form.points) {
        Ok(points) => Some(points),
        Err(message) => {
            errors.points = Some(message.to_string());
            None
        }
    };

    let date = parse_iso_date(&form.date);
    if date.is_none() {
        errors.date = Some("Date must be valid (YYYY-MM-DD).".to_string());
    }

    match (points, date) {
        (Some(points), Some(date)) if errors.is_empty() => Ok(NewActivity {
            label: label.to_string(),
            points,
            date,
        }),
        _ => Err(errors),
    }
}

fn parse_points(raw: &str) -> Result<i64, &'static str> {
    let raw = raw.trim();
    let value: f64 = match raw.parse() {
        Ok(value) if !raw.is_empty() => value,
        _ => return Err("Points must be a number."),
    };
    if value.is_nan() {
        return Err("Points must be a number.");
    }
    if !value.is_finite() {
        return Err("Points must be finite.");
    }
    if value.fract() != 0.0 {
        return Err("Points must be an integer.");
    }
    if value <= 0.0 {
        return Err("Points must be > 0.");
    }
    if value > i64::MAX as f64 {
        return Err("Points are too large.");
    }
    Ok(value as i64)
}

/// Strict `YYYY-MM-DD`; zero padding is required and the day must exist.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(idx, byte)| idx == 4 || idx == 7 || byte.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, wire_date::FORMAT).ok()
}
