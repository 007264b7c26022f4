use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated, point-valued event. `label` travels as `activity` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "activity")]
    pub label: String,
    pub points: i64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
}

/// Create payload for an activity; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    #[serde(rename = "activity")]
    pub label: String,
    pub points: i64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
}

impl NewActivity {
    pub fn with_id(self, id: impl Into<String>) -> Activity {
        Activity {
            id: id.into(),
            label: self.label,
            points: self.points,
            date: self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(rename = "_id")]
    pub id: String,
    pub points: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrize {
    pub points: i64,
    pub label: String,
}

impl From<&Prize> for NewPrize {
    fn from(prize: &Prize) -> Self {
        Self {
            points: prize.points,
            label: prize.label.clone(),
        }
    }
}

/// An activity annotated with the running total after it, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub activity: Activity,
    pub total_after: i64,
}

/// Everything the backend service persists.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackendData {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub prizes: Vec<Prize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Dates are written as `YYYY-MM-DD`. Older records use `YYYY/MM/DD`, so both are read.
pub mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%Y-%m-%d";
    const LEGACY_FORMAT: &str = "%Y/%m/%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{raw}'")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_FORMAT))
            .ok()
    }
}
