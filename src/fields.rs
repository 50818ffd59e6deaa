//! Text encodings for record fields that have no natural CSV form.
//!
//! Every helper here is used on both the CSV and the JSON path, so a value
//! written by one can be read back by the other.

use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::error::{PlanError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| PlanError::InvalidDate(s.into()))
}

pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).map_err(|_| PlanError::InvalidTime(s.into()))
}

pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| PlanError::InvalidWeekday(s.into()))
}

/// Full English name, as stored in `schedule.csv`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `HH:MM` times.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{parse_time, TIME_FORMAT};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_time(&raw).map_err(de::Error::custom)
    }
}

/// Weekdays as full English names ("Monday"). Abbreviations are accepted on read.
pub mod weekday {
    use chrono::Weekday;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(super::weekday_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_weekday(&raw).map_err(de::Error::custom)
    }
}

/// Task id sets joined with `;`. An empty field is an empty set.
pub mod semicolon_ids {
    use std::collections::BTreeSet;

    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::id::TaskId;

    pub fn serialize<S: Serializer>(ids: &BTreeSet<TaskId>, s: S) -> Result<S::Ok, S::Error> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(";");
        s.serialize_str(&joined)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<TaskId>, D::Error> {
        let raw = String::deserialize(d)?;
        raw.split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<TaskId>().map_err(de::Error::custom))
            .collect()
    }
}
