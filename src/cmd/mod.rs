pub mod grid;
pub mod init;
pub mod pick;
pub mod range;

use crate::data::persistence::get_data_dir;
use crate::data::{PickerSettings, Resources};
use crate::picker::{PickerContext, DATE_FORMAT, DATE_TIME_FORMAT};
use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Settings and resources from the data directory, on the system clock.
pub(crate) fn load_context() -> Result<PickerContext> {
    let dir = get_data_dir()?;
    let settings = PickerSettings::load_from(&dir)?;
    let resources = Resources::load_from(&dir)?;
    Ok(PickerContext::system(settings, resources))
}

/// Reads a typed moment such as `--start "2024-05-01 08:30:00"`. A bare date
/// takes `default_time`.
pub(crate) fn parse_preset(flag: &str, text: &str, default_time: NaiveTime) -> Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(moment) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        return Ok(moment);
    }
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => Ok(date.and_time(default_time)),
        Err(_) => bail!("--{flag} expects \"YYYY-MM-DD HH:MM:SS\" or \"YYYY-MM-DD\", got \"{text}\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_preset_full_moment() {
        let moment = parse_preset("start", "2024-05-01 08:30:00", NaiveTime::MIN).unwrap();
        assert_eq!(moment, d(2024, 5, 1).and_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_preset_bare_date_takes_default_time() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let moment = parse_preset("end", " 2024-02-29 ", noon).unwrap();
        assert_eq!(moment, d(2024, 2, 29).and_time(noon));
    }

    #[test]
    fn test_parse_preset_rejects_garbage() {
        for text in ["2024-02-30", "05/01/2024", "2024-05-01 25:00:00", ""] {
            let err = parse_preset("at", text, NaiveTime::MIN).unwrap_err();
            assert!(err.to_string().starts_with("--at expects"), "{text}: {err}");
        }
    }
}
