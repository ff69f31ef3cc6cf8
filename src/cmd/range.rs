use crate::picker::{end_of_day, PickerContext, RangePicker};
use crate::ui::picker_view::{App, Picker};
use crate::ui::run_interactive;
use anyhow::{bail, Result};
use chrono::{Datelike, NaiveTime};
use std::time::Instant;

/// Interactive two-calendar range picker. Prints `start ~ end` on confirm.
pub fn run(no_time: bool, start: Option<String>, end: Option<String>) -> Result<()> {
    let ctx = crate::cmd::load_context()?;
    let picker = build_picker(&ctx, no_time, start.as_deref(), end.as_deref(), Instant::now())?;
    let mut app = App::new(Picker::Range(picker), &ctx);
    match run_interactive(&mut app)? {
        Some(range) => println!("{range}"),
        None => tracing::debug!("range pick cancelled"),
    }
    Ok(())
}

/// Opens on today's month, then types in `--start` and `--end` the same way
/// a user picks each end.
fn build_picker(
    ctx: &PickerContext,
    no_time: bool,
    start: Option<&str>,
    end: Option<&str>,
    now: Instant,
) -> Result<RangePicker> {
    let start = start
        .map(|text| crate::cmd::parse_preset("start", text, NaiveTime::MIN))
        .transpose()?;
    let end = end
        .map(|text| crate::cmd::parse_preset("end", text, end_of_day()))
        .transpose()?;
    if let (Some(start), Some(end)) = (start, end) {
        let inverted = if no_time { start.date() > end.date() } else { start > end };
        if inverted {
            bail!("--start {start} is after --end {end}");
        }
    }

    let today = ctx.clock.today();
    let mut picker = RangePicker::new_at(ctx.clone(), today.year(), today.month() as i32, !no_time, now);
    if let Some(start) = start {
        picker.set_start_date_time(start, now);
        if picker.date_range().start != start.date() {
            bail!("--start {} is outside the selectable dates", start.date());
        }
    }
    if let Some(end) = end {
        picker.set_end_date_time(end, now);
        if picker.date_range().end != end.date() {
            bail!("--end {} is outside the selectable dates", end.date());
        }
    }
    Ok(picker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PickerSettings, Resources};
    use crate::picker::{DateRange, Side};
    use crate::runtime::ManualClock;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ctx() -> PickerContext {
        let clock = Rc::new(ManualClock::new(d(2024, 5, 15).and_hms_opt(9, 0, 0).unwrap()));
        PickerContext::new(clock, PickerSettings::default(), Rc::new(Resources::default()))
    }

    #[test]
    fn test_presets_set_both_ends() {
        let picker = build_picker(
            &ctx(),
            false,
            Some("2024-06-01 08:00:00"),
            Some("2024-07-04 17:30:00"),
            Instant::now(),
        )
        .unwrap();
        assert_eq!(picker.start_date_time(), d(2024, 6, 1).and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(picker.end_date_time(), d(2024, 7, 4).and_hms_opt(17, 30, 0).unwrap());
        assert!(picker.date_range().is_different_year_or_month());
        assert_eq!(picker.calendar(Side::End).month(), 7);
        assert!(picker.is_valid_date_time_range());
    }

    #[test]
    fn test_bare_dates_span_whole_days() {
        let picker = build_picker(&ctx(), false, Some("2024-05-02"), Some("2024-05-03"), Instant::now()).unwrap();
        assert_eq!(picker.start_date_time(), d(2024, 5, 2).and_time(NaiveTime::MIN));
        assert_eq!(picker.end_date_time(), d(2024, 5, 3).and_time(end_of_day()));
    }

    #[test]
    fn test_end_only_before_today_pulls_start_down() {
        let picker = build_picker(&ctx(), true, None, Some("2024-04-20"), Instant::now()).unwrap();
        assert_eq!(picker.date_range(), DateRange { start: d(2024, 4, 20), end: d(2024, 4, 20) });
    }

    #[test]
    fn test_inverted_presets_are_refused() {
        let err = build_picker(&ctx(), false, Some("2024-05-03"), Some("2024-05-02"), Instant::now()).unwrap_err();
        assert!(err.to_string().contains("is after --end"));
        assert!(build_picker(&ctx(), false, Some("2024-05-03 10:00:00"), Some("2024-05-03 09:00:00"), Instant::now()).is_err());
        assert!(build_picker(&ctx(), true, Some("2024-05-03 10:00:00"), Some("2024-05-03 09:00:00"), Instant::now()).is_ok());
    }

    #[test]
    fn test_unparsable_or_unreachable_presets_fail() {
        assert!(build_picker(&ctx(), false, Some("May 1"), None, Instant::now()).is_err());
        let err = build_picker(&ctx(), false, None, Some("2200-01-01"), Instant::now()).unwrap_err();
        assert!(err.to_string().contains("outside the selectable dates"));
    }
}
