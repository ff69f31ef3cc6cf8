use crate::picker::{DateTimePicker, PickerContext};
use crate::ui::picker_view::{App, Picker};
use crate::ui::run_interactive;
use anyhow::{bail, Result};
use chrono::{Datelike, NaiveTime};
use std::time::Instant;

/// Interactive single-date picker. Prints the confirmed date (and time).
pub fn run(no_time: bool, at: Option<String>) -> Result<()> {
    let ctx = crate::cmd::load_context()?;
    let picker = build_picker(&ctx, no_time, at.as_deref(), Instant::now())?;
    let mut app = App::new(Picker::Single(picker), &ctx);
    match run_interactive(&mut app)? {
        Some(picked) => println!("{picked}"),
        None => tracing::debug!("pick cancelled"),
    }
    Ok(())
}

/// Today's month, or the month of `--at` with that moment already picked.
fn build_picker(ctx: &PickerContext, no_time: bool, at: Option<&str>, now: Instant) -> Result<DateTimePicker> {
    let at = at
        .map(|text| crate::cmd::parse_preset("at", text, NaiveTime::MIN))
        .transpose()?;
    let today = ctx.clock.today();
    let mut picker = DateTimePicker::new_at(ctx.clone(), today.year(), today.month() as i32, !no_time, now);
    if let Some(at) = at {
        picker.set_date_time(at);
        if picker.date() != Some(at.date()) {
            bail!("--at {} is outside the selectable dates", at.date());
        }
    }
    Ok(picker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PickerSettings, Resources};
    use crate::runtime::ManualClock;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ctx() -> PickerContext {
        let clock = Rc::new(ManualClock::new(d(2024, 3, 15).and_hms_opt(9, 0, 0).unwrap()));
        PickerContext::new(clock, PickerSettings::default(), Rc::new(Resources::default()))
    }

    #[test]
    fn test_build_without_preset_picks_today() {
        let picker = build_picker(&ctx(), false, None, Instant::now()).unwrap();
        assert_eq!(picker.date_time(), Some(d(2024, 3, 15).and_time(NaiveTime::MIN)));
    }

    #[test]
    fn test_at_preset_selects_and_shows_moment() {
        let picker = build_picker(&ctx(), false, Some("2026-01-20 07:15:00"), Instant::now()).unwrap();
        assert_eq!(picker.date_time(), Some(d(2026, 1, 20).and_hms_opt(7, 15, 0).unwrap()));
        assert_eq!((picker.calendar().year(), picker.calendar().month()), (2026, 1));
    }

    #[test]
    fn test_at_preset_drops_time_for_date_only() {
        let picker = build_picker(&ctx(), true, Some("2024-04-02 18:00:00"), Instant::now()).unwrap();
        assert_eq!(picker.date_time(), Some(d(2024, 4, 2).and_time(NaiveTime::MIN)));
    }

    #[test]
    fn test_at_preset_errors() {
        assert!(build_picker(&ctx(), false, Some("tomorrow"), Instant::now()).is_err());
        let err = build_picker(&ctx(), false, Some("1800-01-01"), Instant::now()).unwrap_err();
        assert!(err.to_string().contains("outside the selectable dates"));
    }
}
