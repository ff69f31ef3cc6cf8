use crate::calc::date_grid::{month_grid, rotate_weekdays, GridCell, DAYS_IN_WEEK};
use crate::data::Resources;
use crate::picker::PickerContext;
use anyhow::{bail, Result};
use chrono::Datelike;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct GridReport {
    year: i32,
    month: u32,
    first_day_of_week: u32,
    weekdays: Vec<String>,
    cells: Vec<GridCell>,
}

pub fn run(year: Option<i32>, month: Option<u32>, first_day: Option<u32>, json: bool) -> Result<()> {
    let ctx = crate::cmd::load_context()?;
    let (year, month, first_day) = fill_defaults(&ctx, year, month, first_day);
    write_grid(&mut std::io::stdout(), year, month, first_day, &ctx.resources, json)
}

/// Missing arguments come from the picker clock and settings.
fn fill_defaults(
    ctx: &PickerContext,
    year: Option<i32>,
    month: Option<u32>,
    first_day: Option<u32>,
) -> (i32, u32, u32) {
    let today = ctx.clock.today();
    (
        year.unwrap_or(today.year()),
        month.unwrap_or(today.month()),
        first_day.unwrap_or(ctx.settings.first_day_of_week),
    )
}

/// Prints the 42-day grid of `year`/`month` as text or JSON.
pub(crate) fn write_grid<W: Write>(
    out: &mut W,
    year: i32,
    month: u32,
    first_day: u32,
    resources: &Resources,
    json: bool,
) -> Result<()> {
    if !(1..=12).contains(&month) {
        bail!("month must be between 1 and 12, got {month}");
    }
    if !(1..=7).contains(&first_day) {
        bail!("first day of week must be between 1 (Monday) and 7 (Sunday), got {first_day}");
    }
    let Some(grid) = month_grid(year, month, first_day) else {
        bail!("{year}-{month:02} is outside the supported calendar range");
    };
    let weekdays = rotate_weekdays(&resources.weekday_names(), first_day);

    if json {
        let report = GridReport {
            year,
            month,
            first_day_of_week: first_day,
            weekdays,
            cells: grid.to_vec(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let width = DAYS_IN_WEEK * 3 - 1;
    let title = format!("{} {}", resources.month_label(month), year);
    writeln!(out, "{title:^width$}")?;
    let header: Vec<String> = weekdays.iter().map(|w| format!("{w:>2.2}")).collect();
    writeln!(out, "{}", header.join(" "))?;
    for week in grid.chunks(DAYS_IN_WEEK) {
        let days: Vec<String> = week
            .iter()
            .map(|cell| {
                if cell.in_month {
                    format!("{:>2}", cell.date.day())
                } else {
                    " .".to_string()
                }
            })
            .collect();
        writeln!(out, "{}", days.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PickerSettings;
    use crate::runtime::ManualClock;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn render(year: i32, month: u32, first_day: u32, json: bool) -> Result<String> {
        let mut buf = Vec::new();
        write_grid(&mut buf, year, month, first_day, &Resources::default(), json)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_write_grid_text_sunday_first() {
        let out = render(2025, 1, 7, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("January 2025"));
        assert_eq!(lines[1], "Su Mo Tu We Th Fr Sa");
        assert_eq!(lines[2], " .  .  .  1  2  3  4");
    }

    #[test]
    fn test_write_grid_text_monday_first() {
        let out = render(2025, 1, 1, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "Mo Tu We Th Fr Sa Su");
        assert_eq!(lines[2], " .  .  1  2  3  4  5");
    }

    #[test]
    fn test_write_grid_json_has_42_cells() {
        let out = render(2024, 2, 7, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), 42);
        assert_eq!(value["weekdays"][0], "Su");
        assert_eq!(value["cells"][0]["date"], "2024-01-28");
        assert_eq!(value["cells"][0]["in_month"], false);
    }

    #[test]
    fn test_write_grid_rejects_bad_month() {
        let err = render(2025, 13, 7, false).unwrap_err();
        assert!(err.to_string().contains("month must be between 1 and 12"));
    }

    #[test]
    fn test_write_grid_rejects_bad_first_day() {
        assert!(render(2025, 1, 0, false).is_err());
        assert!(render(2025, 1, 8, true).is_err());
    }

    #[test]
    fn test_fill_defaults_reads_picker_clock() {
        let now = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap().and_hms_opt(23, 0, 0).unwrap();
        let settings = PickerSettings {
            first_day_of_week: 1,
            ..PickerSettings::default()
        };
        let ctx = PickerContext::new(Rc::new(ManualClock::new(now)), settings, Rc::new(Resources::default()));
        assert_eq!(fill_defaults(&ctx, None, None, None), (1999, 12, 1));
        assert_eq!(fill_defaults(&ctx, Some(2030), None, Some(7)), (2030, 12, 7));
    }
}
