use crate::calc::date_grid::{month_grid, normalize_year_month, rotate_weekdays, year_month, GridCell};
use crate::calc::paging::{MonthPage, YearPage};
use crate::picker::selection::{SelectionMode, SelectionModel};
use crate::picker::{CalendarEvent, PickerContext};
use crate::runtime::{EventBus, ListenerId, Timers};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Which page of the calendar is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalendarView {
    #[default]
    Days,
    Months,
    Years,
}

/// Direction of a wheel/scroll gesture. `Forward` is away from the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A grid cell with everything the renderer needs to style it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub selected: bool,
    pub special: bool,
    pub today: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ControllerTimer {
    Click(NaiveDate),
    Midnight,
}

/// Time from `now` until `grace` past the next local midnight.
pub fn delay_until_refresh(now: NaiveTime, grace: Duration) -> Duration {
    let elapsed = now.num_seconds_from_midnight() as u64;
    Duration::from_secs(SECONDS_PER_DAY - elapsed.min(SECONDS_PER_DAY - 1)).saturating_add(grace)
}

/// One calendar: the displayed month, its grid, the selection and the
/// month/year quick-pick pages.
pub struct CalendarController {
    ctx: PickerContext,
    year: i32,
    month: u32,
    first_day_of_week: u32,
    grid: Vec<GridCell>,
    today: NaiveDate,
    selection: SelectionModel,
    view: CalendarView,
    month_page: MonthPage,
    year_page: YearPage,
    timers: Timers<ControllerTimer>,
    outbox: Vec<CalendarEvent>,
    bus: EventBus<CalendarEvent>,
}

impl CalendarController {
    /// Shows `year`/`month` (normalised) with Single selection and bounds a
    /// century either side, and arms the midnight refresh. A month chrono
    /// cannot represent falls back to the current one.
    pub fn new(ctx: PickerContext, year: i32, month: i32) -> Self {
        Self::new_at(ctx, year, month, Instant::now())
    }

    pub fn new_at(ctx: PickerContext, year: i32, month: i32, now: Instant) -> Self {
        let today = ctx.clock.today();
        let (year, month) = normalize_year_month(year, month)
            .filter(|&(y, m)| NaiveDate::from_ymd_opt(y, m, 1).is_some())
            .unwrap_or_else(|| year_month(today));
        let first_day_of_week = ctx.settings.first_day_of_week;
        let mut controller = CalendarController {
            year,
            month,
            first_day_of_week,
            grid: Vec::new(),
            today,
            selection: SelectionModel::around_year(year),
            view: CalendarView::Days,
            month_page: MonthPage::default().select(month),
            year_page: YearPage::around(year),
            timers: Timers::new(),
            outbox: Vec::new(),
            bus: EventBus::new(),
            ctx,
        };
        controller.regenerate();
        controller.arm_midnight_refresh(now);
        controller
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day_of_week(&self) -> u32 {
        self.first_day_of_week
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn month_page(&self) -> MonthPage {
        self.month_page
    }

    pub fn year_page(&self) -> YearPage {
        self.year_page
    }

    pub fn grid(&self) -> &[GridCell] {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        self.selection.selected().to_vec()
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.selection.min_date()
    }

    pub fn max_date(&self) -> NaiveDate {
        self.selection.max_date()
    }

    /// The grid decorated with selection, highlight and today markers.
    /// Highlighted dates are not marked in Range mode.
    pub fn cells(&self) -> Vec<DayCell> {
        let show_special = self.selection.mode() != SelectionMode::Range;
        self.grid
            .iter()
            .map(|cell| DayCell {
                date: cell.date,
                in_month: cell.in_month,
                selected: self.selection.contains(cell.date),
                special: show_special && self.selection.is_special(cell.date),
                today: cell.date == self.today,
            })
            .collect()
    }

    /// Header labels from Monday-first names, starting at the first day of
    /// the week.
    pub fn weekday_labels<T: Clone>(&self, monday_first: &[T]) -> Vec<T> {
        rotate_weekdays(monday_first, self.first_day_of_week)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CalendarEvent) + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.bus.len()
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    /// Shows `year`/`month`, carrying month overflow into the year. Years
    /// outside the bounds are refused; a month past the bound within the
    /// boundary year is pulled back to the bound's month. Returns false when
    /// nothing changed.
    pub fn set_year_month(&mut self, year: i32, month: i32) -> bool {
        let changed = self.navigate(year, month);
        self.publish();
        changed
    }

    pub fn set_first_day_of_week(&mut self, first_day_of_week: u32) -> bool {
        if !(1..=7).contains(&first_day_of_week) || first_day_of_week == self.first_day_of_week {
            return false;
        }
        self.first_day_of_week = first_day_of_week;
        self.regenerate();
        self.outbox.push(CalendarEvent::Refresh {
            year: self.year,
            month: self.month,
        });
        self.publish();
        true
    }

    /// Wheel paging. The month step for each direction comes from
    /// `PickerSettings::wheel_forward_step`.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        let step = match direction {
            ScrollDirection::Forward => self.ctx.settings.wheel_forward_step,
            ScrollDirection::Backward => self.ctx.settings.wheel_forward_step.saturating_neg(),
        };
        self.set_year_month(self.year, (self.month as i32).saturating_add(step))
    }

    /// Previous month, or previous year page in the Years view. Disabled in
    /// the Months view.
    pub fn previous(&mut self) -> bool {
        match self.view {
            CalendarView::Days => self.set_year_month(self.year, self.month as i32 - 1),
            CalendarView::Months => false,
            CalendarView::Years => {
                self.year_page = self.year_page.previous(self.year);
                true
            }
        }
    }

    pub fn next(&mut self) -> bool {
        match self.view {
            CalendarView::Days => self.set_year_month(self.year, self.month as i32 + 1),
            CalendarView::Months => false,
            CalendarView::Years => {
                self.year_page = self.year_page.next(self.year);
                true
            }
        }
    }

    pub fn can_go_previous(&self) -> bool {
        match self.view {
            CalendarView::Months => false,
            _ => (self.year, self.month) > year_month(self.min_date()),
        }
    }

    pub fn can_go_next(&self) -> bool {
        match self.view {
            CalendarView::Months => false,
            _ => (self.year, self.month) < year_month(self.max_date()),
        }
    }

    pub fn toggle_month_view(&mut self) {
        if self.view == CalendarView::Months {
            self.view = CalendarView::Days;
        } else {
            self.month_page = self.month_page.select(self.month);
            self.view = CalendarView::Months;
        }
    }

    pub fn toggle_year_view(&mut self) {
        if self.view == CalendarView::Years {
            self.view = CalendarView::Days;
        } else {
            let real_year = self.ctx.clock.today().year();
            self.year_page = self.year_page.select(self.year, real_year);
            self.view = CalendarView::Years;
        }
    }

    /// Picks a month from the month page and returns to the day grid.
    pub fn pick_month(&mut self, month: u32) -> bool {
        self.view = CalendarView::Days;
        self.set_year_month(self.year, month as i32)
    }

    /// Picks a year from the year page and returns to the day grid.
    pub fn pick_year(&mut self, year: i32) -> bool {
        self.view = CalendarView::Days;
        self.set_year_month(year, self.month as i32)
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
        self.publish();
    }

    pub fn add_selected_date(&mut self, date: NaiveDate) -> bool {
        let added = self.selection.append(date);
        self.publish();
        added
    }

    pub fn delete_selected_date(&mut self, date: NaiveDate) -> bool {
        let removed = self.selection.remove(date);
        self.publish();
        removed
    }

    pub fn clear_selected_date(&mut self) {
        self.selection.clear();
        self.publish();
    }

    /// Moves the lower bound; the view follows when the displayed month is now
    /// before it.
    pub fn set_min_date(&mut self, date: NaiveDate) -> bool {
        if !self.selection.set_min_date(date) {
            return false;
        }
        if (self.year, self.month) < year_month(date) {
            self.navigate(date.year(), date.month() as i32);
        }
        self.publish();
        true
    }

    /// Moves the upper bound; the view follows when the displayed month is now
    /// past it.
    pub fn set_max_date(&mut self, date: NaiveDate) -> bool {
        if !self.selection.set_max_date(date) {
            return false;
        }
        if (self.year, self.month) > year_month(date) {
            self.navigate(date.year(), date.month() as i32);
        }
        self.publish();
        true
    }

    /// Replaces the highlighted dates and asks for a redraw of the current
    /// month. The selection is untouched.
    pub fn set_special_dates<I: IntoIterator<Item = NaiveDate>>(&mut self, dates: I) {
        self.selection.set_special_dates(dates);
        self.outbox.push(CalendarEvent::Refresh {
            year: self.year,
            month: self.month,
        });
        self.publish();
    }

    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.selection.set_date_range(start, end);
    }

    // ── Pointer input and timers ──────────────────────────────────────────────

    /// A click is held back for the debounce window so a double click on the
    /// same cell can cancel it.
    pub fn click(&mut self, date: NaiveDate, now: Instant) {
        trace!(%date, "click deferred");
        self.timers
            .start(ControllerTimer::Click(date), self.ctx.settings.click_debounce(), now);
    }

    /// Cancels a pending click on the same date and publishes
    /// `DateDoubleClicked` without applying selection rules or bounds.
    pub fn double_click(&mut self, date: NaiveDate, _now: Instant) {
        if self.timers.cancel(ControllerTimer::Click(date)) {
            trace!(%date, "pending click suppressed by double click");
        }
        self.outbox.push(CalendarEvent::DateDoubleClicked(date));
        self.publish();
    }

    /// Runs every deferred action due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for timer in self.timers.drain_due(now) {
            match timer {
                ControllerTimer::Click(date) => self.apply_click(date),
                ControllerTimer::Midnight => {
                    self.today = self.ctx.clock.today();
                    self.regenerate();
                    self.outbox.push(CalendarEvent::Refresh {
                        year: self.year,
                        month: self.month,
                    });
                    self.arm_midnight_refresh(now);
                }
            }
        }
        self.publish();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn has_pending_click(&self) -> bool {
        self.timers.is_pending_where(|t| matches!(t, ControllerTimer::Click(_)))
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn apply_click(&mut self, date: NaiveDate) {
        match self.selection.mode() {
            SelectionMode::Range => {
                self.selection.append(date);
            }
            SelectionMode::None | SelectionMode::Single | SelectionMode::Multi => {
                let toggled = if self.selection.contains(date) {
                    self.selection.remove(date)
                } else {
                    self.selection.append(date)
                };
                if toggled && year_month(date) != (self.year, self.month) {
                    self.navigate(date.year(), date.month() as i32);
                }
            }
        }
    }

    fn navigate(&mut self, year: i32, month: i32) -> bool {
        let Some((year, mut month)) = normalize_year_month(year, month) else {
            debug!(year, month, "navigation refused: year overflow");
            return false;
        };
        let (min, max) = (self.min_date(), self.max_date());
        if year > max.year() || year < min.year() {
            debug!(year, month, "navigation refused: year out of bounds");
            return false;
        }
        if (year, month) > year_month(max) {
            month = max.month();
        } else if (year, month) < year_month(min) {
            month = min.month();
        }
        if (year, month) == (self.year, self.month) {
            return false;
        }
        self.year = year;
        self.month = month;
        self.regenerate();
        self.outbox.push(CalendarEvent::Refresh { year, month });
        trace!(year, month, "calendar navigated");
        true
    }

    fn regenerate(&mut self) {
        match month_grid(self.year, self.month, self.first_day_of_week) {
            Some(grid) => self.grid = grid.to_vec(),
            None => {
                debug!(year = self.year, month = self.month, "month grid out of calendar range");
                self.grid.clear();
            }
        }
    }

    fn arm_midnight_refresh(&mut self, now: Instant) {
        let delay = delay_until_refresh(self.ctx.clock.now().time(), self.ctx.settings.midnight_grace());
        trace!(?delay, "midnight refresh armed");
        self.timers.start(ControllerTimer::Midnight, delay, now);
    }

    fn publish(&mut self) {
        let mut events = self.selection.take_events();
        events.append(&mut self.outbox);
        for event in &events {
            self.bus.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PickerSettings, Resources};
    use crate::runtime::ManualClock;
    use chrono::NaiveDateTime;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(y: i32, m: u32, day: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        d(y, m, day).and_hms_opt(h, min, s).unwrap()
    }

    fn ctx_with(clock: Rc<ManualClock>) -> PickerContext {
        PickerContext::new(clock, PickerSettings::default(), Rc::new(Resources::default()))
    }

    fn ctx() -> PickerContext {
        ctx_with(Rc::new(ManualClock::new(at(2024, 3, 15, 12, 0, 0))))
    }

    fn record(c: &mut CalendarController) -> Rc<RefCell<Vec<CalendarEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        c.subscribe(move |e| sink.borrow_mut().push(*e));
        log
    }

    fn refreshes(log: &Rc<RefCell<Vec<CalendarEvent>>>) -> usize {
        log.borrow()
            .iter()
            .filter(|e| matches!(e, CalendarEvent::Refresh { .. }))
            .count()
    }

    #[test]
    fn test_new_normalizes_month() {
        let c = CalendarController::new(ctx(), 2024, 13);
        assert_eq!((c.year(), c.month()), (2025, 1));
        assert_eq!(c.grid().len(), 42);
        assert_eq!(c.selection_mode(), SelectionMode::Single);
    }

    #[test]
    fn test_set_year_month_is_idempotent() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        let log = record(&mut c);
        assert!(c.set_year_month(2023, 14));
        assert_eq!((c.year(), c.month()), (2024, 2));
        assert!(!c.set_year_month(2024, 2));
        assert!(!c.set_year_month(2025, -10));
        assert_eq!(refreshes(&log), 1);
    }

    #[test]
    fn test_set_year_month_refuses_years_outside_bounds() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.set_min_date(d(2020, 5, 10));
        c.set_max_date(d(2026, 8, 20));
        assert!(!c.set_year_month(2019, 12));
        assert!(!c.set_year_month(2027, 1));
        assert_eq!((c.year(), c.month()), (2024, 3));
    }

    #[test]
    fn test_set_year_month_clamps_month_in_boundary_year() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.set_min_date(d(2020, 5, 10));
        c.set_max_date(d(2026, 8, 20));
        assert!(c.set_year_month(2026, 11));
        assert_eq!((c.year(), c.month()), (2026, 8));
        assert!(c.set_year_month(2020, 1));
        assert_eq!((c.year(), c.month()), (2020, 5));
    }

    #[test]
    fn test_scroll_forward_shows_previous_month() {
        let mut c = CalendarController::new(ctx(), 2024, 1);
        assert!(c.scroll(ScrollDirection::Forward));
        assert_eq!((c.year(), c.month()), (2023, 12));
        assert!(c.scroll(ScrollDirection::Backward));
        assert!(c.scroll(ScrollDirection::Backward));
        assert_eq!((c.year(), c.month()), (2024, 2));
    }

    #[test]
    fn test_click_is_deferred_by_debounce() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        let t0 = Instant::now();
        c.click(d(2024, 3, 10), t0);
        assert!(c.selected_dates().is_empty());
        assert!(c.has_pending_click());
        c.tick(t0 + Duration::from_millis(119));
        assert!(c.selected_dates().is_empty());
        c.tick(t0 + Duration::from_millis(120));
        assert_eq!(c.selected_dates(), vec![d(2024, 3, 10)]);
    }

    #[test]
    fn test_double_click_suppresses_pending_click() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        let log = record(&mut c);
        let t0 = Instant::now();
        c.click(d(2024, 3, 10), t0);
        c.double_click(d(2024, 3, 10), t0 + Duration::from_millis(60));
        c.tick(t0 + Duration::from_millis(500));
        assert!(c.selected_dates().is_empty());
        assert_eq!(*log.borrow(), vec![CalendarEvent::DateDoubleClicked(d(2024, 3, 10))]);
    }

    #[test]
    fn test_double_click_ignores_bounds() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.set_max_date(d(2024, 3, 20));
        let log = record(&mut c);
        c.double_click(d(2024, 3, 28), Instant::now());
        assert_eq!(*log.borrow(), vec![CalendarEvent::DateDoubleClicked(d(2024, 3, 28))]);
    }

    #[test]
    fn test_click_on_adjacent_month_navigates() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        let t0 = Instant::now();
        c.click(d(2024, 4, 2), t0);
        c.tick(t0 + Duration::from_millis(200));
        assert_eq!((c.year(), c.month()), (2024, 4));
        assert_eq!(c.selected_dates(), vec![d(2024, 4, 2)]);
    }

    #[test]
    fn test_multi_click_toggles() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.set_selection_mode(SelectionMode::Multi);
        let t0 = Instant::now();
        c.click(d(2024, 3, 10), t0);
        c.click(d(2024, 3, 11), t0);
        c.tick(t0 + Duration::from_millis(200));
        assert_eq!(c.selected_dates().len(), 2);
        c.click(d(2024, 3, 10), t0 + Duration::from_millis(300));
        c.tick(t0 + Duration::from_millis(500));
        assert_eq!(c.selected_dates(), vec![d(2024, 3, 11)]);
    }

    #[test]
    fn test_single_click_on_selected_keeps_it() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.add_selected_date(d(2024, 3, 10));
        let t0 = Instant::now();
        c.click(d(2024, 3, 10), t0);
        c.tick(t0 + Duration::from_millis(200));
        assert_eq!(c.selected_dates(), vec![d(2024, 3, 10)]);
        assert!(!c.delete_selected_date(d(2024, 3, 10)));
    }

    #[test]
    fn test_set_min_date_navigates_when_view_falls_outside() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        let log = record(&mut c);
        assert!(c.set_min_date(d(2024, 6, 15)));
        assert_eq!((c.year(), c.month()), (2024, 6));
        assert!(log.borrow().contains(&CalendarEvent::MinDateChanged(d(2024, 6, 15))));
        assert_eq!(refreshes(&log), 1);
        assert!(!c.set_min_date(d(2024, 6, 15)));
    }

    #[test]
    fn test_set_max_date_navigates_back() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        assert!(c.set_max_date(d(2023, 11, 30)));
        assert_eq!((c.year(), c.month()), (2023, 11));
        assert!(!c.can_go_next());
        assert!(c.can_go_previous());
    }

    #[test]
    fn test_cells_mark_selection_special_and_today() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.add_selected_date(d(2024, 3, 10));
        c.set_special_dates(vec![d(2024, 3, 11)]);
        let cells = c.cells();
        let find = |date: NaiveDate| cells.iter().find(|cell| cell.date == date).copied().unwrap();
        assert!(find(d(2024, 3, 10)).selected);
        assert!(find(d(2024, 3, 11)).special);
        assert!(find(d(2024, 3, 15)).today);
        c.set_selection_mode(SelectionMode::Range);
        assert!(!c.cells().iter().any(|cell| cell.special));
    }

    #[test]
    fn test_first_day_of_week_changes_grid_start() {
        let mut c = CalendarController::new(ctx(), 2025, 1);
        assert_eq!(c.grid()[0].date, d(2024, 12, 29));
        assert!(c.set_first_day_of_week(1));
        assert_eq!(c.grid()[0].date, d(2024, 12, 30));
        assert!(!c.set_first_day_of_week(8));
        assert_eq!(c.weekday_labels(&["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"])[0], "Mo");
    }

    #[test]
    fn test_year_view_paging_and_pick() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.toggle_year_view();
        assert_eq!(c.view(), CalendarView::Years);
        assert_eq!(c.year_page().anchor(), 2018);
        assert!(c.previous());
        assert_eq!(c.year_page().anchor(), 2006);
        assert_eq!((c.year(), c.month()), (2024, 3));
        assert!(c.pick_year(2010));
        assert_eq!(c.view(), CalendarView::Days);
        assert_eq!((c.year(), c.month()), (2010, 3));
    }

    #[test]
    fn test_month_view_disables_paging() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        c.toggle_month_view();
        assert_eq!(c.month_page().selected(), Some(3));
        assert!(!c.next());
        assert!(!c.can_go_next());
        assert!(c.pick_month(7));
        assert_eq!((c.view(), c.month()), (CalendarView::Days, 7));
    }

    #[test]
    fn test_delay_until_refresh() {
        let grace = Duration::from_secs(3);
        let t = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(delay_until_refresh(t, grace), Duration::from_secs(63));
        assert_eq!(delay_until_refresh(NaiveTime::MIN, grace), Duration::from_secs(86_403));
    }

    #[test]
    fn test_midnight_refresh_moves_today_and_rearms() {
        let clock = Rc::new(ManualClock::new(at(2024, 3, 15, 23, 59, 50)));
        let t0 = Instant::now();
        let mut c = CalendarController::new_at(ctx_with(Rc::clone(&clock)), 2024, 3, t0);
        let log = record(&mut c);
        let due = c.next_deadline().unwrap();
        assert_eq!(due, t0 + Duration::from_secs(13));

        clock.set(at(2024, 3, 16, 0, 0, 3));
        c.tick(due);
        assert_eq!(c.today(), d(2024, 3, 16));
        assert_eq!(refreshes(&log), 1);
        let rearmed = c.next_deadline().unwrap();
        assert_eq!(rearmed, due + Duration::from_secs(86_400));
    }

    #[test]
    fn test_set_year_month_extreme_months_refused() {
        let mut c = CalendarController::new(ctx(), 2024, 3);
        let log = record(&mut c);
        assert!(!c.set_year_month(2024, i32::MIN));
        assert!(!c.set_year_month(2024, i32::MAX));
        assert!(!c.set_year_month(i32::MAX, 13));
        assert_eq!((c.year(), c.month()), (2024, 3));
        assert_eq!(refreshes(&log), 0);
        for (year, month) in [(i32::MIN, 0), (i32::MIN, 1), (2024, i32::MIN)] {
            let far = CalendarController::new(ctx(), year, month);
            assert_eq!((far.year(), far.month()), (2024, 3));
        }
    }

    #[test]
    fn test_oversized_settings_are_capped_before_use() {
        let settings = PickerSettings {
            midnight_grace_secs: u64::MAX,
            wheel_forward_step: i32::MIN,
            ..PickerSettings::default()
        };
        let clock = Rc::new(ManualClock::new(at(2024, 3, 15, 12, 0, 0)));
        let ctx = PickerContext::new(clock, settings, Rc::new(Resources::default()));
        let t0 = Instant::now();
        let mut c = CalendarController::new_at(ctx, 2024, 3, t0);
        assert_eq!(c.next_deadline(), Some(t0 + Duration::from_secs(12 * 3600 + 3600)));
        assert!(c.scroll(ScrollDirection::Backward));
        assert_eq!((c.year(), c.month()), (2024, 4));
    }
}
