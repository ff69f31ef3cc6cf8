//! Two Range-mode calendars kept in step as one `start ≤ end` date pair, with
//! an optional time of day on each end.

use crate::calc::date_grid::{clamp_day, year_month};
use crate::picker::controller::{CalendarController, ScrollDirection};
use crate::picker::selection::SelectionMode;
use crate::picker::{CalendarEvent, PickerContext, Side};
use crate::runtime::{EventBus, ListenerId, Timers};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, trace};

/// Last second of the day, the default end time.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::MIN + TimeDelta::seconds(86_399)
}

/// The time a side falls back to after an ordering violation.
fn reset_time(side: Side) -> NaiveTime {
    match side {
        Side::Start => NaiveTime::MIN,
        Side::End => end_of_day(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// True when the two ends fall in different calendar months.
    pub fn is_different_year_or_month(&self) -> bool {
        year_month(self.start) != year_month(self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

/// Notifications published by a [`RangePicker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeEvent {
    DateRangeChanged,
    TimeRangeChanged,
    /// The time on this side is flagged and will be reset shortly.
    TimeInvalid(Side),
    TimeCorrected(Side),
    CalendarRefresh { side: Side, year: i32, month: u32 },
}

#[derive(Clone, Copy, Debug)]
enum Inbound {
    Added(Side, NaiveDate),
    DoubleClicked(NaiveDate),
    Changed,
    Refresh(Side, i32, u32),
}

type Inbox = Rc<RefCell<VecDeque<Inbound>>>;

fn added_listener(side: Side, inbox: Inbox) -> impl FnMut(&CalendarEvent) + 'static {
    move |event| {
        if let CalendarEvent::SelectionAdded(date) = event {
            inbox.borrow_mut().push_back(Inbound::Added(side, *date));
        }
    }
}

fn relay_listener(side: Side, inbox: Inbox) -> impl FnMut(&CalendarEvent) + 'static {
    move |event| {
        let inbound = match *event {
            CalendarEvent::DateDoubleClicked(date) => Inbound::DoubleClicked(date),
            CalendarEvent::SelectionChanged => Inbound::Changed,
            CalendarEvent::Refresh { year, month } => Inbound::Refresh(side, year, month),
            _ => return,
        };
        inbox.borrow_mut().push_back(inbound);
    }
}

/// A start calendar and an end calendar whose picks form one date range.
///
/// The side whose selection just changed wins: if the pair would invert, the
/// other side is pulled to the same date. When both ends share a day and the
/// start time is after the end time, the offending time is flagged through
/// [`RangeEvent::TimeInvalid`] and reset after
/// `PickerSettings::time_correction_ms`.
pub struct RangePicker {
    ctx: PickerContext,
    include_time: bool,
    start: CalendarController,
    end: CalendarController,
    start_time: NaiveTime,
    end_time: NaiveTime,
    pair: DateRange,
    start_invalid: bool,
    end_invalid: bool,
    inbox: Inbox,
    added_listeners: Option<(ListenerId, ListenerId)>,
    timers: Timers<Side>,
    bus: EventBus<RangeEvent>,
}

impl RangePicker {
    pub fn new(ctx: PickerContext, year: i32, month: i32, include_time: bool) -> Self {
        Self::new_at(ctx, year, month, include_time, Instant::now())
    }

    /// Both calendars show `year`/`month`. With times the pair starts as that
    /// month's day matching today; without, it runs from the 1st to that day.
    pub fn new_at(ctx: PickerContext, year: i32, month: i32, include_time: bool, now: Instant) -> Self {
        let mut start = CalendarController::new_at(ctx.clone(), year, month, now);
        let mut end = CalendarController::new_at(ctx.clone(), year, month, now);
        start.set_selection_mode(SelectionMode::Range);
        end.set_selection_mode(SelectionMode::Range);

        let today = ctx.clock.today();
        let (y, m) = (start.year(), start.month());
        let this_day = clamp_day(y, m, today.day()).unwrap_or(today);
        let first = if include_time {
            this_day
        } else {
            clamp_day(y, m, 1).unwrap_or(this_day)
        };

        let inbox: Inbox = Rc::new(RefCell::new(VecDeque::new()));
        start.subscribe(relay_listener(Side::Start, Rc::clone(&inbox)));
        end.subscribe(relay_listener(Side::End, Rc::clone(&inbox)));

        let mut picker = RangePicker {
            ctx,
            include_time,
            start,
            end,
            start_time: NaiveTime::MIN,
            end_time: end_of_day(),
            pair: DateRange {
                start: first,
                end: this_day,
            },
            start_invalid: false,
            end_invalid: false,
            inbox,
            added_listeners: None,
            timers: Timers::new(),
            bus: EventBus::new(),
        };
        picker.refresh_calendar_selection();
        picker.attach_added();
        picker.inbox.borrow_mut().clear();
        picker
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn include_time(&self) -> bool {
        self.include_time
    }

    pub fn date_range(&self) -> DateRange {
        self.pair
    }

    pub fn time_range(&self) -> (NaiveTime, NaiveTime) {
        (self.start_time, self.end_time)
    }

    pub fn start_date_time(&self) -> NaiveDateTime {
        self.pair.start.and_time(self.start_time)
    }

    pub fn end_date_time(&self) -> NaiveDateTime {
        self.pair.end.and_time(self.end_time)
    }

    /// Whether the full start moment is not after the end moment. False while
    /// a same-day time violation waits for its correction.
    pub fn is_valid_date_time_range(&self) -> bool {
        self.start_date_time() <= self.end_date_time()
    }

    pub fn is_time_invalid(&self, side: Side) -> bool {
        match side {
            Side::Start => self.start_invalid,
            Side::End => self.end_invalid,
        }
    }

    pub fn calendar(&self, side: Side) -> &CalendarController {
        match side {
            Side::Start => &self.start,
            Side::End => &self.end,
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RangeEvent) + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    // ── Programmatic edits ────────────────────────────────────────────────────

    /// Selects the date on the start calendar (same path as a click) then
    /// sets the start time.
    pub fn set_start_date_time(&mut self, start: NaiveDateTime, now: Instant) {
        self.start.add_selected_date(start.date());
        self.dispatch(now);
        self.set_time(Side::Start, start.time(), now);
    }

    pub fn set_end_date_time(&mut self, end: NaiveDateTime, now: Instant) {
        self.end.add_selected_date(end.date());
        self.dispatch(now);
        self.set_time(Side::End, end.time(), now);
    }

    /// Replaces the whole range at once. Refused when `start > end`. Times
    /// are ignored for date-only pickers.
    pub fn set_date_time_range(&mut self, start: NaiveDateTime, end: NaiveDateTime, now: Instant) -> bool {
        if start > end {
            debug!(%start, %end, "date time range refused: inverted");
            return false;
        }
        self.detach_added();
        self.pair = DateRange {
            start: start.date(),
            end: end.date(),
        };
        self.start.set_year_month(start.year(), start.month() as i32);
        self.end.set_year_month(end.year(), end.month() as i32);
        self.refresh_calendar_selection();
        self.attach_added();

        if self.include_time {
            self.start_time = start.time();
            self.end_time = end.time();
        }
        self.clear_invalid();
        self.dispatch(now);
        self.bus.emit(&RangeEvent::TimeRangeChanged);
        true
    }

    /// Today from the first to the last second, applied like
    /// [`RangePicker::set_date_time_range`].
    pub fn reset_to_today(&mut self, now: Instant) -> bool {
        let today = self.ctx.clock.today();
        self.set_date_time_range(today.and_time(NaiveTime::MIN), today.and_time(end_of_day()), now)
    }

    pub fn set_start_time(&mut self, time: NaiveTime, now: Instant) -> bool {
        self.set_time(Side::Start, time, now)
    }

    pub fn set_end_time(&mut self, time: NaiveTime, now: Instant) -> bool {
        self.set_time(Side::End, time, now)
    }

    /// Edits one time of day. Ignored for date-only pickers or when the time
    /// is unchanged.
    pub fn set_time(&mut self, side: Side, time: NaiveTime, now: Instant) -> bool {
        if !self.include_time {
            trace!(?side, "time edit ignored: date-only picker");
            return false;
        }
        let slot = match side {
            Side::Start => &mut self.start_time,
            Side::End => &mut self.end_time,
        };
        if *slot == time {
            return false;
        }
        *slot = time;
        if self.times_out_of_order() {
            self.flag_invalid(side, now);
        }
        self.bus.emit(&RangeEvent::TimeRangeChanged);
        true
    }

    /// Moves the time on `side` by `delta`, wrapping around midnight.
    pub fn shift_time(&mut self, side: Side, delta: TimeDelta, now: Instant) -> bool {
        let (shifted, _) = match side {
            Side::Start => self.start_time,
            Side::End => self.end_time,
        }
        .overflowing_add_signed(delta);
        self.set_time(side, shifted, now)
    }

    // ── Forwarded calendar interaction ────────────────────────────────────────

    pub fn click(&mut self, side: Side, date: NaiveDate, now: Instant) {
        self.calendar_mut(side).click(date, now);
    }

    pub fn double_click(&mut self, side: Side, date: NaiveDate, now: Instant) {
        self.calendar_mut(side).double_click(date, now);
        self.dispatch(now);
    }

    pub fn scroll(&mut self, side: Side, direction: ScrollDirection, now: Instant) -> bool {
        self.update(side, now, |calendar| calendar.scroll(direction))
    }

    pub fn previous(&mut self, side: Side, now: Instant) -> bool {
        self.update(side, now, CalendarController::previous)
    }

    pub fn next(&mut self, side: Side, now: Instant) -> bool {
        self.update(side, now, CalendarController::next)
    }

    pub fn toggle_month_view(&mut self, side: Side) {
        self.calendar_mut(side).toggle_month_view();
    }

    pub fn toggle_year_view(&mut self, side: Side) {
        self.calendar_mut(side).toggle_year_view();
    }

    pub fn pick_month(&mut self, side: Side, month: u32, now: Instant) -> bool {
        self.update(side, now, |calendar| calendar.pick_month(month))
    }

    pub fn pick_year(&mut self, side: Side, year: i32, now: Instant) -> bool {
        self.update(side, now, |calendar| calendar.pick_year(year))
    }

    pub fn set_year_month(&mut self, side: Side, year: i32, month: i32, now: Instant) -> bool {
        self.update(side, now, |calendar| calendar.set_year_month(year, month))
    }

    pub fn set_first_day_of_week(&mut self, side: Side, first_day_of_week: u32, now: Instant) -> bool {
        self.update(side, now, |calendar| calendar.set_first_day_of_week(first_day_of_week))
    }

    /// Bounds one calendar. The pair itself is kept; an end outside the new
    /// bound is just not shown as selected until the bound allows it again.
    pub fn set_min_date(&mut self, side: Side, date: NaiveDate, now: Instant) -> bool {
        self.update(side, now, |calendar| calendar.set_min_date(date))
    }

    pub fn set_max_date(&mut self, side: Side, date: NaiveDate, now: Instant) -> bool {
        self.update(side, now, |calendar| calendar.set_max_date(date))
    }

    pub fn set_special_dates<I>(&mut self, side: Side, dates: I, now: Instant)
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.update(side, now, |calendar| calendar.set_special_dates(dates))
    }

    pub fn tick(&mut self, now: Instant) {
        self.start.tick(now);
        self.end.tick(now);
        self.dispatch(now);
        for side in self.timers.drain_due(now) {
            self.apply_time_correction(side);
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.start.next_deadline(),
            self.end.next_deadline(),
            self.timers.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn calendar_mut(&mut self, side: Side) -> &mut CalendarController {
        match side {
            Side::Start => &mut self.start,
            Side::End => &mut self.end,
        }
    }

    /// Runs `f` against one calendar, puts the pair back on the calendars if
    /// `f` disturbed their selection, then reacts to whatever was published.
    fn update<R>(&mut self, side: Side, now: Instant, f: impl FnOnce(&mut CalendarController) -> R) -> R {
        let result = f(self.calendar_mut(side));
        if !self.calendars_in_step() {
            self.detach_added();
            self.refresh_calendar_selection();
            self.attach_added();
        }
        self.dispatch(now);
        result
    }

    fn dispatch(&mut self, now: Instant) {
        let mut range_changed = false;
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(inbound) = next else { break };
            match inbound {
                Inbound::Added(side, date) => self.on_selection_added(side, date, now),
                Inbound::DoubleClicked(date) => self.on_double_clicked(date),
                Inbound::Changed => range_changed = true,
                Inbound::Refresh(side, year, month) => {
                    self.bus.emit(&RangeEvent::CalendarRefresh { side, year, month })
                }
            }
        }
        if range_changed {
            self.bus.emit(&RangeEvent::DateRangeChanged);
        }
    }

    fn on_selection_added(&mut self, side: Side, date: NaiveDate, now: Instant) {
        self.detach_added();

        match side {
            Side::Start => self.pair.start = date,
            Side::End => self.pair.end = date,
        }
        if self.pair.start > self.pair.end {
            match side {
                Side::Start => self.pair.end = self.pair.start,
                Side::End => self.pair.start = self.pair.end,
            }
            debug!(?side, range = %self.pair, "range clamped to authoritative side");
        }
        if self.times_out_of_order() {
            self.flag_invalid(side, now);
        }

        let DateRange { start, end } = self.pair;
        self.start.set_year_month(start.year(), start.month() as i32);
        self.end.set_year_month(end.year(), end.month() as i32);
        self.refresh_calendar_selection();

        self.attach_added();
    }

    fn on_double_clicked(&mut self, date: NaiveDate) {
        self.detach_added();

        self.pair = DateRange { start: date, end: date };
        self.start.set_year_month(date.year(), date.month() as i32);
        self.end.set_year_month(date.year(), date.month() as i32);
        if self.start_time > self.end_time {
            self.start_time = NaiveTime::MIN;
            self.end_time = end_of_day();
            self.clear_invalid();
            self.bus.emit(&RangeEvent::TimeRangeChanged);
        }
        debug!(%date, "range collapsed by double click");
        self.refresh_calendar_selection();

        self.attach_added();
    }

    fn times_out_of_order(&self) -> bool {
        self.pair.start == self.pair.end && self.start_time > self.end_time
    }

    fn flag_invalid(&mut self, side: Side, now: Instant) {
        match side {
            Side::Start => self.start_invalid = true,
            Side::End => self.end_invalid = true,
        }
        let delay = self.ctx.settings.time_correction_delay();
        debug!(?side, ?delay, "time order violated; correction armed");
        self.timers.start(side, delay, now);
        self.bus.emit(&RangeEvent::TimeInvalid(side));
    }

    fn apply_time_correction(&mut self, side: Side) {
        let time = reset_time(side);
        match side {
            Side::Start => {
                self.start_time = time;
                self.start_invalid = false;
            }
            Side::End => {
                self.end_time = time;
                self.end_invalid = false;
            }
        }
        debug!(?side, %time, "time corrected");
        self.bus.emit(&RangeEvent::TimeCorrected(side));
        self.bus.emit(&RangeEvent::TimeRangeChanged);
    }

    fn clear_invalid(&mut self) {
        self.start_invalid = false;
        self.end_invalid = false;
        self.timers.clear();
    }

    /// The date `side`'s calendar should show selected, if its bounds allow.
    fn mirrored(&self, side: Side) -> Option<NaiveDate> {
        let date = match side {
            Side::Start => self.pair.start,
            Side::End => self.pair.end,
        };
        self.calendar(side).selection().in_bounds(date).then_some(date)
    }

    fn calendars_in_step(&self) -> bool {
        [Side::Start, Side::End]
            .into_iter()
            .all(|side| self.calendar(side).selection().selected() == self.mirrored(side).as_slice())
    }

    /// Mirrors the pair onto the calendars: start on the start calendar, end
    /// on the end calendar, each only if that calendar's bounds allow it.
    fn refresh_calendar_selection(&mut self) {
        for side in [Side::Start, Side::End] {
            let date = self.mirrored(side);
            let calendar = self.calendar_mut(side);
            calendar.clear_selected_date();
            if let Some(date) = date {
                calendar.add_selected_date(date);
            }
        }
    }

    fn attach_added(&mut self) {
        if self.added_listeners.is_some() {
            return;
        }
        let start = self.start.subscribe(added_listener(Side::Start, Rc::clone(&self.inbox)));
        let end = self.end.subscribe(added_listener(Side::End, Rc::clone(&self.inbox)));
        self.added_listeners = Some((start, end));
    }

    fn detach_added(&mut self) {
        if let Some((start, end)) = self.added_listeners.take() {
            self.start.unsubscribe(start);
            self.end.unsubscribe(end);
        }
    }
}


impl std::fmt::Debug for RangePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangePicker").finish_non_exhaustive()
    }
}
