use crate::picker::controller::CalendarController;
use crate::picker::{CalendarEvent, PickerContext};
use crate::runtime::{EventBus, ListenerId};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SingleEvent {
    DateChanged(NaiveDate),
    TimeChanged(NaiveTime),
}

/// One Single-mode calendar plus an optional time of day.
pub struct DateTimePicker {
    calendar: CalendarController,
    time: NaiveTime,
    include_time: bool,
    changes: Rc<RefCell<VecDeque<CalendarEvent>>>,
    bus: EventBus<SingleEvent>,
}

impl DateTimePicker {
    pub fn new(ctx: PickerContext, year: i32, month: i32, include_time: bool) -> Self {
        Self::new_at(ctx, year, month, include_time, Instant::now())
    }

    /// Shows `year`/`month` with today selected and the time at midnight.
    /// Today is selected without moving the view.
    pub fn new_at(ctx: PickerContext, year: i32, month: i32, include_time: bool, now: Instant) -> Self {
        let today = ctx.clock.today();
        let mut calendar = CalendarController::new_at(ctx, year, month, now);
        calendar.add_selected_date(today);

        let changes = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&changes);
        calendar.subscribe(move |event| {
            if *event == CalendarEvent::SelectionChanged {
                sink.borrow_mut().push_back(*event);
            }
        });

        DateTimePicker {
            calendar,
            time: NaiveTime::MIN,
            include_time,
            changes,
            bus: EventBus::new(),
        }
    }

    pub fn include_time(&self) -> bool {
        self.include_time
    }

    pub fn calendar(&self) -> &CalendarController {
        &self.calendar
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.calendar.selection().selected().first().copied()
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn date_time(&self) -> Option<NaiveDateTime> {
        self.date().map(|date| date.and_time(self.time))
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SingleEvent) + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn set_date_time(&mut self, date_time: NaiveDateTime) {
        self.calendar.add_selected_date(date_time.date());
        self.dispatch();
        self.set_time(date_time.time());
    }

    /// Selects today at midnight.
    pub fn reset_to_today(&mut self) {
        let today = self.calendar.today();
        self.set_date_time(today.and_time(NaiveTime::MIN));
    }

    /// Ignored by date-only pickers.
    pub fn set_time(&mut self, time: NaiveTime) -> bool {
        if !self.include_time || time == self.time {
            return false;
        }
        self.time = time;
        self.bus.emit(&SingleEvent::TimeChanged(time));
        true
    }

    pub fn shift_time(&mut self, delta: TimeDelta) -> bool {
        let (shifted, _) = self.time.overflowing_add_signed(delta);
        self.set_time(shifted)
    }

    pub fn click(&mut self, date: NaiveDate, now: Instant) {
        self.calendar.click(date, now);
    }

    pub fn double_click(&mut self, date: NaiveDate, now: Instant) {
        self.calendar.double_click(date, now);
        self.dispatch();
    }

    /// Runs `f` against the calendar (navigation, bounds, jump views), then
    /// reacts to any selection change it caused.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut CalendarController) -> R) -> R {
        let result = f(&mut self.calendar);
        self.dispatch();
        result
    }

    pub fn tick(&mut self, now: Instant) {
        self.calendar.tick(now);
        self.dispatch();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.calendar.next_deadline()
    }

    /// Each selection change moves the view to the selected month and
    /// publishes the new date.
    fn dispatch(&mut self) {
        loop {
            let next = self.changes.borrow_mut().pop_front();
            if next.is_none() {
                break;
            }
            let Some(date) = self.date() else { continue };
            self.calendar.set_year_month(date.year(), date.month() as i32);
            trace!(%date, "single picker date changed");
            self.bus.emit(&SingleEvent::DateChanged(date));
        }
    }
}


impl std::fmt::Debug for DateTimePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTimePicker").finish_non_exhaustive()
    }
}
