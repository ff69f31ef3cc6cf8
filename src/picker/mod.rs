//! Date selection and navigation state for calendar pickers.
//!
//! Everything here runs on one thread: callers feed user input and the
//! current [`Instant`](std::time::Instant), and call `tick` from their event
//! loop so deferred work (click debounce, time correction, midnight refresh)
//! runs in order with everything else.

pub mod controller;
pub mod range;
pub mod selection;
pub mod single;

use crate::data::{PickerSettings, Resources};
use crate::runtime::{Clock, SystemClock};
use chrono::NaiveDate;
use std::rc::Rc;

/// How a picked moment is printed and typed in.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub use controller::{CalendarController, CalendarView, DayCell, ScrollDirection};
pub use range::{end_of_day, DateRange, RangeEvent, RangePicker};
pub use selection::{SelectionMode, SelectionModel};
pub use single::{DateTimePicker, SingleEvent};

/// Read-only services handed to every picker at construction.
#[derive(Clone)]
pub struct PickerContext {
    pub clock: Rc<dyn Clock>,
    pub settings: PickerSettings,
    pub resources: Rc<Resources>,
}

impl PickerContext {
    pub fn new(clock: Rc<dyn Clock>, settings: PickerSettings, resources: Rc<Resources>) -> Self {
        PickerContext {
            clock,
            settings: settings.sanitized(),
            resources,
        }
    }

    pub fn system(settings: PickerSettings, resources: Resources) -> Self {
        Self::new(Rc::new(SystemClock), settings, Rc::new(resources))
    }
}

/// Which calendar of a range picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }
}

/// Notifications published by a [`CalendarController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarEvent {
    Refresh { year: i32, month: u32 },
    SelectionChanged,
    SelectionAdded(NaiveDate),
    SelectionDeleted(NaiveDate),
    MaxDateChanged(NaiveDate),
    MinDateChanged(NaiveDate),
    DateDoubleClicked(NaiveDate),
}
