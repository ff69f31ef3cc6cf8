use crate::picker::CalendarEvent;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::trace;

/// How many years either side of the initial year are selectable by default.
pub const DEFAULT_BOUND_YEARS: i32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    None,
    #[default]
    Single,
    Multi,
    /// One date per calendar; pairing two calendars is the range picker's job.
    Range,
}

/// Selected and highlighted dates of one calendar, kept inside
/// `[min_date, max_date]`.
///
/// Mutations queue [`CalendarEvent`]s; the owner drains them with
/// [`SelectionModel::take_events`] and publishes them.
#[derive(Clone, Debug)]
pub struct SelectionModel {
    mode: SelectionMode,
    /// Insertion order is the display order for Single/Multi.
    selected: Vec<NaiveDate>,
    special: BTreeSet<NaiveDate>,
    min_date: NaiveDate,
    max_date: NaiveDate,
    pending: Vec<CalendarEvent>,
}

impl SelectionModel {
    /// Swaps the bounds if they are given inverted.
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> Self {
        let (min_date, max_date) = if min_date <= max_date {
            (min_date, max_date)
        } else {
            (max_date, min_date)
        };
        SelectionModel {
            mode: SelectionMode::default(),
            selected: Vec::new(),
            special: BTreeSet::new(),
            min_date,
            max_date,
            pending: Vec::new(),
        }
    }

    /// Bounds of Jan 1 a hundred years before `year` to Dec 31 ninety-nine
    /// years after it.
    pub fn around_year(year: i32) -> Self {
        let min = NaiveDate::from_ymd_opt(year - DEFAULT_BOUND_YEARS, 1, 1).unwrap_or(NaiveDate::MIN);
        let max = NaiveDate::from_ymd_opt(year + DEFAULT_BOUND_YEARS, 1, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self::new(min, max)
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selected(&self) -> &[NaiveDate] {
        &self.selected
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.selected.contains(&date)
    }

    pub fn special_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.special
    }

    pub fn is_special(&self, date: NaiveDate) -> bool {
        self.special.contains(&date)
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    pub fn in_bounds(&self, date: NaiveDate) -> bool {
        date >= self.min_date && date <= self.max_date
    }

    /// Always clears the selection, even when the mode does not change.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        self.clear();
    }

    /// Adds `date` according to the mode. Refused without events when the
    /// date is already selected (outside Range mode), out of bounds, or the
    /// mode is `None`.
    pub fn append(&mut self, date: NaiveDate) -> bool {
        if self.mode != SelectionMode::Range && self.contains(date) {
            trace!(%date, "append refused: already selected");
            return false;
        }
        if !self.in_bounds(date) {
            trace!(%date, min = %self.min_date, max = %self.max_date, "append refused: out of bounds");
            return false;
        }
        match self.mode {
            SelectionMode::None => return false,
            SelectionMode::Single | SelectionMode::Range => {
                self.selected.clear();
                self.selected.push(date);
            }
            SelectionMode::Multi => self.selected.push(date),
        }
        self.pending.push(CalendarEvent::SelectionAdded(date));
        self.pending.push(CalendarEvent::SelectionChanged);
        true
    }

    /// Removes `date`. A Single-mode selection never becomes empty this way.
    /// Publishes `SelectionDeleted` only.
    pub fn remove(&mut self, date: NaiveDate) -> bool {
        if !self.contains(date) {
            return false;
        }
        if self.mode == SelectionMode::Single && self.selected.len() <= 1 {
            trace!(%date, "remove refused: single selection must stay non-empty");
            return false;
        }
        self.selected.retain(|d| *d != date);
        self.pending.push(CalendarEvent::SelectionDeleted(date));
        true
    }

    /// Empties the selection. Publishes `SelectionChanged` only.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.pending.push(CalendarEvent::SelectionChanged);
    }

    /// Refused when unchanged or when it would pass `max_date`. Selected dates
    /// that fall below the new bound are dropped.
    pub fn set_min_date(&mut self, date: NaiveDate) -> bool {
        if date == self.min_date || date > self.max_date {
            return false;
        }
        self.min_date = date;
        self.prune_out_of_bounds();
        self.pending.push(CalendarEvent::MinDateChanged(date));
        true
    }

    /// Refused when unchanged or when it would pass `min_date`. Selected dates
    /// that fall above the new bound are dropped.
    pub fn set_max_date(&mut self, date: NaiveDate) -> bool {
        if date == self.max_date || date < self.min_date {
            return false;
        }
        self.max_date = date;
        self.prune_out_of_bounds();
        self.pending.push(CalendarEvent::MaxDateChanged(date));
        true
    }

    /// Replaces the highlighted dates. Selection is untouched.
    pub fn set_special_dates<I: IntoIterator<Item = NaiveDate>>(&mut self, dates: I) {
        self.special = dates.into_iter().collect();
    }

    /// Raw two-date selection without events or mode rules.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.selected.clear();
        self.selected.push(start);
        self.selected.push(end);
    }

    pub fn take_events(&mut self) -> Vec<CalendarEvent> {
        std::mem::take(&mut self.pending)
    }

    fn prune_out_of_bounds(&mut self) {
        let (min, max) = (self.min_date, self.max_date);
        let dropped: Vec<NaiveDate> = self
            .selected
            .iter()
            .copied()
            .filter(|d| *d < min || *d > max)
            .collect();
        if dropped.is_empty() {
            return;
        }
        self.selected.retain(|d| *d >= min && *d <= max);
        for date in dropped {
            self.pending.push(CalendarEvent::SelectionDeleted(date));
        }
        self.pending.push(CalendarEvent::SelectionChanged);
    }
}
