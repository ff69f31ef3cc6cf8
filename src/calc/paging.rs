//! Paging state for the month/year quick-pick pages of a calendar.

pub const PAGE_SIZE: i32 = 12;
/// How many years before the current one the first year page starts.
pub const YEAR_PAGE_LEAD: i32 = 6;

/// The twelve-month page. Only the highlighted month changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonthPage {
    selected: Option<u32>,
}

impl MonthPage {
    pub fn visible_ids(&self) -> Vec<u32> {
        (1..=PAGE_SIZE as u32).collect()
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn select(self, month: u32) -> Self {
        MonthPage {
            selected: (1..=12).contains(&month).then_some(month),
        }
    }
}

/// A window of twelve consecutive years starting at `anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearPage {
    anchor: i32,
    selected: Option<i32>,
}

impl YearPage {
    /// The page shown initially for `year`: six years before it, five after.
    pub fn around(year: i32) -> Self {
        YearPage {
            anchor: year - YEAR_PAGE_LEAD,
            selected: Some(year),
        }
    }

    pub fn anchor(&self) -> i32 {
        self.anchor
    }

    pub fn selected(&self) -> Option<i32> {
        self.selected
    }

    pub fn visible_ids(&self) -> Vec<i32> {
        (self.anchor..self.anchor + PAGE_SIZE).collect()
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.anchor..self.anchor + PAGE_SIZE).contains(&year)
    }

    pub fn previous(self, current_year: i32) -> Self {
        Self::at(self.anchor - PAGE_SIZE, current_year)
    }

    pub fn next(self, current_year: i32) -> Self {
        Self::at(self.anchor + PAGE_SIZE, current_year)
    }

    /// Highlights `year`. When it is not on this page the page is rebuilt on
    /// the twelve-year grid anchored at `real_year - 6`, so a given year always
    /// lands on the same page regardless of where the user paged from.
    pub fn select(self, year: i32, real_year: i32) -> Self {
        if self.contains(year) {
            return YearPage {
                selected: Some(year),
                ..self
            };
        }
        let base = real_year - YEAR_PAGE_LEAD;
        let anchor = base + (year - base).div_euclid(PAGE_SIZE) * PAGE_SIZE;
        YearPage {
            anchor,
            selected: Some(year),
        }
    }

    fn at(anchor: i32, current_year: i32) -> Self {
        let page = YearPage {
            anchor,
            selected: None,
        };
        YearPage {
            selected: page.contains(current_year).then_some(current_year),
            ..page
        }
    }
}
