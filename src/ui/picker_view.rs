use crate::calc::date_grid::{clamp_day, year_month, DAYS_IN_WEEK, GRID_ROWS};
use crate::calc::paging::PAGE_SIZE;
use crate::data::resources::{
    ResourceLookup, Resources, END_TEXT, ERROR_BORDER, MAIN_COLOR, POP_BORDER, RANGE_ITEM,
    START_TEXT, TEXT_FONT, TEXT_ON_HIGHLIGHT, WHITE,
};
use crate::data::PickerSettings;
use crate::picker::{
    CalendarController, CalendarView, DateTimePicker, DayCell, PickerContext, RangePicker,
    ScrollDirection, Side, DATE_TIME_FORMAT,
};
use crate::runtime::poll_timeout;
use crate::ui::Term;
use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop blocks waiting for input.
const MAX_POLL: Duration = Duration::from_millis(250);
const CELL_WIDTH: u16 = 3;
const PANEL_WIDTH: u16 = DAYS_IN_WEEK as u16 * CELL_WIDTH + 3;
// header, weekday row, six grid rows, spacer, time row, borders
const PANEL_HEIGHT: u16 = 12;
const JUMP_COLUMNS: usize = 4;
const JUMP_CELL_WIDTH: usize = 5;

/// The picker being driven by the terminal front-end.
pub enum Picker {
    Single(DateTimePicker),
    Range(RangePicker),
}

/// Calendar moves the keyboard and mouse can ask for.
#[derive(Clone, Copy, Debug)]
enum Nav {
    Previous,
    Next,
    Scroll(ScrollDirection),
    MonthView,
    YearView,
    PickMonth(u32),
    PickYear(i32),
    Show(i32, u32),
}

impl Nav {
    fn apply(self, calendar: &mut CalendarController) -> bool {
        match self {
            Nav::Previous => calendar.previous(),
            Nav::Next => calendar.next(),
            Nav::Scroll(direction) => calendar.scroll(direction),
            Nav::MonthView => {
                calendar.toggle_month_view();
                true
            }
            Nav::YearView => {
                calendar.toggle_year_view();
                true
            }
            Nav::PickMonth(month) => calendar.pick_month(month),
            Nav::PickYear(year) => calendar.pick_year(year),
            Nav::Show(year, month) => calendar.set_year_month(year, month as i32),
        }
    }
}

fn slot(side: Side) -> usize {
    match side {
        Side::Start => 0,
        Side::End => 1,
    }
}

fn within(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

pub struct App {
    picker: Picker,
    resources: Rc<Resources>,
    settings: PickerSettings,
    focus: Side,
    /// Keyboard cursor per side, kept inside the displayed month.
    cursors: [NaiveDate; 2],
    /// Highlighted entry on the month/year pages per side.
    page_cursors: [usize; 2],
    last_click: Option<(Side, NaiveDate, Instant)>,
    /// Where each side's day grid was last drawn, for mouse hit testing.
    grid_areas: Vec<(Side, Rect)>,
    panel_areas: Vec<(Side, Rect)>,
    confirmed: Option<String>,
}

impl App {
    pub fn new(picker: Picker, ctx: &PickerContext) -> Self {
        let today = ctx.clock.today();
        let cursors = match &picker {
            Picker::Single(p) => {
                let date = p.date().unwrap_or(today);
                [date, date]
            }
            Picker::Range(p) => {
                let range = p.date_range();
                [range.start, range.end]
            }
        };
        let mut app = App {
            picker,
            resources: Rc::clone(&ctx.resources),
            settings: ctx.settings,
            focus: Side::Start,
            cursors,
            page_cursors: [0, 0],
            last_click: None,
            grid_areas: Vec::new(),
            panel_areas: Vec::new(),
            confirmed: None,
        };
        app.sync_cursors();
        app
    }

    pub fn sides(&self) -> &'static [Side] {
        match self.picker {
            Picker::Single(_) => &[Side::Start],
            Picker::Range(_) => &[Side::Start, Side::End],
        }
    }

    pub fn focus(&self) -> Side {
        self.focus
    }

    pub fn cursor(&self, side: Side) -> NaiveDate {
        self.cursors[slot(side)]
    }

    pub fn confirmed(&self) -> Option<&str> {
        self.confirmed.as_deref()
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn calendar(&self, side: Side) -> &CalendarController {
        match &self.picker {
            Picker::Single(p) => p.calendar(),
            Picker::Range(p) => p.calendar(side),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        match &mut self.picker {
            Picker::Single(p) => p.tick(now),
            Picker::Range(p) => p.tick(now),
        }
        self.sync_cursors();
    }

    /// How long to wait for input before the next timer is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let deadline = match &self.picker {
            Picker::Single(p) => p.next_deadline(),
            Picker::Range(p) => p.next_deadline(),
        };
        poll_timeout(deadline, now, MAX_POLL)
    }

    /// What Enter prints: the picked date (and time), or the range as
    /// `start ~ end`.
    pub fn confirmation_text(&self) -> Option<String> {
        let stamp = |dt: NaiveDateTime, with_time: bool| {
            if with_time {
                dt.format(DATE_TIME_FORMAT).to_string()
            } else {
                dt.date().to_string()
            }
        };
        match &self.picker {
            Picker::Single(p) => p.date_time().map(|dt| stamp(dt, p.include_time())),
            Picker::Range(p) => Some(format!(
                "{} ~ {}",
                stamp(p.start_date_time(), p.include_time()),
                stamp(p.end_date_time(), p.include_time())
            )),
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }
        let side = self.focus;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter => {
                self.confirmed = self.confirmation_text();
                return true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if let Picker::Range(_) = self.picker {
                    self.focus = side.other();
                }
            }
            KeyCode::PageUp => {
                self.navigate(side, now, Nav::Previous);
            }
            KeyCode::PageDown => {
                self.navigate(side, now, Nav::Next);
            }
            KeyCode::Char('m') => {
                self.navigate(side, now, Nav::MonthView);
                let calendar = self.calendar(side);
                let index = (calendar.view() == CalendarView::Months)
                    .then(|| calendar.month() as usize - 1);
                if let Some(index) = index {
                    self.page_cursors[slot(side)] = index;
                }
            }
            KeyCode::Char('y') => {
                self.navigate(side, now, Nav::YearView);
                let calendar = self.calendar(side);
                if calendar.view() == CalendarView::Years {
                    let page = calendar.year_page();
                    let index = page
                        .selected()
                        .and_then(|year| page.visible_ids().iter().position(|id| *id == year))
                        .unwrap_or(0);
                    self.page_cursors[slot(side)] = index;
                }
            }
            KeyCode::Char('t') => {
                self.reset_to_today(now);
                for &side in self.sides() {
                    self.cursors[slot(side)] = self.calendar(side).today();
                }
            }
            KeyCode::Char('+') => {
                self.shift_time(side, TimeDelta::hours(1), now);
            }
            KeyCode::Char('-') => {
                self.shift_time(side, TimeDelta::hours(-1), now);
            }
            _ => match self.calendar(side).view() {
                CalendarView::Days => self.handle_days_key(side, code, now),
                view => self.handle_jump_key(side, view, code, now),
            },
        }
        self.sync_cursors();
        false
    }

    fn handle_days_key(&mut self, side: Side, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Left => self.move_cursor(side, -1, now),
            KeyCode::Right => self.move_cursor(side, 1, now),
            KeyCode::Up => self.move_cursor(side, -(DAYS_IN_WEEK as i64), now),
            KeyCode::Down => self.move_cursor(side, DAYS_IN_WEEK as i64, now),
            KeyCode::Char(' ') => {
                let date = self.cursor(side);
                self.click(side, date, now);
            }
            KeyCode::Char('d') => {
                let date = self.cursor(side);
                self.double_click(side, date, now);
            }
            _ => {}
        }
    }

    fn handle_jump_key(&mut self, side: Side, view: CalendarView, code: KeyCode, now: Instant) {
        let last = PAGE_SIZE as usize - 1;
        let index = &mut self.page_cursors[slot(side)];
        match code {
            KeyCode::Left => *index = index.saturating_sub(1),
            KeyCode::Right => *index = (*index + 1).min(last),
            KeyCode::Up => *index = index.saturating_sub(JUMP_COLUMNS),
            KeyCode::Down => *index = (*index + JUMP_COLUMNS).min(last),
            KeyCode::Char(' ') => {
                let index = *index;
                if view == CalendarView::Months {
                    self.navigate(side, now, Nav::PickMonth(index as u32 + 1));
                } else {
                    let ids = self.calendar(side).year_page().visible_ids();
                    if let Some(year) = ids.get(index).copied() {
                        self.navigate(side, now, Nav::PickYear(year));
                    }
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let side = self.panel_at(mouse.column, mouse.row).unwrap_or(self.focus);
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.navigate(side, now, Nav::Scroll(ScrollDirection::Forward));
            }
            MouseEventKind::ScrollDown => {
                self.navigate(side, now, Nav::Scroll(ScrollDirection::Backward));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((side, date)) = self.cell_at(mouse.column, mouse.row) {
                    self.focus = side;
                    self.cursors[slot(side)] = date;
                    self.click_cell(side, date, now);
                }
            }
            _ => {}
        }
        self.sync_cursors();
    }

    /// A pointer click on a day cell. A second click on the same cell within
    /// the double-click window is reported as a double click instead.
    pub fn click_cell(&mut self, side: Side, date: NaiveDate, now: Instant) {
        let window = self.settings.double_click_window();
        match self.last_click {
            Some((last_side, last_date, at))
                if last_side == side && last_date == date && now.duration_since(at) <= window =>
            {
                self.last_click = None;
                self.double_click(side, date, now);
            }
            _ => {
                self.last_click = Some((side, date, now));
                self.click(side, date, now);
            }
        }
    }

    fn panel_at(&self, column: u16, row: u16) -> Option<Side> {
        self.panel_areas
            .iter()
            .find(|(_, rect)| within(*rect, column, row))
            .map(|(side, _)| *side)
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<(Side, NaiveDate)> {
        let (side, rect) = self
            .grid_areas
            .iter()
            .find(|(_, rect)| within(*rect, column, row))?;
        if self.calendar(*side).view() != CalendarView::Days {
            return None;
        }
        let col = ((column - rect.x) / CELL_WIDTH) as usize;
        let row = (row - rect.y) as usize;
        if col >= DAYS_IN_WEEK {
            return None;
        }
        let cell = self.calendar(*side).grid().get(row * DAYS_IN_WEEK + col)?;
        Some((*side, cell.date))
    }

    // ── Picker plumbing ───────────────────────────────────────────────────────

    fn navigate(&mut self, side: Side, now: Instant, nav: Nav) -> bool {
        let p = match &mut self.picker {
            Picker::Single(p) => return p.update(|calendar| nav.apply(calendar)),
            Picker::Range(p) => p,
        };
        match nav {
            Nav::Previous => p.previous(side, now),
            Nav::Next => p.next(side, now),
            Nav::Scroll(direction) => p.scroll(side, direction, now),
            Nav::MonthView => {
                p.toggle_month_view(side);
                true
            }
            Nav::YearView => {
                p.toggle_year_view(side);
                true
            }
            Nav::PickMonth(month) => p.pick_month(side, month, now),
            Nav::PickYear(year) => p.pick_year(side, year, now),
            Nav::Show(year, month) => p.set_year_month(side, year, month as i32, now),
        }
    }

    fn reset_to_today(&mut self, now: Instant) {
        match &mut self.picker {
            Picker::Single(p) => p.reset_to_today(),
            Picker::Range(p) => {
                p.reset_to_today(now);
            }
        }
    }

    fn click(&mut self, side: Side, date: NaiveDate, now: Instant) {
        match &mut self.picker {
            Picker::Single(p) => p.click(date, now),
            Picker::Range(p) => p.click(side, date, now),
        }
    }

    fn double_click(&mut self, side: Side, date: NaiveDate, now: Instant) {
        match &mut self.picker {
            Picker::Single(p) => p.double_click(date, now),
            Picker::Range(p) => p.double_click(side, date, now),
        }
    }

    fn shift_time(&mut self, side: Side, delta: TimeDelta, now: Instant) {
        match &mut self.picker {
            Picker::Single(p) => {
                p.shift_time(delta);
            }
            Picker::Range(p) => {
                p.shift_time(side, delta, now);
            }
        }
    }

    /// Moves the cursor, paging the calendar when it leaves the displayed
    /// month. The cursor stays put if the calendar cannot follow.
    fn move_cursor(&mut self, side: Side, days: i64, now: Instant) {
        let Some(target) = self.cursor(side).checked_add_signed(TimeDelta::days(days)) else {
            return;
        };
        let (year, month) = year_month(target);
        self.navigate(side, now, Nav::Show(year, month));
        let calendar = self.calendar(side);
        if (calendar.year(), calendar.month()) == (year, month) {
            self.cursors[slot(side)] = target;
        }
    }

    /// Pulls each cursor back into its calendar's displayed month, keeping
    /// the day of month where possible.
    fn sync_cursors(&mut self) {
        for &side in self.sides() {
            let calendar = self.calendar(side);
            let (year, month) = (calendar.year(), calendar.month());
            let cursor = self.cursors[slot(side)];
            if year_month(cursor) != (year, month) {
                self.cursors[slot(side)] = clamp_day(year, month, cursor.day()).unwrap_or(cursor);
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(PANEL_HEIGHT), Constraint::Min(1)])
            .split(area);

        let sides = self.sides();
        let mut constraints = vec![Constraint::Length(PANEL_WIDTH); sides.len()];
        constraints.push(Constraint::Min(0));
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[0]);

        self.grid_areas.clear();
        self.panel_areas.clear();
        for (i, &side) in sides.iter().enumerate() {
            let panel = columns[i];
            self.panel_areas.push((side, panel));
            self.render_panel(f, side, panel);
        }
        self.render_help(f, rows[1]);
    }

    fn color(&self, key: &str) -> Color {
        self.resources.resolve_color(key).unwrap_or(Color::Reset)
    }

    fn render_panel(&mut self, f: &mut Frame, side: Side, area: Rect) {
        let calendar = self.calendar(side);
        let title = match self.picker {
            Picker::Single(_) => String::new(),
            Picker::Range(_) => match side {
                Side::Start => self.resources.resolve_text(START_TEXT),
                Side::End => self.resources.resolve_text(END_TEXT),
            },
        };
        let border = if side == self.focus && self.sides().len() > 1 {
            self.color(MAIN_COLOR)
        } else {
            self.color(POP_BORDER)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);

        let mut grid_area = None;
        let mut lines = vec![self.header_line(calendar)];
        match calendar.view() {
            CalendarView::Days => {
                lines.push(self.weekday_line(calendar));
                lines.extend(self.day_lines(side, calendar));
                grid_area = Some(Rect {
                    x: inner.x,
                    y: inner.y + 2,
                    width: DAYS_IN_WEEK as u16 * CELL_WIDTH,
                    height: GRID_ROWS as u16,
                });
            }
            view => {
                lines.push(Line::from(""));
                lines.extend(self.jump_lines(side, calendar, view));
            }
        }
        while lines.len() < 2 + GRID_ROWS + 1 {
            lines.push(Line::from(""));
        }
        if let Some(line) = self.time_line(side) {
            lines.push(line);
        }
        if let Some(rect) = grid_area {
            self.grid_areas.push((side, rect));
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn header_line(&self, calendar: &CalendarController) -> Line<'static> {
        let arrow = |enabled: bool, glyph: &'static str| {
            let style = if enabled {
                Style::default().fg(self.color(MAIN_COLOR))
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Span::styled(glyph, style)
        };
        let title = match calendar.view() {
            CalendarView::Days => format!(
                "{} {}",
                self.resources.month_label(calendar.month()),
                calendar.year()
            ),
            CalendarView::Months => calendar.year().to_string(),
            CalendarView::Years => {
                let ids = calendar.year_page().visible_ids();
                match (ids.first(), ids.last()) {
                    (Some(first), Some(last)) => format!("{first} - {last}"),
                    _ => String::new(),
                }
            }
        };
        let width = DAYS_IN_WEEK * CELL_WIDTH as usize - 4;
        Line::from(vec![
            arrow(calendar.can_go_previous(), "< "),
            Span::styled(
                format!("{title:^width$}"),
                Style::default()
                    .fg(self.color(TEXT_FONT))
                    .add_modifier(Modifier::BOLD),
            ),
            arrow(calendar.can_go_next(), " >"),
        ])
    }

    fn weekday_line(&self, calendar: &CalendarController) -> Line<'static> {
        let labels = calendar.weekday_labels(&self.resources.weekday_names());
        let spans: Vec<Span> = labels
            .into_iter()
            .map(|label| {
                Span::styled(
                    format!("{label:<3.2}"),
                    Style::default()
                        .fg(self.color(TEXT_FONT))
                        .add_modifier(Modifier::DIM),
                )
            })
            .collect();
        Line::from(spans)
    }

    fn day_lines(&self, side: Side, calendar: &CalendarController) -> Vec<Line<'static>> {
        let range = match &self.picker {
            Picker::Range(p) => Some(p.date_range()),
            Picker::Single(_) => None,
        };
        let cursor = self.cursor(side);
        let highlight_cursor = side == self.focus;
        calendar
            .cells()
            .chunks(DAYS_IN_WEEK)
            .map(|week| {
                let spans: Vec<Span> = week
                    .iter()
                    .flat_map(|cell| {
                        let in_range = range
                            .map(|r| cell.date >= r.start && cell.date <= r.end)
                            .unwrap_or(false);
                        let style = day_style(
                            cell,
                            in_range,
                            highlight_cursor && cell.date == cursor,
                            &*self.resources,
                        );
                        [
                            Span::styled(format!("{:>2}", cell.date.day()), style),
                            Span::raw(" "),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn jump_lines(&self, side: Side, calendar: &CalendarController, view: CalendarView) -> Vec<Line<'static>> {
        let labels: Vec<(String, bool)> = match view {
            CalendarView::Months => {
                let page = calendar.month_page();
                page.visible_ids()
                    .into_iter()
                    .map(|m| {
                        let label: String = self.resources.month_label(m).chars().take(3).collect();
                        (label, page.selected() == Some(m))
                    })
                    .collect()
            }
            _ => {
                let page = calendar.year_page();
                page.visible_ids()
                    .into_iter()
                    .map(|y| (y.to_string(), page.selected() == Some(y)))
                    .collect()
            }
        };
        let cursor = self.page_cursors[slot(side)];
        let mut lines = Vec::new();
        for (row, chunk) in labels.chunks(JUMP_COLUMNS).enumerate() {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, (label, selected))| {
                    let mut style = Style::default().fg(self.color(TEXT_FONT));
                    if *selected {
                        style = style.fg(self.color(MAIN_COLOR)).add_modifier(Modifier::BOLD);
                    }
                    if row * JUMP_COLUMNS + col == cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!("{label:^w$}", w = JUMP_CELL_WIDTH), style)
                })
                .collect();
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines
    }

    fn time_line(&self, side: Side) -> Option<Line<'static>> {
        let (time, invalid): (NaiveTime, bool) = match &self.picker {
            Picker::Single(p) if p.include_time() => (p.time(), false),
            Picker::Range(p) if p.include_time() => {
                let (start, end) = p.time_range();
                let time = if side == Side::Start { start } else { end };
                (time, p.is_time_invalid(side))
            }
            _ => return None,
        };
        let style = if invalid {
            Style::default()
                .fg(self.color(ERROR_BORDER))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.color(TEXT_FONT))
        };
        Some(Line::from(Span::styled(time.format("%H:%M:%S").to_string(), style)).alignment(Alignment::Center))
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let mut help = vec![
            "arrows move  space pick  d double-click  PgUp/PgDn month  m/y jump  t today",
        ];
        match self.picker {
            Picker::Range(_) => help.push("tab switch side  +/- hour  enter confirm  q quit"),
            Picker::Single(_) => help.push("+/- hour  enter confirm  q quit"),
        }
        let lines: Vec<Line> = help
            .into_iter()
            .map(|text| Line::from(Span::styled(text, Style::default().add_modifier(Modifier::DIM))))
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }
}

/// Style for one day cell. The picked date wins over range shading, which
/// wins over highlighted dates.
pub(crate) fn day_style(cell: &DayCell, in_range: bool, is_cursor: bool, lookup: &dyn ResourceLookup) -> Style {
    let color = |key: &str| lookup.resolve_color(key).unwrap_or(Color::Reset);
    let mut style = if cell.selected {
        Style::default()
            .fg(color(TEXT_ON_HIGHLIGHT))
            .bg(color(MAIN_COLOR))
            .add_modifier(Modifier::BOLD)
    } else if in_range {
        Style::default().fg(color(WHITE)).bg(color(RANGE_ITEM))
    } else if cell.special {
        Style::default()
            .fg(color(MAIN_COLOR))
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(color(TEXT_FONT))
    };
    if !cell.in_month {
        style = style.add_modifier(Modifier::DIM);
    }
    if cell.today {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Term, app: &mut App) -> Result<Option<String>> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers, Instant::now()) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
    Ok(app.confirmed().map(str::to_string))
}
