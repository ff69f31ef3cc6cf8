//! Calendar and date-range picker state for terminal front-ends.
//!
//! [`picker`] holds the selection, navigation and range-coordination logic;
//! [`ui`] drives it from a ratatui/crossterm terminal and [`cmd`] wires it to
//! the command line.

pub mod calc;
pub mod cmd;
pub mod data;
pub mod picker;
pub mod runtime;
pub mod ui;
