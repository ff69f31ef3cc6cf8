pub mod date_grid;
pub mod paging;

pub use date_grid::{month_grid, normalize_year_month, year_month, Grid, GridCell};
pub use paging::{MonthPage, YearPage};
