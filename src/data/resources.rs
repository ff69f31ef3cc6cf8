use crate::calc::date_grid::month_name;
use crate::data::persistence::{Format, Persistable};
use anyhow::Result;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const MAIN_COLOR: &str = "main_color";
pub const TEXT_FONT: &str = "normal_text_font";
pub const TEXT_ON_HIGHLIGHT: &str = "normal_text_highlight_on_dark_font";
pub const RANGE_ITEM: &str = "normal_table_item_range";
pub const WHITE: &str = "normal_white";
pub const POP_BORDER: &str = "normal_pop_border";
pub const ERROR_BORDER: &str = "error_border";

pub const WEEK_TEXT: &str = "calendar.week";
pub const START_TEXT: &str = "range.start";
pub const END_TEXT: &str = "range.end";

/// Colour and text lookup used by the rendering layer.
pub trait ResourceLookup {
    fn resolve_color(&self, key: &str) -> Option<Color>;
    /// Empty when the key is unknown.
    fn resolve_text(&self, key: &str) -> String;
}

/// Named colours as `#rrggbb` (or any colour name ratatui understands).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Palette(pub BTreeMap<String, String>);

impl Default for Palette {
    fn default() -> Self {
        let entries = [
            (TEXT_FONT, "#cccccc"),
            (MAIN_COLOR, "#3198ff"),
            (TEXT_ON_HIGHLIGHT, "#e6e6e6"),
            (RANGE_ITEM, "#234478"),
            (WHITE, "#ffffff"),
            (POP_BORDER, "#000000"),
            (ERROR_BORDER, "#e04040"),
        ];
        Palette(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl Persistable for Palette {
    fn filename() -> &'static str {
        "palette.yaml"
    }
    fn format() -> Format {
        Format::Yaml
    }
}

/// Display strings keyed by id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct TextTable(pub BTreeMap<String, String>);

impl Default for TextTable {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(WEEK_TEXT.to_string(), "Mo,Tu,We,Th,Fr,Sa,Su".to_string());
        map.insert(START_TEXT.to_string(), "Start".to_string());
        map.insert(END_TEXT.to_string(), "End".to_string());
        for month in 1..=12 {
            map.insert(month_key(month), month_name(month).to_string());
        }
        TextTable(map)
    }
}

impl Persistable for TextTable {
    fn filename() -> &'static str {
        "texts.json"
    }
    fn format() -> Format {
        Format::Json
    }
}

pub fn month_key(month: u32) -> String {
    format!("calendar.month.{month}")
}

/// Palette and texts loaded once and handed to whoever renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    pub palette: Palette,
    pub texts: TextTable,
}

impl Resources {
    /// Files in `dir` override the built-in entries key by key.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut resources = Resources::default();
        resources.palette.0.extend(Palette::load_from(dir)?.0);
        resources.texts.0.extend(TextTable::load_from(dir)?.0);
        Ok(resources)
    }

    /// Monday-first short weekday names.
    pub fn weekday_names(&self) -> Vec<String> {
        self.resolve_text(WEEK_TEXT)
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }

    pub fn month_label(&self, month: u32) -> String {
        let text = self.resolve_text(&month_key(month));
        if text.is_empty() {
            month_name(month).to_string()
        } else {
            text
        }
    }
}

impl ResourceLookup for Resources {
    fn resolve_color(&self, key: &str) -> Option<Color> {
        let raw = self.palette.0.get(key)?;
        match raw.parse::<Color>() {
            Ok(color) => Some(color),
            Err(_) => {
                tracing::warn!(key, value = %raw, "unparseable colour in palette");
                None
            }
        }
    }

    fn resolve_text(&self, key: &str) -> String {
        self.texts.0.get(key).cloned().unwrap_or_default()
    }
}
