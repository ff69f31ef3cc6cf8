pub mod persistence;
pub mod resources;
pub mod settings;

pub use persistence::{Format, Persistable};
pub use resources::{Palette, ResourceLookup, Resources, TextTable};
pub use settings::PickerSettings;
