use crate::data::persistence::{Format, Persistable};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables of the picker behaviour, read from the `settings` key of
/// config.yaml.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PickerSettings {
    /// 1 = Monday … 7 = Sunday.
    pub first_day_of_week: u32,
    /// How long a single click waits for a possible double click.
    pub click_debounce_ms: u64,
    /// How long an out-of-order time stays flagged before it is reset.
    pub time_correction_ms: u64,
    /// Slack added after local midnight before the "today" marker moves.
    pub midnight_grace_secs: u64,
    /// Month step for a wheel/scroll gesture away from the user. A forward
    /// gesture shows the previous month; a backward one the opposite step.
    pub wheel_forward_step: i32,
    /// Two clicks on one cell within this window count as a double click in
    /// the terminal front-end.
    pub double_click_ms: u64,
}

impl Default for PickerSettings {
    fn default() -> Self {
        PickerSettings {
            first_day_of_week: 7,
            click_debounce_ms: 120,
            time_correction_ms: 1000,
            midnight_grace_secs: 3,
            wheel_forward_step: -1,
            double_click_ms: 400,
        }
    }
}

impl PickerSettings {
    pub fn click_debounce(&self) -> Duration {
        Duration::from_millis(self.click_debounce_ms)
    }

    pub fn time_correction_delay(&self) -> Duration {
        Duration::from_millis(self.time_correction_ms)
    }

    pub fn midnight_grace(&self) -> Duration {
        Duration::from_secs(self.midnight_grace_secs)
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    /// Pulls every value from config.yaml into a usable range, logging each
    /// one that had to change.
    pub fn sanitized(mut self) -> Self {
        if !(1..=7).contains(&self.first_day_of_week) {
            tracing::warn!(
                first_day_of_week = self.first_day_of_week,
                "first_day_of_week out of range, using Sunday"
            );
            self.first_day_of_week = 7;
        }
        self.click_debounce_ms = cap("click_debounce_ms", self.click_debounce_ms, MAX_DELAY_MS);
        self.time_correction_ms = cap("time_correction_ms", self.time_correction_ms, MAX_DELAY_MS);
        self.double_click_ms = cap("double_click_ms", self.double_click_ms, MAX_DELAY_MS);
        self.midnight_grace_secs = cap("midnight_grace_secs", self.midnight_grace_secs, MAX_GRACE_SECS);
        if !matches!(self.wheel_forward_step, -1 | 1) {
            let step = if self.wheel_forward_step > 0 { 1 } else { -1 };
            tracing::warn!(
                wheel_forward_step = self.wheel_forward_step,
                step,
                "wheel_forward_step must be 1 or -1"
            );
            self.wheel_forward_step = step;
        }
        self
    }
}

const MAX_DELAY_MS: u64 = 10_000;
const MAX_GRACE_SECS: u64 = 3_600;

fn cap(name: &str, value: u64, max: u64) -> u64 {
    if value > max {
        tracing::warn!(setting = name, value, max, "setting too large, capped");
        max
    } else {
        value
    }
}

/// config.yaml may carry other top-level keys; only `settings` is read.
#[derive(Serialize, Deserialize, Default, Debug)]
pub(crate) struct SettingsWrapper {
    #[serde(default)]
    pub(crate) settings: PickerSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn format() -> Format {
        Format::Yaml
    }
}

impl PickerSettings {
    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings.sanitized())
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        SettingsWrapper { settings: *self }.save_to(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let s = PickerSettings::default();
        assert_eq!(s.first_day_of_week, 7);
        assert_eq!(s.click_debounce(), Duration::from_millis(120));
        assert_eq!(s.time_correction_delay(), Duration::from_millis(1000));
        assert_eq!(s.midnight_grace(), Duration::from_secs(3));
        assert_eq!(s.wheel_forward_step, -1);
    }

    #[test]
    fn test_missing_settings_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, PickerSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let yaml = "settings:\n  first_day_of_week: 1\n";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.first_day_of_week, 1);
        assert_eq!(wrapper.settings.click_debounce_ms, 120);
    }

    #[test]
    fn test_sanitized_resets_bad_first_day() {
        let s = PickerSettings {
            first_day_of_week: 9,
            ..PickerSettings::default()
        };
        assert_eq!(s.sanitized().first_day_of_week, 7);
    }

    #[test]
    fn test_sanitized_caps_delays_and_wheel_step() {
        let s = PickerSettings {
            click_debounce_ms: u64::MAX,
            time_correction_ms: 20_000,
            double_click_ms: 10_000,
            midnight_grace_secs: u64::MAX,
            wheel_forward_step: i32::MIN,
            ..PickerSettings::default()
        }
        .sanitized();
        assert_eq!(s.click_debounce_ms, 10_000);
        assert_eq!(s.time_correction_ms, 10_000);
        assert_eq!(s.double_click_ms, 10_000);
        assert_eq!(s.midnight_grace_secs, 3_600);
        assert_eq!(s.wheel_forward_step, -1);
    }

    #[test]
    fn test_sanitized_wheel_step_keeps_sign() {
        let up = PickerSettings {
            wheel_forward_step: 5,
            ..PickerSettings::default()
        };
        assert_eq!(up.sanitized().wheel_forward_step, 1);
        let zero = PickerSettings {
            wheel_forward_step: 0,
            ..PickerSettings::default()
        };
        assert_eq!(zero.sanitized().wheel_forward_step, -1);
        assert_eq!(PickerSettings::default().sanitized(), PickerSettings::default());
    }

    #[test]
    fn test_load_from_sanitizes_huge_grace() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.yaml"),
            "settings:\n  midnight_grace_secs: 18446744073709551615\n  wheel_forward_step: -2147483648\n",
        )
        .unwrap();
        let s = PickerSettings::load_from(tmp.path()).unwrap();
        assert_eq!(s.midnight_grace_secs, 3_600);
        assert_eq!(s.wheel_forward_step, -1);
    }

    #[test]
    fn test_save_to_and_load_from() {
        let tmp = TempDir::new().unwrap();
        let s = PickerSettings {
            first_day_of_week: 1,
            click_debounce_ms: 200,
            ..PickerSettings::default()
        };
        s.save_to(tmp.path()).unwrap();
        assert_eq!(PickerSettings::load_from(tmp.path()).unwrap(), s);
    }
}
