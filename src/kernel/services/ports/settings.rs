use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorTheme {
    #[default]
    #[serde(rename = "vs-dark")]
    VsDark,
    #[serde(rename = "vs")]
    Vs,
    #[serde(rename = "hc-black")]
    HcBlack,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WordWrap {
    #[default]
    On,
    Off,
    WordWrapColumn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineNumbers {
    #[default]
    On,
    Off,
    Relative,
}

/// Editor preferences. Missing keys fall back to the defaults, so partial
/// documents merge onto them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub theme: EditorTheme,
    pub font_size: u32,
    pub tab_size: u32,
    pub word_wrap: WordWrap,
    pub minimap: bool,
    pub line_numbers: LineNumbers,
    pub auto_save: bool,
    /// Milliseconds.
    pub auto_save_interval: u64,
    pub sync_scrolling: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: EditorTheme::VsDark,
            font_size: 14,
            tab_size: 2,
            word_wrap: WordWrap::On,
            minimap: true,
            line_numbers: LineNumbers::On,
            auto_save: true,
            auto_save_interval: 5000,
            sync_scrolling: false,
        }
    }
}

impl EditorSettings {
    /// Auto-save period, or `None` when auto-save is off.
    pub fn auto_save_period(&self) -> Option<std::time::Duration> {
        (self.auto_save && self.auto_save_interval > 0)
            .then(|| std::time::Duration::from_millis(self.auto_save_interval))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudSyncSettings {
    pub sync_enabled: bool,
    /// Milliseconds.
    pub sync_interval: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<u64>,
}

impl Default for CloudSyncSettings {
    fn default() -> Self {
        Self {
            sync_enabled: false,
            sync_interval: 60_000,
            last_sync_time: None,
        }
    }
}

impl CloudSyncSettings {
    pub fn sync_period(&self) -> Option<std::time::Duration> {
        (self.sync_enabled && self.sync_interval > 0)
            .then(|| std::time::Duration::from_millis(self.sync_interval))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
