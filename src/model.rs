use crate::palette::{self, ColorValue};
use serde::{Deserialize, Serialize};

/// Command value of the tile that opens the shortcut editor instead of a program.
pub const SETTINGS_COMMAND: &str = "settings";

/// Library icon shown when a record names nothing the catalog knows.
pub const FALLBACK_ICON: &str = "Package";

pub type ShortcutId = u32;

/// One launcher tile.
///
/// The icon is either a library icon name or an uploaded image; the setters
/// below are the only way to switch between the two so a record never holds
/// both at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutRecord {
    pub id: ShortcutId,
    pub name: String,
    pub command: String,
    icon: String,
    #[serde(default, skip_serializing_if = "is_false")]
    is_custom_icon: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_icon_data: Option<String>,
    pub color: ColorValue,
    pub icon_color: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Field values of a shortcut that does not have an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutDraft {
    pub name: String,
    pub command: String,
    pub icon: String,
    pub color: ColorValue,
    pub icon_color: String,
}

impl Default for ShortcutDraft {
    fn default() -> Self {
        Self {
            name: "New App".to_string(),
            command: String::new(),
            icon: FALLBACK_ICON.to_string(),
            color: ColorValue::Palette(palette::DEFAULT_BACKGROUND.to_string()),
            icon_color: palette::DEFAULT_ICON_TINT.to_string(),
        }
    }
}

impl ShortcutRecord {
    pub fn from_draft(id: ShortcutId, draft: ShortcutDraft) -> Self {
        Self {
            id,
            name: draft.name,
            command: draft.command,
            icon: draft.icon,
            is_custom_icon: false,
            custom_icon_data: None,
            color: draft.color,
            icon_color: draft.icon_color,
        }
    }

    /// Library icon name, or the original file name of an uploaded image.
    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn is_custom_icon(&self) -> bool {
        self.is_custom_icon
    }

    pub fn custom_icon_data(&self) -> Option<&str> {
        self.custom_icon_data.as_deref()
    }

    /// Embedded image payload, only when the record really is in custom-icon mode.
    pub fn custom_image(&self) -> Option<&str> {
        if self.is_custom_icon {
            self.custom_icon_data.as_deref().filter(|d| !d.is_empty())
        } else {
            None
        }
    }

    pub fn set_library_icon(&mut self, name: impl Into<String>) {
        self.icon = name.into();
        self.is_custom_icon = false;
        self.custom_icon_data = None;
    }

    pub fn set_custom_icon(&mut self, file_name: impl Into<String>, data: impl Into<String>) {
        self.icon = file_name.into();
        self.is_custom_icon = true;
        self.custom_icon_data = Some(data.into());
    }

    pub fn is_settings_entry(&self) -> bool {
        self.command == SETTINGS_COMMAND
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::Validation("name must not be empty".to_string()));
        }
        if self.command.trim().is_empty() {
            return Err(crate::Error::Validation("command must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A program found on the host, offered as a command source in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
    pub name: String,
    pub exec: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ShortcutRecord {
        ShortcutRecord::from_draft(
            3,
            ShortcutDraft {
                name: "Files".to_string(),
                command: "nautilus".to_string(),
                ..ShortcutDraft::default()
            },
        )
    }

    #[test]
    fn loads_records_without_custom_icon_fields() {
        let json = r#"{ "id": 1, "name": "Text Editor", "icon": "Code", "color": "bg-blue-500", "iconColor": "text-gray-600", "command": "xed" }"#;
        let rec: ShortcutRecord = serde_json::from_str(json).unwrap();
        assert!(!rec.is_custom_icon());
        assert_eq!(rec.custom_icon_data(), None);
        assert_eq!(rec.color, ColorValue::Palette("bg-blue-500".to_string()));
    }

    #[test]
    fn omits_absent_optional_fields() {
        let json = serde_json::to_value(record()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("customIconData"));
        assert!(!obj.contains_key("isCustomIcon"));
        assert_eq!(obj["iconColor"], "text-white");
    }

    #[test]
    fn icon_modes_are_exclusive() {
        let mut rec = record();
        rec.set_custom_icon("cat.png", "data:image/png;base64,AAAA");
        assert!(rec.is_custom_icon());
        assert_eq!(rec.icon(), "cat.png");
        assert!(rec.custom_image().is_some());

        rec.set_library_icon("Camera");
        assert!(!rec.is_custom_icon());
        assert_eq!(rec.custom_icon_data(), None);
        assert_eq!(rec.icon(), "Camera");
    }

    #[test]
    fn validation_rejects_blank_fields() {
        let mut rec = record();
        assert!(rec.validate().is_ok());
        rec.name = "   ".to_string();
        assert!(matches!(rec.validate(), Err(crate::Error::Validation(_))));
        rec.name = "Files".to_string();
        rec.command.clear();
        assert!(rec.validate().is_err());
    }
}
