//! Bidirectional enum <-> string tables
//!
//! Each enum carries an explicit table. A `None` entry marks a variant with
//! no textual form: it is never produced by `from_text`, and `to_text`
//! reports it as `None` so the serializer can emit `null`.

use crate::config::schema::{GpuAssignmentMode, GuestType, ScsiDeviceType};

/// Lookup between an enum and its document spelling.
pub trait TextMapping: Copy + PartialEq + Sized + 'static {
    const TABLE: &'static [(Self, Option<&'static str>)];

    fn to_text(self) -> Option<&'static str> {
        Self::TABLE
            .iter()
            .find(|(variant, _)| *variant == self)
            .and_then(|(_, text)| *text)
    }

    fn from_text(text: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, t)| *t == Some(text))
            .map(|(variant, _)| *variant)
    }
}

impl TextMapping for GuestType {
    const TABLE: &'static [(Self, Option<&'static str>)] = &[
        (GuestType::Unknown, None),
        (GuestType::Windows, Some("Windows")),
        (GuestType::Linux, Some("Linux")),
    ];
}

impl TextMapping for GpuAssignmentMode {
    const TABLE: &'static [(Self, Option<&'static str>)] = &[
        (GpuAssignmentMode::Disabled, None),
        (GpuAssignmentMode::Default, Some("Default")),
        (GpuAssignmentMode::List, Some("List")),
        (GpuAssignmentMode::Mirror, Some("Mirror")),
    ];
}

impl TextMapping for ScsiDeviceType {
    const TABLE: &'static [(Self, Option<&'static str>)] = &[
        (ScsiDeviceType::VirtualDisk, Some("VirtualDisk")),
        (ScsiDeviceType::VirtualImage, Some("VirtualImage")),
        (ScsiDeviceType::PhysicalDevice, Some("PhysicalDevice")),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_variants_have_no_text() {
        assert_eq!(GuestType::Unknown.to_text(), None);
        assert_eq!(GpuAssignmentMode::Disabled.to_text(), None);
    }

    #[test]
    fn test_from_text_is_case_sensitive() {
        assert_eq!(GuestType::from_text("Linux"), Some(GuestType::Linux));
        assert_eq!(GuestType::from_text("linux"), None);
        assert_eq!(GuestType::from_text("Unknown"), None);
        assert_eq!(GpuAssignmentMode::from_text("Disabled"), None);
        assert_eq!(GpuAssignmentMode::from_text("Mirror"), Some(GpuAssignmentMode::Mirror));
    }

    #[test]
    fn test_scsi_types_map_both_ways() {
        for (variant, text) in ScsiDeviceType::TABLE {
            let text = text.expect("every SCSI type has a spelling");
            assert_eq!(variant.to_text(), Some(text));
            assert_eq!(ScsiDeviceType::from_text(text), Some(*variant));
        }
    }
}
