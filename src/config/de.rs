//! Configuration document -> validated record
//!
//! Identity fields (type, version, guest type, name, processor count, memory
//! size) fail the whole document. Peripheral fields fall back to defaults, and
//! a malformed element inside a peripheral array is dropped on its own while
//! its siblings still parse.

use crate::config::error::ConfigError;
use crate::config::mapping::TextMapping;
use crate::config::schema::*;
use log::debug;
use serde_json::{Map, Value};
use std::fmt;

type Object = Map<String, Value>;

/// A local recovery made while parsing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// Field was present with an unusable value; its default was used instead
    Defaulted { field: &'static str },
    /// `Gpu` was present but its `AssignmentMode` was missing or unknown
    GpuDiscarded,
    /// Array element dropped
    Skipped {
        field: &'static str,
        index: usize,
        reason: &'static str,
    },
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::Defaulted { field } => {
                write!(f, "\"{field}\" has an invalid value, using default")
            }
            Degradation::GpuDiscarded => {
                write!(f, "\"Gpu\" has no valid \"AssignmentMode\", GPU assignment disabled")
            }
            Degradation::Skipped { field, index, reason } => {
                write!(f, "\"{field}\"[{index}] dropped: {reason}")
            }
        }
    }
}

/// Parse a configuration document.
pub fn parse(document: &str) -> Result<VirtualMachineConfiguration, ConfigError> {
    parse_with_diagnostics(document).map(|(config, _)| config)
}

/// Parse a configuration document, also returning every local recovery made.
///
/// Accepts and rejects exactly the same documents as [`parse`].
pub fn parse_with_diagnostics(
    document: &str,
) -> Result<(VirtualMachineConfiguration, Vec<Degradation>), ConfigError> {
    let parsed: Value = serde_json::from_str(document)?;

    let empty = Object::new();
    let root = parsed
        .get("NanaBox")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let mut reader = Reader::default();
    let config = reader.read_root(root)?;
    Ok((config, reader.degradations))
}

#[derive(Default)]
struct Reader {
    degradations: Vec<Degradation>,
}

impl Reader {
    fn note(&mut self, degradation: Degradation) {
        debug!("{degradation}");
        self.degradations.push(degradation);
    }

    fn read_root(&mut self, root: &Object) -> Result<VirtualMachineConfiguration, ConfigError> {
        if root.get("Type").and_then(Value::as_str) != Some("VirtualMachine") {
            return Err(ConfigError::InvalidDocumentType);
        }

        let version = read_version(root)?;

        let guest_type = root
            .get("GuestType")
            .and_then(Value::as_str)
            .and_then(GuestType::from_text)
            .ok_or(ConfigError::MissingOrInvalidField("GuestType"))?;

        let name = root
            .get("Name")
            .and_then(Value::as_str)
            .ok_or(ConfigError::MissingOrInvalidField("Name"))?
            .to_string();

        let processor_count = root
            .get("ProcessorCount")
            .and_then(as_u32)
            .ok_or(ConfigError::InvalidProcessorCount)?;

        let memory_size = root
            .get("MemorySize")
            .and_then(as_u32)
            .ok_or(ConfigError::InvalidMemorySize)?;

        let com_ports = self.string_array(root, "ComPorts");
        let gpu = self.read_gpu(root);

        let network_adapters = self.object_array(root, "NetworkAdapters", |reader, adapter| {
            let mac_address = adapter
                .get("MacAddress")
                .and_then(Value::as_str)
                .ok_or("missing \"MacAddress\"")?;
            if mac_address.is_empty() {
                return Err("empty \"MacAddress\"");
            }
            Ok(NetworkAdapterConfiguration {
                enabled: reader.bool_or(adapter, "Enabled", false),
                connected: reader.bool_or(adapter, "Connected", false),
                mac_address: mac_address.to_string(),
            })
        });

        let scsi_devices = self.object_array(root, "ScsiDevices", |reader, device| {
            let device_type = device
                .get("Type")
                .and_then(Value::as_str)
                .and_then(ScsiDeviceType::from_text)
                .ok_or("missing or unknown \"Type\"")?;
            let path = device
                .get("Path")
                .and_then(Value::as_str)
                .ok_or("missing \"Path\"")?;
            if path.is_empty() && device_type != ScsiDeviceType::VirtualImage {
                return Err("empty \"Path\"");
            }
            Ok(ScsiDeviceConfiguration {
                enabled: reader.bool_or(device, "Enabled", false),
                device_type,
                path: path.to_string(),
            })
        });

        let shared_folders = self.object_array(root, "SharedFolders", |reader, folder| {
            let host_path = non_empty_str(folder, "HostPath").ok_or("missing or empty \"HostPath\"")?;
            let guest_name =
                non_empty_str(folder, "GuestName").ok_or("missing or empty \"GuestName\"")?;
            Ok(SharedFolderConfiguration {
                enabled: reader.bool_or(folder, "Enabled", false),
                read_only: reader.bool_or(folder, "ReadOnly", true),
                host_path: host_path.to_string(),
                guest_name: guest_name.to_string(),
            })
        });

        Ok(VirtualMachineConfiguration {
            version,
            guest_type,
            name,
            processor_count,
            memory_size,
            com_ports,
            gpu,
            network_adapters,
            scsi_devices,
            shared_folders,
            secure_boot: self.bool_or(root, "SecureBoot", false),
            tpm: self.bool_or(root, "Tpm", false),
            guest_state_file: self.string_or_empty(root, "GuestStateFile"),
            runtime_state_file: self.string_or_empty(root, "RuntimeStateFile"),
        })
    }

    fn read_gpu(&mut self, root: &Object) -> GpuConfiguration {
        let Some(gpu) = present(root, "Gpu") else {
            return GpuConfiguration::default();
        };
        let Some(gpu) = gpu.as_object() else {
            self.note(Degradation::Defaulted { field: "Gpu" });
            return GpuConfiguration::default();
        };

        let Some(assignment_mode) = gpu
            .get("AssignmentMode")
            .and_then(Value::as_str)
            .and_then(GpuAssignmentMode::from_text)
        else {
            // null is how a disabled GPU is written back out
            if present(gpu, "AssignmentMode").is_some() {
                self.note(Degradation::GpuDiscarded);
            }
            return GpuConfiguration::default();
        };

        let mut config = GpuConfiguration {
            assignment_mode,
            selected_devices: self.string_array(gpu, "SelectedDevices"),
        };
        config.normalize();
        config
    }

    /// Optional array of strings; non-string elements are skipped.
    fn string_array(&mut self, object: &Object, field: &'static str) -> Vec<String> {
        let Some(items) = self.array(object, field) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => self.note(Degradation::Skipped {
                    field,
                    index,
                    reason: "not a string",
                }),
            }
        }
        out
    }

    /// Optional array of objects. Each element is extracted on its own; an
    /// element that fails is dropped and its siblings are still read.
    fn object_array<T>(
        &mut self,
        object: &Object,
        field: &'static str,
        mut extract: impl FnMut(&mut Self, &Object) -> Result<T, &'static str>,
    ) -> Vec<T> {
        let Some(items) = self.array(object, field) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let result = match item.as_object() {
                Some(element) => extract(self, element),
                None => Err("not an object"),
            };
            match result {
                Ok(value) => out.push(value),
                Err(reason) => self.note(Degradation::Skipped { field, index, reason }),
            }
        }
        out
    }

    fn array<'v>(&mut self, object: &'v Object, field: &'static str) -> Option<&'v Vec<Value>> {
        let value = present(object, field)?;
        let items = value.as_array();
        if items.is_none() {
            self.note(Degradation::Defaulted { field });
        }
        items
    }

    fn bool_or(&mut self, object: &Object, field: &'static str, default: bool) -> bool {
        match present(object, field) {
            None => default,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                self.note(Degradation::Defaulted { field });
                default
            }),
        }
    }

    fn string_or_empty(&mut self, object: &Object, field: &'static str) -> String {
        match present(object, field) {
            None => String::new(),
            Some(value) => match value.as_str() {
                Some(s) => s.to_string(),
                None => {
                    self.note(Degradation::Defaulted { field });
                    String::new()
                }
            },
        }
    }
}

/// Present and not null. Null reads the same as an absent key.
fn present<'v>(object: &'v Object, field: &str) -> Option<&'v Value> {
    object.get(field).filter(|value| !value.is_null())
}

fn non_empty_str<'v>(object: &'v Object, field: &str) -> Option<&'v str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// A missing or non-numeric version reads as the current version. Any number
/// is coerced to `u32` (negatives wrap, fractions truncate) and must then
/// match the current version exactly.
fn read_version(root: &Object) -> Result<u32, ConfigError> {
    let Some(number) = root.get("Version").filter(|value| value.is_number()) else {
        return Ok(CURRENT_VERSION);
    };
    let version = if let Some(n) = number.as_u64() {
        n
    } else if let Some(n) = number.as_i64() {
        u64::from(n as u32)
    } else {
        number.as_f64().map_or(0, |f| f as u64)
    };
    if version == u64::from(CURRENT_VERSION) {
        Ok(CURRENT_VERSION)
    } else {
        Err(ConfigError::UnsupportedVersion(version))
    }
}
