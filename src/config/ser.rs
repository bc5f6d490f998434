//! Validated record -> canonical configuration document

use crate::config::mapping::TextMapping;
use crate::config::schema::VirtualMachineConfiguration;
use serde_json::{json, Map, Value};

/// Serialize a record to pretty-printed JSON.
///
/// Keys are emitted in a fixed order so saved files diff cleanly. Enum
/// values with no textual form are written as `null`.
pub fn serialize(config: &VirtualMachineConfiguration) -> String {
    let document = json!({ "NanaBox": to_value(config) });
    // Value -> String cannot fail: every map key is a string
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

/// Build the `"NanaBox"` object for a record.
pub fn to_value(config: &VirtualMachineConfiguration) -> Value {
    let mut root = Map::new();
    root.insert("Type".into(), json!("VirtualMachine"));
    root.insert("Version".into(), json!(config.version));
    root.insert("GuestType".into(), json!(config.guest_type.to_text()));
    root.insert("Name".into(), json!(config.name));
    root.insert("ProcessorCount".into(), json!(config.processor_count));
    root.insert("MemorySize".into(), json!(config.memory_size));
    root.insert("ComPorts".into(), json!(config.com_ports));

    let mut gpu = Map::new();
    gpu.insert("AssignmentMode".into(), json!(config.gpu.assignment_mode.to_text()));
    gpu.insert("SelectedDevices".into(), json!(config.gpu.selected_devices));
    root.insert("Gpu".into(), Value::Object(gpu));

    let network_adapters = config
        .network_adapters
        .iter()
        .map(|adapter| {
            let mut current = Map::new();
            current.insert("Enabled".into(), json!(adapter.enabled));
            current.insert("Connected".into(), json!(adapter.connected));
            current.insert("MacAddress".into(), json!(adapter.mac_address));
            Value::Object(current)
        })
        .collect();
    root.insert("NetworkAdapters".into(), Value::Array(network_adapters));

    let scsi_devices = config
        .scsi_devices
        .iter()
        .map(|device| {
            let mut current = Map::new();
            current.insert("Enabled".into(), json!(device.enabled));
            current.insert("Type".into(), json!(device.device_type.to_text()));
            current.insert("Path".into(), json!(device.path));
            Value::Object(current)
        })
        .collect();
    root.insert("ScsiDevices".into(), Value::Array(scsi_devices));

    let shared_folders = config
        .shared_folders
        .iter()
        .map(|folder| {
            let mut current = Map::new();
            current.insert("Enabled".into(), json!(folder.enabled));
            current.insert("ReadOnly".into(), json!(folder.read_only));
            current.insert("HostPath".into(), json!(folder.host_path));
            current.insert("GuestName".into(), json!(folder.guest_name));
            Value::Object(current)
        })
        .collect();
    root.insert("SharedFolders".into(), Value::Array(shared_folders));

    root.insert("SecureBoot".into(), json!(config.secure_boot));
    root.insert("Tpm".into(), json!(config.tpm));
    root.insert("GuestStateFile".into(), json!(config.guest_state_file));
    root.insert("RuntimeStateFile".into(), json!(config.runtime_state_file));

    Value::Object(root)
}
