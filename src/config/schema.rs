//! Virtual machine configuration schema definitions

/// Only schema version understood by this crate
pub const CURRENT_VERSION: u32 = 1;

/// Guest operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestType {
    #[default]
    Unknown,
    Windows,
    Linux,
}

/// How host GPUs are handed to the guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuAssignmentMode {
    #[default]
    Disabled,
    Default,
    List,
    Mirror,
}

/// Kind of media backing a SCSI slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScsiDeviceType {
    VirtualDisk,
    VirtualImage,
    PhysicalDevice,
}

/// GPU assignment configuration
///
/// `selected_devices` is only meaningful in `List` mode. Call
/// [`GpuConfiguration::normalize`] after touching either field directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GpuConfiguration {
    pub assignment_mode: GpuAssignmentMode,
    pub selected_devices: Vec<String>,
}

impl GpuConfiguration {
    /// `List` mode over the given devices (disabled if there are none)
    pub fn with_devices<I, S>(devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut gpu = Self {
            assignment_mode: GpuAssignmentMode::List,
            selected_devices: devices.into_iter().map(Into::into).collect(),
        };
        gpu.normalize();
        gpu
    }

    pub fn set_mode(&mut self, mode: GpuAssignmentMode) {
        self.assignment_mode = mode;
        self.normalize();
    }

    /// Re-establish the mode/selection invariant:
    /// `List` with no devices becomes `Disabled`, and any mode other than
    /// `List` carries no devices.
    pub fn normalize(&mut self) {
        if self.assignment_mode == GpuAssignmentMode::List && self.selected_devices.is_empty() {
            self.assignment_mode = GpuAssignmentMode::Disabled;
        }
        if self.assignment_mode != GpuAssignmentMode::List {
            self.selected_devices.clear();
        }
    }
}

/// Network adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkAdapterConfiguration {
    pub enabled: bool,
    pub connected: bool,
    pub mac_address: String, // never empty once parsed
}

/// SCSI device configuration; position in the owning list is the guest slot order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScsiDeviceConfiguration {
    pub enabled: bool,
    pub device_type: ScsiDeviceType,
    pub path: String, // empty only for VirtualImage (no media inserted)
}

/// Host folder shared into the guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFolderConfiguration {
    pub enabled: bool,
    pub read_only: bool,
    pub host_path: String,
    pub guest_name: String,
}

impl Default for SharedFolderConfiguration {
    fn default() -> Self {
        Self {
            enabled: false,
            read_only: true,
            host_path: String::new(),
            guest_name: String::new(),
        }
    }
}

/// Root configuration record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachineConfiguration {
    pub version: u32,
    pub guest_type: GuestType,
    pub name: String,
    pub processor_count: u32,
    pub memory_size: u32,
    pub com_ports: Vec<String>,
    pub gpu: GpuConfiguration,
    pub network_adapters: Vec<NetworkAdapterConfiguration>,
    pub scsi_devices: Vec<ScsiDeviceConfiguration>,
    pub shared_folders: Vec<SharedFolderConfiguration>,
    pub secure_boot: bool,
    pub tpm: bool,
    pub guest_state_file: String,   // empty means none
    pub runtime_state_file: String, // empty means none
}

impl VirtualMachineConfiguration {
    /// Minimal record: identity fields set, everything else at its default
    pub fn new(
        guest_type: GuestType,
        name: impl Into<String>,
        processor_count: u32,
        memory_size: u32,
    ) -> Self {
        Self {
            version: CURRENT_VERSION,
            guest_type,
            name: name.into(),
            processor_count,
            memory_size,
            com_ports: Vec::new(),
            gpu: GpuConfiguration::default(),
            network_adapters: Vec::new(),
            scsi_devices: Vec::new(),
            shared_folders: Vec::new(),
            secure_boot: false,
            tpm: false,
            guest_state_file: String::new(),
            runtime_state_file: String::new(),
        }
    }
}
