use const_format::formatcp;

use crate::config::{PORT_PBCFG_AR_RELEASE_VERSION, PORT_PBCFG_SW_VERSION};

pub const PORT_VENDOR_ID: u16 = 1000;
pub const PORT_MODULE_ID: u16 = 120;
pub const PORT_INSTANCE_ID: u8 = 0;

pub const PORT_SW_MAJOR_VERSION: u8 = 1;
pub const PORT_SW_MINOR_VERSION: u8 = 0;
pub const PORT_SW_PATCH_VERSION: u8 = 0;

pub const PORT_AR_RELEASE_MAJOR_VERSION: u8 = 4;
pub const PORT_AR_RELEASE_MINOR_VERSION: u8 = 0;
pub const PORT_AR_RELEASE_PATCH_VERSION: u8 = 3;

pub const PORT_SW_VERSION: Version = Version::new(
    PORT_SW_MAJOR_VERSION,
    PORT_SW_MINOR_VERSION,
    PORT_SW_PATCH_VERSION,
);

pub const PORT_AR_RELEASE_VERSION: Version = Version::new(
    PORT_AR_RELEASE_MAJOR_VERSION,
    PORT_AR_RELEASE_MINOR_VERSION,
    PORT_AR_RELEASE_PATCH_VERSION,
);

pub const PORT_VERSION_STR: &str = formatcp!(
    "{}.{}.{} (AR {}.{}.{})",
    PORT_SW_MAJOR_VERSION,
    PORT_SW_MINOR_VERSION,
    PORT_SW_PATCH_VERSION,
    PORT_AR_RELEASE_MAJOR_VERSION,
    PORT_AR_RELEASE_MINOR_VERSION,
    PORT_AR_RELEASE_PATCH_VERSION
);

// The board table must be generated against the same driver release.
const _: () = assert!(
    PORT_PBCFG_SW_VERSION.matches(PORT_SW_VERSION),
    "The SW version of the port configuration does not match the driver"
);
const _: () = assert!(
    PORT_PBCFG_AR_RELEASE_VERSION.matches(PORT_AR_RELEASE_VERSION),
    "The AR version of the port configuration does not match the driver"
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn matches(self, other: Version) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionInfo {
    pub vendor_id: u16,
    pub module_id: u16,
    pub sw_version: Version,
}

pub const fn version_info() -> VersionInfo {
    VersionInfo {
        vendor_id: PORT_VENDOR_ID,
        module_id: PORT_MODULE_ID,
        sw_version: PORT_SW_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        assert_eq!(PORT_VERSION_STR, "1.0.0 (AR 4.0.3)");
    }

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert_eq!(info.vendor_id, 1000);
        assert_eq!(info.module_id, 120);
        assert_eq!(info.sw_version, Version::new(1, 0, 0));
    }

    #[test]
    fn test_matches() {
        assert!(Version::new(4, 0, 3).matches(PORT_AR_RELEASE_VERSION));
        assert!(!Version::new(4, 1, 3).matches(PORT_AR_RELEASE_VERSION));
    }
}
