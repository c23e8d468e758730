use core::fmt;

use crate::config::PinId;
use crate::det::{
    PORT_E_DIRECTION_UNCHANGEABLE, PORT_E_PARAM_CONFIG, PORT_E_PARAM_INVALID_MODE,
    PORT_E_PARAM_PIN, PORT_E_UNINIT,
};

/// Class of a detected error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Missing or malformed configuration
    Configuration,
    /// Pin index outside the active table
    Range,
    /// Operation called before `init`
    State,
    /// Direction or mode that may not be applied
    Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// `init` was called without a configuration table.
    ParamConfig,
    /// A table entry names a port that does not exist.
    InvalidPort(u8),
    /// A table entry names a pin bit above 7.
    InvalidPinBit(u8),
    /// Pin index is not covered by the active table.
    ParamPin(PinId),
    Uninit,
    DirectionUnchangeable,
    InvalidMode,
}

impl PortError {
    /// Error code sent to the diagnostic channel.
    pub const fn error_id(self) -> u8 {
        match self {
            PortError::ParamConfig | PortError::InvalidPort(_) | PortError::InvalidPinBit(_) => {
                PORT_E_PARAM_CONFIG
            }
            PortError::ParamPin(_) => PORT_E_PARAM_PIN,
            PortError::Uninit => PORT_E_UNINIT,
            PortError::DirectionUnchangeable => PORT_E_DIRECTION_UNCHANGEABLE,
            PortError::InvalidMode => PORT_E_PARAM_INVALID_MODE,
        }
    }

    pub const fn kind(self) -> ErrorKind {
        match self {
            PortError::ParamConfig | PortError::InvalidPort(_) | PortError::InvalidPinBit(_) => {
                ErrorKind::Configuration
            }
            PortError::ParamPin(_) => ErrorKind::Range,
            PortError::Uninit => ErrorKind::State,
            PortError::DirectionUnchangeable | PortError::InvalidMode => ErrorKind::Mode,
        }
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::ParamConfig => write!(f, "no port configuration given"),
            PortError::InvalidPort(port) => write!(f, "port ordinal {} does not exist", port),
            PortError::InvalidPinBit(bit) => write!(f, "pin bit {} is outside the port", bit),
            PortError::ParamPin(pin) => write!(f, "pin {} is not in the active configuration", pin),
            PortError::Uninit => write!(f, "port driver not initialized"),
            PortError::DirectionUnchangeable => write!(f, "invalid pin direction"),
            PortError::InvalidMode => write!(f, "invalid pin mode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortError::ParamConfig.error_id(), 0x0C);
        assert_eq!(PortError::InvalidPort(7).error_id(), 0x0C);
        assert_eq!(PortError::ParamPin(99).error_id(), 0x0A);
        assert_eq!(PortError::Uninit.error_id(), 0x0F);
        assert_eq!(PortError::DirectionUnchangeable.error_id(), 0x0B);
        assert_eq!(PortError::InvalidMode.error_id(), 0x0D);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(PortError::InvalidPinBit(9).kind(), ErrorKind::Configuration);
        assert_eq!(PortError::ParamPin(0).kind(), ErrorKind::Range);
        assert_eq!(PortError::Uninit.kind(), ErrorKind::State);
        assert_eq!(PortError::InvalidMode.kind(), ErrorKind::Mode);
        assert_eq!(PortError::DirectionUnchangeable.kind(), ErrorKind::Mode);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PortError::ParamPin(43).to_string(),
            "pin 43 is not in the active configuration"
        );
        assert_eq!(PortError::InvalidPort(6).to_string(), "port ordinal 6 does not exist");
    }
}
