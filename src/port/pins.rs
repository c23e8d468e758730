use bitflags::bitflags;

use crate::sdk::mcu::register::{PortId, PINS_PER_PORT};
use crate::{BIT, BIT_RNG};

bitflags! {
    /// Set of pin bits inside one port.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PinMask: u8 {
        const P0 = 1 << 0;
        const P1 = 1 << 1;
        const P2 = 1 << 2;
        const P3 = 1 << 3;
        const P4 = 1 << 4;
        const P5 = 1 << 5;
        const P6 = 1 << 6;
        const P7 = 1 << 7;
    }
}

impl PinMask {
    pub const fn pin(bit: u8) -> Self {
        Self::from_bits_truncate(BIT!(bit & 7))
    }
}

// Pins behind the GPIOLOCK/GPIOCR commit gate
const PROTECTED_D: PinMask = PinMask::P7;
const PROTECTED_F: PinMask = PinMask::P0;

// JTAG TCK/TMS/TDI/TDO
const DEBUG_C: PinMask = PinMask::from_bits_truncate(BIT_RNG!(0, 3));

/// One physical pin, resolved from a configuration record.
///
/// The pin bit is always below 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinTarget {
    port: PortId,
    pin: u8,
}

impl PinTarget {
    /// Returns `None` when `pin` does not exist on a port.
    pub const fn new(port: PortId, pin: u8) -> Option<Self> {
        if (pin as usize) < PINS_PER_PORT {
            Some(Self { port, pin })
        } else {
            None
        }
    }

    pub const fn port(&self) -> PortId {
        self.port
    }

    pub const fn pin(&self) -> u8 {
        self.pin
    }

    pub fn base(&self) -> u32 {
        self.port.base()
    }

    /// Register bit for this pin.
    pub fn mask(&self) -> u32 {
        PinMask::pin(self.pin).bits() as u32
    }

    /// Needs the unlock sequence before its configuration can change.
    pub fn is_protected(&self) -> bool {
        let bit = PinMask::pin(self.pin);
        match self.port {
            PortId::D => PROTECTED_D.contains(bit),
            PortId::F => PROTECTED_F.contains(bit),
            _ => false,
        }
    }

    /// Part of the debug interface; never reconfigured by `init`.
    pub fn is_debug(&self) -> bool {
        self.port == PortId::C && DEBUG_C.contains(PinMask::pin(self.pin))
    }
}
