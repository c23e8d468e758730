use crate::sdk::mcu::register::PortId;
use crate::version::Version;

/// Index of a record inside the active configuration table.
pub type PinId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    Input,
    Output,
    /// Sentinel for a direction that may not be applied.
    Invalid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InternalResistor {
    Off,
    PullUp,
    PullDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Function a pin is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Plain GPIO
    Digital,
    /// ADC / comparator input, digital buffer off
    Analog,
    Uart,
    Can,
    /// SSI in SPI frame format
    Spi,
    I2c,
    Pwm,
    Usb,
    QuadratureEncoder,
    Watchdog,
    Invalid,
}

/// Configuration of one physical pin.
///
/// `port` is kept as the raw ordinal (A = 0 .. F = 5) so a table produced
/// from raw data can still be represented; the initializer rejects ordinals
/// that do not name a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub port: u8,
    pub pin: u8,
    pub direction: PinDirection,
    /// Only used when `direction` is `Input`.
    pub resistor: InternalResistor,
    /// Only used when `direction` is `Output`.
    pub initial_level: Level,
    pub mode: PinMode,
}

impl PinConfig {
    pub const fn new(
        port: u8,
        pin: u8,
        direction: PinDirection,
        resistor: InternalResistor,
        initial_level: Level,
        mode: PinMode,
    ) -> Self {
        Self {
            port,
            pin,
            direction,
            resistor,
            initial_level,
            mode,
        }
    }

    pub const fn input(port: PortId, pin: u8, resistor: InternalResistor, mode: PinMode) -> Self {
        Self::new(port.ordinal(), pin, PinDirection::Input, resistor, Level::Low, mode)
    }

    pub const fn output(port: PortId, pin: u8, initial_level: Level, mode: PinMode) -> Self {
        Self::new(
            port.ordinal(),
            pin,
            PinDirection::Output,
            InternalResistor::Off,
            initial_level,
            mode,
        )
    }

    pub fn port_id(&self) -> Option<PortId> {
        PortId::from_ordinal(self.port)
    }
}

/// Fixed-size, build-time configuration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortConfig<const N: usize> {
    pub pins: [PinConfig; N],
}

impl<const N: usize> PortConfig<N> {
    /// Builds a table, rejecting any (port, pin) pair that appears twice.
    ///
    /// Used in a `static` initializer the check runs at compile time.
    pub const fn new(pins: [PinConfig; N]) -> Self {
        assert!(
            !has_duplicate_pins(&pins),
            "a (port, pin) pair appears more than once in the port configuration"
        );
        Self { pins }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn get(&self, pin: PinId) -> Option<&PinConfig> {
        self.pins.get(pin)
    }
}

const fn has_duplicate_pins(pins: &[PinConfig]) -> bool {
    let mut i = 0;
    while i < pins.len() {
        let mut j = i + 1;
        while j < pins.len() {
            if pins[i].port == pins[j].port && pins[i].pin == pins[j].pin {
                return true;
            }
            j += 1;
        }
        i += 1;
    }
    false
}

/****************************************************
 board configuration (post-build table)
 *****************************************************/
pub const PORT_PBCFG_SW_VERSION: Version = Version::new(1, 0, 0);
pub const PORT_PBCFG_AR_RELEASE_VERSION: Version = Version::new(4, 0, 3);

pub const PORT_CONFIGURED_PINS: usize = 43;

use InternalResistor::{Off, PullUp};
use Level::{High, Low};
use PinMode::Digital;
use PortId::{A, B, C, D, E, F};

// Pin 0 of every port drives high, the rest are pulled-up inputs.
// PF0 and PD7 sit behind the commit lock; PC0-PC3 carry JTAG and are left alone.
pub static PORT_PIN_CONFIG: PortConfig<PORT_CONFIGURED_PINS> = PortConfig::new([
    PinConfig::output(A, 0, High, Digital),
    PinConfig::input(A, 1, PullUp, Digital),
    PinConfig::input(A, 2, PullUp, Digital),
    PinConfig::input(A, 3, PullUp, Digital),
    PinConfig::input(A, 4, PullUp, Digital),
    PinConfig::input(A, 5, PullUp, Digital),
    PinConfig::input(A, 6, PullUp, Digital),
    PinConfig::input(A, 7, PullUp, Digital),
    PinConfig::output(B, 0, High, Digital),
    PinConfig::input(B, 1, PullUp, Digital),
    PinConfig::input(B, 2, PullUp, Digital),
    PinConfig::input(B, 3, PullUp, Digital),
    PinConfig::input(B, 4, PullUp, Digital),
    PinConfig::input(B, 5, PullUp, Digital),
    PinConfig::input(B, 6, PullUp, Digital),
    PinConfig::input(B, 7, PullUp, Digital),
    PinConfig::output(C, 0, High, Digital),
    PinConfig::input(C, 1, PullUp, Digital),
    PinConfig::input(C, 2, PullUp, Digital),
    PinConfig::input(C, 3, PullUp, Digital),
    PinConfig::input(C, 4, PullUp, Digital),
    PinConfig::input(C, 5, PullUp, Digital),
    PinConfig::input(C, 6, PullUp, Digital),
    PinConfig::input(C, 7, PullUp, Digital),
    PinConfig::output(D, 0, High, Digital),
    PinConfig::input(D, 1, PullUp, Digital),
    PinConfig::input(D, 2, PullUp, Digital),
    PinConfig::input(D, 3, PullUp, Digital),
    PinConfig::input(D, 4, PullUp, Digital),
    PinConfig::input(D, 5, PullUp, Digital),
    PinConfig::input(D, 6, PullUp, Digital),
    PinConfig::input(D, 7, PullUp, Digital),
    PinConfig::output(E, 0, High, Digital),
    PinConfig::input(E, 1, PullUp, Digital),
    PinConfig::input(E, 2, PullUp, Digital),
    PinConfig::input(E, 3, PullUp, Digital),
    PinConfig::input(E, 4, PullUp, Digital),
    PinConfig::input(E, 5, PullUp, Digital),
    PinConfig::output(F, 0, High, Digital),
    PinConfig::output(F, 1, Low, Digital),
    PinConfig::input(F, 2, Off, Digital),
    PinConfig::input(F, 3, Off, Digital),
    PinConfig::input(F, 4, PullUp, Digital),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_table_covers_every_bonded_pin_once() {
        assert_eq!(PORT_PIN_CONFIG.len(), PORT_CONFIGURED_PINS);
        assert!(!has_duplicate_pins(&PORT_PIN_CONFIG.pins));

        // Port E has six pins and port F five on this package
        let on_e = PORT_PIN_CONFIG.pins.iter().filter(|p| p.port == E.ordinal()).count();
        let on_f = PORT_PIN_CONFIG.pins.iter().filter(|p| p.port == F.ordinal()).count();
        assert_eq!(on_e, 6);
        assert_eq!(on_f, 5);
    }

    #[test]
    fn test_board_table_entries() {
        let pf1 = PORT_PIN_CONFIG.get(39).unwrap();
        assert_eq!(pf1.port_id(), Some(F));
        assert_eq!(pf1.pin, 1);
        assert_eq!(pf1.direction, PinDirection::Output);
        assert_eq!(pf1.initial_level, Low);

        let pa1 = PORT_PIN_CONFIG.get(1).unwrap();
        assert_eq!(pa1.direction, PinDirection::Input);
        assert_eq!(pa1.resistor, PullUp);

        assert!(PORT_PIN_CONFIG.get(PORT_CONFIGURED_PINS).is_none());
    }

    #[test]
    fn test_constructors() {
        let out = PinConfig::output(B, 3, High, PinMode::Pwm);
        assert_eq!(out.port, 1);
        assert_eq!(out.resistor, Off);

        let raw = PinConfig::new(9, 8, PinDirection::Invalid, Off, Low, PinMode::Invalid);
        assert_eq!(raw.port_id(), None);
    }

    #[test]
    #[should_panic(expected = "appears more than once")]
    fn test_duplicate_pin_rejected() {
        let _ = PortConfig::new([
            PinConfig::input(A, 2, Off, Digital),
            PinConfig::output(A, 2, High, Digital),
        ]);
    }
}
