//! Pin configuration driver.
//!
//! [`Port`] owns the register bus, the diagnostic sink and the table that
//! governs the pins. The table length `N` is part of the type, so a pin index
//! can be bounds-checked before any table is applied. `init` applies a whole
//! table; `set_pin_direction` and `set_pin_mode` change a single pin
//! afterwards, addressed by its index in that table.

pub mod direction;
pub mod error;
pub mod mode;
pub mod pins;
pub mod routing;

use crate::config::{PinConfig, PinDirection, PinId, PinMode, PortConfig};
use crate::det::{
    Det, DetReport, PORT_INIT_SID, PORT_SET_PIN_DIRECTION_SID, PORT_SET_PIN_MODE_SID,
};
use crate::sdk::common::macros::{port_debug, port_warn};
use crate::sdk::mcu::register::{PortBus, PortId, PortReg, GPIO_LOCK_KEY};
use crate::version::{version_info, VersionInfo};

use direction::apply_direction;
use error::PortError;
use mode::apply_mode;
use pins::PinTarget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortStatus {
    NotInitialized,
    Initialized,
}

pub struct Port<'cfg, B: PortBus, D: Det, const N: usize> {
    bus: B,
    det: D,
    status: PortStatus,
    config: Option<&'cfg PortConfig<N>>,
}

impl<'cfg, B: PortBus, D: Det, const N: usize> Port<'cfg, B, D, N> {
    pub const fn new(bus: B, det: D) -> Self {
        Self {
            bus,
            det,
            status: PortStatus::NotInitialized,
            config: None,
        }
    }

    pub fn status(&self) -> PortStatus {
        self.status
    }

    /// Table applied by the last successful `init`.
    pub fn active_config(&self) -> Option<&'cfg PortConfig<N>> {
        self.config
    }

    pub fn det(&self) -> &D {
        &self.det
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Gives back the bus and the diagnostic sink.
    pub fn release(self) -> (B, D) {
        (self.bus, self.det)
    }

    pub fn version_info(&self) -> VersionInfo {
        version_info()
    }

    /// Applies every entry of `config` in table order.
    ///
    /// # Parameters
    ///
    /// * `config` - Table to apply; `None` is rejected without touching any register
    ///
    /// # Algorithm
    ///
    /// The driver becomes initialized and records `config` before the first
    /// entry is applied. For each entry the port is resolved, PD7 and PF0 are
    /// unlocked through GPIOLOCK/GPIOCR, the JTAG pins PC0..PC3 are skipped,
    /// and then direction and mode are programmed.
    ///
    /// A bad entry is reported and skipped; the remaining entries are still
    /// applied. The first such error is returned once the table is done.
    pub fn init(&mut self, config: Option<&'cfg PortConfig<N>>) -> Result<(), PortError> {
        let config = match config {
            Some(config) => config,
            None => {
                self.report(PORT_INIT_SID, PortError::ParamConfig);
                return Err(PortError::ParamConfig);
            }
        };

        self.status = PortStatus::Initialized;
        self.config = Some(config);

        let mut first_error = None;
        for entry in config.pins.iter() {
            if let Err(err) = self.init_pin(entry) {
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init_pin(&mut self, entry: &PinConfig) -> Result<(), PortError> {
        let target = self.resolve(PORT_INIT_SID, entry)?;

        if target.is_protected() {
            self.unlock(target);
        } else if target.is_debug() {
            port_debug!("P{}{} left to the debug port", target.port(), target.pin());
            return Ok(());
        }

        let direction = apply_direction(
            &mut self.bus,
            target,
            entry.direction,
            entry.resistor,
            entry.initial_level,
        );
        if let Err(err) = direction {
            self.report(PORT_SET_PIN_DIRECTION_SID, err);
        }

        let mode = apply_mode(&mut self.bus, target, entry.mode);
        if let Err(err) = mode {
            self.report(PORT_SET_PIN_MODE_SID, err);
        }

        direction.and(mode)
    }

    /// Opens the commit gate of a protected pin.
    fn unlock(&mut self, target: PinTarget) {
        let base = target.base();
        self.bus.write(base, PortReg::Lock, GPIO_LOCK_KEY);
        self.bus.set_bits(base, PortReg::Cr, target.mask());
    }

    /// Changes the direction of the pin at index `pin` of the active table.
    ///
    /// Resistor and initial level come from the table entry.
    pub fn set_pin_direction(
        &mut self,
        pin: PinId,
        direction: PinDirection,
    ) -> Result<(), PortError> {
        let entry = self.check(PORT_SET_PIN_DIRECTION_SID, pin);
        let valid = direction != PinDirection::Invalid;
        if !valid {
            self.report(PORT_SET_PIN_DIRECTION_SID, PortError::DirectionUnchangeable);
        }

        let entry = entry?;
        if !valid {
            return Err(PortError::DirectionUnchangeable);
        }

        let target = self.resolve(PORT_SET_PIN_DIRECTION_SID, &entry)?;
        apply_direction(
            &mut self.bus,
            target,
            direction,
            entry.resistor,
            entry.initial_level,
        )
    }

    /// Changes the function of the pin at index `pin` of the active table.
    pub fn set_pin_mode(&mut self, pin: PinId, mode: PinMode) -> Result<(), PortError> {
        let entry = self.check(PORT_SET_PIN_MODE_SID, pin);
        let valid = mode != PinMode::Invalid;
        if !valid {
            self.report(PORT_SET_PIN_MODE_SID, PortError::InvalidMode);
        }

        let entry = entry?;
        if !valid {
            return Err(PortError::InvalidMode);
        }

        let target = self.resolve(PORT_SET_PIN_MODE_SID, &entry)?;
        apply_mode(&mut self.bus, target, mode)
    }

    // Initialization and pin index checks shared by the setters. Both are
    // checked and reported independently; the first failure is returned.
    fn check(&mut self, api_id: u8, pin: PinId) -> Result<PinConfig, PortError> {
        let config = match (self.status, self.config) {
            (PortStatus::Initialized, Some(config)) => Some(config),
            _ => {
                self.report(api_id, PortError::Uninit);
                None
            }
        };
        if pin >= N {
            self.report(api_id, PortError::ParamPin(pin));
        }

        match config {
            None => Err(PortError::Uninit),
            Some(config) => config.get(pin).copied().ok_or(PortError::ParamPin(pin)),
        }
    }

    fn resolve(&mut self, api_id: u8, entry: &PinConfig) -> Result<PinTarget, PortError> {
        let port = match PortId::from_ordinal(entry.port) {
            Some(port) => port,
            None => {
                self.report(api_id, PortError::InvalidPort(entry.port));
                return Err(PortError::InvalidPort(entry.port));
            }
        };
        match PinTarget::new(port, entry.pin) {
            Some(target) => Ok(target),
            None => {
                self.report(api_id, PortError::InvalidPinBit(entry.pin));
                Err(PortError::InvalidPinBit(entry.pin))
            }
        }
    }

    fn report(&mut self, api_id: u8, err: PortError) {
        port_warn!("port api {=u8:#x}: {}", api_id, err);
        if cfg!(feature = "dev-error-detect") {
            self.det.report_error(DetReport::port(api_id, err.error_id()));
        }
    }
}
