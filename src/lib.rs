//! Pin configuration driver for the TM4C123GH6PM GPIO ports.
//!
//! A [`Port`] applies a build-time [`PortConfig`] table to ports A..F and
//! afterwards lets single pins change direction or function. Register access
//! goes through a [`PortBus`]; [`Mmio`] talks to the device. Detected misuse is
//! sent to a [`Det`] sink and returned as a [`PortError`].

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod det;
pub mod port;
pub mod sdk;
pub mod version;

#[cfg(test)]
mod testing;

pub use config::{
    InternalResistor, Level, PinConfig, PinDirection, PinId, PinMode, PortConfig,
    PORT_CONFIGURED_PINS, PORT_PIN_CONFIG,
};
pub use det::{Det, DetBuffer, DetReport, NoDet};
pub use port::error::{ErrorKind, PortError};
pub use port::{Port, PortStatus};
pub use sdk::mcu::register::{Mmio, PortBus, PortId, PortReg};
pub use version::{version_info, Version, VersionInfo, PORT_VERSION_STR};
