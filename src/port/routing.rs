//! Alternate-function routing.
//!
//! Each peripheral mode owns a table that maps a physical pin to the GPIOPCTL
//! code selecting that peripheral. A pin missing from a mode's table cannot
//! carry that mode. Tables are built at compile time from rows of
//! `(port, pins, code)`; two rows claiming the same pin fail the build.

use crate::config::PinMode;
use crate::port::pins::{PinMask, PinTarget};
use crate::sdk::mcu::register::{PortId, PINS_PER_PORT, PORT_COUNT};

const NO_ROUTE: u8 = 0xff;

/// What the mode setter has to program for a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    Gpio,
    Analog,
    /// Peripheral function selected by a GPIOPCTL code.
    Peripheral(u8),
    /// The mode is not available on this pin.
    NotRouted,
}

#[derive(Clone, Copy)]
pub struct RouteRow {
    port: PortId,
    pins: PinMask,
    code: u8,
}

const fn row(port: PortId, pins: PinMask, code: u8) -> RouteRow {
    RouteRow { port, pins, code }
}

pub struct RouteTable {
    codes: [[u8; PINS_PER_PORT]; PORT_COUNT],
}

impl RouteTable {
    pub const fn build(rows: &[RouteRow]) -> Self {
        let mut codes = [[NO_ROUTE; PINS_PER_PORT]; PORT_COUNT];
        let mut r = 0;
        while r < rows.len() {
            let row = rows[r];
            let port = row.port.ordinal() as usize;
            let mut pin = 0;
            while pin < PINS_PER_PORT {
                if row.pins.bits() & (1 << pin) != 0 {
                    assert!(codes[port][pin] == NO_ROUTE, "pin routed twice in one mode");
                    assert!(row.code < 0x10, "port control code wider than 4 bits");
                    codes[port][pin] = row.code;
                }
                pin += 1;
            }
            r += 1;
        }
        Self { codes }
    }

    pub fn code(&self, target: PinTarget) -> Option<u8> {
        match self.codes[target.port().ordinal() as usize].get(target.pin() as usize) {
            Some(&code) if code != NO_ROUTE => Some(code),
            _ => None,
        }
    }
}

use PortId::{A, B, C, D, E, F};

const P01: PinMask = PinMask::P0.union(PinMask::P1);
const P23: PinMask = PinMask::P2.union(PinMask::P3);
const P45: PinMask = PinMask::P4.union(PinMask::P5);
const P67: PinMask = PinMask::P6.union(PinMask::P7);
const P0123: PinMask = P01.union(P23);
const P2345: PinMask = P23.union(P45);
const P4567: PinMask = P45.union(P67);
const PALL: PinMask = PinMask::all();

// PC4/PC5 carry either U4RX/U4TX or U1RX/U1TX
const UART_PC45: u8 = if cfg!(feature = "uart1-on-pc") { 2 } else { 1 };
// PD0..PD3 carry either SSI3 or SSI1
const SSI_PD: u8 = if cfg!(feature = "ssi3-on-pd") { 1 } else { 2 };

pub static UART_ROUTES: RouteTable = RouteTable::build(&[
    row(A, P01, 1),
    row(B, P01, 1),
    row(C, P45, UART_PC45),
    row(C, P67, 1),
    row(D, P4567, 1),
    row(E, P01.union(P45), 1),
    // U1RTS / U1CTS
    row(F, P01, 1),
]);

pub static CAN_ROUTES: RouteTable = RouteTable::build(&[
    row(A, P01, 8),
    row(B, P45, 8),
    row(E, P45, 8),
    row(F, PinMask::P0.union(PinMask::P3), 3),
]);

pub static SPI_ROUTES: RouteTable = RouteTable::build(&[
    row(A, P2345, 2),
    row(B, P4567, 2),
    row(D, P0123, SSI_PD),
    row(F, P0123, 2),
]);

pub static I2C_ROUTES: RouteTable = RouteTable::build(&[
    row(A, P67, 3),
    row(B, P23, 3),
    row(D, P01, 3),
    row(E, P45, 3),
]);

pub static PWM_ROUTES: RouteTable = RouteTable::build(&[
    row(A, P67, 5),
    row(B, P4567, 4),
    row(C, P45, 4),
    row(D, P01, 4),
    row(E, P45, 4),
    row(F, P0123, 5),
]);

pub static USB_ROUTES: RouteTable = RouteTable::build(&[
    row(C, P67, 8),
    row(D, P23, 8),
    row(F, PinMask::P4, 8),
]);

pub static QEI_ROUTES: RouteTable = RouteTable::build(&[
    row(C, P45.union(PinMask::P6), 6),
    row(D, PinMask::P3.union(P67), 6),
    row(F, P01.union(PinMask::P4), 6),
]);

// Wide timer capture/compare pins
pub static WATCHDOG_ROUTES: RouteTable = RouteTable::build(&[
    row(C, P4567, 7),
    row(D, PALL, 7),
]);

fn table(mode: PinMode) -> Option<&'static RouteTable> {
    match mode {
        PinMode::Uart => Some(&UART_ROUTES),
        PinMode::Can => Some(&CAN_ROUTES),
        PinMode::Spi => Some(&SPI_ROUTES),
        PinMode::I2c => Some(&I2C_ROUTES),
        PinMode::Pwm => Some(&PWM_ROUTES),
        PinMode::Usb => Some(&USB_ROUTES),
        PinMode::QuadratureEncoder => Some(&QEI_ROUTES),
        PinMode::Watchdog => Some(&WATCHDOG_ROUTES),
        PinMode::Digital | PinMode::Analog | PinMode::Invalid => None,
    }
}

/// Resolves how `mode` is programmed on `target`.
///
/// Returns `None` for `PinMode::Invalid`, which has no routing at all.
pub fn route(mode: PinMode, target: PinTarget) -> Option<Route> {
    match mode {
        PinMode::Invalid => None,
        PinMode::Digital => Some(Route::Gpio),
        PinMode::Analog => Some(Route::Analog),
        _ => Some(
            table(mode)
                .and_then(|t| t.code(target))
                .map_or(Route::NotRouted, Route::Peripheral),
        ),
    }
}
