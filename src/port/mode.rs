use crate::config::PinMode;
use crate::port::error::PortError;
use crate::port::pins::PinTarget;
use crate::port::routing::{route, Route};
use crate::sdk::common::bit::with_nibble;
use crate::sdk::common::macros::{port_debug, port_trace};
use crate::sdk::mcu::register::{PortBus, PortReg};

/// Programs the function of one pin.
///
/// Digital and analog are available on every pin. A peripheral mode is only
/// applied when the pin appears in that mode's routing table; otherwise the
/// call is a no-op and returns `Ok`. After a mode is applied GPIODEN is set,
/// except for analog where it is cleared.
pub fn apply_mode<B: PortBus>(
    bus: &mut B,
    target: PinTarget,
    mode: PinMode,
) -> Result<(), PortError> {
    let base = target.base();
    let mask = target.mask();

    match route(mode, target).ok_or(PortError::InvalidMode)? {
        Route::Gpio => {
            bus.clear_bits(base, PortReg::Amsel, mask);
            bus.clear_bits(base, PortReg::Afsel, mask);
            bus.modify(base, PortReg::Pctl, |v| with_nibble(v, target.pin(), 0));
            bus.set_bits(base, PortReg::Den, mask);
        }
        Route::Analog => {
            bus.set_bits(base, PortReg::Afsel, mask);
            bus.set_bits(base, PortReg::Amsel, mask);
            bus.modify(base, PortReg::Pctl, |v| with_nibble(v, target.pin(), 0));
            bus.clear_bits(base, PortReg::Den, mask);
        }
        Route::Peripheral(code) => {
            bus.clear_bits(base, PortReg::Amsel, mask);
            bus.modify(base, PortReg::Pctl, |v| with_nibble(v, target.pin(), code));
            bus.set_bits(base, PortReg::Afsel, mask);
            bus.set_bits(base, PortReg::Den, mask);
        }
        Route::NotRouted => {
            port_debug!("P{}{} cannot carry {}", target.port(), target.pin(), mode);
            return Ok(());
        }
    }

    port_trace!("P{}{} mode {}", target.port(), target.pin(), mode);
    Ok(())
}
