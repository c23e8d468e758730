use crate::config::{InternalResistor, Level, PinDirection};
use crate::port::error::PortError;
use crate::port::pins::PinTarget;
use crate::sdk::common::macros::port_trace;
use crate::sdk::mcu::register::{PortBus, PortReg};

/// Programs the direction of one pin.
///
/// # Parameters
///
/// * `bus` - Register access path
/// * `target` - Pin to configure
/// * `direction` - `Output` or `Input`
/// * `resistor` - Internal pull applied to an input
/// * `level` - Level an output starts driving
///
/// # Algorithm
///
/// Output sets the GPIODIR bit and then drives GPIODATA to `level`. Input
/// clears GPIODIR and programs GPIOPUR / GPIOPDR so at most one pull is active.
/// `Invalid` is rejected before any register is touched.
pub fn apply_direction<B: PortBus>(
    bus: &mut B,
    target: PinTarget,
    direction: PinDirection,
    resistor: InternalResistor,
    level: Level,
) -> Result<(), PortError> {
    let base = target.base();
    let mask = target.mask();

    match direction {
        PinDirection::Output => {
            bus.set_bits(base, PortReg::Dir, mask);
            match level {
                Level::High => bus.set_bits(base, PortReg::Data, mask),
                Level::Low => bus.clear_bits(base, PortReg::Data, mask),
            }
        }
        PinDirection::Input => {
            bus.clear_bits(base, PortReg::Dir, mask);
            match resistor {
                InternalResistor::PullUp => {
                    bus.clear_bits(base, PortReg::Pdr, mask);
                    bus.set_bits(base, PortReg::Pur, mask);
                }
                InternalResistor::PullDown => {
                    bus.clear_bits(base, PortReg::Pur, mask);
                    bus.set_bits(base, PortReg::Pdr, mask);
                }
                InternalResistor::Off => {
                    bus.clear_bits(base, PortReg::Pur, mask);
                    bus.clear_bits(base, PortReg::Pdr, mask);
                }
            }
        }
        PinDirection::Invalid => return Err(PortError::DirectionUnchangeable),
    }

    port_trace!("P{}{} direction {}", target.port(), target.pin(), direction);
    Ok(())
}
