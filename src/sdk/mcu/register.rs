use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{BM_CLR, BM_SET};

extern crate paste;

/****************************************************
 gpio port blocks (APB aperture)
 *****************************************************/
pub const GPIO_PORTA_BASE_ADDR: u32 = 0x4000_4000;
pub const GPIO_PORTB_BASE_ADDR: u32 = 0x4000_5000;
pub const GPIO_PORTC_BASE_ADDR: u32 = 0x4000_6000;
pub const GPIO_PORTD_BASE_ADDR: u32 = 0x4000_7000;
pub const GPIO_PORTE_BASE_ADDR: u32 = 0x4002_4000;
pub const GPIO_PORTF_BASE_ADDR: u32 = 0x4002_5000;

pub const PORT_COUNT: usize = 6;
pub const PINS_PER_PORT: usize = 8;

/// Value that opens GPIOCR for writing when stored to GPIOLOCK ("LOCK" in ASCII).
pub const GPIO_LOCK_KEY: u32 = 0x4C4F_434B;

static GPIO_PORT_BASE: [u32; PORT_COUNT] = [
    GPIO_PORTA_BASE_ADDR,
    GPIO_PORTB_BASE_ADDR,
    GPIO_PORTC_BASE_ADDR,
    GPIO_PORTD_BASE_ADDR,
    GPIO_PORTE_BASE_ADDR,
    GPIO_PORTF_BASE_ADDR,
];

/// Physical GPIO port group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PortId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl PortId {
    /// Decodes a raw port ordinal as stored in a configuration record.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        FromPrimitive::from_u8(ordinal)
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Base address of this port's register block.
    pub fn base(self) -> u32 {
        GPIO_PORT_BASE[self as usize]
    }
}

// Generates the offset constants and the `PortReg` selector for one port block.
macro_rules! port_regs {
    ( $( $(#[$doc:meta])* $name:ident = $offset:expr ),* $(,)? ) => {
        paste::paste! {
            $(
                pub const [<GPIO_ $name:upper _OFFSET>]: u32 = $offset;
            )*

            /// A register inside a port block.
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub enum PortReg {
                $( $(#[$doc])* $name, )*
            }

            impl PortReg {
                pub const ALL: &'static [PortReg] = &[ $( PortReg::$name, )* ];

                /// Byte offset of the register from the port base.
                pub const fn offset(self) -> u32 {
                    match self {
                        $( PortReg::$name => [<GPIO_ $name:upper _OFFSET>], )*
                    }
                }
            }
        }
    };
}

port_regs! {
    /// GPIODATA through the all-bits address mask
    Data = 0x3fc,
    /// GPIODIR, 1 = output
    Dir = 0x400,
    /// GPIOAFSEL, 1 = pin driven by a peripheral
    Afsel = 0x420,
    /// GPIOPUR
    Pur = 0x510,
    /// GPIOPDR
    Pdr = 0x514,
    /// GPIODEN
    Den = 0x51c,
    /// GPIOLOCK
    Lock = 0x520,
    /// GPIOCR, commit enable per pin
    Cr = 0x524,
    /// GPIOAMSEL
    Amsel = 0x528,
    /// GPIOPCTL, one 4-bit function code per pin
    Pctl = 0x52c,
}

#[inline(always)]
#[cfg_attr(test, mry::mry)]
pub fn read_reg32(addr: u32) -> u32 {
    unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
}

#[inline(always)]
#[cfg_attr(test, mry::mry)]
pub fn write_reg32(addr: u32, value: u32) {
    unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
}

/// Access path from the driver to a port register block.
///
/// Every access must reach the device: implementations may not cache or
/// coalesce. `modify` is the read-modify-write primitive the driver builds on;
/// it runs inside a critical section so a pin update cannot be torn by an
/// interrupt touching another pin of the same port.
pub trait PortBus {
    fn read(&mut self, base: u32, reg: PortReg) -> u32;

    fn write(&mut self, base: u32, reg: PortReg, value: u32);

    fn modify<F>(&mut self, base: u32, reg: PortReg, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        critical_section::with(|_| {
            let value = self.read(base, reg);
            self.write(base, reg, f(value));
        });
    }

    fn set_bits(&mut self, base: u32, reg: PortReg, mask: u32) {
        self.modify(base, reg, |mut value| {
            BM_SET!(value, mask);
            value
        });
    }

    fn clear_bits(&mut self, base: u32, reg: PortReg, mask: u32) {
        self.modify(base, reg, |mut value| {
            BM_CLR!(value, mask);
            value
        });
    }
}

/// Memory-mapped access to the real register blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mmio;

impl PortBus for Mmio {
    #[inline(always)]
    fn read(&mut self, base: u32, reg: PortReg) -> u32 {
        read_reg32(base + reg.offset())
    }

    #[inline(always)]
    fn write(&mut self, base: u32, reg: PortReg, value: u32) {
        write_reg32(base + reg.offset(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BIT;
    use mry::Any;

    #[test]
    fn test_port_from_ordinal() {
        assert_eq!(PortId::from_ordinal(0), Some(PortId::A));
        assert_eq!(PortId::from_ordinal(5), Some(PortId::F));
        assert_eq!(PortId::from_ordinal(6), None);
        assert_eq!(PortId::from_ordinal(0xff), None);
    }

    #[test]
    fn test_port_bases() {
        assert_eq!(PortId::A.base(), 0x4000_4000);
        assert_eq!(PortId::D.base(), 0x4000_7000);
        // E and F live in the upper APB window
        assert_eq!(PortId::E.base(), 0x4002_4000);
        assert_eq!(PortId::F.base(), 0x4002_5000);
    }

    #[test]
    fn test_register_offsets() {
        assert_eq!(PortReg::Data.offset(), 0x3fc);
        assert_eq!(PortReg::Dir.offset(), GPIO_DIR_OFFSET);
        assert_eq!(PortReg::Afsel.offset(), 0x420);
        assert_eq!(PortReg::Lock.offset(), GPIO_LOCK_OFFSET);
        assert_eq!(PortReg::Pctl.offset(), 0x52c);
        assert_eq!(PortReg::ALL.len(), 10);
    }

    /// Tests that a bit set on port B's direction register is a
    /// read-modify-write at the absolute register address.
    #[test]
    #[mry::lock(read_reg32, write_reg32)]
    fn test_mmio_set_bits_port_b_dir() {
        // GPIODIR of port B = 0x4000_5000 + 0x400, bit 0 already set
        mock_read_reg32(0x4000_5400).returns(0x01);
        mock_write_reg32(0x4000_5400, 0x11).returns(());

        let mut bus = Mmio;
        bus.set_bits(PortId::B.base(), PortReg::Dir, BIT!(4));

        mock_write_reg32(0x4000_5400, 0x11).assert_called(1);
    }

    #[test]
    #[mry::lock(read_reg32, write_reg32)]
    fn test_mmio_clear_bits_port_f_den() {
        // GPIODEN of port F, all pins digital
        mock_read_reg32(0x4002_551c).returns(0x1f);
        mock_write_reg32(0x4002_551c, 0x1e).returns(());

        let mut bus = Mmio;
        bus.clear_bits(PortId::F.base(), PortReg::Den, BIT!(0));

        mock_write_reg32(0x4002_551c, 0x1e).assert_called(1);
    }

    /// Tests that the lock key goes straight to GPIOLOCK as a plain store.
    #[test]
    #[mry::lock(write_reg32)]
    fn test_mmio_write_lock_key_is_plain_store() {
        mock_write_reg32(0x4000_7520, Any).returns(());

        let mut bus = Mmio;
        bus.write(PortId::D.base(), PortReg::Lock, GPIO_LOCK_KEY);

        mock_write_reg32(0x4000_7520, GPIO_LOCK_KEY).assert_called(1);
    }
}
