//! Simulated register file for host tests.

use std::collections::BTreeMap;

use crate::port::pins::PinTarget;
use crate::BM_IS_SET;
use crate::sdk::mcu::register::{PortBus, PortId, PortReg, GPIO_LOCK_KEY, PORT_COUNT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read(u32, PortReg),
    Write(u32, PortReg, u32),
}

/// Port register blocks held in memory, with a log of every access.
///
/// Starts from the device reset state: PC0..PC3 are claimed by JTAG, and the
/// commit bits of PD7 and PF0 are clear until the block is unlocked. Writes to
/// GPIOCR are dropped while the block is locked.
pub struct SimBus {
    regs: BTreeMap<(u32, u32), u32>,
    trace: Vec<Access>,
}

impl SimBus {
    pub fn new() -> Self {
        let mut bus = Self {
            regs: BTreeMap::new(),
            trace: Vec::new(),
        };
        for port in (0..PORT_COUNT as u8).filter_map(PortId::from_ordinal) {
            bus.poke(port, PortReg::Lock, 1);
            bus.poke(port, PortReg::Cr, 0xff);
        }
        bus.poke(PortId::C, PortReg::Afsel, 0x0f);
        bus.poke(PortId::C, PortReg::Den, 0x0f);
        bus.poke(PortId::C, PortReg::Pur, 0x0f);
        bus.poke(PortId::C, PortReg::Pctl, 0x0000_1111);
        bus.poke(PortId::D, PortReg::Cr, 0x7f);
        bus.poke(PortId::F, PortReg::Cr, 0xfe);
        bus
    }

    pub fn poke(&mut self, port: PortId, reg: PortReg, value: u32) {
        self.regs.insert((port.base(), reg.offset()), value);
    }

    pub fn peek(&self, port: PortId, reg: PortReg) -> u32 {
        self.load(port.base(), reg)
    }

    pub fn bit(&self, target: PinTarget, reg: PortReg) -> bool {
        BM_IS_SET!(self.peek(target.port(), reg), target.mask())
    }

    pub fn trace(&self) -> &[Access] {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Position in the trace of the first write to `reg` of `port`.
    pub fn first_write(&self, port: PortId, reg: PortReg) -> Option<usize> {
        let base = port.base();
        self.trace
            .iter()
            .position(|a| matches!(a, Access::Write(b, r, _) if *b == base && *r == reg))
    }

    pub fn snapshot(&self) -> BTreeMap<(u32, u32), u32> {
        self.regs.clone()
    }

    fn load(&self, base: u32, reg: PortReg) -> u32 {
        self.regs.get(&(base, reg.offset())).copied().unwrap_or(0)
    }

    fn store(&mut self, base: u32, reg: PortReg, value: u32) {
        self.regs.insert((base, reg.offset()), value);
    }
}

impl PortBus for SimBus {
    fn read(&mut self, base: u32, reg: PortReg) -> u32 {
        self.trace.push(Access::Read(base, reg));
        self.load(base, reg)
    }

    fn write(&mut self, base: u32, reg: PortReg, value: u32) {
        self.trace.push(Access::Write(base, reg, value));
        match reg {
            // reads back 0 once the key has been written
            PortReg::Lock => self.store(base, reg, (value != GPIO_LOCK_KEY) as u32),
            PortReg::Cr if self.load(base, PortReg::Lock) != 0 => {}
            _ => self.store(base, reg, value),
        }
    }
}
