//! Development error reporting.
//!
//! The driver hands every detected precondition failure to a [`Det`] sink as
//! a `(module, instance, api, error)` tuple. Reporting is a notification
//! only: the driver never looks at what the sink does with it.

use heapless::Deque;

use crate::version::{PORT_INSTANCE_ID, PORT_MODULE_ID};

/* service ids */
pub const PORT_INIT_SID: u8 = 0x00;
pub const PORT_SET_PIN_DIRECTION_SID: u8 = 0x01;
pub const PORT_SET_PIN_MODE_SID: u8 = 0x04;

/* error codes */
pub const PORT_E_PARAM_PIN: u8 = 0x0A;
pub const PORT_E_DIRECTION_UNCHANGEABLE: u8 = 0x0B;
pub const PORT_E_PARAM_CONFIG: u8 = 0x0C;
pub const PORT_E_PARAM_INVALID_MODE: u8 = 0x0D;
pub const PORT_E_UNINIT: u8 = 0x0F;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetReport {
    pub module_id: u16,
    pub instance_id: u8,
    pub api_id: u8,
    pub error_id: u8,
}

impl DetReport {
    /// Report tagged with this driver's module and instance ids.
    pub const fn port(api_id: u8, error_id: u8) -> Self {
        Self {
            module_id: PORT_MODULE_ID,
            instance_id: PORT_INSTANCE_ID,
            api_id,
            error_id,
        }
    }
}

pub trait Det {
    fn report_error(&mut self, report: DetReport);
}

impl<T: Det + ?Sized> Det for &mut T {
    fn report_error(&mut self, report: DetReport) {
        (**self).report_error(report)
    }
}

/// Sink that drops every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDet;

impl Det for NoDet {
    fn report_error(&mut self, _report: DetReport) {}
}

/// Keeps the most recent `N` reports; older ones are evicted.
pub struct DetBuffer<const N: usize> {
    reports: Deque<DetReport, N>,
    dropped: u32,
}

impl<const N: usize> DetBuffer<N> {
    pub const fn new() -> Self {
        Self {
            reports: Deque::new(),
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Number of reports evicted because the buffer was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetReport> {
        self.reports.iter()
    }

    pub fn last(&self) -> Option<&DetReport> {
        self.reports.back()
    }

    pub fn contains(&self, api_id: u8, error_id: u8) -> bool {
        self.reports
            .iter()
            .any(|r| r.api_id == api_id && r.error_id == error_id)
    }

    pub fn clear(&mut self) {
        self.reports.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> Default for DetBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Det for DetBuffer<N> {
    fn report_error(&mut self, report: DetReport) {
        if self.reports.is_full() {
            self.reports.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
        }
        // Cannot fail: a slot was freed above when the buffer was full.
        let _ = self.reports.push_back(report);
    }
}
