// Logging shims. With the `defmt` feature these forward to the defmt logger,
// otherwise they expand to nothing so the driver stays silent on bare targets.

macro_rules! port_trace {
    ( $($arg:tt)* ) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    }};
}

macro_rules! port_debug {
    ( $($arg:tt)* ) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

macro_rules! port_warn {
    ( $($arg:tt)* ) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    }};
}

pub(crate) use port_debug;
pub(crate) use port_trace;
pub(crate) use port_warn;
