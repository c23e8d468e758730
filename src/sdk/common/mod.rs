pub mod bit;
pub mod macros;
