//! Concrete mapper implementations.

pub mod uxrom;

pub use uxrom::UxRom;
