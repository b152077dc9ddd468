#![doc = r#"
Rustendo library crate.

A cycle-stepped NES emulator core: 6502 CPU, 2C02 PPU, cartridge mappers
and the buses tying them together, driven by a `Console`.

Modules:
- bus: CPU memory map, PPU address space, RAM, OAM DMA and the dot clock
- cartridge: cartridge data and iNES v1 loading
- console: owns every component; `step`, `step_seconds`, `step_frame`
- cpu: 6502 core (state, tables, addressing, dispatch)
- error: crate error type
- mapper / mappers: Mapper trait, factory and UxROM
- ppu: registers, background/sprite pipelines, compositor, NMI latch
- screenshot (feature `screenshot`): PNG export of the front buffer
- display (feature `display`): window presenting the front buffer

In tests, shared builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod console;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod mappers;
pub mod ppu;

#[cfg(feature = "display")]
pub mod display;
#[cfg(feature = "screenshot")]
pub mod screenshot;

pub use cartridge::{Cartridge, Mirroring};
pub use console::Console;
pub use cpu::Cpu;
pub use error::{Error, Result};
pub use mapper::Mapper;

#[cfg(test)]
pub mod test_utils;
