/*!
Mapper subsystem: the trait every cartridge board implements and the factory
that picks an implementation for a cartridge.

Routing contract:
- The CPU bus forwards $6000..=$FFFF to `cpu_read`/`cpu_write`.
- The PPU bus forwards $0000..=$1FFF to `ppu_read`/`ppu_write` and asks
  `mirroring()` how to fold nametable addresses.
- The clock calls `step` once per PPU dot and polls `irq_pending` afterwards.

The mapper owns its `Cartridge` for the whole session.
*/

use crate::cartridge::{Cartridge, Mirroring};
use crate::error::{Error, Result};
use crate::mappers::UxRom;

/// Common interface all cartridge mappers implement.
pub trait Mapper {
    /// iNES mapper number this implementation was created for.
    fn mapper_id(&self) -> u8;

    /// CPU-visible read at $6000..=$FFFF.
    fn cpu_read(&mut self, addr: u16) -> u8;

    /// CPU-visible write at $6000..=$FFFF (bank registers, SRAM).
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// PPU-visible read at $0000..=$1FFF (pattern tables).
    fn ppu_read(&self, addr: u16) -> u8;

    /// PPU-visible write at $0000..=$1FFF (CHR RAM).
    fn ppu_write(&mut self, addr: u16, value: u8);

    /// The cartridge this mapper owns.
    fn cartridge(&self) -> &Cartridge;

    /// Nametable layout currently in effect. Boards with mapper-controlled
    /// mirroring override this; the default is the cartridge's fixed layout.
    fn mirroring(&self) -> Mirroring {
        self.cartridge().mirroring()
    }

    /// Per-dot hook, called three times per CPU cycle.
    fn step(&mut self) {}

    /// Whether the board is asserting the CPU IRQ line.
    fn irq_pending(&self) -> bool {
        false
    }

    /// Reinitialize bank registers on console reset.
    fn reset(&mut self) {}
}

/// Construct the mapper for `cartridge`, taking ownership of it.
///
/// Mapper 0 (NROM) is served by the UxROM implementation: with no bank
/// writes, a 16 KiB board mirrors its single bank and a 32 KiB board maps
/// both banks linearly, which is exactly NROM.
pub fn create(cartridge: Cartridge) -> Result<Box<dyn Mapper>> {
    match cartridge.mapper_id() {
        0 | 2 => Ok(Box::new(UxRom::new(cartridge)?)),
        id => Err(Error::UnsupportedMapper(id)),
    }
}
