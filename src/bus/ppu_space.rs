#![doc = r#"
PPU address space: nametable RAM, palette RAM and the routing rules that fold
the 14-bit PPU address onto them.

Map (address taken mod $4000):
- $0000-$1FFF: pattern tables, delegated to the mapper (CHR ROM/RAM)
- $2000-$3EFF: four logical 1 KiB nametables folded onto 2 KiB of RAM by
  one of five fixed layouts
- $3F00-$3FFF: 32-byte palette RAM, mirrored every 32 bytes; entries
  $10/$14/$18/$1C alias $00/$04/$08/$0C

The helpers are pure so they can be tested without a PPU.
"#]

use crate::cartridge::Mirroring;
use crate::mapper::Mapper;

/// Size of the console's nametable RAM.
pub const NAMETABLE_RAM_SIZE: usize = 0x0800;
/// Size of palette RAM.
pub const PALETTE_RAM_SIZE: usize = 32;

/// Logical table (0..=3) to physical 1 KiB table, indexed by `Mirroring as usize`.
const MIRROR_LOOKUP: [[u16; 4]; 5] = [
    [0, 0, 1, 1], // horizontal
    [0, 1, 0, 1], // vertical
    [0, 0, 0, 0], // single-screen 0
    [1, 1, 1, 1], // single-screen 1
    [0, 1, 2, 3], // four-screen
];

/// Fold a nametable address ($2000-$3EFF) onto the physical table picked by `mode`.
///
/// Returns an address in $2000-$2FFF; callers index RAM with `% NAMETABLE_RAM_SIZE`.
pub fn mirror_address(mode: Mirroring, addr: u16) -> u16 {
    let a = addr.wrapping_sub(0x2000) % 0x1000;
    let table = (a / 0x0400) as usize;
    let offset = a % 0x0400;
    0x2000 + MIRROR_LOOKUP[mode as usize][table] * 0x0400 + offset
}

/// Nametable RAM index for a PPU address under `mode`.
#[inline]
pub fn map_nametable_addr(mode: Mirroring, addr: u16) -> usize {
    mirror_address(mode, addr) as usize % NAMETABLE_RAM_SIZE
}

/// Palette RAM index (0..=31) for a palette address or raw palette offset.
#[inline]
pub fn map_palette_addr(addr: u16) -> usize {
    let mut idx = addr as usize % PALETTE_RAM_SIZE;
    if idx >= 16 && idx % 4 == 0 {
        idx -= 16;
    }
    idx
}

/// Nametable and palette RAM, plus PPU-bus routing through the mapper.
#[derive(Clone)]
pub struct PpuAddressSpace {
    nametable: [u8; NAMETABLE_RAM_SIZE],
    palette: [u8; PALETTE_RAM_SIZE],
}

impl Default for PpuAddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl PpuAddressSpace {
    pub fn new() -> Self {
        Self {
            nametable: [0; NAMETABLE_RAM_SIZE],
            palette: [0; PALETTE_RAM_SIZE],
        }
    }

    /// Read from the PPU address space.
    pub fn read(&self, mapper: &dyn Mapper, addr: u16) -> u8 {
        let a = addr % 0x4000;
        match a {
            0x0000..=0x1FFF => mapper.ppu_read(a),
            0x2000..=0x3EFF => self.nametable[map_nametable_addr(mapper.mirroring(), a)],
            _ => self.read_palette(a),
        }
    }

    /// Write to the PPU address space.
    pub fn write(&mut self, mapper: &mut dyn Mapper, addr: u16, value: u8) {
        let a = addr % 0x4000;
        match a {
            0x0000..=0x1FFF => mapper.ppu_write(a, value),
            0x2000..=0x3EFF => {
                let idx = map_nametable_addr(mapper.mirroring(), a);
                self.nametable[idx] = value;
            }
            _ => self.write_palette(a, value),
        }
    }

    #[inline]
    pub fn read_palette(&self, addr: u16) -> u8 {
        self.palette[map_palette_addr(addr)]
    }

    #[inline]
    pub fn write_palette(&mut self, addr: u16, value: u8) {
        self.palette[map_palette_addr(addr)] = value;
    }
}
