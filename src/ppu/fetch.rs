/*!
Background fetch and scroll register updates.

Fetch cycle (every 8 dots on render lines, dots 1-256 and 321-336):
  dot % 8 == 1: nametable byte at $2000 | (v & $0FFF)
  dot % 8 == 3: attribute byte, reduced to the 2-bit palette of this tile
  dot % 8 == 5: pattern low plane
  dot % 8 == 7: pattern high plane
  dot % 8 == 0: eight 4-bit pixels appended to the low half of `tile_data`

`tile_data` shifts left 4 bits every fetch dot, so the upper 32 bits hold
the tile currently on screen and fine X picks a nibble out of them.

v layout: yyy NN YYYYY XXXXX (fine Y, nametable, coarse Y, coarse X).
*/

use super::{CTRL_BACKGROUND_TABLE, Ppu};
use crate::mapper::Mapper;

#[derive(Clone, Debug, Default)]
pub(crate) struct BackgroundPipeline {
    nametable_byte: u8,
    attribute_byte: u8,
    low_tile_byte: u8,
    high_tile_byte: u8,
    pub(crate) tile_data: u64,
}

impl Ppu {
    pub(super) fn fetch_nametable_byte(&mut self, mapper: &dyn Mapper) {
        let address = 0x2000 | (self.v & 0x0FFF);
        self.bg.nametable_byte = self.vram.read(mapper, address);
    }

    pub(super) fn fetch_attribute_byte(&mut self, mapper: &dyn Mapper) {
        let v = self.v;
        let address = 0x23C0 | (v & 0x0C00) | ((v >> 4) & 0x38) | ((v >> 2) & 0x07);
        let shift = ((v >> 4) & 4) | (v & 2);
        self.bg.attribute_byte = ((self.vram.read(mapper, address) >> shift) & 3) << 2;
    }

    fn pattern_address(&self) -> u16 {
        let fine_y = (self.v >> 12) & 7;
        let table = if self.ctrl & CTRL_BACKGROUND_TABLE != 0 { 0x1000 } else { 0 };
        table + self.bg.nametable_byte as u16 * 16 + fine_y
    }

    pub(super) fn fetch_low_tile_byte(&mut self, mapper: &dyn Mapper) {
        let address = self.pattern_address();
        self.bg.low_tile_byte = self.vram.read(mapper, address);
    }

    pub(super) fn fetch_high_tile_byte(&mut self, mapper: &dyn Mapper) {
        let address = self.pattern_address() + 8;
        self.bg.high_tile_byte = self.vram.read(mapper, address);
    }

    pub(super) fn store_tile_data(&mut self) {
        let bg = &mut self.bg;
        let mut data: u32 = 0;
        for _ in 0..8 {
            let p1 = (bg.low_tile_byte & 0x80) >> 7;
            let p2 = (bg.high_tile_byte & 0x80) >> 6;
            bg.low_tile_byte <<= 1;
            bg.high_tile_byte <<= 1;
            data = (data << 4) | (bg.attribute_byte | p1 | p2) as u32;
        }
        bg.tile_data |= data as u64;
    }

    /// 4-bit background color (palette select + pixel) at fine X, or 0.
    pub(super) fn background_pixel(&self) -> u8 {
        if !self.show_background() {
            return 0;
        }
        let data = (self.bg.tile_data >> 32) as u32 >> ((7 - self.x as u32) * 4);
        (data & 0x0F) as u8
    }

    /// Coarse X + 1, wrapping into the horizontally adjacent nametable.
    pub(super) fn increment_x(&mut self) {
        if self.v & 0x001F == 31 {
            self.v &= !0x001F;
            self.v ^= 0x0400;
        } else {
            self.v += 1;
        }
    }

    /// Fine Y + 1, carrying into coarse Y; row 29 wraps to the vertically
    /// adjacent nametable, rows 30-31 wrap without switching.
    pub(super) fn increment_y(&mut self) {
        if self.v & 0x7000 != 0x7000 {
            self.v += 0x1000;
            return;
        }
        self.v &= !0x7000;
        let mut y = (self.v & 0x03E0) >> 5;
        match y {
            29 => {
                y = 0;
                self.v ^= 0x0800;
            }
            31 => y = 0,
            _ => y += 1,
        }
        self.v = (self.v & !0x03E0) | (y << 5);
    }

    /// v: ....F.. ...EDCBA <- t
    pub(super) fn copy_x(&mut self) {
        self.v = (self.v & 0xFBE0) | (self.t & 0x041F);
    }

    /// v: IHGF.ED CBA..... <- t
    pub(super) fn copy_y(&mut self) {
        self.v = (self.v & 0x841F) | (self.t & 0x7BE0);
    }
}
