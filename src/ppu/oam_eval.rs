#![doc = r#"
Sprite evaluation and pattern fetch (runs at dot 257 of each visible line).

- Sprite height is 8 or 16 (PPUCTRL bit 5).
- An OAM entry matches when `0 <= scanline - y < height`.
- The first 8 matches fill the sprite slots in OAM order; any further match
  sets the sticky overflow flag (cleared on the pre-render line).
- Attributes: bits 0-1 palette, bit 5 priority (1 = behind background),
  bit 6 horizontal flip, bit 7 vertical flip.
- 8x16 sprites take their pattern table from tile bit 0 and use the
  even/odd tile pair for the top/bottom halves.
"#]

use super::sprite::MAX_SPRITES_PER_LINE;
use super::{CTRL_SPRITE_16, CTRL_SPRITE_TABLE, Ppu};
use crate::mapper::Mapper;

impl Ppu {
    #[inline]
    fn sprite_height(&self) -> i32 {
        if self.ctrl & CTRL_SPRITE_16 != 0 { 16 } else { 8 }
    }

    /// Fill the sprite slots for the current scanline.
    pub(super) fn evaluate_sprites(&mut self, mapper: &dyn Mapper) {
        let height = self.sprite_height();
        let mut count = 0usize;
        for i in 0..64 {
            let y = self.oam[i * 4];
            let attributes = self.oam[i * 4 + 2];
            let x = self.oam[i * 4 + 3];
            let row = self.scanline as i32 - y as i32;
            if row < 0 || row >= height {
                continue;
            }
            if count < MAX_SPRITES_PER_LINE {
                self.sprites.patterns[count] = self.fetch_sprite_pattern(mapper, i, row);
                self.sprites.positions[count] = x;
                self.sprites.priorities[count] = (attributes >> 5) & 1;
                self.sprites.indexes[count] = i as u8;
            }
            count += 1;
        }
        if count > MAX_SPRITES_PER_LINE {
            count = MAX_SPRITES_PER_LINE;
            self.sprite_overflow = true;
        }
        self.sprites.count = count;
    }

    /// Decode one row of OAM entry `i` into a pattern word.
    pub(super) fn fetch_sprite_pattern(&self, mapper: &dyn Mapper, i: usize, row: i32) -> u32 {
        let mut tile = self.oam[i * 4 + 1] as u16;
        let attributes = self.oam[i * 4 + 2];
        let mut row = row as u16;

        let address = if self.ctrl & CTRL_SPRITE_16 == 0 {
            if attributes & 0x80 != 0 {
                row = 7 - row;
            }
            let table = if self.ctrl & CTRL_SPRITE_TABLE != 0 { 0x1000 } else { 0 };
            table + tile * 16 + row
        } else {
            if attributes & 0x80 != 0 {
                row = 15 - row;
            }
            let table = tile & 1;
            tile &= 0xFE;
            if row > 7 {
                tile += 1;
                row -= 8;
            }
            0x1000 * table + tile * 16 + row
        };

        let palette = (attributes & 3) << 2;
        let mut low = self.vram.read(mapper, address);
        let mut high = self.vram.read(mapper, address + 8);
        let mut data: u32 = 0;
        for _ in 0..8 {
            let (p1, p2) = if attributes & 0x40 != 0 {
                let bits = (low & 1, (high & 1) << 1);
                low >>= 1;
                high >>= 1;
                bits
            } else {
                let bits = ((low & 0x80) >> 7, (high & 0x80) >> 6);
                low <<= 1;
                high <<= 1;
                bits
            };
            data = (data << 4) | (palette | p1 | p2) as u32;
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use crate::cartridge::Mirroring;
    use crate::mapper::Mapper;
    use crate::mappers::UxRom;
    use crate::ppu::Ppu;
    use crate::test_utils::chr_ram_mapper;

    /// PPU on scanline 20 with `n` sprites covering it.
    fn setup(n: usize) -> (Ppu, UxRom) {
        let mut mapper = chr_ram_mapper(Mirroring::Horizontal);
        // tile 0 row 0..8: low plane solid
        for row in 0..8 {
            mapper.ppu_write(row, 0xFF);
        }
        let mut ppu = Ppu::new();
        ppu.oam = [0xFF; 256];
        for i in 0..n {
            ppu.oam[i * 4] = 16; // rows 16..24
            ppu.oam[i * 4 + 1] = 0;
            ppu.oam[i * 4 + 2] = 0;
            ppu.oam[i * 4 + 3] = (i * 8) as u8;
        }
        ppu.scanline = 20;
        (ppu, mapper)
    }

    #[test]
    fn eight_sprites_fit_without_overflow() {
        let (mut ppu, mapper) = setup(8);
        ppu.evaluate_sprites(&mapper);
        assert_eq!(ppu.sprites.count, 8);
        assert!(!ppu.sprite_overflow());
    }

    #[test]
    fn ninth_sprite_sets_overflow() {
        let (mut ppu, mapper) = setup(9);
        ppu.evaluate_sprites(&mapper);
        assert_eq!(ppu.sprites.count, 8);
        assert!(ppu.sprite_overflow());
        assert_eq!(ppu.sprites.indexes[7], 7, "slots keep OAM order");
    }

    #[test]
    fn sprites_off_the_line_are_skipped() {
        let (mut ppu, mapper) = setup(3);
        ppu.scanline = 24;
        ppu.evaluate_sprites(&mapper);
        assert_eq!(ppu.sprites.count, 0);
    }

    #[test]
    fn horizontal_flip_reverses_pixels() {
        let mut mapper = chr_ram_mapper(Mirroring::Horizontal);
        mapper.ppu_write(0x0000, 0x80); // leftmost pixel only
        let mut ppu = Ppu::new();
        ppu.oam[1] = 0;
        ppu.oam[2] = 0x01; // palette 1
        assert_eq!(ppu.fetch_sprite_pattern(&mapper, 0, 0), 0x5444_4444);
        ppu.oam[2] = 0x41;
        assert_eq!(ppu.fetch_sprite_pattern(&mapper, 0, 0), 0x4444_4445);
    }

    #[test]
    fn vertical_flip_reads_bottom_row() {
        let mut mapper = chr_ram_mapper(Mirroring::Horizontal);
        mapper.ppu_write(0x0007, 0xFF); // row 7 low plane
        let mut ppu = Ppu::new();
        ppu.oam[2] = 0x80;
        assert_eq!(ppu.fetch_sprite_pattern(&mapper, 0, 0), 0x1111_1111);
    }

    #[test]
    fn tall_sprites_use_tile_pair_and_table_bit() {
        let mut mapper = chr_ram_mapper(Mirroring::Horizontal);
        // tile 3 in the $1000 table, bottom half is tile 3 (odd of the pair 2/3)
        mapper.ppu_write(0x1000 + 3 * 16 + 1, 0xFF);
        let mut ppu = Ppu::new();
        ppu.ctrl = super::super::CTRL_SPRITE_16;
        ppu.oam[1] = 0x03;
        assert_eq!(ppu.fetch_sprite_pattern(&mapper, 0, 9), 0x1111_1111);
        assert_eq!(ppu.fetch_sprite_pattern(&mapper, 0, 1), 0, "top half is tile 2");
    }
}
