#![doc = r#"
PPU renderer module

Responsibilities
- Dot/scanline/frame counters (`tick`) including the odd-frame skip.
- Per-dot orchestration (`step`): pixel output, background fetch, scroll
  updates, sprite evaluation, vblank start/end.
- Pixel compositor (`render_pixel`).

Timing (NTSC)
- Scanlines 0-239 visible, 240 post-render, 241-260 vblank, 261 pre-render.
- Dots 0-340. On odd frames with rendering enabled, dot 340 of the
  pre-render line is skipped.
- Vblank (and the NMI edge) starts at scanline 241 dot 1; the flag, sprite
  zero hit and overflow clear at scanline 261 dot 1.
"#]

use super::{BYTES_PER_PIXEL, MASK_LEFT_BACKGROUND, MASK_LEFT_SPRITES, NES_PALETTE, NES_WIDTH, Ppu};
use crate::mapper::Mapper;

const PRE_RENDER_LINE: u32 = 261;
const VBLANK_LINE: u32 = 241;

impl Ppu {
    /// Advance one dot.
    pub fn step(&mut self, mapper: &dyn Mapper) {
        self.tick();

        let rendering = self.rendering_enabled();
        let pre_line = self.scanline == PRE_RENDER_LINE;
        let visible_line = self.scanline < 240;
        let render_line = pre_line || visible_line;
        let pre_fetch_cycle = (321..=336).contains(&self.dot);
        let visible_cycle = (1..=256).contains(&self.dot);
        let fetch_cycle = pre_fetch_cycle || visible_cycle;

        if rendering {
            if visible_line && visible_cycle {
                self.render_pixel();
            }
            if render_line && fetch_cycle {
                self.bg.tile_data <<= 4;
                match self.dot % 8 {
                    1 => self.fetch_nametable_byte(mapper),
                    3 => self.fetch_attribute_byte(mapper),
                    5 => self.fetch_low_tile_byte(mapper),
                    7 => self.fetch_high_tile_byte(mapper),
                    0 => self.store_tile_data(),
                    _ => {}
                }
            }
            if pre_line && (280..=304).contains(&self.dot) {
                self.copy_y();
            }
            if render_line {
                if fetch_cycle && self.dot % 8 == 0 {
                    self.increment_x();
                }
                if self.dot == 256 {
                    self.increment_y();
                }
                if self.dot == 257 {
                    self.copy_x();
                }
            }
            if self.dot == 257 {
                if visible_line {
                    self.evaluate_sprites(mapper);
                } else {
                    self.sprites.count = 0;
                }
            }
        }

        if self.scanline == VBLANK_LINE && self.dot == 1 {
            self.set_vertical_blank();
        }
        if pre_line && self.dot == 1 {
            self.clear_vertical_blank();
            self.sprite_zero_hit = false;
            self.sprite_overflow = false;
        }
    }

    /// Advance the dot/scanline/frame counters by one dot.
    fn tick(&mut self) {
        self.nmi.tick();

        if self.rendering_enabled()
            && self.odd_frame
            && self.scanline == PRE_RENDER_LINE
            && self.dot == 339
        {
            self.dot = 0;
            self.scanline = 0;
            self.frame += 1;
            self.odd_frame = !self.odd_frame;
            return;
        }

        self.dot += 1;
        if self.dot > 340 {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline > PRE_RENDER_LINE {
                self.scanline = 0;
                self.frame += 1;
                self.odd_frame = !self.odd_frame;
            }
        }
    }

    fn set_vertical_blank(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.nmi.occurred = true;
        self.nmi.change();
    }

    fn clear_vertical_blank(&mut self) {
        self.nmi.occurred = false;
        self.nmi.change();
    }

    fn render_pixel(&mut self) {
        let x = self.dot - 1;
        let y = self.scanline;

        let mut background = self.background_pixel();
        let (slot, mut sprite) = if self.show_sprites() {
            self.sprites.pixel(x).unwrap_or((0, 0))
        } else {
            (0, 0)
        };
        if x < 8 && self.mask & MASK_LEFT_BACKGROUND == 0 {
            background = 0;
        }
        if x < 8 && self.mask & MASK_LEFT_SPRITES == 0 {
            sprite = 0;
        }

        let bg_opaque = background % 4 != 0;
        let sprite_opaque = sprite % 4 != 0;
        let color = match (bg_opaque, sprite_opaque) {
            (false, false) => 0,
            (false, true) => sprite | 0x10,
            (true, false) => background,
            (true, true) => {
                if self.sprites.indexes[slot] == 0 && x < 255 {
                    self.sprite_zero_hit = true;
                }
                if self.sprites.priorities[slot] == 0 {
                    sprite | 0x10
                } else {
                    background
                }
            }
        };

        let index = self.vram.read_palette(color as u16) % 64;
        let [r, g, b] = NES_PALETTE[index as usize];
        let offset = (y as usize * NES_WIDTH + x as usize) * BYTES_PER_PIXEL;
        self.back[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&[r, g, b, 0xFF]);
    }
}
