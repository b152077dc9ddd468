/*!
PPU (2C02) model, dot by dot.

- CPU-visible registers ($2000-$2007) with the v/t/x/w scroll latches
- 341 dots x 262 scanlines per frame, odd-frame dot skip while rendering
- Background shift pipeline fetched one tile ahead of display
- Per-scanline sprite evaluation (8 slots, sticky overflow flag)
- Pixel compositor with sprite-zero hit into a back buffer, swapped to the
  front at the start of vblank
- NMI edge latch with a short delay; the clock collects raised NMIs via
  `take_nmi`

STRUCTURE:
- `registers`: CPU register reads/writes and `write_oam_dma`.
- `fetch`: background fetch cycle and scroll register increments/copies.
- `sprite`: active sprite slots and sprite pixel lookup.
- `oam_eval`: sprite evaluation and sprite pattern fetch.
- `renderer`: `tick`, `step` and the pixel compositor.

The PPU owns nametable and palette RAM (`PpuAddressSpace`); pattern table
access goes through the `&dyn Mapper` passed into each call.
*/

use crate::bus::PpuAddressSpace;

pub(crate) mod fetch;
pub(crate) mod oam_eval;
pub(crate) mod registers;
pub(crate) mod renderer;
pub(crate) mod sprite;

use fetch::BackgroundPipeline;
use sprite::SpriteLine;

/// Screen width in pixels.
pub const NES_WIDTH: usize = 256;
/// Screen height in pixels.
pub const NES_HEIGHT: usize = 240;
/// RGBA bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;
/// Framebuffer length in bytes.
pub const FRAME_BYTES: usize = NES_WIDTH * NES_HEIGHT * BYTES_PER_PIXEL;

/// Dots per scanline.
pub const DOTS_PER_SCANLINE: u32 = 341;
/// Scanlines per frame, including vblank and the pre-render line.
pub const SCANLINES_PER_FRAME: u32 = 262;

/// NES master palette (RGB; alpha is always 0xFF when rendered).
#[rustfmt::skip]
pub const NES_PALETTE: [[u8; 3]; 64] = [
    [0x75, 0x75, 0x75], [0x27, 0x1B, 0x8F], [0x00, 0x00, 0xAB], [0x47, 0x00, 0x9F],
    [0x8F, 0x00, 0x77], [0xAB, 0x00, 0x13], [0xA7, 0x00, 0x00], [0x7F, 0x0B, 0x00],
    [0x43, 0x2F, 0x00], [0x00, 0x47, 0x00], [0x00, 0x51, 0x00], [0x00, 0x3F, 0x17],
    [0x1B, 0x3F, 0x5F], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
    [0xBC, 0xBC, 0xBC], [0x00, 0x73, 0xEF], [0x23, 0x3B, 0xEF], [0x83, 0x00, 0xF3],
    [0xBF, 0x00, 0xBF], [0xE7, 0x00, 0x5B], [0xDB, 0x2B, 0x00], [0xCB, 0x4F, 0x0F],
    [0x8B, 0x73, 0x00], [0x00, 0x97, 0x00], [0x00, 0xAB, 0x00], [0x00, 0x93, 0x3B],
    [0x00, 0x83, 0x8B], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF], [0x3F, 0xBF, 0xFF], [0x5F, 0x97, 0xFF], [0xA7, 0x8B, 0xFD],
    [0xF7, 0x7B, 0xFF], [0xFF, 0x77, 0xB7], [0xFF, 0x77, 0x63], [0xFF, 0x9B, 0x3B],
    [0xF3, 0xBF, 0x3F], [0x83, 0xD3, 0x13], [0x4F, 0xDF, 0x4B], [0x58, 0xF8, 0x98],
    [0x00, 0xEB, 0xDB], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF], [0xAB, 0xE7, 0xFF], [0xC7, 0xD7, 0xFF], [0xD7, 0xCB, 0xFF],
    [0xFF, 0xC7, 0xFF], [0xFF, 0xC7, 0xDB], [0xFF, 0xBF, 0xB3], [0xFF, 0xDB, 0xAB],
    [0xFF, 0xE7, 0xA3], [0xE3, 0xFF, 0xA3], [0xAB, 0xF3, 0xBF], [0xB3, 0xFF, 0xCF],
    [0x9F, 0xFF, 0xF3], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
];

// PPUCTRL
const CTRL_INCREMENT_32: u8 = 0x04;
const CTRL_SPRITE_TABLE: u8 = 0x08;
const CTRL_BACKGROUND_TABLE: u8 = 0x10;
const CTRL_SPRITE_16: u8 = 0x20;
const CTRL_NMI_ENABLE: u8 = 0x80;

// PPUMASK
const MASK_LEFT_BACKGROUND: u8 = 0x02;
const MASK_LEFT_SPRITES: u8 = 0x04;
const MASK_BACKGROUND: u8 = 0x08;
const MASK_SPRITES: u8 = 0x10;

/// Dots between an NMI edge and delivery.
const NMI_DELAY: u8 = 15;

/// Vblank/NMI latch. NMI is edge-triggered on `occurred && output`.
#[derive(Clone, Debug, Default)]
struct NmiLatch {
    occurred: bool,
    output: bool,
    previous: bool,
    delay: u8,
    pending: bool,
}

impl NmiLatch {
    /// Re-evaluate the NMI line; a rising edge arms the delay.
    fn change(&mut self) {
        let nmi = self.output && self.occurred;
        if nmi && !self.previous {
            self.delay = NMI_DELAY;
        }
        self.previous = nmi;
    }

    /// Count down the delay; raises `pending` if the line is still high when it expires.
    fn tick(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
            if self.delay == 0 && self.output && self.occurred {
                self.pending = true;
            }
        }
    }
}

pub struct Ppu {
    dot: u32,
    scanline: u32,
    frame: u64,

    vram: PpuAddressSpace,
    oam: [u8; 256],

    // scroll latches
    v: u16,
    t: u16,
    x: u8,
    w: bool,
    odd_frame: bool,

    /// Last value written to any register (low bits of PPUSTATUS reads).
    register: u8,
    ctrl: u8,
    mask: u8,
    oam_addr: u8,
    buffered_data: u8,
    sprite_zero_hit: bool,
    sprite_overflow: bool,
    nmi: NmiLatch,

    bg: BackgroundPipeline,
    sprites: SpriteLine,

    front: Vec<u8>,
    back: Vec<u8>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ppu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ppu")
            .field("dot", &self.dot)
            .field("scanline", &self.scanline)
            .field("frame", &self.frame)
            .field("v", &format_args!("{:04X}", self.v))
            .field("t", &format_args!("{:04X}", self.t))
            .field("ctrl", &format_args!("{:02X}", self.ctrl))
            .field("mask", &format_args!("{:02X}", self.mask))
            .finish_non_exhaustive()
    }
}

impl Ppu {
    /// Power-on PPU, already reset.
    pub fn new() -> Self {
        let mut ppu = Self {
            dot: 0,
            scanline: 0,
            frame: 0,
            vram: PpuAddressSpace::new(),
            oam: [0; 256],
            v: 0,
            t: 0,
            x: 0,
            w: false,
            odd_frame: false,
            register: 0,
            ctrl: 0,
            mask: 0,
            oam_addr: 0,
            buffered_data: 0,
            sprite_zero_hit: false,
            sprite_overflow: false,
            nmi: NmiLatch::default(),
            bg: BackgroundPipeline::default(),
            sprites: SpriteLine::default(),
            front: opaque_black(),
            back: opaque_black(),
        };
        ppu.reset();
        ppu
    }

    /// Park at dot 340 of scanline 240 and clear PPUCTRL/PPUMASK/OAMADDR.
    pub fn reset(&mut self) {
        self.dot = 340;
        self.scanline = 240;
        self.frame = 0;
        self.write_control(0);
        self.write_mask(0);
        self.oam_addr = 0;
    }

    #[inline]
    pub fn dot(&self) -> u32 {
        self.dot
    }

    #[inline]
    pub fn scanline(&self) -> u32 {
        self.scanline
    }

    /// Frames completed since power-on.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The last completed frame, 256x240 RGBA8.
    pub fn front_buffer(&self) -> &[u8] {
        &self.front
    }

    pub fn oam(&self) -> &[u8; 256] {
        &self.oam
    }

    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }

    /// Palette RAM entry (after backdrop aliasing).
    pub fn read_palette(&self, index: u16) -> u8 {
        self.vram.read_palette(index)
    }

    pub fn sprite_zero_hit(&self) -> bool {
        self.sprite_zero_hit
    }

    pub fn sprite_overflow(&self) -> bool {
        self.sprite_overflow
    }

    /// Inside vblank (PPUSTATUS bit 7, before any read clears it).
    pub fn in_vblank(&self) -> bool {
        self.nmi.occurred
    }

    /// Returns true once per delivered NMI.
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi.pending)
    }

    #[inline]
    fn rendering_enabled(&self) -> bool {
        self.mask & (MASK_BACKGROUND | MASK_SPRITES) != 0
    }

    #[inline]
    fn show_background(&self) -> bool {
        self.mask & MASK_BACKGROUND != 0
    }

    #[inline]
    fn show_sprites(&self) -> bool {
        self.mask & MASK_SPRITES != 0
    }
}

fn opaque_black() -> Vec<u8> {
    let mut buf = vec![0u8; FRAME_BYTES];
    for px in buf.chunks_exact_mut(BYTES_PER_PIXEL) {
        px[3] = 0xFF;
    }
    buf
}
