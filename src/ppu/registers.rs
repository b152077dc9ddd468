#![doc = r#"
PPU registers module

Purpose
- CPU-visible register semantics for $2000-$2007 (the CPU bus has already
  folded mirrors onto this window) plus the OAM DMA sink.

Notes
- Every write, to any register, lands in the `register` latch; its low 5 bits
  come back in PPUSTATUS reads.
- Write-only registers read as 0.
- PPUSCROLL and PPUADDR share the `w` toggle, which a PPUSTATUS read clears.
- PPUDATA reads below $3F00 return the previous buffered value; palette reads
  return immediately and refill the buffer from the nametable underneath.
"#]

use super::{CTRL_INCREMENT_32, CTRL_NMI_ENABLE, Ppu};
use crate::bus::dma::DMA_TRANSFER_LEN;
use crate::mapper::Mapper;

pub const PPUCTRL: u16 = 0x2000;
pub const PPUMASK: u16 = 0x2001;
pub const PPUSTATUS: u16 = 0x2002;
pub const OAMADDR: u16 = 0x2003;
pub const OAMDATA: u16 = 0x2004;
pub const PPUSCROLL: u16 = 0x2005;
pub const PPUADDR: u16 = 0x2006;
pub const PPUDATA: u16 = 0x2007;

impl Ppu {
    /// CPU read of a PPU register ($2000-$2007).
    pub fn read_register(&mut self, addr: u16, mapper: &dyn Mapper) -> u8 {
        match addr {
            PPUSTATUS => self.read_status(),
            OAMDATA => self.oam[self.oam_addr as usize],
            PPUDATA => self.read_data(mapper),
            _ => 0,
        }
    }

    /// CPU write of a PPU register ($2000-$2007).
    pub fn write_register(&mut self, addr: u16, value: u8, mapper: &mut dyn Mapper) {
        self.register = value;
        match addr {
            PPUCTRL => self.write_control(value),
            PPUMASK => self.write_mask(value),
            OAMADDR => self.oam_addr = value,
            OAMDATA => {
                self.oam[self.oam_addr as usize] = value;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            PPUSCROLL => self.write_scroll(value),
            PPUADDR => self.write_address(value),
            PPUDATA => self.write_data(value, mapper),
            _ => {}
        }
    }

    /// Store a DMA page into OAM starting at OAMADDR, wrapping.
    pub(crate) fn write_oam_dma(&mut self, page: u8, data: &[u8; DMA_TRANSFER_LEN]) {
        self.register = page;
        for &byte in data {
            self.oam[self.oam_addr as usize] = byte;
            self.oam_addr = self.oam_addr.wrapping_add(1);
        }
    }

    pub(super) fn write_control(&mut self, value: u8) {
        self.ctrl = value;
        self.nmi.output = value & CTRL_NMI_ENABLE != 0;
        self.nmi.change();
        // t: ...GH.. ........ <- d: ......GH
        self.t = (self.t & 0xF3FF) | ((value as u16 & 0x03) << 10);
    }

    pub(super) fn write_mask(&mut self, value: u8) {
        self.mask = value;
    }

    fn read_status(&mut self) -> u8 {
        let mut result = self.register & 0x1F;
        result |= (self.sprite_overflow as u8) << 5;
        result |= (self.sprite_zero_hit as u8) << 6;
        result |= (self.nmi.occurred as u8) << 7;
        self.nmi.occurred = false;
        self.nmi.change();
        self.w = false;
        result
    }

    fn write_scroll(&mut self, value: u8) {
        if !self.w {
            // t: ........ ...HGFED <- d: HGFED...
            // x:               CBA <- d: .....CBA
            self.t = (self.t & 0xFFE0) | (value as u16 >> 3);
            self.x = value & 0x07;
            self.w = true;
        } else {
            // t: .CBA..HG FED..... <- d: HGFEDCBA
            self.t = (self.t & 0x8FFF) | ((value as u16 & 0x07) << 12);
            self.t = (self.t & 0xFC1F) | ((value as u16 & 0xF8) << 2);
            self.w = false;
        }
    }

    fn write_address(&mut self, value: u8) {
        if !self.w {
            // t: ..FEDCBA ........ <- d: ..FEDCBA, bit 14 cleared
            self.t = (self.t & 0x80FF) | ((value as u16 & 0x3F) << 8);
            self.w = true;
        } else {
            self.t = (self.t & 0xFF00) | value as u16;
            self.v = self.t;
            self.w = false;
        }
    }

    fn read_data(&mut self, mapper: &dyn Mapper) -> u8 {
        let mut value = self.vram.read(mapper, self.v);
        if self.v % 0x4000 < 0x3F00 {
            std::mem::swap(&mut self.buffered_data, &mut value);
        } else {
            self.buffered_data = self.vram.read(mapper, self.v.wrapping_sub(0x1000));
        }
        self.increment_address();
        value
    }

    fn write_data(&mut self, value: u8, mapper: &mut dyn Mapper) {
        self.vram.write(mapper, self.v, value);
        self.increment_address();
    }

    fn increment_address(&mut self) {
        let step = if self.ctrl & CTRL_INCREMENT_32 != 0 { 32 } else { 1 };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }
}
