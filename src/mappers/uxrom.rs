/*!
UxROM (mapper 2).

- $8000-$BFFF: switchable 16 KiB PRG bank (`bank_lo`), selected by any write
  to $8000-$FFFF, taken modulo the bank count
- $C000-$FFFF: fixed to the last 16 KiB PRG bank
- $6000-$7FFF: 8 KiB SRAM
- PPU $0000-$1FFF: 8 KiB CHR, writable (CHR RAM boards)
*/

use log::warn;

use crate::cartridge::{Cartridge, PRG_BANK_SIZE};
use crate::error::{Error, Result};
use crate::mapper::Mapper;

#[derive(Clone, Debug)]
pub struct UxRom {
    cartridge: Cartridge,
    prg_banks: usize,
    bank_lo: usize,
    bank_hi: usize,
}

impl UxRom {
    pub fn new(cartridge: Cartridge) -> Result<Self> {
        let prg_banks = cartridge.prg().len() / PRG_BANK_SIZE;
        if prg_banks == 0 {
            return Err(Error::InvalidGeometry("PRG ROM smaller than one 16 KiB bank"));
        }
        Ok(Self {
            cartridge,
            prg_banks,
            bank_lo: 0,
            bank_hi: prg_banks - 1,
        })
    }

    /// Currently selected switchable bank.
    pub fn selected_bank(&self) -> usize {
        self.bank_lo
    }

    #[inline]
    fn prg_read(&self, bank: usize, offset: u16) -> u8 {
        self.cartridge.prg()[bank * PRG_BANK_SIZE + offset as usize]
    }
}

impl Mapper for UxRom {
    fn mapper_id(&self) -> u8 {
        self.cartridge.mapper_id()
    }

    fn cpu_read(&mut self, addr: u16) -> u8 {
        match addr {
            0xC000..=0xFFFF => self.prg_read(self.bank_hi, addr - 0xC000),
            0x8000..=0xBFFF => self.prg_read(self.bank_lo, addr - 0x8000),
            0x6000..=0x7FFF => self.cartridge.sram()[(addr - 0x6000) as usize],
            _ => {
                warn!("uxrom: unmapped cpu read at ${addr:04X}");
                0
            }
        }
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0xFFFF => self.bank_lo = value as usize % self.prg_banks,
            0x6000..=0x7FFF => self.cartridge.sram_mut()[(addr - 0x6000) as usize] = value,
            _ => warn!("uxrom: unmapped cpu write at ${addr:04X} = ${value:02X}"),
        }
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.cartridge.chr()[addr as usize],
            _ => {
                warn!("uxrom: unmapped ppu read at ${addr:04X}");
                0
            }
        }
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.cartridge.chr_mut()[addr as usize] = value,
            _ => warn!("uxrom: unmapped ppu write at ${addr:04X} = ${value:02X}"),
        }
    }

    fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    fn reset(&mut self) {
        self.bank_lo = 0;
    }
}
