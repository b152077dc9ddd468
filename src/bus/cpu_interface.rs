/*!
CPU memory map.

`CpuMemory` is a short-lived view over the console's RAM, PPU and mapper
that implements `CpuBus`. The console builds one per CPU step, so the CPU
never holds references into the rest of the machine.

CPU address map:
- $0000-$1FFF: 2 KiB internal RAM (mirrored every $0800)
- $2000-$3FFF: PPU registers (mirrored every 8 bytes)
- $4014: OAM DMA (write starts a transfer, read returns 0)
- $4000-$5FFF: APU/IO; reads return 0 and writes are ignored
- $6000-$FFFF: mapper (SRAM, PRG ROM, bank registers)
*/

use log::{debug, trace};

use crate::bus::dma;
use crate::bus::interfaces::CpuBus;
use crate::bus::ram::Ram;
use crate::mapper::Mapper;
use crate::ppu::Ppu;

/// Address of the OAM DMA register.
pub const OAM_DMA: u16 = 0x4014;

pub struct CpuMemory<'a> {
    ram: &'a mut Ram,
    ppu: &'a mut Ppu,
    mapper: &'a mut dyn Mapper,
    oam_dma: bool,
}

impl<'a> CpuMemory<'a> {
    pub fn new(ram: &'a mut Ram, ppu: &'a mut Ppu, mapper: &'a mut dyn Mapper) -> Self {
        Self {
            ram,
            ppu,
            mapper,
            oam_dma: false,
        }
    }

    /// Fold a $2000-$3FFF address onto the eight PPU registers.
    #[inline]
    fn ppu_register(addr: u16) -> u16 {
        0x2000 + addr % 8
    }
}

impl CpuBus for CpuMemory<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => self
                .ppu
                .read_register(Self::ppu_register(addr), &*self.mapper),
            0x4000..=0x5FFF => 0,
            _ => self.mapper.cpu_read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, value),
            0x2000..=0x3FFF => {
                self.ppu
                    .write_register(Self::ppu_register(addr), value, &mut *self.mapper)
            }
            OAM_DMA => {
                let page = dma::read_page(self, value);
                self.ppu.write_oam_dma(value, &page);
                self.oam_dma = true;
                debug!("oam dma from page ${value:02X}");
            }
            0x4000..=0x5FFF => trace!("ignored io write ${addr:04X} = ${value:02X}"),
            _ => self.mapper.cpu_write(addr, value),
        }
    }

    fn take_oam_dma(&mut self) -> bool {
        std::mem::take(&mut self.oam_dma)
    }
}
