//! Shared test utilities: iNES image builders, cartridge/mapper fixtures and
//! a flat 64 KiB bus for driving the CPU without a console.
//!
//! Notes on iNES header fields used here:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units (0 => CHR RAM)
//! - byte 6 = Flags 6 (mirroring, battery, trainer, four-screen, mapper low nibble)
//! - byte 7 = Flags 7 (mapper high nibble)
//! - bytes 8..15 = padding
//!
//! Vectors live at the end of the last PRG bank:
//! - 16 KiB PRG: offsets 0x3FFA..=0x3FFF
//! - 32 KiB PRG: offsets 0x7FFA..=0x7FFF

#![allow(dead_code)]

use crate::bus::CpuBus;
use crate::cartridge::{Cartridge, Mirroring, PRG_BANK_SIZE};
use crate::cpu::Cpu;
use crate::mappers::UxRom;

/// Opcode used to fill PRG in program builders.
pub const NOP: u8 = 0xEA;

/// Build a minimal iNES (v1) image. PRG is filled with 0xAA, CHR with 0xCC.
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map(|_| 512).unwrap_or(0) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.extend_from_slice(&[0u8; 8]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.extend(std::iter::repeat_n(0xAA, prg_16k * 16 * 1024));
    bytes.extend(std::iter::repeat_n(0xCC, chr_8k * 8 * 1024));
    bytes
}

/// iNES image with one 16 KiB PRG bank holding `prg` at $8000 (rest NOP),
/// CHR RAM, and the given `(reset, nmi, irq)` vectors.
pub fn build_program_rom(prg: &[u8], mapper_id: u8, vectors: (u16, u16, u16)) -> Vec<u8> {
    assert!(prg.len() <= PRG_BANK_SIZE - 6, "program must leave room for vectors");
    let mut rom = build_ines(1, 0, mapper_id << 4, mapper_id & 0xF0, None);
    let bank = &mut rom[16..16 + PRG_BANK_SIZE];
    bank.fill(NOP);
    bank[..prg.len()].copy_from_slice(prg);
    let (reset, nmi, irq) = vectors;
    set_vectors_in_prg(bank, reset, nmi, irq);
    rom
}

/// Cartridge for mapper `mapper_id` with `prg` at $8000 and all vectors at $8000.
pub fn program_cartridge(prg: &[u8], mapper_id: u8) -> Cartridge {
    let mut bank = vec![NOP; PRG_BANK_SIZE];
    bank[..prg.len()].copy_from_slice(prg);
    set_vectors_in_prg(&mut bank, 0x8000, 0x8000, 0x8000);
    Cartridge::new(bank, Vec::new(), mapper_id, Mirroring::Horizontal, false)
}

/// UxROM board with one NOP-filled PRG bank and 8 KiB CHR RAM.
pub fn chr_ram_mapper(mirroring: Mirroring) -> UxRom {
    let cart = Cartridge::new(vec![NOP; PRG_BANK_SIZE], Vec::new(), 2, mirroring, false);
    match UxRom::new(cart) {
        Ok(m) => m,
        Err(e) => panic!("test mapper: {e}"),
    }
}

/// Write CPU vectors (NMI, RESET, IRQ/BRK) at the end of a 16 or 32 KiB PRG slice.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        16384 => 0x3FFA,
        32768 => 0x7FFA,
        other => panic!("unsupported PRG length for vectors: {other} bytes"),
    };
    write_le_u16(prg, base, nmi);
    write_le_u16(prg, base + 2, reset);
    write_le_u16(prg, base + 4, irq);
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = value as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

/// Flat 64 KiB RAM implementing `CpuBus`.
pub struct TestBus {
    mem: Vec<u8>,
    dma_register: Option<u16>,
    dma_requested: bool,
}

impl Default for TestBus {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBus {
    pub fn new() -> Self {
        Self {
            mem: vec![0; 0x10000],
            dma_register: None,
            dma_requested: false,
        }
    }

    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let start = addr as usize;
        self.mem[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn poke(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    pub fn peek(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    pub fn set_vectors(&mut self, nmi: u16, reset: u16, irq: u16) {
        self.load(0xFFFA, &nmi.to_le_bytes());
        self.load(0xFFFC, &reset.to_le_bytes());
        self.load(0xFFFE, &irq.to_le_bytes());
    }

    /// Report an OAM DMA whenever `addr` is written.
    pub fn report_dma_on(&mut self, addr: u16) {
        self.dma_register = Some(addr);
    }
}

impl CpuBus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        if self.dma_register == Some(addr) {
            self.dma_requested = true;
        }
        self.mem[addr as usize] = value;
    }

    fn take_oam_dma(&mut self) -> bool {
        std::mem::take(&mut self.dma_requested)
    }
}

/// Load `program` at $8000, reset the CPU, let `setup` poke state, then run `steps` steps.
pub fn run_program(
    program: &[u8],
    steps: usize,
    setup: impl FnOnce(&mut Cpu, &mut TestBus),
) -> (Cpu, TestBus) {
    let mut bus = TestBus::new();
    bus.load(0x8000, program);
    bus.set_vectors(0x8000, 0x8000, 0x8000);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    setup(&mut cpu, &mut bus);
    for _ in 0..steps {
        cpu.step(&mut bus);
    }
    (cpu, bus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn writes_vectors_for_16k_prg() {
        let mut prg = vec![0u8; 16 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(prg[0x3FFA], 0x56);
        assert_eq!(prg[0x3FFB], 0x84);
        assert_eq!(prg[0x3FFC], 0x23);
        assert_eq!(prg[0x3FFD], 0x81);
        assert_eq!(prg[0x3FFE], 0xBC);
        assert_eq!(prg[0x3FFF], 0x8A);
    }

    #[test]
    fn program_rom_parses_back() {
        let rom = build_program_rom(&[0xA9, 0x01], 2, (0x8000, 0x9000, 0xA000));
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert_eq!(cart.mapper_id(), 2);
        assert_eq!(cart.prg()[0], 0xA9);
        assert_eq!(cart.prg()[2], NOP);
        assert_eq!(cart.prg()[0x3FFC], 0x00);
        assert_eq!(cart.prg()[0x3FFD], 0x80);
    }
}
