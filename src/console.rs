/*!
Console: owns every component and drives them in lockstep.

Each `step` runs one CPU step through a `CpuMemory` view, then runs the
PPU and mapper for three dots per CPU cycle consumed. Time-driven callers use
`step_seconds`, which converts wall-clock seconds into a CPU cycle budget.
*/

use std::io::{Read, Write};
use std::path::Path;

use log::info;

use crate::bus::{CpuBus, CpuMemory, Ram, clock};
use crate::cartridge::Cartridge;
use crate::cpu::{CPU_FREQUENCY, Cpu};
use crate::error::{Error, Result};
use crate::mapper::{self, Mapper};
use crate::ppu::{NES_PALETTE, Ppu};

pub struct Console {
    cpu: Cpu,
    ppu: Ppu,
    mapper: Box<dyn Mapper>,
    ram: Ram,
}

impl Console {
    /// Build a console around `cartridge` and reset it.
    pub fn new(cartridge: Cartridge) -> Result<Self> {
        let mapper = mapper::create(cartridge)?;
        let mut console = Self {
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            mapper,
            ram: Ram::new(),
        };
        console.reset();
        Ok(console)
    }

    pub fn from_ines_bytes(data: &[u8]) -> Result<Self> {
        Self::new(Cartridge::from_ines_bytes(data)?)
    }

    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(Cartridge::from_ines_file(path)?)
    }

    /// Reset the CPU (vector, SP, status) and the mapper's bank registers.
    pub fn reset(&mut self) {
        self.mapper.reset();
        let Console {
            cpu,
            ppu,
            mapper,
            ram,
        } = self;
        cpu.reset(&mut CpuMemory::new(ram, ppu, mapper.as_mut()));
        info!(
            "console reset: mapper {} pc ${:04X}",
            self.mapper.mapper_id(),
            self.cpu.pc
        );
    }

    /// One CPU step plus the matching PPU dots. Returns CPU cycles consumed.
    pub fn step(&mut self) -> u32 {
        let Console {
            cpu,
            ppu,
            mapper,
            ram,
        } = self;
        let cycles = cpu.step(&mut CpuMemory::new(ram, ppu, mapper.as_mut()));
        clock::run_dots(cpu, ppu, mapper.as_mut(), cycles);
        cycles
    }

    /// Run for `seconds` of emulated time.
    pub fn step_seconds(&mut self, seconds: f64) {
        let mut budget = (seconds * CPU_FREQUENCY as f64) as i64;
        while budget > 0 {
            budget -= self.step() as i64;
        }
    }

    /// Run until the PPU starts a new frame. Returns CPU cycles consumed.
    pub fn step_frame(&mut self) -> u64 {
        let frame = self.ppu.frame();
        let mut cycles = 0u64;
        while self.ppu.frame() == frame {
            cycles += self.step() as u64;
        }
        cycles
    }

    /// The last completed frame, 256x240 RGBA8.
    pub fn buffer(&self) -> &[u8] {
        self.ppu.front_buffer()
    }

    /// RGB of palette entry 0 (the backdrop).
    pub fn background_color(&self) -> [u8; 3] {
        NES_PALETTE[(self.ppu.read_palette(0) % 64) as usize]
    }

    /// CPU-visible read, with the same side effects the CPU would cause.
    pub fn cpu_read(&mut self, addr: u16) -> u8 {
        CpuMemory::new(&mut self.ram, &mut self.ppu, self.mapper.as_mut()).read(addr)
    }

    /// CPU-visible write, with the same side effects the CPU would cause.
    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        CpuMemory::new(&mut self.ram, &mut self.ppu, self.mapper.as_mut()).write(addr, value);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    /// Not implemented.
    pub fn save_state<W: Write>(&self, _writer: W) -> Result<()> {
        Err(Error::SaveStateUnsupported)
    }

    /// Not implemented.
    pub fn load_state<R: Read>(&mut self, _reader: R) -> Result<()> {
        Err(Error::SaveStateUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::PRG_BANK_SIZE;
    use crate::test_utils::{build_program_rom, program_cartridge};

    fn console(program: &[u8]) -> Console {
        Console::new(program_cartridge(program, 2)).expect("console")
    }

    #[test]
    fn nop_cartridge_first_step() {
        let mut c = console(&[]);
        assert_eq!(c.cpu().pc, 0x8000);
        let flags = c.cpu().flags();
        assert_eq!(c.step(), 2);
        assert_eq!(c.cpu().pc, 0x8001);
        assert_eq!(c.cpu().cycles, 2);
        assert_eq!(c.cpu().flags(), flags);
    }

    #[test]
    fn ppu_runs_three_dots_per_cycle() {
        let mut c = console(&[]);
        let before = c.ppu().scanline() * 341 + c.ppu().dot();
        let cycles = c.step();
        let after = c.ppu().scanline() * 341 + c.ppu().dot();
        // reset parks at 240:340, so no frame wrap in the first step
        assert_eq!(after - before, cycles * 3);
    }

    #[test]
    fn unsupported_mapper_fails_bring_up() {
        let cart = Cartridge::new(
            vec![0; PRG_BANK_SIZE],
            Vec::new(),
            1,
            crate::cartridge::Mirroring::Horizontal,
            false,
        );
        assert!(matches!(Console::new(cart), Err(Error::UnsupportedMapper(1))));
    }

    #[test]
    fn saved_sram_is_visible_at_6000() {
        let mut saved = vec![0u8; 0x2000];
        saved[0] = 0x5A;
        saved[0x1FFF] = 0xA5;
        let cart = program_cartridge(&[], 2).with_sram(saved);
        let mut c = Console::new(cart).expect("console");
        assert_eq!(c.cpu_read(0x6000), 0x5A);
        assert_eq!(c.cpu_read(0x7FFF), 0xA5);
    }

    #[test]
    fn from_ines_bytes_boots_at_reset_vector() {
        let rom = build_program_rom(&[], 0, (0x8123, 0x8000, 0x8000));
        let c = Console::from_ines_bytes(&rom).expect("console");
        assert_eq!(c.cpu().pc, 0x8123);
        assert_eq!(c.mapper().mapper_id(), 0);
    }

    #[test]
    fn oam_dma_stall_even_cycle() {
        // LDA #$02; STA $4014  (2 + 4 = 6 cycles, even)
        let mut c = console(&[0xA9, 0x02, 0x8D, 0x14, 0x40]);
        c.step();
        c.step();
        assert_eq!(c.cpu().cycles, 6);
        assert_eq!(c.cpu().stall, 513);
        for _ in 0..513 {
            assert_eq!(c.step(), 1);
        }
        assert_eq!(c.cpu().pc, 0x8005);
        c.step();
        assert_eq!(c.cpu().pc, 0x8006, "fetching resumes after the stall");
    }

    #[test]
    fn oam_dma_stall_odd_cycle() {
        // LDA #$02; LDA $00; STA $4014  (2 + 3 + 4 = 9 cycles, odd)
        let mut c = console(&[0xA9, 0x02, 0xA5, 0x00, 0x8D, 0x14, 0x40]);
        for _ in 0..3 {
            c.step();
        }
        assert_eq!(c.cpu().cycles, 9);
        assert_eq!(c.cpu().stall, 514);
    }

    #[test]
    fn oam_dma_copies_page_with_oamaddr_offset() {
        let mut c = console(&[]);
        for i in 0..256u16 {
            c.cpu_write(0x0300 + i, i as u8);
        }
        c.cpu_write(0x2003, 0x10);
        c.cpu_write(0x4014, 0x03);
        let oam = c.ppu().oam();
        for i in 0..256usize {
            assert_eq!(oam[(0x10 + i) % 256], i as u8);
        }
    }

    #[test]
    fn step_seconds_runs_the_cycle_budget() {
        let mut c = console(&[]);
        c.step_seconds(0.001);
        let budget = (0.001 * CPU_FREQUENCY as f64) as u64;
        assert!(c.cpu().cycles >= budget);
        assert!(c.cpu().cycles < budget + 2, "overshoot is at most one NOP");
    }

    #[test]
    fn step_seconds_zero_does_nothing() {
        let mut c = console(&[]);
        c.step_seconds(0.0);
        assert_eq!(c.cpu().cycles, 0);
    }

    #[test]
    fn step_frame_advances_one_frame() {
        let mut c = console(&[]);
        c.step_frame();
        assert_eq!(c.ppu().frame(), 1);
        let cycles = c.step_frame();
        assert_eq!(c.ppu().frame(), 2);
        // 89342 dots / 3 = 29780.67 CPU cycles, overshoot bounded by one instruction
        assert!((29_780..=29_783).contains(&cycles), "got {cycles}");
    }

    #[test]
    fn vblank_nmi_is_serviced() {
        // Main loop: LDA #$80; STA $2000; JMP $8005 (spin).
        // NMI handler at $8010: INC $00; RTI
        let mut program = vec![0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80];
        program.resize(0x10, 0xEA);
        program.extend_from_slice(&[0xE6, 0x00, 0x40]);
        let rom = build_program_rom(&program, 2, (0x8000, 0x8010, 0x8000));
        let mut c = Console::from_ines_bytes(&rom).expect("console");

        c.step_frame();
        c.step_frame();
        assert!(c.cpu_read(0x0000) >= 1, "handler ran at least once");
    }

    #[test]
    fn background_color_reads_palette_zero() {
        let mut c = console(&[]);
        c.cpu_write(0x2006, 0x3F);
        c.cpu_write(0x2006, 0x00);
        c.cpu_write(0x2007, 0x21);
        assert_eq!(c.background_color(), NES_PALETTE[0x21]);
    }

    #[test]
    fn save_state_is_unsupported() {
        let mut c = console(&[]);
        assert!(matches!(c.save_state(Vec::new()), Err(Error::SaveStateUnsupported)));
        assert!(matches!(
            c.load_state(std::io::empty()),
            Err(Error::SaveStateUnsupported)
        ));
    }

    #[test]
    fn reset_reloads_vector_and_keeps_cycles() {
        let mut c = console(&[]);
        c.step();
        c.step();
        c.reset();
        assert_eq!(c.cpu().pc, 0x8000);
        assert_eq!(c.cpu().sp, 0xFD);
        assert_eq!(c.cpu().cycles, 4);
    }
}
