/*!
Clock: advances the PPU and mapper in lockstep with the CPU.

The PPU runs three dots per CPU cycle. After each dot the mapper gets its
per-dot hook, and any NMI the PPU raised or IRQ the mapper asserts is
forwarded to the CPU, to be serviced at the start of its next step.
*/

use log::debug;

use crate::cpu::Cpu;
use crate::mapper::Mapper;
use crate::ppu::Ppu;

/// PPU dots per CPU cycle (NTSC).
pub const PPU_DOTS_PER_CPU_CYCLE: u32 = 3;

/// Run `cpu_cycles * 3` PPU dots, forwarding interrupts to `cpu`.
pub fn run_dots(cpu: &mut Cpu, ppu: &mut Ppu, mapper: &mut dyn Mapper, cpu_cycles: u32) {
    for _ in 0..cpu_cycles * PPU_DOTS_PER_CPU_CYCLE {
        ppu.step(&*mapper);
        mapper.step();
        if ppu.take_nmi() {
            debug!("nmi at scanline {} dot {}", ppu.scanline(), ppu.dot());
            cpu.trigger_nmi();
        }
        if mapper.irq_pending() {
            cpu.trigger_irq();
        }
    }
}
