/*!
core - The 6502 step loop

One call to `Cpu::step` executes exactly one of:
1. a single DMA stall cycle (no fetch),
2. interrupt entry (7 cycles) followed by the first instruction of the handler,
3. one instruction.

Cycle accounting
================
- Base cycles come from `CYCLES[opcode]`.
- `PAGE_CYCLES[opcode]` is added when the effective address crossed a page.
- Taken branches add one cycle, plus one more when the target is on a
  different page than the next instruction.
- A write to $4014 during the instruction adds a 513/514 cycle stall,
  decided by the parity of the cycle counter after the instruction.
*/

use log::{Level, log_enabled, trace};

use crate::bus::{CpuBus, dma};
use crate::cpu::addressing;
use crate::cpu::dispatch::{self, Step};
use crate::cpu::execute::enter_interrupt;
use crate::cpu::state::{Cpu, Interrupt, RESET_SP, RESET_STATUS};
use crate::cpu::table::{CYCLES, MNEMONICS, MODES, PAGE_CYCLES, SIZES};

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles spent entering an interrupt handler.
const INTERRUPT_CYCLES: u64 = 7;

impl Cpu {
    /// Load PC from the reset vector and restore SP and status.
    ///
    /// The cycle counter is left alone.
    pub fn reset<B: CpuBus + ?Sized>(&mut self, bus: &mut B) {
        self.pc = bus.read_word(RESET_VECTOR);
        self.sp = RESET_SP;
        self.set_flags(RESET_STATUS);
        self.interrupt = Interrupt::None;
        self.stall = 0;
    }

    /// Execute one step and return the CPU cycles it took.
    pub fn step<B: CpuBus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        if self.stall > 0 {
            self.stall -= 1;
            return 1;
        }

        let start = self.cycles;

        match std::mem::take(&mut self.interrupt) {
            Interrupt::Nmi => {
                enter_interrupt(self, bus, NMI_VECTOR);
                self.cycles += INTERRUPT_CYCLES;
            }
            Interrupt::Irq => {
                enter_interrupt(self, bus, IRQ_VECTOR);
                self.cycles += INTERRUPT_CYCLES;
            }
            Interrupt::None => {}
        }

        let opcode = bus.read(self.pc) as usize;
        let mode = MODES[opcode];
        let operand = addressing::resolve(self, bus, mode);

        let step = Step {
            address: operand.address,
            pc: self.pc.wrapping_add(SIZES[opcode] as u16),
            mode,
        };
        if log_enabled!(Level::Trace) {
            self.trace(opcode as u8, &step);
        }

        self.pc = step.pc;
        self.cycles += CYCLES[opcode] as u64;
        if operand.page_crossed {
            self.cycles += PAGE_CYCLES[opcode] as u64;
        }

        dispatch::execute(MNEMONICS[opcode], self, bus, &step);

        if bus.take_oam_dma() {
            self.stall += dma::stall_cycles(self.cycles);
        }

        (self.cycles - start) as u32
    }

    fn trace(&self, opcode: u8, step: &Step) {
        trace!(
            "{:04X}  {:02X}  {} {:?} ${:04X}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc,
            opcode,
            MNEMONICS[opcode as usize].name(),
            step.mode,
            step.address,
            self.a,
            self.x,
            self.y,
            self.flags(),
            self.sp,
            self.cycles
        );
    }
}
