//! JMP / JSR / RTS / RTI / BRK.

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::core::IRQ_VECTOR;
use crate::cpu::dispatch::Step;
use crate::cpu::execute::{enter_interrupt, pull_status, pull_word, push_word};

pub(crate) fn jmp(cpu: &mut Cpu, step: &Step) {
    cpu.pc = step.address;
}

/// Pushes the address of the last byte of the JSR itself.
pub(crate) fn jsr<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let ret = cpu.pc.wrapping_sub(1);
    push_word(cpu, bus, ret);
    cpu.pc = step.address;
}

pub(crate) fn rts<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    cpu.pc = pull_word(cpu, bus).wrapping_add(1);
}

pub(crate) fn rti<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    pull_status(cpu, bus);
    cpu.pc = pull_word(cpu, bus);
}

/// Software interrupt through the IRQ vector. Ignores the I flag.
pub(crate) fn brk<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    enter_interrupt(cpu, bus, IRQ_VECTOR);
}

#[cfg(test)]
mod tests {
    use crate::test_utils::run_program;

    #[test]
    fn jmp_absolute() {
        let (cpu, _) = run_program(&[0x4C, 0x34, 0x12], 1, |_, _| {});
        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn jmp_indirect_uses_page_wrap() {
        // JMP ($10FF)
        let (cpu, _) = run_program(&[0x6C, 0xFF, 0x10], 1, |_, bus| {
            bus.poke(0x10FF, 0x00);
            bus.poke(0x1000, 0x90);
            bus.poke(0x1100, 0x70);
        });
        assert_eq!(cpu.pc, 0x9000);
    }
}
