//! CMP / CPX / CPY and BIT.

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::dispatch::Step;
use crate::cpu::execute::compare;
use crate::cpu::state::{NEGATIVE, OVERFLOW, ZERO};

pub(crate) fn cmp<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    let a = cpu.a;
    compare(cpu, a, value);
}

pub(crate) fn cpx<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    let x = cpu.x;
    compare(cpu, x, value);
}

pub(crate) fn cpy<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    let y = cpu.y;
    compare(cpu, y, value);
}

/// V and N from bits 6/7 of memory, Z from `A & M`.
pub(crate) fn bit<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    cpu.set_flag(OVERFLOW, value & 0x40 != 0);
    cpu.set_flag(ZERO, value & cpu.a == 0);
    cpu.set_flag(NEGATIVE, value & 0x80 != 0);
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
    use crate::test_utils::run_program;

    #[test]
    fn cpx_cpy_less_than() {
        // LDX #$05; CPX #$06
        let (cpu, _) = run_program(&[0xA2, 0x05, 0xE0, 0x06], 2, |_, _| {});
        assert!(!cpu.flag(CARRY));
        assert!(cpu.flag(NEGATIVE));

        // LDY #$07; CPY #$06
        let (cpu, _) = run_program(&[0xA0, 0x07, 0xC0, 0x06], 2, |_, _| {});
        assert!(cpu.flag(CARRY));
        assert!(!cpu.flag(ZERO));
    }

    #[test]
    fn bit_copies_high_bits() {
        // LDA #$01; BIT $20
        let (cpu, _) = run_program(&[0xA9, 0x01, 0x24, 0x20], 2, |_, bus| bus.poke(0x0020, 0xC0));
        assert!(cpu.flag(OVERFLOW));
        assert!(cpu.flag(NEGATIVE));
        assert!(cpu.flag(ZERO));
        assert_eq!(cpu.a, 0x01, "BIT leaves A alone");
    }
}
