//! Flag set/clear and stack push/pull.

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::execute::{pull, pull_status, push, push_status};
use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};

pub(crate) fn clc(cpu: &mut Cpu) {
    cpu.set_flag(CARRY, false);
}

pub(crate) fn cld(cpu: &mut Cpu) {
    cpu.set_flag(DECIMAL, false);
}

pub(crate) fn cli(cpu: &mut Cpu) {
    cpu.set_flag(IRQ_DISABLE, false);
}

pub(crate) fn clv(cpu: &mut Cpu) {
    cpu.set_flag(OVERFLOW, false);
}

pub(crate) fn sec(cpu: &mut Cpu) {
    cpu.set_flag(CARRY, true);
}

pub(crate) fn sed(cpu: &mut Cpu) {
    cpu.set_flag(DECIMAL, true);
}

pub(crate) fn sei(cpu: &mut Cpu) {
    cpu.set_flag(IRQ_DISABLE, true);
}

pub(crate) fn pha<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    let a = cpu.a;
    push(cpu, bus, a);
}

pub(crate) fn php<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    push_status(cpu, bus);
}

pub(crate) fn pla<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    cpu.a = pull(cpu, bus);
    cpu.update_zn(cpu.a);
}

pub(crate) fn plp<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    pull_status(cpu, bus);
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{BREAK, DECIMAL, ZERO};
    use crate::test_utils::run_program;

    #[test]
    fn php_sets_break_in_pushed_copy_only() {
        // SED; PHP
        let (cpu, bus) = run_program(&[0xF8, 0x08], 2, |_, _| {});
        assert_eq!(bus.peek(0x01FD), 0x24 | DECIMAL | BREAK);
        assert!(!cpu.flag(BREAK));
    }

    #[test]
    fn pha_pla() {
        // LDA #$00; PHA; LDA #$55; PLA
        let (cpu, _) = run_program(&[0xA9, 0x00, 0x48, 0xA9, 0x55, 0x68], 4, |_, _| {});
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.flag(ZERO));
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn plp_forces_unused_and_clears_break() {
        // LDA #$FF; PHA; PLP
        let (cpu, _) = run_program(&[0xA9, 0xFF, 0x48, 0x28], 3, |_, _| {});
        assert_eq!(cpu.flags(), 0xEF);
    }
}
