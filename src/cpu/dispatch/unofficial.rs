/*!
unofficial - Undocumented opcodes with stable behavior

Combined read-modify-write ops reuse the official halves:
  SLO = ASL + ORA, RLA = ROL + AND, SRE = LSR + EOR, RRA = ROR + ADC,
  DCP = DEC + CMP, ISC = INC + SBC
Immediate oddities: ANC, ALR, ARR, AXS. Loads/stores: LAX, SAX, LAS.
*/

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::dispatch::Step;
use crate::cpu::execute::{
    add_with_carry, compare, rotate_left, rotate_right, shift_left, shift_right,
    subtract_with_carry,
};
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW};

/// Read, transform and write back the operand, returning the new value.
fn read_modify_write<B: CpuBus + ?Sized>(
    cpu: &mut Cpu,
    bus: &mut B,
    step: &Step,
    op: fn(&mut Cpu, u8) -> u8,
) -> u8 {
    let value = bus.read(step.address);
    let result = op(cpu, value);
    bus.write(step.address, result);
    result
}

pub(crate) fn slo<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = read_modify_write(cpu, bus, step, shift_left);
    cpu.a |= value;
    cpu.update_zn(cpu.a);
}

pub(crate) fn rla<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = read_modify_write(cpu, bus, step, rotate_left);
    cpu.a &= value;
    cpu.update_zn(cpu.a);
}

pub(crate) fn sre<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = read_modify_write(cpu, bus, step, shift_right);
    cpu.a ^= value;
    cpu.update_zn(cpu.a);
}

pub(crate) fn rra<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = read_modify_write(cpu, bus, step, rotate_right);
    add_with_carry(cpu, value);
}

pub(crate) fn dcp<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address).wrapping_sub(1);
    bus.write(step.address, value);
    let a = cpu.a;
    compare(cpu, a, value);
}

pub(crate) fn isc<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address).wrapping_add(1);
    bus.write(step.address, value);
    subtract_with_carry(cpu, value);
}

pub(crate) fn sax<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    bus.write(step.address, cpu.a & cpu.x);
}

pub(crate) fn lax<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    cpu.a = value;
    cpu.x = value;
    cpu.update_zn(value);
}

/// A, X and SP all become `M & SP`.
pub(crate) fn las<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address) & cpu.sp;
    cpu.a = value;
    cpu.x = value;
    cpu.sp = value;
    cpu.update_zn(value);
}

/// AND, then C = N.
pub(crate) fn anc<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    cpu.a &= bus.read(step.address);
    cpu.update_zn(cpu.a);
    cpu.set_flag(CARRY, cpu.flag(NEGATIVE));
}

/// AND, then LSR A.
pub(crate) fn alr<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = cpu.a & bus.read(step.address);
    cpu.a = shift_right(cpu, value);
}

/// AND, then ROR A with C from bit 6 and V from bit 6 ^ bit 5.
pub(crate) fn arr<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = cpu.a & bus.read(step.address);
    let result = (value >> 1) | (cpu.carry() << 7);
    cpu.a = result;
    cpu.update_zn(result);
    cpu.set_flag(CARRY, result & 0x40 != 0);
    cpu.set_flag(OVERFLOW, ((result >> 6) ^ (result >> 5)) & 1 != 0);
}

/// X = (A & X) - M, without borrow in; C as for CMP.
pub(crate) fn axs<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    let ax = cpu.a & cpu.x;
    cpu.x = ax.wrapping_sub(value);
    cpu.update_zn(cpu.x);
    cpu.set_flag(CARRY, ax >= value);
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, OVERFLOW, ZERO};
    use crate::test_utils::run_program;

    #[test]
    fn lax_loads_a_and_x() {
        // LAX $10
        let (cpu, _) = run_program(&[0xA7, 0x10], 1, |_, bus| bus.poke(0x0010, 0x5A));
        assert_eq!(cpu.a, 0x5A);
        assert_eq!(cpu.x, 0x5A);
    }

    #[test]
    fn sax_stores_a_and_x() {
        // LDA #$F0; LDX #$3C; SAX $10
        let (_, bus) = run_program(&[0xA9, 0xF0, 0xA2, 0x3C, 0x87, 0x10], 3, |_, _| {});
        assert_eq!(bus.peek(0x0010), 0x30);
    }

    #[test]
    fn dcp_decrements_then_compares() {
        // LDA #$05; DCP $10
        let (cpu, bus) = run_program(&[0xA9, 0x05, 0xC7, 0x10], 2, |_, bus| bus.poke(0x0010, 0x06));
        assert_eq!(bus.peek(0x0010), 0x05);
        assert!(cpu.flag(ZERO));
        assert!(cpu.flag(CARRY));
    }

    #[test]
    fn isc_increments_then_subtracts() {
        // SEC; LDA #$10; ISC $10
        let (cpu, bus) =
            run_program(&[0x38, 0xA9, 0x10, 0xE7, 0x10], 3, |_, bus| bus.poke(0x0010, 0x01));
        assert_eq!(bus.peek(0x0010), 0x02);
        assert_eq!(cpu.a, 0x0E);
    }

    #[test]
    fn slo_shifts_then_ors() {
        // LDA #$01; SLO $10
        let (cpu, bus) = run_program(&[0xA9, 0x01, 0x07, 0x10], 2, |_, bus| bus.poke(0x0010, 0x81));
        assert_eq!(bus.peek(0x0010), 0x02);
        assert_eq!(cpu.a, 0x03);
        assert!(cpu.flag(CARRY));
    }

    #[test]
    fn axs_subtracts_from_a_and_x() {
        // LDA #$0F; LDX #$FF; AXS #$05
        let (cpu, _) = run_program(&[0xA9, 0x0F, 0xA2, 0xFF, 0xCB, 0x05], 3, |_, _| {});
        assert_eq!(cpu.x, 0x0A);
        assert!(cpu.flag(CARRY));
    }

    #[test]
    fn arr_sets_carry_and_overflow_from_result() {
        // SEC; LDA #$FF; ARR #$C0  -> A = $E0
        let (cpu, _) = run_program(&[0x38, 0xA9, 0xFF, 0x6B, 0xC0], 3, |_, _| {});
        assert_eq!(cpu.a, 0xE0);
        assert!(cpu.flag(CARRY));
        assert!(!cpu.flag(OVERFLOW));
    }

    #[test]
    fn unofficial_nops_skip_operands() {
        // NOP $1234,X (3 bytes); NOP #$00 (2 bytes)
        let (cpu, _) = run_program(&[0x1C, 0x34, 0x12, 0x80, 0x00], 2, |_, _| {});
        assert_eq!(cpu.pc, 0x8005);
    }

    #[test]
    fn unstable_store_is_a_noop() {
        // SHY $0300,X
        let (cpu, bus) = run_program(&[0x9C, 0x00, 0x03], 1, |_, _| {});
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(bus.peek(0x0300), 0x00);
    }
}
