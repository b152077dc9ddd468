/*!
execute.rs - Instruction semantic helpers shared across opcode families

Stack, status push/pull, ALU (add/subtract with carry, compare) and the
shift/rotate primitives used by both the official opcodes and the unofficial
combined read-modify-write opcodes.

Stack
=====
The stack lives at $0100-$01FF. Push writes at `$0100 | SP` then decrements;
pull increments then reads. SP wraps within the page.
*/

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::state::{BREAK, CARRY, IRQ_DISABLE, OVERFLOW, UNUSED};

const STACK_BASE: u16 = 0x0100;

#[inline]
pub(crate) fn push<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, value: u8) {
    bus.write(STACK_BASE | cpu.sp as u16, value);
    cpu.sp = cpu.sp.wrapping_sub(1);
}

#[inline]
pub(crate) fn pull<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) -> u8 {
    cpu.sp = cpu.sp.wrapping_add(1);
    bus.read(STACK_BASE | cpu.sp as u16)
}

pub(crate) fn push_word<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, value: u16) {
    push(cpu, bus, (value >> 8) as u8);
    push(cpu, bus, value as u8);
}

pub(crate) fn pull_word<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) -> u16 {
    let lo = pull(cpu, bus) as u16;
    let hi = pull(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Push the status byte with B set (PHP, BRK, interrupt entry).
pub(crate) fn push_status<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    let flags = cpu.flags() | BREAK;
    push(cpu, bus, flags);
}

/// Pull the status byte; B is dropped and the unused bit forced on.
pub(crate) fn pull_status<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B) {
    let flags = pull(cpu, bus);
    cpu.set_flags((flags & !BREAK) | UNUSED);
}

/// Push PC and status, set I and jump through `vector`.
pub(crate) fn enter_interrupt<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, vector: u16) {
    let pc = cpu.pc;
    push_word(cpu, bus, pc);
    push_status(cpu, bus);
    cpu.set_flag(IRQ_DISABLE, true);
    cpu.pc = bus.read_word(vector);
}

/// A = A + value + C. Binary only.
pub(crate) fn add_with_carry(cpu: &mut Cpu, value: u8) {
    let a = cpu.a;
    let sum = a as u16 + value as u16 + cpu.carry() as u16;
    let result = sum as u8;
    cpu.a = result;
    cpu.update_zn(result);
    cpu.set_flag(CARRY, sum > 0xFF);
    cpu.set_flag(OVERFLOW, (a ^ value) & 0x80 == 0 && (a ^ result) & 0x80 != 0);
}

/// A = A - value - (1 - C). Binary only.
pub(crate) fn subtract_with_carry(cpu: &mut Cpu, value: u8) {
    let a = cpu.a;
    let diff = a as i16 - value as i16 - (1 - cpu.carry() as i16);
    let result = diff as u8;
    cpu.a = result;
    cpu.update_zn(result);
    cpu.set_flag(CARRY, diff >= 0);
    cpu.set_flag(OVERFLOW, (a ^ value) & 0x80 != 0 && (a ^ result) & 0x80 != 0);
}

/// Z/N from `a - b`, C = a >= b.
pub(crate) fn compare(cpu: &mut Cpu, a: u8, b: u8) {
    cpu.update_zn(a.wrapping_sub(b));
    cpu.set_flag(CARRY, a >= b);
}

pub(crate) fn shift_left(cpu: &mut Cpu, value: u8) -> u8 {
    cpu.set_flag(CARRY, value & 0x80 != 0);
    let result = value << 1;
    cpu.update_zn(result);
    result
}

pub(crate) fn shift_right(cpu: &mut Cpu, value: u8) -> u8 {
    cpu.set_flag(CARRY, value & 0x01 != 0);
    let result = value >> 1;
    cpu.update_zn(result);
    result
}

pub(crate) fn rotate_left(cpu: &mut Cpu, value: u8) -> u8 {
    let carry_in = cpu.carry();
    cpu.set_flag(CARRY, value & 0x80 != 0);
    let result = (value << 1) | carry_in;
    cpu.update_zn(result);
    result
}

pub(crate) fn rotate_right(cpu: &mut Cpu, value: u8) -> u8 {
    let carry_in = cpu.carry();
    cpu.set_flag(CARRY, value & 0x01 != 0);
    let result = (value >> 1) | (carry_in << 7);
    cpu.update_zn(result);
    result
}
