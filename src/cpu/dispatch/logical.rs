//! AND / ORA / EOR and the shifts. Shifts act on A in accumulator mode,
//! otherwise on memory.

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::dispatch::Step;
use crate::cpu::execute::{rotate_left, rotate_right, shift_left, shift_right};

pub(crate) fn and<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    cpu.a &= bus.read(step.address);
    cpu.update_zn(cpu.a);
}

pub(crate) fn ora<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    cpu.a |= bus.read(step.address);
    cpu.update_zn(cpu.a);
}

pub(crate) fn eor<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    cpu.a ^= bus.read(step.address);
    cpu.update_zn(cpu.a);
}

/// Apply `op` to A or to the byte at the effective address.
fn modify<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step, op: fn(&mut Cpu, u8) -> u8) {
    if step.mode == AddressingMode::Accumulator {
        let a = cpu.a;
        cpu.a = op(cpu, a);
    } else {
        let value = bus.read(step.address);
        let result = op(cpu, value);
        bus.write(step.address, result);
    }
}

pub(crate) fn asl<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    modify(cpu, bus, step, shift_left);
}

pub(crate) fn lsr<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    modify(cpu, bus, step, shift_right);
}

pub(crate) fn rol<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    modify(cpu, bus, step, rotate_left);
}

pub(crate) fn ror<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    modify(cpu, bus, step, rotate_right);
}
