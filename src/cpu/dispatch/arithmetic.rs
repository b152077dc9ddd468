//! ADC / SBC and the increment/decrement family.

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::dispatch::Step;
use crate::cpu::execute::{add_with_carry, subtract_with_carry};

pub(crate) fn adc<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    add_with_carry(cpu, value);
}

pub(crate) fn sbc<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address);
    subtract_with_carry(cpu, value);
}

pub(crate) fn inc<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address).wrapping_add(1);
    bus.write(step.address, value);
    cpu.update_zn(value);
}

pub(crate) fn dec<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    let value = bus.read(step.address).wrapping_sub(1);
    bus.write(step.address, value);
    cpu.update_zn(value);
}

pub(crate) fn inx(cpu: &mut Cpu) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zn(cpu.x);
}

pub(crate) fn iny(cpu: &mut Cpu) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zn(cpu.y);
}

pub(crate) fn dex(cpu: &mut Cpu) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zn(cpu.x);
}

pub(crate) fn dey(cpu: &mut Cpu) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zn(cpu.y);
}
