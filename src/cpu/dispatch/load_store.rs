//! Loads, stores and register transfers.

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::dispatch::Step;

pub(crate) fn lda<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    cpu.a = bus.read(step.address);
    cpu.update_zn(cpu.a);
}

pub(crate) fn ldx<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    cpu.x = bus.read(step.address);
    cpu.update_zn(cpu.x);
}

pub(crate) fn ldy<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    cpu.y = bus.read(step.address);
    cpu.update_zn(cpu.y);
}

pub(crate) fn sta<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    bus.write(step.address, cpu.a);
}

pub(crate) fn stx<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    bus.write(step.address, cpu.x);
}

pub(crate) fn sty<B: CpuBus + ?Sized>(cpu: &mut Cpu, bus: &mut B, step: &Step) {
    bus.write(step.address, cpu.y);
}

pub(crate) fn tax(cpu: &mut Cpu) {
    cpu.x = cpu.a;
    cpu.update_zn(cpu.x);
}

pub(crate) fn tay(cpu: &mut Cpu) {
    cpu.y = cpu.a;
    cpu.update_zn(cpu.y);
}

pub(crate) fn txa(cpu: &mut Cpu) {
    cpu.a = cpu.x;
    cpu.update_zn(cpu.a);
}

pub(crate) fn tya(cpu: &mut Cpu) {
    cpu.a = cpu.y;
    cpu.update_zn(cpu.a);
}

pub(crate) fn tsx(cpu: &mut Cpu) {
    cpu.x = cpu.sp;
    cpu.update_zn(cpu.x);
}

/// TXS does not touch flags.
pub(crate) fn txs(cpu: &mut Cpu) {
    cpu.sp = cpu.x;
}
