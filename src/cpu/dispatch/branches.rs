//! Conditional branches. A taken branch costs one cycle, two when the
//! target is on a different page from the next instruction.

use crate::cpu::Cpu;
use crate::cpu::addressing::pages_differ;
use crate::cpu::dispatch::Step;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};

fn branch_if(cpu: &mut Cpu, step: &Step, taken: bool) {
    if !taken {
        return;
    }
    cpu.pc = step.address;
    cpu.cycles += 1;
    if pages_differ(step.pc, step.address) {
        cpu.cycles += 1;
    }
}

pub(crate) fn bcc(cpu: &mut Cpu, step: &Step) {
    let taken = !cpu.flag(CARRY);
    branch_if(cpu, step, taken);
}

pub(crate) fn bcs(cpu: &mut Cpu, step: &Step) {
    let taken = cpu.flag(CARRY);
    branch_if(cpu, step, taken);
}

pub(crate) fn beq(cpu: &mut Cpu, step: &Step) {
    let taken = cpu.flag(ZERO);
    branch_if(cpu, step, taken);
}

pub(crate) fn bne(cpu: &mut Cpu, step: &Step) {
    let taken = !cpu.flag(ZERO);
    branch_if(cpu, step, taken);
}

pub(crate) fn bmi(cpu: &mut Cpu, step: &Step) {
    let taken = cpu.flag(NEGATIVE);
    branch_if(cpu, step, taken);
}

pub(crate) fn bpl(cpu: &mut Cpu, step: &Step) {
    let taken = !cpu.flag(NEGATIVE);
    branch_if(cpu, step, taken);
}

pub(crate) fn bvc(cpu: &mut Cpu, step: &Step) {
    let taken = !cpu.flag(OVERFLOW);
    branch_if(cpu, step, taken);
}

pub(crate) fn bvs(cpu: &mut Cpu, step: &Step) {
    let taken = cpu.flag(OVERFLOW);
    branch_if(cpu, step, taken);
}
