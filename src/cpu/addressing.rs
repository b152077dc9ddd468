/*!
addressing.rs - 6502 addressing modes and effective address resolution

`resolve` is called with PC still pointing at the opcode. It reads operand
bytes through the bus and reports whether indexing crossed a page, which
the step loop turns into the extra cycle from `PAGE_CYCLES`.

Quirks reproduced
=================
- Zero page indexed modes wrap within page zero.
- `(zp,X)`, `(zp),Y` and `JMP (abs)` fetch their pointer with the 6502
  page-wrap bug: the high byte comes from the start of the same page when
  the low byte sits at $xxFF.
*/

use crate::bus::CpuBus;
use crate::cpu::Cpu;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Accumulator,
    Immediate,
    Implied,
    IndexedIndirect,
    Indirect,
    IndirectIndexed,
    Relative,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
}

/// Resolved operand of one instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Operand {
    pub address: u16,
    pub page_crossed: bool,
}

#[inline]
pub(crate) fn pages_differ(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

/// Word read where the high byte wraps within the page of `addr`.
pub(crate) fn read_word_bug<B: CpuBus + ?Sized>(bus: &mut B, addr: u16) -> u16 {
    let hi_addr = (addr & 0xFF00) | (addr as u8).wrapping_add(1) as u16;
    let lo = bus.read(addr) as u16;
    let hi = bus.read(hi_addr) as u16;
    (hi << 8) | lo
}

/// Compute the effective address for the instruction at `cpu.pc`.
pub(crate) fn resolve<B: CpuBus + ?Sized>(cpu: &Cpu, bus: &mut B, mode: AddressingMode) -> Operand {
    let pc = cpu.pc;
    let operand = pc.wrapping_add(1);
    let mut page_crossed = false;

    let address = match mode {
        AddressingMode::Absolute => bus.read_word(operand),
        AddressingMode::AbsoluteX => {
            let base = bus.read_word(operand);
            let addr = base.wrapping_add(cpu.x as u16);
            page_crossed = pages_differ(base, addr);
            addr
        }
        AddressingMode::AbsoluteY => {
            let base = bus.read_word(operand);
            let addr = base.wrapping_add(cpu.y as u16);
            page_crossed = pages_differ(base, addr);
            addr
        }
        AddressingMode::Accumulator | AddressingMode::Implied => 0,
        AddressingMode::Immediate => operand,
        AddressingMode::IndexedIndirect => {
            let zp = bus.read(operand).wrapping_add(cpu.x);
            read_word_bug(bus, zp as u16)
        }
        AddressingMode::Indirect => {
            let ptr = bus.read_word(operand);
            read_word_bug(bus, ptr)
        }
        AddressingMode::IndirectIndexed => {
            let zp = bus.read(operand);
            let base = read_word_bug(bus, zp as u16);
            let addr = base.wrapping_add(cpu.y as u16);
            page_crossed = pages_differ(base, addr);
            addr
        }
        AddressingMode::Relative => {
            let offset = bus.read(operand) as i8;
            pc.wrapping_add(2).wrapping_add(offset as u16)
        }
        AddressingMode::ZeroPage => bus.read(operand) as u16,
        AddressingMode::ZeroPageX => bus.read(operand).wrapping_add(cpu.x) as u16,
        AddressingMode::ZeroPageY => bus.read(operand).wrapping_add(cpu.y) as u16,
    };

    Operand {
        address,
        page_crossed,
    }
}
