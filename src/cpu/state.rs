/*!
state.rs - 6502 architectural state (registers, status flags, pending interrupt)

Overview
========
`Cpu` owns everything architecturally visible plus the two counters the
console needs for timing: the running cycle count and the DMA stall budget.
It holds no reference to memory; `step` and friends take the bus as an
argument.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always set when the byte is rebuilt from the stack)
  B = BREAK (only ever set in the copy pushed by PHP/BRK/interrupt entry)
  D = DECIMAL (stored and toggled, but ADC/SBC never use BCD on the NES)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

pub const CARRY: u8 = 0x01;
pub const ZERO: u8 = 0x02;
pub const IRQ_DISABLE: u8 = 0x04;
pub const DECIMAL: u8 = 0x08;
pub const BREAK: u8 = 0x10;
pub const UNUSED: u8 = 0x20;
pub const OVERFLOW: u8 = 0x40;
pub const NEGATIVE: u8 = 0x80;

/// Status value after reset: I and the unused bit set.
pub const RESET_STATUS: u8 = IRQ_DISABLE | UNUSED;
/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFD;

/// Interrupt waiting to be serviced at the start of the next step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Interrupt {
    #[default]
    None,
    Nmi,
    Irq,
}

#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// Status byte; use `flags()`/`set_flags()` or the single-flag helpers.
    pub(crate) p: u8,
    /// Total cycles executed since power-on.
    pub cycles: u64,
    /// Cycles left to burn before the next instruction (OAM DMA).
    pub stall: u32,
    pub(crate) interrupt: Interrupt,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            sp: RESET_SP,
            p: RESET_STATUS,
            ..Self::default()
        }
    }

    /// Packed status byte.
    #[inline]
    pub fn flags(&self) -> u8 {
        self.p
    }

    #[inline]
    pub fn set_flags(&mut self, value: u8) {
        self.p = value;
    }

    #[inline]
    pub fn flag(&self, mask: u8) -> bool {
        self.p & mask != 0
    }

    #[inline]
    pub fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.p |= mask;
        } else {
            self.p &= !mask;
        }
    }

    /// Carry as 0 or 1, for arithmetic.
    #[inline]
    pub(crate) fn carry(&self) -> u8 {
        self.p & CARRY
    }

    /// Set Z and N from `value`.
    #[inline]
    pub fn update_zn(&mut self, value: u8) {
        self.set_flag(ZERO, value == 0);
        self.set_flag(NEGATIVE, value & 0x80 != 0);
    }

    /// Request a non-maskable interrupt. Overrides a pending IRQ.
    pub fn trigger_nmi(&mut self) {
        self.interrupt = Interrupt::Nmi;
    }

    /// Request a maskable interrupt; ignored while I is set.
    pub fn trigger_irq(&mut self) {
        if !self.flag(IRQ_DISABLE) && self.interrupt == Interrupt::None {
            self.interrupt = Interrupt::Irq;
        }
    }

    pub fn pending_interrupt(&self) -> Interrupt {
        self.interrupt
    }
}
