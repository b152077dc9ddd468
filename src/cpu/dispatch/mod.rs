/*!
dispatch - Mnemonic to semantics

`execute` is an exhaustive match over `Mnemonic`; each arm calls into the
family module that implements it. By the time it runs, the step loop has
already advanced PC past the instruction and charged base and page-cross
cycles. Handlers only add cycles for taken branches.

Families
========
- arithmetic: ADC SBC INC DEC INX INY DEX DEY
- compare: CMP CPX CPY BIT
- logical: AND ORA EOR ASL LSR ROL ROR
- load_store: loads, stores, register transfers
- branches: conditional branches
- control_flow: JMP JSR RTS RTI BRK
- misc: flag set/clear, stack push/pull, NOP
- unofficial: combined RMW ops, immediate oddities, KIL and unstable stores
*/

use crate::bus::CpuBus;
use crate::cpu::Cpu;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::table::Mnemonic;

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod unofficial;

/// Decoded instruction context handed to every handler.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Step {
    /// Effective address (0 for implied/accumulator).
    pub address: u16,
    /// Address of the next instruction.
    pub pc: u16,
    pub mode: AddressingMode,
}

pub(crate) fn execute<B: CpuBus + ?Sized>(mnemonic: Mnemonic, cpu: &mut Cpu, bus: &mut B, step: &Step) {
    use Mnemonic::*;
    match mnemonic {
        Adc => arithmetic::adc(cpu, bus, step),
        Sbc => arithmetic::sbc(cpu, bus, step),
        Inc => arithmetic::inc(cpu, bus, step),
        Dec => arithmetic::dec(cpu, bus, step),
        Inx => arithmetic::inx(cpu),
        Iny => arithmetic::iny(cpu),
        Dex => arithmetic::dex(cpu),
        Dey => arithmetic::dey(cpu),

        Cmp => compare::cmp(cpu, bus, step),
        Cpx => compare::cpx(cpu, bus, step),
        Cpy => compare::cpy(cpu, bus, step),
        Bit => compare::bit(cpu, bus, step),

        And => logical::and(cpu, bus, step),
        Ora => logical::ora(cpu, bus, step),
        Eor => logical::eor(cpu, bus, step),
        Asl => logical::asl(cpu, bus, step),
        Lsr => logical::lsr(cpu, bus, step),
        Rol => logical::rol(cpu, bus, step),
        Ror => logical::ror(cpu, bus, step),

        Lda => load_store::lda(cpu, bus, step),
        Ldx => load_store::ldx(cpu, bus, step),
        Ldy => load_store::ldy(cpu, bus, step),
        Sta => load_store::sta(cpu, bus, step),
        Stx => load_store::stx(cpu, bus, step),
        Sty => load_store::sty(cpu, bus, step),
        Tax => load_store::tax(cpu),
        Tay => load_store::tay(cpu),
        Txa => load_store::txa(cpu),
        Tya => load_store::tya(cpu),
        Tsx => load_store::tsx(cpu),
        Txs => load_store::txs(cpu),

        Bcc => branches::bcc(cpu, step),
        Bcs => branches::bcs(cpu, step),
        Beq => branches::beq(cpu, step),
        Bne => branches::bne(cpu, step),
        Bmi => branches::bmi(cpu, step),
        Bpl => branches::bpl(cpu, step),
        Bvc => branches::bvc(cpu, step),
        Bvs => branches::bvs(cpu, step),

        Jmp => control_flow::jmp(cpu, step),
        Jsr => control_flow::jsr(cpu, bus, step),
        Rts => control_flow::rts(cpu, bus),
        Rti => control_flow::rti(cpu, bus),
        Brk => control_flow::brk(cpu, bus),

        Clc => misc::clc(cpu),
        Cld => misc::cld(cpu),
        Cli => misc::cli(cpu),
        Clv => misc::clv(cpu),
        Sec => misc::sec(cpu),
        Sed => misc::sed(cpu),
        Sei => misc::sei(cpu),
        Pha => misc::pha(cpu, bus),
        Php => misc::php(cpu, bus),
        Pla => misc::pla(cpu, bus),
        Plp => misc::plp(cpu, bus),
        Nop => {}

        Slo => unofficial::slo(cpu, bus, step),
        Rla => unofficial::rla(cpu, bus, step),
        Sre => unofficial::sre(cpu, bus, step),
        Rra => unofficial::rra(cpu, bus, step),
        Sax => unofficial::sax(cpu, bus, step),
        Lax => unofficial::lax(cpu, bus, step),
        Dcp => unofficial::dcp(cpu, bus, step),
        Isc => unofficial::isc(cpu, bus, step),
        Anc => unofficial::anc(cpu, bus, step),
        Alr => unofficial::alr(cpu, bus, step),
        Arr => unofficial::arr(cpu, bus, step),
        Axs => unofficial::axs(cpu, bus, step),
        Las => unofficial::las(cpu, bus, step),
        // Unstable on real silicon; treated as no-ops.
        Xaa | Ahx | Tas | Shx | Shy => {}
        // Size 0 in the tables: PC never advances, so the CPU stays here.
        Kil => {}
    }
}
