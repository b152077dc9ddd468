/*!
cpu - The 2A03's 6502 core (no decimal mode).

Layout:

```text
state.rs       - `Cpu` registers, status flag masks, pending interrupt.
core/          - `reset` and the `step` loop (stall, interrupts, fetch, cycles).
addressing.rs  - Addressing modes and effective address resolution.
table.rs       - Per-opcode mnemonic, mode, size, cycles and page-cross cost.
dispatch/      - Mnemonic to semantics, grouped by instruction family.
execute.rs     - Shared helpers: stack, ALU, shifts/rotates.
```

The CPU is generic over `CpuBus`, so it can be driven by the console's
memory map or by a flat test bus:

```ignore
let mut cpu = Cpu::new();
cpu.reset(&mut bus);
let cycles = cpu.step(&mut bus);
```
*/

pub mod addressing;
pub mod core;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod state;
pub mod table;

/// NTSC CPU clock rate in Hz.
pub const CPU_FREQUENCY: u32 = 1_789_773;

pub use addressing::AddressingMode;
pub use state::{
    BREAK, CARRY, Cpu, DECIMAL, IRQ_DISABLE, Interrupt, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
pub use table::Mnemonic;
