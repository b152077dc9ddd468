#![doc = r#"
Bus module: how the CPU and PPU reach memory.

Overview
- `interfaces`: the `CpuBus` trait the CPU interpreter is generic over.
- `cpu_interface`: `CpuMemory`, the console's CPU address map, a view
  borrowing RAM, PPU and mapper for one step.
- `ppu_space`: the PPU address space (pattern tables via the mapper,
  mirrored nametable RAM, palette RAM).
- `ram`: 2 KiB CPU work RAM.
- `dma`: OAM DMA transfer and stall accounting.
- `clock`: runs three PPU dots per CPU cycle and forwards interrupts.

Ownership
- The `Console` owns every component. Nothing here stores a reference to
  another component; each operation receives what it needs as arguments.
"#]

pub mod clock;
pub mod cpu_interface;
pub mod dma;
pub mod interfaces;
pub mod ppu_space;
pub mod ram;

pub use cpu_interface::CpuMemory;
pub use interfaces::CpuBus;
pub use ppu_space::PpuAddressSpace;
pub use ram::Ram;
