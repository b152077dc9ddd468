/*!
interfaces: the trait the CPU interpreter uses to reach memory.

`CpuBus` is implemented by `CpuMemory` (the console's real address map,
borrowing RAM, PPU and mapper for the duration of one step) and by the flat
test bus in `test_utils`. Keeping the interpreter generic over it means the
CPU never holds a reference back into the console.
*/

/// CPU-visible memory as the interpreter sees it.
pub trait CpuBus {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);

    /// Little-endian word read.
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Returns true (once) if the last writes started an OAM DMA.
    ///
    /// The CPU polls this after every instruction and charges the stall.
    fn take_oam_dma(&mut self) -> bool {
        false
    }
}
