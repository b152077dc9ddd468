/*!
OAM DMA ($4014).

A write of page `$XX` to $4014 copies the 256 bytes at `$XX00-$XXFF` into
OAM starting at the current OAM address. The copy is performed at once; the
CPU then pays for it with a stall of 513 cycles, or 514 when the write lands
on an odd CPU cycle, consumed one per `Cpu::step`.
*/

use crate::bus::interfaces::CpuBus;

/// Stall cost of a DMA started on an even CPU cycle.
pub const DMA_STALL_CYCLES: u32 = 513;

/// Number of bytes moved by one transfer.
pub const DMA_TRANSFER_LEN: usize = 256;

/// Stall cycles charged for a DMA started when the CPU cycle counter is `cpu_cycles`.
#[inline]
pub fn stall_cycles(cpu_cycles: u64) -> u32 {
    DMA_STALL_CYCLES + (cpu_cycles & 1) as u32
}

/// Read the source page of a transfer through CPU-visible memory.
pub fn read_page<B: CpuBus + ?Sized>(bus: &mut B, page: u8) -> [u8; DMA_TRANSFER_LEN] {
    let base = (page as u16) << 8;
    let mut data = [0u8; DMA_TRANSFER_LEN];
    for (i, byte) in data.iter_mut().enumerate() {
        *byte = bus.read(base | i as u16);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestBus;

    #[test]
    fn stall_depends_on_cycle_parity() {
        assert_eq!(stall_cycles(0), 513);
        assert_eq!(stall_cycles(6), 513);
        assert_eq!(stall_cycles(7), 514);
    }

    #[test]
    fn reads_whole_page() {
        let mut bus = TestBus::new();
        for i in 0..256u16 {
            bus.poke(0x0300 + i, i as u8);
        }
        let page = read_page(&mut bus, 0x03);
        assert_eq!(page[0], 0x00);
        assert_eq!(page[0x80], 0x80);
        assert_eq!(page[0xFF], 0xFF);
    }
}
