//! 2 KiB CPU work RAM at $0000-$07FF, repeated through $1FFF.
//!
//! The `Console` owns it and lends it to `CpuMemory` for each CPU step.

pub const CPU_RAM_SIZE: usize = 0x0800;

#[derive(Clone)]
pub struct Ram {
    cells: Box<[u8; CPU_RAM_SIZE]>,
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ram({} bytes)", CPU_RAM_SIZE)
    }
}

impl Ram {
    pub fn new() -> Self {
        Self {
            cells: Box::new([0; CPU_RAM_SIZE]),
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.cells[Self::mirror_index(addr)]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.cells[Self::mirror_index(addr)] = value;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells[..]
    }

    /// Cell backing CPU address `addr`; only the low 11 bits select it.
    #[inline]
    pub fn mirror_index(addr: u16) -> usize {
        usize::from(addr & (CPU_RAM_SIZE as u16 - 1))
    }
}
