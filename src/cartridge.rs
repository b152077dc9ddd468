/*!
Cartridge data and iNES (v1) loading.

A `Cartridge` is plain data: PRG ROM, CHR ROM (or CHR RAM), 8 KiB of
battery-backable SRAM, the nametable mirroring layout and the mapper id.
It is handed to `mapper::create`, which takes ownership of it for the rest
of the session.

iNES parsing:
- bytes[0..4] must be `NES\x1A`
- byte 4: PRG ROM size in 16 KiB units
- byte 5: CHR ROM size in 8 KiB units (0 => allocate 8 KiB CHR RAM)
- byte 6: bit 0 vertical mirroring, bit 1 battery, bit 2 trainer, bit 3 four-screen,
  bits 4..7 mapper low nibble
- byte 7: bits 4..7 mapper high nibble
- a 512-byte trainer, when present, sits between header and PRG and is skipped
*/

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};

/// Size of one PRG ROM bank.
pub const PRG_BANK_SIZE: usize = 0x4000;
/// Size of one CHR bank (and of the CHR RAM allocated for CHR-less carts).
pub const CHR_BANK_SIZE: usize = 0x2000;
/// Size of the cartridge SRAM window at $6000-$7FFF.
pub const SRAM_SIZE: usize = 0x2000;

const INES_MAGIC: &[u8; 4] = b"NES\x1A";
const INES_HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;

/// Nametable mirroring layouts, numbered as the mirroring byte encodes them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Mirroring {
    #[default]
    Horizontal = 0,
    Vertical = 1,
    SingleScreen0 = 2,
    SingleScreen1 = 3,
    FourScreen = 4,
}

impl Mirroring {
    /// Decode a mirroring byte. Unknown values fall back to horizontal.
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Mirroring::Vertical,
            2 => Mirroring::SingleScreen0,
            3 => Mirroring::SingleScreen1,
            4 => Mirroring::FourScreen,
            _ => Mirroring::Horizontal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Cartridge {
    prg: Vec<u8>,
    chr: Vec<u8>,
    sram: Vec<u8>,
    mirroring: Mirroring,
    mapper_id: u8,
    battery: bool,
}

impl Cartridge {
    /// Build a cartridge from already-extracted parts.
    ///
    /// An empty `chr` allocates 8 KiB of CHR RAM.
    pub fn new(prg: Vec<u8>, chr: Vec<u8>, mapper_id: u8, mirroring: Mirroring, battery: bool) -> Self {
        let chr = if chr.is_empty() {
            vec![0; CHR_BANK_SIZE]
        } else {
            chr
        };
        Self {
            prg,
            chr,
            sram: vec![0; SRAM_SIZE],
            mirroring,
            mapper_id,
            battery,
        }
    }

    /// Replace the SRAM contents, e.g. with a previously saved battery image.
    ///
    /// Short images are zero-padded and long ones cut to `SRAM_SIZE`.
    pub fn with_sram(mut self, mut sram: Vec<u8>) -> Self {
        sram.resize(SRAM_SIZE, 0);
        self.sram = sram;
        self
    }

    /// Parse an iNES (v1) image.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < INES_HEADER_LEN {
            return Err(Error::Truncated { section: "header" });
        }
        if &data[0..4] != INES_MAGIC {
            return Err(Error::InvalidHeader("bad magic (expected NES<1A>)"));
        }

        let prg_units = data[4] as usize;
        let chr_units = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];

        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);
        let mirroring = if flags6 & 0b0000_1000 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0b0000_0001 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = flags6 & 0b0000_0010 != 0;

        let mut offset = INES_HEADER_LEN;
        if flags6 & 0b0000_0100 != 0 {
            offset += TRAINER_LEN;
            if data.len() < offset {
                return Err(Error::Truncated { section: "trainer" });
            }
        }

        let prg_len = prg_units * PRG_BANK_SIZE;
        let prg = data
            .get(offset..offset + prg_len)
            .ok_or(Error::Truncated { section: "PRG ROM" })?
            .to_vec();
        offset += prg_len;

        let chr = if chr_units == 0 {
            Vec::new()
        } else {
            let chr_len = chr_units * CHR_BANK_SIZE;
            data.get(offset..offset + chr_len)
                .ok_or(Error::Truncated { section: "CHR ROM" })?
                .to_vec()
        };

        let cart = Self::new(prg, chr, mapper_id, mirroring, battery);
        info!(
            "loaded iNES image: mapper {} prg {} KiB chr {} KiB{} mirroring {:?}",
            cart.mapper_id,
            cart.prg.len() / 1024,
            cart.chr.len() / 1024,
            if chr_units == 0 { " (RAM)" } else { "" },
            cart.mirroring
        );
        Ok(cart)
    }

    /// Load an iNES (v1) file from disk.
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    pub fn chr_mut(&mut self) -> &mut [u8] {
        &mut self.chr
    }

    pub fn sram(&self) -> &[u8] {
        &self.sram
    }

    pub fn sram_mut(&mut self) -> &mut [u8] {
        &mut self.sram
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_ines;

    #[test]
    fn parse_uxrom_with_chr_rom() {
        // mapper 2, vertical mirroring
        let data = build_ines(4, 1, 0x21, 0x00, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");

        assert_eq!(cart.mapper_id(), 2);
        assert_eq!(cart.mirroring(), Mirroring::Vertical);
        assert_eq!(cart.prg().len(), 4 * PRG_BANK_SIZE);
        assert_eq!(cart.chr().len(), CHR_BANK_SIZE);
        assert_eq!(cart.sram().len(), SRAM_SIZE);
        assert!(!cart.battery_backed());
    }

    #[test]
    fn zero_chr_banks_allocates_chr_ram() {
        let data = build_ines(1, 0, 0x00, 0x00, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");
        assert_eq!(cart.chr().len(), CHR_BANK_SIZE);
        assert!(cart.chr().iter().all(|&b| b == 0));
    }

    #[test]
    fn mapper_id_combines_both_nibbles() {
        let data = build_ines(1, 1, 0x40, 0x10, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");
        assert_eq!(cart.mapper_id(), 0x14);
    }

    #[test]
    fn header_flags_decode() {
        let data = build_ines(1, 1, 0b0000_1010, 0x00, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");
        assert_eq!(cart.mirroring(), Mirroring::FourScreen);
        assert!(cart.battery_backed());
    }

    #[test]
    fn trainer_is_skipped() {
        let trainer = [0x5Au8; 512];
        let data = build_ines(1, 1, 0b0000_0100, 0x00, Some(&trainer));
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");
        // PRG payload from the builder is 0xAA filled; trainer bytes must not leak in
        assert_eq!(cart.prg()[0], 0xAA);
        assert_eq!(cart.chr()[0], 0xCC);
    }

    #[test]
    fn bad_magic_rejected() {
        let mut data = build_ines(1, 1, 0, 0, None);
        data[3] = 0x00;
        assert!(matches!(
            Cartridge::from_ines_bytes(&data),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn truncated_prg_rejected() {
        let mut data = build_ines(2, 0, 0, 0, None);
        data.truncate(16 + PRG_BANK_SIZE);
        assert!(matches!(
            Cartridge::from_ines_bytes(&data),
            Err(Error::Truncated { section: "PRG ROM" })
        ));
    }

    #[test]
    fn supplied_sram_is_padded_or_cut() {
        let blank = || {
            Cartridge::new(vec![0; PRG_BANK_SIZE], Vec::new(), 2, Mirroring::Horizontal, true)
        };

        let short = blank().with_sram(vec![1, 2, 3]);
        assert_eq!(short.sram().len(), SRAM_SIZE);
        assert_eq!(&short.sram()[..4], &[1, 2, 3, 0]);

        let long = blank().with_sram(vec![0xEE; SRAM_SIZE + 100]);
        assert_eq!(long.sram().len(), SRAM_SIZE);
        assert!(long.sram().iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn mirroring_byte_round_trips() {
        for m in [
            Mirroring::Horizontal,
            Mirroring::Vertical,
            Mirroring::SingleScreen0,
            Mirroring::SingleScreen1,
            Mirroring::FourScreen,
        ] {
            assert_eq!(Mirroring::from_byte(m as u8), m);
        }
    }
}
