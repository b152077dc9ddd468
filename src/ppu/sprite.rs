/*!
Active sprite slots for the scanline being drawn.

Each slot holds a pre-decoded 32-bit pattern word: eight 4-bit pixels
(palette select in bits 2-3, color in bits 0-1), leftmost pixel in the top
nibble, horizontal flip already applied.
*/

/// Hardware limit on sprites drawn per scanline.
pub const MAX_SPRITES_PER_LINE: usize = 8;

#[derive(Clone, Debug, Default)]
pub(crate) struct SpriteLine {
    pub(crate) count: usize,
    pub(crate) patterns: [u32; MAX_SPRITES_PER_LINE],
    pub(crate) positions: [u8; MAX_SPRITES_PER_LINE],
    pub(crate) priorities: [u8; MAX_SPRITES_PER_LINE],
    pub(crate) indexes: [u8; MAX_SPRITES_PER_LINE],
}

impl SpriteLine {
    /// First opaque sprite pixel at screen column `x`, as (slot, 4-bit color).
    pub(crate) fn pixel(&self, x: u32) -> Option<(usize, u8)> {
        (0..self.count).find_map(|i| {
            let offset = x as i32 - self.positions[i] as i32;
            if !(0..=7).contains(&offset) {
                return None;
            }
            let shift = (7 - offset) * 4;
            let color = ((self.patterns[i] >> shift) & 0x0F) as u8;
            if color % 4 == 0 { None } else { Some((i, color)) }
        })
    }
}
