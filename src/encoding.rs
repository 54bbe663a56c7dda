//! Fixed-width binary encoding of map indices and Gray-code axis ordering
//!
//! Variable `0` is always the most significant bit of an index, so the bit
//! sequence of an index reads in variable order.

/// Decode `index` into `num_vars` bits, most significant variable first
///
/// The caller guarantees `index < 2^num_vars`.
///
/// # Examples
///
/// ```
/// use kmap_logic::encoding::to_bits;
///
/// assert_eq!(to_bits(5, 4), vec![false, true, false, true]);
/// ```
pub fn to_bits(index: u32, num_vars: usize) -> Vec<bool> {
    (0..num_vars).map(|i| bit(index, num_vars, i)).collect()
}

/// Encode a bit sequence (most significant variable first) back into an index
pub fn from_bits(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | u32::from(b))
}

/// Value of variable `position` within `index`
#[inline]
pub fn bit(index: u32, num_vars: usize, position: usize) -> bool {
    (index >> (num_vars - 1 - position)) & 1 == 1
}

/// Render `index` as a zero-padded binary string of `num_vars` digits
pub fn to_bit_string(index: u32, num_vars: usize) -> String {
    format!("{:0width$b}", index, width = num_vars)
}

/// Physical position of a binary axis value in Gray-code order
///
/// For a 2-bit axis the order is `00, 01, 11, 10`, so `{0→0, 1→1, 2→3, 3→2}`.
/// A 1-bit axis is the identity.
pub fn gray_fold(value: u32, bit_width: usize) -> usize {
    match bit_width {
        2 => [0, 1, 3, 2][value as usize & 0b11],
        _ => value as usize,
    }
}

/// Inverse of [`gray_fold`]: the binary axis value shown at `position`
pub fn gray_unfold(position: usize, bit_width: usize) -> u32 {
    match bit_width {
        2 => [0, 1, 3, 2][position & 0b11],
        _ => position as u32,
    }
}

/// Axis labels in physical order
pub fn axis_labels(bit_width: usize) -> Vec<String> {
    let len = 1usize << bit_width;
    (0..len)
        .map(|pos| to_bit_string(gray_unfold(pos, bit_width), bit_width))
        .collect()
}
