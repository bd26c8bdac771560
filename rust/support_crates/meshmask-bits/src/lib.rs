//! Dense membership bitmasks used as the set-algebra substrate for element masks.

pub mod bit_mask;
#[cfg(test)]
mod tests;

pub use bit_mask::BitMask;
