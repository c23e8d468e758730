#[macro_export]
macro_rules! BIT {
    ( $x:expr ) => {
        1 << $x
    };
}

#[macro_export]
macro_rules! BIT_MASK_LEN {
    ( $x:expr ) => {
        $crate::BIT!($x) - 1
    };
}

// bits range: BIT_RNG!(4, 7)  0b11110000, from bit 4 up to and including bit 7
#[macro_export]
macro_rules! BIT_RNG {
    ( $s:expr, $e:expr ) => {
        $crate::BIT_MASK_LEN!($e - $s + 1) << $s
    };
}

#[macro_export]
macro_rules! BM_SET {
    ( $x:expr, $mask:expr ) => {
        $x |= $mask
    };
}

#[macro_export]
macro_rules! BM_CLR {
    ( $x:expr, $mask:expr ) => {
        $x &= !($mask)
    };
}

#[macro_export]
macro_rules! BM_IS_SET {
    ( $x:expr, $mask:expr ) => {
        ($x & ($mask)) != 0
    };
}

/// Mask of the 4-bit port-control field that belongs to `pin`.
#[inline(always)]
pub const fn nibble_mask(pin: u8) -> u32 {
    0xf << (pin as u32 * 4)
}

/// Replaces the 4-bit field of `pin` inside `reg` with `code`.
#[inline(always)]
pub const fn with_nibble(reg: u32, pin: u8, code: u8) -> u32 {
    (reg & !nibble_mask(pin)) | (((code & 0xf) as u32) << (pin as u32 * 4))
}

/// Reads the 4-bit field of `pin` out of `reg`.
#[inline(always)]
pub const fn nibble(reg: u32, pin: u8) -> u8 {
    ((reg >> (pin as u32 * 4)) & 0xf) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_rng_builds_contiguous_mask() {
        assert_eq!(BIT_RNG!(0, 3), 0x0f);
        assert_eq!(BIT_RNG!(4, 7), 0xf0);
        assert_eq!(BIT_RNG!(8, 15), 0xff00);
    }

    #[test]
    fn test_bm_set_and_clr() {
        let mut val: u32 = 0x00;
        BM_SET!(val, BIT!(3));
        assert_eq!(val, 0x08);
        assert!(BM_IS_SET!(val, BIT!(3)));

        BM_CLR!(val, BIT!(3));
        assert_eq!(val, 0x00);
        assert!(!BM_IS_SET!(val, BIT!(3)));
    }

    #[test]
    fn test_with_nibble_only_touches_own_field() {
        // PCTL with every field set to 0x1 (e.g. JTAG defaults on port C)
        let reg = 0x1111_1111;

        let updated = with_nibble(reg, 4, 0x4);
        assert_eq!(updated, 0x1114_1111);
        assert_eq!(nibble(updated, 4), 0x4);
        assert_eq!(nibble(updated, 3), 0x1);

        // Only the low 4 bits of the code are used
        assert_eq!(with_nibble(0, 7, 0xfe), 0xe000_0000);
        assert_eq!(with_nibble(reg, 0, 0), 0x1111_1110);
    }
}
