use bitflags::bitflags;

bitflags! {
    /// Bit layout of the status word pushed by `PUSH PSW`.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: S (sign)
    /// - bit 6: Z (zero)
    /// - bit 5: always 0
    /// - bit 4: AC (auxiliary carry)
    /// - bit 3: always 0
    /// - bit 2: P (parity)
    /// - bit 1: always 1
    /// - bit 0: CY (carry)
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StatusWord: u8 {
        const SIGN = 0x80;
        const ZERO = 0x40;
        const AUX_CARRY = 0x10;
        const PARITY = 0x04;
        const FIXED_ONE = 0x02;
        const CARRY = 0x01;
    }
}

/// CPU flags for Intel 8080.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Flags {
    pub z: bool,  // zero
    pub s: bool,  // sign
    pub p: bool,  // parity
    pub cy: bool, // carry
    pub ac: bool, // auxiliary carry
}

/// True when `value` has an even number of set bits.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

impl Flags {
    /// Pack the flags into the status-word byte.
    pub fn to_psw(self) -> u8 {
        let mut word = StatusWord::FIXED_ONE;
        word.set(StatusWord::SIGN, self.s);
        word.set(StatusWord::ZERO, self.z);
        word.set(StatusWord::AUX_CARRY, self.ac);
        word.set(StatusWord::PARITY, self.p);
        word.set(StatusWord::CARRY, self.cy);
        word.bits()
    }

    /// Unpack a status-word byte. The fixed bits are ignored.
    pub fn from_psw(value: u8) -> Self {
        let word = StatusWord::from_bits_truncate(value);
        Self {
            z: word.contains(StatusWord::ZERO),
            s: word.contains(StatusWord::SIGN),
            p: word.contains(StatusWord::PARITY),
            cy: word.contains(StatusWord::CARRY),
            ac: word.contains(StatusWord::AUX_CARRY),
        }
    }

    /// Zero, sign and parity from an 8-bit result.
    #[inline]
    pub fn set_zsp(&mut self, value: u8) {
        self.z = value == 0;
        self.s = (value & 0x80) != 0;
        self.p = parity(value);
    }

    /// Zero, sign and parity from the low byte of a widened result, and carry
    /// when the result does not fit in 8 bits.
    ///
    /// Subtractions are widened with wrapping arithmetic, so a borrow shows up
    /// as a value above 0xff as well.
    #[inline]
    pub fn set_arith(&mut self, value: u16) {
        self.cy = value > 0xff;
        self.set_zsp(value as u8);
    }

    /// Flags after AND/OR/XOR: carry and auxiliary carry cleared.
    #[inline]
    pub fn set_logic(&mut self, value: u8) {
        self.cy = false;
        self.ac = false;
        self.set_zsp(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_is_even_popcount_for_all_bytes() {
        for v in 0..=255u8 {
            let mut ones = 0;
            for bit in 0..8 {
                if v & (1 << bit) != 0 {
                    ones += 1;
                }
            }
            assert_eq!(parity(v), ones % 2 == 0, "value {v:#04x}");
        }
    }

    #[test]
    fn psw_layout() {
        assert_eq!(Flags::default().to_psw(), 0x02);

        let all = Flags {
            z: true,
            s: true,
            p: true,
            cy: true,
            ac: true,
        };
        assert_eq!(all.to_psw(), 0xd7);

        let carry_only = Flags {
            cy: true,
            ..Flags::default()
        };
        assert_eq!(carry_only.to_psw(), 0x03);
    }

    #[test]
    fn psw_ignores_fixed_bits_on_unpack() {
        assert_eq!(Flags::from_psw(0x28), Flags::default());
        assert_eq!(Flags::from_psw(0xff), Flags::from_psw(0xd7));
    }

    #[test]
    fn psw_round_trip_all_combinations() {
        for bits in 0..32u8 {
            let flags = Flags {
                z: bits & 1 != 0,
                s: bits & 2 != 0,
                p: bits & 4 != 0,
                cy: bits & 8 != 0,
                ac: bits & 16 != 0,
            };
            assert_eq!(Flags::from_psw(flags.to_psw()), flags);
        }
    }

    #[test]
    fn arith_sets_carry_above_a_byte() {
        let mut flags = Flags::default();
        flags.set_arith(0x100);
        assert!(flags.cy);
        assert!(flags.z);
        assert!(flags.p);

        flags.set_arith(0x80);
        assert!(!flags.cy);
        assert!(flags.s);
        assert!(!flags.z);
        assert!(!flags.p);
    }

    #[test]
    fn logic_clears_carries() {
        let mut flags = Flags {
            cy: true,
            ac: true,
            ..Flags::default()
        };
        flags.set_logic(0x03);
        assert!(!flags.cy);
        assert!(!flags.ac);
        assert!(flags.p);
    }
}
