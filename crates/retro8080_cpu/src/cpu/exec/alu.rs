use crate::cpu::Cpu8080;
use crate::memory::Bus8080;
use crate::opcode::{AluOp, Reg, RegPair, Rotation};

impl Cpu8080 {
    /// Apply an accumulator operation. CMP computes the flags of a
    /// subtraction and discards the difference.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.a = self.add(value, false),
            AluOp::Adc => self.a = self.add(value, self.flags.cy),
            AluOp::Sub => self.a = self.sub(value, false),
            AluOp::Sbb => self.a = self.sub(value, self.flags.cy),
            AluOp::Ana => {
                self.a &= value;
                self.flags.set_logic(self.a);
            }
            AluOp::Xra => {
                self.a ^= value;
                self.flags.set_logic(self.a);
            }
            AluOp::Ora => {
                self.a |= value;
                self.flags.set_logic(self.a);
            }
            AluOp::Cmp => {
                self.sub(value, false);
            }
        }
    }

    fn add(&mut self, value: u8, carry_in: bool) -> u8 {
        let carry = u8::from(carry_in);
        let a = self.a;
        let res = a as u16 + value as u16 + carry as u16;
        self.flags.ac = (a & 0x0f) + (value & 0x0f) + carry > 0x0f;
        self.flags.set_arith(res);
        res as u8
    }

    /// The 8080 subtracts by adding the complement, so AC is the carry out of
    /// bit 3 of `a + !value + !borrow`, not a half-borrow.
    fn sub(&mut self, value: u8, borrow_in: bool) -> u8 {
        let borrow = u8::from(borrow_in);
        let a = self.a;
        let res = (a as u16)
            .wrapping_sub(value as u16)
            .wrapping_sub(borrow as u16);
        self.flags.ac = (a & 0x0f) + (!value & 0x0f) + (1 - borrow) > 0x0f;
        self.flags.set_arith(res);
        res as u8
    }

    /// INR r / INR M. Carry is not affected.
    pub(super) fn exec_inr<B: Bus8080>(&mut self, bus: &mut B, reg: Reg) {
        let value = self.read_reg(bus, reg);
        let r = value.wrapping_add(1);
        self.flags.ac = (value & 0x0f) == 0x0f;
        self.flags.set_zsp(r);
        self.write_reg(bus, reg, r);
    }

    /// DCR r / DCR M. Carry is not affected.
    pub(super) fn exec_dcr<B: Bus8080>(&mut self, bus: &mut B, reg: Reg) {
        let value = self.read_reg(bus, reg);
        let r = value.wrapping_sub(1);
        self.flags.ac = (r & 0x0f) != 0x0f;
        self.flags.set_zsp(r);
        self.write_reg(bus, reg, r);
    }

    pub(super) fn exec_inx(&mut self, pair: RegPair) {
        let value = self.read_pair(pair).wrapping_add(1);
        self.write_pair(pair, value);
    }

    pub(super) fn exec_dcx(&mut self, pair: RegPair) {
        let value = self.read_pair(pair).wrapping_sub(1);
        self.write_pair(pair, value);
    }

    /// DAD rp: HL += rp, carry out of bit 15.
    pub(super) fn exec_dad(&mut self, pair: RegPair) {
        let res = self.hl() as u32 + self.read_pair(pair) as u32;
        self.flags.cy = res > 0xffff;
        self.set_hl(res as u16);
    }

    /// DAA: decimal-adjust the accumulator after a BCD addition.
    ///
    /// Low nibble above 9 (or AC set) adds 6; then a high nibble above 9 (or
    /// CY set) adds 0x60. Carry is set by the second addition and never
    /// cleared by it.
    pub(super) fn exec_daa(&mut self) {
        let mut value = self.a as u16;
        let mut carry = self.flags.cy;

        if (value & 0x0f) > 9 || self.flags.ac {
            self.flags.ac = (value & 0x0f) + 6 > 0x0f;
            value += 6;
        } else {
            self.flags.ac = false;
        }

        if (value >> 4) > 9 || carry {
            value += 0x60;
            carry = carry || value > 0xff;
        }

        self.a = value as u8;
        self.flags.set_zsp(self.a);
        self.flags.cy = carry;
    }

    pub(super) fn exec_rotate(&mut self, kind: Rotation) {
        let a = self.a;
        match kind {
            Rotation::Rlc => {
                self.a = a.rotate_left(1);
                self.flags.cy = (a & 0x80) != 0;
            }
            Rotation::Rrc => {
                self.a = a.rotate_right(1);
                self.flags.cy = (a & 0x01) != 0;
            }
            Rotation::Ral => {
                self.a = (a << 1) | u8::from(self.flags.cy);
                self.flags.cy = (a & 0x80) != 0;
            }
            Rotation::Rar => {
                self.a = (a >> 1) | if self.flags.cy { 0x80 } else { 0 };
                self.flags.cy = (a & 0x01) != 0;
            }
        }
    }
}
