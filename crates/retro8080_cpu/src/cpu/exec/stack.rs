use crate::cpu::Cpu8080;
use crate::memory::Bus8080;
use crate::opcode::StackPair;

impl Cpu8080 {
    pub(super) fn exec_push<B: Bus8080>(&mut self, bus: &mut B, pair: StackPair) {
        let value = match pair {
            StackPair::BC => self.bc(),
            StackPair::DE => self.de(),
            StackPair::HL => self.hl(),
            StackPair::PSW => self.psw(),
        };
        self.push(bus, value);
    }

    pub(super) fn exec_pop<B: Bus8080>(&mut self, bus: &mut B, pair: StackPair) {
        let value = self.pop(bus);
        match pair {
            StackPair::BC => self.set_bc(value),
            StackPair::DE => self.set_de(value),
            StackPair::HL => self.set_hl(value),
            StackPair::PSW => self.set_psw(value),
        }
    }

    /// XTHL: exchange HL with the word at the top of the stack.
    pub(super) fn exec_xthl<B: Bus8080>(&mut self, bus: &mut B) {
        let lo = self.read_byte(bus, self.sp);
        let hi = self.read_byte(bus, self.sp.wrapping_add(1));
        let [l, h] = self.hl().to_le_bytes();
        self.write_byte(bus, self.sp, l);
        self.write_byte(bus, self.sp.wrapping_add(1), h);
        self.set_hl(u16::from_le_bytes([lo, hi]));
    }
}
