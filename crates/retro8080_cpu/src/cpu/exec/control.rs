use crate::cpu::Cpu8080;
use crate::memory::Bus8080;

impl Cpu8080 {
    /// JMP / Jcc. The address operand is consumed whether or not the jump
    /// is taken.
    pub(super) fn exec_jmp<B: Bus8080>(&mut self, bus: &mut B, taken: bool) {
        let addr = self.fetch_word(bus);
        if taken {
            self.pc = addr;
        }
    }

    /// CALL / Ccc. The pushed return address is the instruction after the
    /// call.
    pub(super) fn exec_call<B: Bus8080>(&mut self, bus: &mut B, taken: bool) -> bool {
        let addr = self.fetch_word(bus);
        if taken {
            self.push(bus, self.pc);
            self.pc = addr;
        }
        taken
    }

    /// RET / Rcc.
    pub(super) fn exec_ret<B: Bus8080>(&mut self, bus: &mut B, taken: bool) -> bool {
        if taken {
            self.pc = self.pop(bus);
        }
        taken
    }

    /// RST n: call to the fixed address 8 * n.
    pub(super) fn exec_rst<B: Bus8080>(&mut self, bus: &mut B, vector: u8) {
        self.push(bus, self.pc);
        self.pc = u16::from(vector & 0x07) << 3;
    }
}
