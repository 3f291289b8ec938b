use crate::cpu::Cpu8080;
use crate::memory::Bus8080;
use crate::opcode::{Reg, RegPair};

impl Cpu8080 {
    pub(super) fn exec_mov<B: Bus8080>(&mut self, bus: &mut B, dst: Reg, src: Reg) {
        let value = self.read_reg(bus, src);
        self.write_reg(bus, dst, value);
    }

    pub(super) fn exec_mvi<B: Bus8080>(&mut self, bus: &mut B, reg: Reg) {
        let value = self.fetch_byte(bus);
        self.write_reg(bus, reg, value);
    }

    pub(super) fn exec_lxi<B: Bus8080>(&mut self, bus: &mut B, pair: RegPair) {
        let value = self.fetch_word(bus);
        self.write_pair(pair, value);
    }

    pub(super) fn exec_lda<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.a = self.read_byte(bus, addr);
    }

    pub(super) fn exec_sta<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.write_byte(bus, addr, self.a);
    }

    pub(super) fn exec_lhld<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.l = self.read_byte(bus, addr);
        self.h = self.read_byte(bus, addr.wrapping_add(1));
    }

    pub(super) fn exec_shld<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        // Store L then H.
        self.write_byte(bus, addr, self.l);
        self.write_byte(bus, addr.wrapping_add(1), self.h);
    }

    /// LDAX B / LDAX D.
    pub(super) fn exec_ldax<B: Bus8080>(&mut self, bus: &mut B, pair: RegPair) {
        debug_assert!(matches!(pair, RegPair::BC | RegPair::DE));
        let addr = self.read_pair(pair);
        self.a = self.read_byte(bus, addr);
    }

    /// STAX B / STAX D.
    pub(super) fn exec_stax<B: Bus8080>(&mut self, bus: &mut B, pair: RegPair) {
        debug_assert!(matches!(pair, RegPair::BC | RegPair::DE));
        let addr = self.read_pair(pair);
        self.write_byte(bus, addr, self.a);
    }

    pub(super) fn exec_xchg(&mut self) {
        core::mem::swap(&mut self.d, &mut self.h);
        core::mem::swap(&mut self.e, &mut self.l);
    }
}
