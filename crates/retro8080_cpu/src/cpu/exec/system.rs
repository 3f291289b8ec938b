use crate::cpu::Cpu8080;
use crate::memory::Bus8080;

impl Cpu8080 {
    /// HLT is a no-op: there is no halted state, the driver keeps stepping.
    pub(super) fn exec_hlt(&mut self) {
        log::debug!("HLT at {:04x} treated as NOP", self.pc.wrapping_sub(1));
    }

    /// IN port: the port number is consumed, the accumulator is untouched.
    pub(super) fn exec_in<B: Bus8080>(&mut self, bus: &mut B) {
        let port = self.fetch_byte(bus);
        log::trace!("IN {port:#04x} ignored");
    }

    /// OUT port: the port number is consumed, nothing is written.
    pub(super) fn exec_out<B: Bus8080>(&mut self, bus: &mut B) {
        let port = self.fetch_byte(bus);
        log::trace!("OUT {port:#04x} ignored (a={:02x})", self.a);
    }
}
