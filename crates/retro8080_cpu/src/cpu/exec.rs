mod alu;
mod control;
mod ld;
mod stack;
mod system;

use super::Cpu8080;
use crate::memory::Bus8080;
use crate::opcode::{Alias, Instruction};

impl Cpu8080 {
    /// Execute a decoded instruction whose opcode byte has already been
    /// fetched. Operand bytes are fetched here.
    ///
    /// Returns `true` when a conditional CALL or RET took its branch, which
    /// costs extra cycles.
    pub(super) fn execute<B: Bus8080>(&mut self, bus: &mut B, instruction: Instruction) -> bool {
        use Instruction::*;

        match instruction {
            Nop => {}

            // Data transfer.
            Mov { dst, src } => self.exec_mov(bus, dst, src),
            Mvi(reg) => self.exec_mvi(bus, reg),
            Lxi(pair) => self.exec_lxi(bus, pair),
            Lda => self.exec_lda(bus),
            Sta => self.exec_sta(bus),
            Lhld => self.exec_lhld(bus),
            Shld => self.exec_shld(bus),
            Ldax(pair) => self.exec_ldax(bus, pair),
            Stax(pair) => self.exec_stax(bus, pair),
            Xchg => self.exec_xchg(),

            // Arithmetic and logic.
            Alu(op, reg) => {
                let value = self.read_reg(bus, reg);
                self.alu(op, value);
            }
            AluImm(op) => {
                let value = self.fetch_byte(bus);
                self.alu(op, value);
            }
            Inr(reg) => self.exec_inr(bus, reg),
            Dcr(reg) => self.exec_dcr(bus, reg),
            Inx(pair) => self.exec_inx(pair),
            Dcx(pair) => self.exec_dcx(pair),
            Dad(pair) => self.exec_dad(pair),
            Daa => self.exec_daa(),
            Rotate(kind) => self.exec_rotate(kind),
            Cma => self.a = !self.a,
            Stc => self.flags.cy = true,
            Cmc => self.flags.cy = !self.flags.cy,

            // Control transfer.
            Jmp => self.exec_jmp(bus, true),
            Jcc(cc) => self.exec_jmp(bus, self.condition(cc)),
            Call => return self.exec_call(bus, true),
            Ccc(cc) => return self.exec_call(bus, self.condition(cc)),
            Ret => return self.exec_ret(bus, true),
            Rcc(cc) => return self.exec_ret(bus, self.condition(cc)),
            Rst(n) => self.exec_rst(bus, n),
            Pchl => self.pc = self.hl(),

            // Stack.
            Push(pair) => self.exec_push(bus, pair),
            Pop(pair) => self.exec_pop(bus, pair),
            Xthl => self.exec_xthl(bus),
            Sphl => self.sp = self.hl(),

            // Machine control and IO.
            Ei => self.interrupts_enabled = true,
            Di => self.interrupts_enabled = false,
            Hlt => self.exec_hlt(),
            In => self.exec_in(bus),
            Out => self.exec_out(bus),

            // Only reached when the CPU is set to run aliases.
            Undocumented(alias) => match alias {
                Alias::Nop => {}
                Alias::Jmp => self.exec_jmp(bus, true),
                Alias::Ret => return self.exec_ret(bus, true),
                Alias::Call => return self.exec_call(bus, true),
            },
        }
        false
    }
}
