mod exec;

use thiserror::Error;

use crate::config::UndocumentedOpcodes;
use crate::disasm;
use crate::flags::Flags;
use crate::memory::{Bus8080, WriteFault};
use crate::opcode::{Condition, Instruction, OpcodeInfo, Reg, RegPair};

/// Upper bound on rejected writes kept for [`Cpu8080::take_write_faults`].
///
/// Faults past this bound are still logged and counted by
/// [`Cpu8080::write_fault_count`], just not retained.
pub const MAX_PENDING_WRITE_FAULTS: usize = 256;

/// Fatal decode failure returned by [`Cpu8080::step`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The byte at `address` has no assigned behaviour. `pc` is left pointing
    /// at it, so the driver can inspect or patch memory and retry.
    #[error("unknown opcode {opcode:#04x} at {address:#06x}: {disassembly}")]
    UnknownOpcode {
        address: u16,
        opcode: u8,
        disassembly: String,
    },
}

/// Intel 8080 processor state.
///
/// Holds the register file, flags, program counter, stack pointer and the
/// interrupt-enable latch. Memory is reached through a [`Bus8080`] passed to
/// [`Cpu8080::step`], so one CPU value never shares state with another.
#[derive(Default, Clone, Debug)]
pub struct Cpu8080 {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub flags: Flags,
    pub interrupts_enabled: bool,
    pub undocumented: UndocumentedOpcodes,
    write_faults: Vec<WriteFault>,
    write_fault_count: u64,
}

impl Cpu8080 {
    /// Create a new CPU instance in reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers and flags zeroed, `pc` and `sp` at the given addresses.
    pub fn with_entry(pc: u16, sp: u16) -> Self {
        Self {
            pc,
            sp,
            ..Self::default()
        }
    }

    /// Reset all registers to their power-on values, keeping the
    /// undocumented-opcode policy.
    pub fn reset(&mut self, pc: u16, sp: u16) {
        let undocumented = self.undocumented;
        *self = Self::with_entry(pc, sp);
        self.undocumented = undocumented;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    /// Accumulator in the high byte, packed status word in the low byte.
    #[inline]
    pub fn psw(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags.to_psw()])
    }

    #[inline]
    pub fn set_psw(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.flags = Flags::from_psw(f);
    }

    /// Rejected writes since the last call, oldest first.
    pub fn take_write_faults(&mut self) -> Vec<WriteFault> {
        std::mem::take(&mut self.write_faults)
    }

    /// Every rejected write since reset, including those past the retention
    /// bound. Draining with `take_write_faults` does not lower it.
    pub fn write_fault_count(&self) -> u64 {
        self.write_fault_count
    }

    /// Execute a single instruction and return the number of cycles consumed.
    ///
    /// An undocumented opcode is refused unless the CPU is configured to run
    /// its documented alias; a refusal leaves `pc` on the offending byte.
    pub fn step<B: Bus8080>(&mut self, bus: &mut B) -> Result<u32, StepError> {
        let address = self.pc;
        let raw = self.fetch_byte(bus);

        let info = OpcodeInfo::of(raw);
        if matches!(info.instruction, Instruction::Undocumented(_))
            && self.undocumented == UndocumentedOpcodes::Reject
        {
            return Err(self.unknown_opcode(bus, address, raw));
        }

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{:04x}: {:02x} {:<5} a={:02x} bc={:04x} de={:04x} hl={:04x} sp={:04x} f={:02x}",
                address,
                raw,
                info.mnemonic,
                self.a,
                self.bc(),
                self.de(),
                self.hl(),
                self.sp,
                self.flags.to_psw()
            );
        }

        let taken = self.execute(bus, info.instruction);
        Ok(info.cycles_for(taken))
    }

    fn unknown_opcode<B: Bus8080>(&mut self, bus: &mut B, address: u16, opcode: u8) -> StepError {
        self.pc = address;
        let window = [
            bus.mem_read(address),
            bus.mem_read(address.wrapping_add(1)),
            bus.mem_read(address.wrapping_add(2)),
        ];
        let disassembly = disasm::disassemble(&window, 0).text;
        log::error!("Unknown instruction at {address:04x}: {disassembly}");
        StepError::UnknownOpcode {
            address,
            opcode,
            disassembly,
        }
    }

    fn fetch_byte<B: Bus8080>(&mut self, bus: &mut B) -> u8 {
        let b = bus.mem_read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    fn fetch_word<B: Bus8080>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch_byte(bus);
        let hi = self.fetch_byte(bus);
        u16::from_le_bytes([lo, hi])
    }

    fn read_byte<B: Bus8080>(&mut self, bus: &mut B, addr: u16) -> u8 {
        bus.mem_read(addr)
    }

    fn write_byte<B: Bus8080>(&mut self, bus: &mut B, addr: u16, value: u8) {
        if let Err(fault) = bus.mem_write(addr, value) {
            log::warn!("{fault} (pc={:04x})", self.pc);
            self.write_fault_count = self.write_fault_count.saturating_add(1);
            if self.write_faults.len() < MAX_PENDING_WRITE_FAULTS {
                self.write_faults.push(fault);
            }
        }
    }

    /// Read an 8-bit register or, for `M`, the byte at HL.
    fn read_reg<B: Bus8080>(&mut self, bus: &mut B, reg: Reg) -> u8 {
        match reg {
            Reg::B => self.b,
            Reg::C => self.c,
            Reg::D => self.d,
            Reg::E => self.e,
            Reg::H => self.h,
            Reg::L => self.l,
            Reg::M => {
                let addr = self.hl();
                self.read_byte(bus, addr)
            }
            Reg::A => self.a,
        }
    }

    fn write_reg<B: Bus8080>(&mut self, bus: &mut B, reg: Reg, value: u8) {
        match reg {
            Reg::B => self.b = value,
            Reg::C => self.c = value,
            Reg::D => self.d = value,
            Reg::E => self.e = value,
            Reg::H => self.h = value,
            Reg::L => self.l = value,
            Reg::M => {
                let addr = self.hl();
                self.write_byte(bus, addr, value);
            }
            Reg::A => self.a = value,
        }
    }

    fn read_pair(&self, pair: RegPair) -> u16 {
        match pair {
            RegPair::BC => self.bc(),
            RegPair::DE => self.de(),
            RegPair::HL => self.hl(),
            RegPair::SP => self.sp,
        }
    }

    fn write_pair(&mut self, pair: RegPair, value: u16) {
        match pair {
            RegPair::BC => self.set_bc(value),
            RegPair::DE => self.set_de(value),
            RegPair::HL => self.set_hl(value),
            RegPair::SP => self.sp = value,
        }
    }

    /// Push a word: low byte at `sp-2`, high byte at `sp-1`, then `sp -= 2`.
    fn push<B: Bus8080>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        let addr = self.sp.wrapping_sub(2);
        self.write_byte(bus, addr, lo);
        self.write_byte(bus, addr.wrapping_add(1), hi);
        self.sp = addr;
    }

    /// Pop a word: low byte at `sp`, high byte at `sp+1`, then `sp += 2`.
    fn pop<B: Bus8080>(&mut self, bus: &mut B) -> u16 {
        let lo = self.read_byte(bus, self.sp);
        let hi = self.read_byte(bus, self.sp.wrapping_add(1));
        self.sp = self.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    fn condition(&self, cc: Condition) -> bool {
        match cc {
            Condition::NotZero => !self.flags.z,
            Condition::Zero => self.flags.z,
            Condition::NoCarry => !self.flags.cy,
            Condition::Carry => self.flags.cy,
            Condition::ParityOdd => !self.flags.p,
            Condition::ParityEven => self.flags.p,
            Condition::Plus => !self.flags.s,
            Condition::Minus => self.flags.s,
        }
    }
}
