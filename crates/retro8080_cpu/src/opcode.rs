//! Opcode decoding and the static per-opcode table.
//!
//! Every one of the 256 opcode bytes decodes to an [`Instruction`]. Bytes the
//! 8080 leaves unassigned decode to [`Instruction::Undocumented`], so the
//! executor never has to guess about a missing table entry.

/// 8-bit operand selector, in the order used by the opcode encoding:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=M (memory at HL), 7=A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Reg {
    const fn from_index(index: u8) -> Reg {
        match index & 0x07 {
            0 => Reg::B,
            1 => Reg::C,
            2 => Reg::D,
            3 => Reg::E,
            4 => Reg::H,
            5 => Reg::L,
            6 => Reg::M,
            _ => Reg::A,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Reg::B => "B",
            Reg::C => "C",
            Reg::D => "D",
            Reg::E => "E",
            Reg::H => "H",
            Reg::L => "L",
            Reg::M => "M",
            Reg::A => "A",
        }
    }
}

/// Register pair used by LXI, INX, DCX, DAD, LDAX and STAX.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegPair {
    BC,
    DE,
    HL,
    SP,
}

impl RegPair {
    const fn from_index(index: u8) -> RegPair {
        match index & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::SP,
        }
    }

    /// Assembler name of the pair (the 8080 names a pair after its high register).
    pub const fn name(self) -> &'static str {
        match self {
            RegPair::BC => "B",
            RegPair::DE => "D",
            RegPair::HL => "H",
            RegPair::SP => "SP",
        }
    }
}

/// Register pair used by PUSH and POP. PSW is the accumulator plus the status word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackPair {
    BC,
    DE,
    HL,
    PSW,
}

impl StackPair {
    const fn from_index(index: u8) -> StackPair {
        match index & 0x03 {
            0 => StackPair::BC,
            1 => StackPair::DE,
            2 => StackPair::HL,
            _ => StackPair::PSW,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            StackPair::BC => "B",
            StackPair::DE => "D",
            StackPair::HL => "H",
            StackPair::PSW => "PSW",
        }
    }
}

/// Condition codes for Jcc, Ccc and Rcc, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    const fn from_index(index: u8) -> Condition {
        match index & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    /// Mnemonic suffix, e.g. `NZ` in `JNZ`.
    pub const fn suffix(self) -> &'static str {
        match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NoCarry => "NC",
            Condition::Carry => "C",
            Condition::ParityOdd => "PO",
            Condition::ParityEven => "PE",
            Condition::Plus => "P",
            Condition::Minus => "M",
        }
    }
}

/// Accumulator operations of the 0x80-0xBF block and their immediate forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    const fn from_index(index: u8) -> AluOp {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbb,
            4 => AluOp::Ana,
            5 => AluOp::Xra,
            6 => AluOp::Ora,
            _ => AluOp::Cmp,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Adc => "ADC",
            AluOp::Sub => "SUB",
            AluOp::Sbb => "SBB",
            AluOp::Ana => "ANA",
            AluOp::Xra => "XRA",
            AluOp::Ora => "ORA",
            AluOp::Cmp => "CMP",
        }
    }

    pub const fn immediate_mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADI",
            AluOp::Adc => "ACI",
            AluOp::Sub => "SUI",
            AluOp::Sbb => "SBI",
            AluOp::Ana => "ANI",
            AluOp::Xra => "XRI",
            AluOp::Ora => "ORI",
            AluOp::Cmp => "CPI",
        }
    }
}

/// Accumulator rotates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Rotate left, bit 7 into bit 0 and carry.
    Rlc,
    /// Rotate right, bit 0 into bit 7 and carry.
    Rrc,
    /// Rotate left through carry.
    Ral,
    /// Rotate right through carry.
    Rar,
}

/// A decoded opcode byte.
///
/// Operands are not part of the descriptor: the executor fetches them from
/// the bytes following the opcode, and [`Instruction::operand_bytes`] says how
/// many there are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Nop,
    Mov { dst: Reg, src: Reg },
    Mvi(Reg),
    Lxi(RegPair),
    Lda,
    Sta,
    Lhld,
    Shld,
    Ldax(RegPair),
    Stax(RegPair),
    Xchg,
    Alu(AluOp, Reg),
    AluImm(AluOp),
    Inr(Reg),
    Dcr(Reg),
    Inx(RegPair),
    Dcx(RegPair),
    Dad(RegPair),
    Daa,
    Rotate(Rotation),
    Cma,
    Stc,
    Cmc,
    Jmp,
    Jcc(Condition),
    Call,
    Ccc(Condition),
    Ret,
    Rcc(Condition),
    Rst(u8),
    Pchl,
    Sphl,
    Xthl,
    Push(StackPair),
    Pop(StackPair),
    Ei,
    Di,
    Hlt,
    In,
    Out,
    /// One of the twelve bytes with no documented meaning, together with the
    /// documented instruction the silicon runs in its place.
    Undocumented(Alias),
}

/// What an undocumented opcode byte does on real hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alias {
    Nop,
    Jmp,
    Ret,
    Call,
}

impl Alias {
    /// The documented opcode byte with the same behaviour.
    pub const fn opcode(self) -> u8 {
        match self {
            Alias::Nop => 0x00,
            Alias::Jmp => 0xc3,
            Alias::Ret => 0xc9,
            Alias::Call => 0xcd,
        }
    }
}

impl Instruction {
    /// Decode an opcode byte. Total over all 256 values.
    pub const fn decode(opcode: u8) -> Instruction {
        use Instruction::*;

        let y = (opcode >> 3) & 0x07;
        let p = (opcode >> 4) & 0x03;

        match opcode {
            0x00 => Nop,
            0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => Undocumented(Alias::Nop),

            0x01 | 0x11 | 0x21 | 0x31 => Lxi(RegPair::from_index(p)),
            0x09 | 0x19 | 0x29 | 0x39 => Dad(RegPair::from_index(p)),
            0x03 | 0x13 | 0x23 | 0x33 => Inx(RegPair::from_index(p)),
            0x0b | 0x1b | 0x2b | 0x3b => Dcx(RegPair::from_index(p)),

            0x02 | 0x12 => Stax(RegPair::from_index(p)),
            0x0a | 0x1a => Ldax(RegPair::from_index(p)),
            0x22 => Shld,
            0x2a => Lhld,
            0x32 => Sta,
            0x3a => Lda,

            0x04 | 0x0c | 0x14 | 0x1c | 0x24 | 0x2c | 0x34 | 0x3c => Inr(Reg::from_index(y)),
            0x05 | 0x0d | 0x15 | 0x1d | 0x25 | 0x2d | 0x35 | 0x3d => Dcr(Reg::from_index(y)),
            0x06 | 0x0e | 0x16 | 0x1e | 0x26 | 0x2e | 0x36 | 0x3e => Mvi(Reg::from_index(y)),

            0x07 => Rotate(Rotation::Rlc),
            0x0f => Rotate(Rotation::Rrc),
            0x17 => Rotate(Rotation::Ral),
            0x1f => Rotate(Rotation::Rar),
            0x27 => Daa,
            0x2f => Cma,
            0x37 => Stc,
            0x3f => Cmc,

            0x76 => Hlt,
            0x40..=0x75 | 0x77..=0x7f => Mov {
                dst: Reg::from_index(y),
                src: Reg::from_index(opcode),
            },

            0x80..=0xbf => Alu(AluOp::from_index(y), Reg::from_index(opcode)),

            0xc0 | 0xc8 | 0xd0 | 0xd8 | 0xe0 | 0xe8 | 0xf0 | 0xf8 => {
                Rcc(Condition::from_index(y))
            }
            0xc2 | 0xca | 0xd2 | 0xda | 0xe2 | 0xea | 0xf2 | 0xfa => {
                Jcc(Condition::from_index(y))
            }
            0xc4 | 0xcc | 0xd4 | 0xdc | 0xe4 | 0xec | 0xf4 | 0xfc => {
                Ccc(Condition::from_index(y))
            }
            0xc6 | 0xce | 0xd6 | 0xde | 0xe6 | 0xee | 0xf6 | 0xfe => {
                AluImm(AluOp::from_index(y))
            }
            0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => Rst(y),

            0xc1 | 0xd1 | 0xe1 | 0xf1 => Pop(StackPair::from_index(p)),
            0xc5 | 0xd5 | 0xe5 | 0xf5 => Push(StackPair::from_index(p)),

            0xc3 => Jmp,
            0xc9 => Ret,
            0xcd => Call,
            0xcb => Undocumented(Alias::Jmp),
            0xd9 => Undocumented(Alias::Ret),
            0xdd | 0xed | 0xfd => Undocumented(Alias::Call),

            0xd3 => Out,
            0xdb => In,
            0xe3 => Xthl,
            0xe9 => Pchl,
            0xeb => Xchg,
            0xf3 => Di,
            0xf9 => Sphl,
            0xfb => Ei,
        }
    }

    /// Number of operand bytes following the opcode (0, 1 or 2).
    pub const fn operand_bytes(self) -> u8 {
        use Instruction::*;

        match self {
            Mvi(_) | AluImm(_) | In | Out => 1,
            Lxi(_) | Lda | Sta | Lhld | Shld | Jmp | Jcc(_) | Call | Ccc(_) => 2,
            _ => 0,
        }
    }

    /// Total encoded length including the opcode byte.
    pub const fn len(self) -> u8 {
        1 + self.operand_bytes()
    }

    /// Bare mnemonic, without operands.
    pub const fn mnemonic(self) -> &'static str {
        use Instruction::*;

        match self {
            Nop => "NOP",
            Mov { .. } => "MOV",
            Mvi(_) => "MVI",
            Lxi(_) => "LXI",
            Lda => "LDA",
            Sta => "STA",
            Lhld => "LHLD",
            Shld => "SHLD",
            Ldax(_) => "LDAX",
            Stax(_) => "STAX",
            Xchg => "XCHG",
            Alu(op, _) => op.mnemonic(),
            AluImm(op) => op.immediate_mnemonic(),
            Inr(_) => "INR",
            Dcr(_) => "DCR",
            Inx(_) => "INX",
            Dcx(_) => "DCX",
            Dad(_) => "DAD",
            Daa => "DAA",
            Rotate(Rotation::Rlc) => "RLC",
            Rotate(Rotation::Rrc) => "RRC",
            Rotate(Rotation::Ral) => "RAL",
            Rotate(Rotation::Rar) => "RAR",
            Cma => "CMA",
            Stc => "STC",
            Cmc => "CMC",
            Jmp => "JMP",
            Jcc(cc) => match cc {
                Condition::NotZero => "JNZ",
                Condition::Zero => "JZ",
                Condition::NoCarry => "JNC",
                Condition::Carry => "JC",
                Condition::ParityOdd => "JPO",
                Condition::ParityEven => "JPE",
                Condition::Plus => "JP",
                Condition::Minus => "JM",
            },
            Call => "CALL",
            Ccc(cc) => match cc {
                Condition::NotZero => "CNZ",
                Condition::Zero => "CZ",
                Condition::NoCarry => "CNC",
                Condition::Carry => "CC",
                Condition::ParityOdd => "CPO",
                Condition::ParityEven => "CPE",
                Condition::Plus => "CP",
                Condition::Minus => "CM",
            },
            Ret => "RET",
            Rcc(cc) => match cc {
                Condition::NotZero => "RNZ",
                Condition::Zero => "RZ",
                Condition::NoCarry => "RNC",
                Condition::Carry => "RC",
                Condition::ParityOdd => "RPO",
                Condition::ParityEven => "RPE",
                Condition::Plus => "RP",
                Condition::Minus => "RM",
            },
            Rst(_) => "RST",
            Pchl => "PCHL",
            Sphl => "SPHL",
            Xthl => "XTHL",
            Push(_) => "PUSH",
            Pop(_) => "POP",
            Ei => "EI",
            Di => "DI",
            Hlt => "HLT",
            In => "IN",
            Out => "OUT",
            Undocumented(_) => UNKNOWN_MNEMONIC,
        }
    }

    /// Base cycle cost: the unconditional cost, or the not-taken cost of a
    /// conditional CALL/RET. Undocumented bytes cost what their alias costs.
    pub const fn cycles(self) -> u8 {
        use Instruction::*;

        match self {
            Nop => 4,
            Mov { dst: Reg::M, .. } | Mov { src: Reg::M, .. } => 7,
            Mov { .. } => 5,
            Mvi(Reg::M) => 10,
            Mvi(_) => 7,
            Lxi(_) => 10,
            Lda | Sta => 13,
            Lhld | Shld => 16,
            Ldax(_) | Stax(_) => 7,
            Xchg => 4,
            Alu(_, Reg::M) => 7,
            Alu(_, _) => 4,
            AluImm(_) => 7,
            Inr(Reg::M) | Dcr(Reg::M) => 10,
            Inr(_) | Dcr(_) => 5,
            Inx(_) | Dcx(_) => 5,
            Dad(_) => 10,
            Daa | Rotate(_) | Cma | Stc | Cmc => 4,
            Jmp | Jcc(_) => 10,
            Call => 17,
            Ccc(_) => 11,
            Ret => 10,
            Rcc(_) => 5,
            Rst(_) => 11,
            Pchl | Sphl => 5,
            Xthl => 18,
            Push(_) => 11,
            Pop(_) => 10,
            Ei | Di => 4,
            Hlt => 7,
            In | Out => 10,
            Undocumented(alias) => Instruction::decode(alias.opcode()).cycles(),
        }
    }

    /// Extra cycles spent when a conditional CALL or RET takes its branch.
    pub const fn taken_extra_cycles(self) -> u8 {
        match self {
            Instruction::Ccc(_) | Instruction::Rcc(_) => 6,
            _ => 0,
        }
    }
}

/// Mnemonic rendered for opcode bytes with no documented meaning.
pub const UNKNOWN_MNEMONIC: &str = "UNKNOWN";

/// One row of the opcode table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub opcode: u8,
    pub instruction: Instruction,
    pub mnemonic: &'static str,
    pub operand_bytes: u8,
    pub cycles: u8,
    pub taken_extra_cycles: u8,
}

impl OpcodeInfo {
    const fn new(opcode: u8) -> Self {
        let instruction = Instruction::decode(opcode);
        Self {
            opcode,
            instruction,
            mnemonic: instruction.mnemonic(),
            operand_bytes: instruction.operand_bytes(),
            cycles: instruction.cycles(),
            taken_extra_cycles: instruction.taken_extra_cycles(),
        }
    }

    /// Look up the table entry of an opcode byte.
    #[inline]
    pub fn of(opcode: u8) -> &'static OpcodeInfo {
        &OPCODE_TABLE[opcode as usize]
    }

    /// Encoded length including the opcode byte.
    #[inline]
    pub const fn len(&self) -> usize {
        1 + self.operand_bytes as usize
    }

    /// Cycles consumed by one execution of this opcode.
    #[inline]
    pub const fn cycles_for(&self, branch_taken: bool) -> u32 {
        if branch_taken {
            self.cycles as u32 + self.taken_extra_cycles as u32
        } else {
            self.cycles as u32
        }
    }
}

const fn build_table() -> [OpcodeInfo; 256] {
    let mut table = [OpcodeInfo::new(0); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = OpcodeInfo::new(i as u8);
        i += 1;
    }
    table
}

/// Per-opcode mnemonic, operand length and cycle cost, indexed by opcode byte.
pub static OPCODE_TABLE: [OpcodeInfo; 256] = build_table();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_twelve_undocumented_opcodes() {
        let undocumented: Vec<u8> = OPCODE_TABLE
            .iter()
            .filter(|info| matches!(info.instruction, Instruction::Undocumented(_)))
            .map(|info| info.opcode)
            .collect();
        assert_eq!(
            undocumented,
            vec![0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0xcb, 0xd9, 0xdd, 0xed, 0xfd]
        );
        for opcode in undocumented {
            let Instruction::Undocumented(alias) = Instruction::decode(opcode) else {
                panic!("{opcode:#04x} decoded as a documented instruction")
            };
            let documented = OpcodeInfo::of(alias.opcode());
            assert!(!matches!(documented.instruction, Instruction::Undocumented(_)));
            assert_eq!(OpcodeInfo::of(opcode).cycles, documented.cycles);
            assert_eq!(OpcodeInfo::of(opcode).mnemonic, UNKNOWN_MNEMONIC);
            assert_eq!(OpcodeInfo::of(opcode).len(), 1);
        }
    }

    #[test]
    fn table_rows_are_indexed_by_opcode() {
        for (i, info) in OPCODE_TABLE.iter().enumerate() {
            assert_eq!(info.opcode as usize, i);
        }
    }

    #[test]
    fn decodes_register_fields() {
        assert_eq!(
            Instruction::decode(0x41),
            Instruction::Mov {
                dst: Reg::B,
                src: Reg::C
            }
        );
        assert_eq!(
            Instruction::decode(0x77),
            Instruction::Mov {
                dst: Reg::M,
                src: Reg::A
            }
        );
        assert_eq!(Instruction::decode(0x76), Instruction::Hlt);
        assert_eq!(Instruction::decode(0x9e), Instruction::Alu(AluOp::Sbb, Reg::M));
        assert_eq!(Instruction::decode(0xfe), Instruction::AluImm(AluOp::Cmp));
        assert_eq!(Instruction::decode(0x31), Instruction::Lxi(RegPair::SP));
        assert_eq!(Instruction::decode(0xf5), Instruction::Push(StackPair::PSW));
        assert_eq!(Instruction::decode(0xef), Instruction::Rst(5));
        assert_eq!(Instruction::decode(0xe2), Instruction::Jcc(Condition::ParityOdd));
        assert_eq!(Instruction::decode(0xfc), Instruction::Ccc(Condition::Minus));
        assert_eq!(Instruction::decode(0xd8), Instruction::Rcc(Condition::Carry));
    }

    #[test]
    fn lengths_match_operand_encoding() {
        assert_eq!(OpcodeInfo::of(0x00).len(), 1);
        assert_eq!(OpcodeInfo::of(0x3e).len(), 2);
        assert_eq!(OpcodeInfo::of(0xdb).len(), 2);
        assert_eq!(OpcodeInfo::of(0x01).len(), 3);
        assert_eq!(OpcodeInfo::of(0xcd).len(), 3);
        assert_eq!(OpcodeInfo::of(0xc4).len(), 3);
        assert_eq!(OpcodeInfo::of(0xc0).len(), 1);
    }

    #[test]
    fn cycle_costs() {
        assert_eq!(OpcodeInfo::of(0x00).cycles_for(false), 4);
        assert_eq!(OpcodeInfo::of(0x7e).cycles_for(false), 7);
        assert_eq!(OpcodeInfo::of(0x78).cycles_for(false), 5);
        assert_eq!(OpcodeInfo::of(0x36).cycles_for(false), 10);
        assert_eq!(OpcodeInfo::of(0xe3).cycles_for(false), 18);
        assert_eq!(OpcodeInfo::of(0xc4).cycles_for(false), 11);
        assert_eq!(OpcodeInfo::of(0xc4).cycles_for(true), 17);
        assert_eq!(OpcodeInfo::of(0xc8).cycles_for(true), 11);
        assert_eq!(OpcodeInfo::of(0xc2).cycles_for(true), 10);
    }
}
