//! Intel 8080 disassembler.
//!
//! Renders one instruction at a time as text and reports how many bytes it
//! occupies. It never fails: undocumented bytes come out as
//! [`UNKNOWN_MNEMONIC`](crate::opcode::UNKNOWN_MNEMONIC) with length 1, and
//! operand bytes past the end of the image read as zero.

use std::fmt;

use crate::opcode::{Instruction, OpcodeInfo};

/// A single disassembled instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disassembled {
    /// Offset of the opcode byte in the image.
    pub offset: usize,
    /// The encoded bytes that were present in the image.
    pub bytes: Vec<u8>,
    /// Encoded length (1, 2 or 3), which the caller advances by.
    pub len: usize,
    /// Mnemonic and operands, e.g. `MVI A,#$05`.
    pub text: String,
}

impl fmt::Display for Disassembled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self
            .bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{:04X}  {:<8}  {}", self.offset, hex, self.text)
    }
}

/// Disassemble the instruction at `offset` in `image`.
pub fn disassemble(image: &[u8], offset: usize) -> Disassembled {
    let byte_at = |i: usize| image.get(offset + i).copied().unwrap_or(0);

    let info = OpcodeInfo::of(byte_at(0));
    let len = info.len();
    let d8 = byte_at(1);
    let d16 = u16::from_le_bytes([byte_at(1), byte_at(2)]);

    let text = match operands(info.instruction, d8, d16) {
        Some(operands) => format!("{} {}", info.mnemonic, operands),
        None => info.mnemonic.to_string(),
    };

    let end = (offset + len).min(image.len());
    let bytes = image.get(offset..end).map(<[u8]>::to_vec).unwrap_or_default();

    Disassembled {
        offset,
        bytes,
        len,
        text,
    }
}

fn operands(instruction: Instruction, d8: u8, d16: u16) -> Option<String> {
    use Instruction::*;

    let rendered = match instruction {
        Mov { dst, src } => format!("{},{}", dst.name(), src.name()),
        Mvi(reg) => format!("{},#${d8:02X}", reg.name()),
        Lxi(pair) => format!("{},#${d16:04X}", pair.name()),
        Lda | Sta | Lhld | Shld | Jmp | Jcc(_) | Call | Ccc(_) => format!("${d16:04X}"),
        Ldax(pair) | Stax(pair) | Inx(pair) | Dcx(pair) | Dad(pair) => pair.name().to_string(),
        Alu(_, reg) | Inr(reg) | Dcr(reg) => reg.name().to_string(),
        AluImm(_) | In | Out => format!("#${d8:02X}"),
        Rst(n) => n.to_string(),
        Push(pair) | Pop(pair) => pair.name().to_string(),
        _ => return None,
    };
    Some(rendered)
}

/// Iterator over the instructions of an image, back to back from offset 0.
pub struct Listing<'a> {
    image: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Listing<'a> {
    type Item = Disassembled;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.image.len() {
            return None;
        }
        let instruction = disassemble(self.image, self.offset);
        self.offset += instruction.len;
        Some(instruction)
    }
}

/// Disassemble a whole image from offset 0 to the end.
pub fn listing(image: &[u8]) -> Listing<'_> {
    Listing { image, offset: 0 }
}
