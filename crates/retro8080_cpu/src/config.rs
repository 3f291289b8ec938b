use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::memory::{MemoryMap, MEMORY_SIZE};

/// End of ROM on the Space Invaders board.
pub const DEFAULT_ROM_END: usize = 0x2000;
/// End of RAM on the Space Invaders board; everything above is unmapped.
pub const DEFAULT_RAM_END: usize = 0x4000;
/// Top of the stack as set up by the Space Invaders ROM.
pub const DEFAULT_STACK_TOP: u16 = 0x2400;

/// What the executor does with the twelve undocumented opcode bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UndocumentedOpcodes {
    /// Stop with [`StepError::UnknownOpcode`](crate::StepError::UnknownOpcode).
    #[default]
    Reject,
    /// Execute the documented instruction the silicon aliases them to:
    /// NOP for 0x08-0x38, JMP for 0xCB, RET for 0xD9, CALL for 0xDD/0xED/0xFD.
    Alias,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ROM end {rom_end:#06x} lies above RAM end {ram_end:#06x}")]
    RomAboveRam { rom_end: usize, ram_end: usize },
    #[error("RAM end {ram_end:#06x} lies beyond the 64 KiB address space")]
    RamBeyondAddressSpace { ram_end: usize },
}

/// Machine setup: memory map, reset vector and opcode policy.
///
/// The defaults describe the Space Invaders board.
#[derive(TypedBuilder, Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    #[builder(default = DEFAULT_ROM_END)]
    pub rom_end: usize,
    #[builder(default = DEFAULT_RAM_END)]
    pub ram_end: usize,
    /// Initial program counter.
    #[builder(default = 0x0000)]
    pub entry_point: u16,
    /// Initial stack pointer.
    #[builder(default = DEFAULT_STACK_TOP)]
    pub stack_top: u16,
    /// Where `Machine::load_program` places the image.
    #[builder(default = 0x0000)]
    pub load_address: u16,
    #[builder(default)]
    pub undocumented: UndocumentedOpcodes,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MachineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ram_end > MEMORY_SIZE {
            return Err(ConfigError::RamBeyondAddressSpace {
                ram_end: self.ram_end,
            });
        }
        if self.rom_end > self.ram_end {
            return Err(ConfigError::RomAboveRam {
                rom_end: self.rom_end,
                ram_end: self.ram_end,
            });
        }
        Ok(())
    }

    pub fn memory_map(&self) -> MemoryMap {
        MemoryMap {
            rom_end: self.rom_end,
            ram_end: self.ram_end,
        }
    }
}
