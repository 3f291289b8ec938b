//! Intel 8080 instruction-level emulator core and disassembler.
//!
//! [`Cpu8080`] executes one instruction per [`Cpu8080::step`] against any
//! [`Bus8080`]. [`Memory`] is the guarded address space of the Space Invaders
//! board (ROM read-only, a RAM window, unmapped above), and [`Machine`] ties
//! the two together with a [`MachineConfig`].

pub mod config;
pub mod cpu;
pub mod disasm;
pub mod flags;
pub mod machine;
pub mod memory;
pub mod opcode;

pub use config::{ConfigError, MachineConfig, UndocumentedOpcodes};
pub use cpu::{Cpu8080, StepError};
pub use disasm::{disassemble, listing, Disassembled};
pub use flags::{parity, Flags, StatusWord};
pub use machine::{LoadError, Machine, RunError, RunSummary};
pub use memory::{Bus8080, Memory, MemoryMap, Region, WriteFault, MEMORY_SIZE};
pub use opcode::{Instruction, OpcodeInfo, OPCODE_TABLE};
