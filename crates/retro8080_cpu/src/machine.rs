use thiserror::Error;

use crate::config::{ConfigError, MachineConfig};
use crate::cpu::{Cpu8080, StepError};
use crate::disasm::{self, Disassembled};
use crate::memory::{Memory, WriteFault};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("program image of {len} bytes does not fit at {offset:#06x} ({capacity} bytes available)")]
    ImageTooLarge {
        len: usize,
        offset: u16,
        capacity: usize,
    },
}

/// Instructions completed and cycles spent by [`Machine::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub cycles: u64,
}

/// A run cut short by a decode failure. `summary` counts the instructions
/// that completed before it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct RunError {
    pub summary: RunSummary,
    pub error: StepError,
}

/// An 8080 together with its guarded memory.
///
/// One value is one independent machine; nothing is shared between
/// instances.
#[derive(Debug)]
pub struct Machine {
    cpu: Cpu8080,
    memory: Memory,
    config: MachineConfig,
}

impl Machine {
    /// Construct a machine in reset state with zeroed memory.
    pub fn new(config: MachineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut cpu = Cpu8080::with_entry(config.entry_point, config.stack_top);
        cpu.undocumented = config.undocumented;
        Ok(Self {
            cpu,
            memory: Memory::new(config.memory_map()),
            config,
        })
    }

    /// Reset registers to the configured entry point and stack top,
    /// preserving memory contents.
    pub fn reset(&mut self) {
        log::debug!(
            "reset: pc={:04x} sp={:04x}",
            self.config.entry_point,
            self.config.stack_top
        );
        self.cpu.reset(self.config.entry_point, self.config.stack_top);
    }

    /// Load a program image at the configured load address.
    ///
    /// The image goes in regardless of the memory map, so this is how ROM gets
    /// populated.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.memory.load(self.config.load_address, image)?;
        log::debug!(
            "loaded {} bytes at {:04x}",
            image.len(),
            self.config.load_address
        );
        Ok(())
    }

    /// Execute one instruction, returning its cycle cost.
    pub fn step(&mut self) -> Result<u32, StepError> {
        self.cpu.step(&mut self.memory)
    }

    /// Step up to `max_steps` instructions, stopping early on a decode failure.
    pub fn run(&mut self, max_steps: u64) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();
        while summary.steps < max_steps {
            let cycles = self
                .step()
                .map_err(|error| RunError { summary, error })?;
            summary.steps += 1;
            summary.cycles = summary.cycles.saturating_add(cycles as u64);
        }
        Ok(summary)
    }

    /// Disassemble the instruction at `addr`.
    pub fn disassemble_at(&self, addr: u16) -> Disassembled {
        disasm::disassemble(self.memory.as_slice(), addr as usize)
    }

    /// Rejected writes since the last call.
    pub fn take_write_faults(&mut self) -> Vec<WriteFault> {
        self.cpu.take_write_faults()
    }

    /// All rejected writes since reset, retained or not.
    pub fn write_fault_count(&self) -> u64 {
        self.cpu.write_fault_count()
    }

    pub fn cpu(&self) -> &Cpu8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu8080 {
        &mut self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            cpu: Cpu8080::with_entry(0x0000, crate::config::DEFAULT_STACK_TOP),
            memory: Memory::default(),
            config: MachineConfig::default(),
        }
    }
}
