use thiserror::Error;

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Simple bus interface for an Intel 8080-compatible CPU core.
///
/// The CPU uses this trait to access memory without knowing anything about
/// the concrete machine. Writes may be refused; the CPU records the fault and
/// carries on.
pub trait Bus8080 {
    fn mem_read(&mut self, addr: u16) -> u8;
    fn mem_write(&mut self, addr: u16, value: u8) -> Result<(), WriteFault>;
}

/// A rejected memory write. Memory is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFault {
    #[error("SEGFAULT: write of {value:#04x} to read-only region at {address:#06x}")]
    ReadOnly { address: u16, value: u8 },
    #[error("SEGFAULT: write of {value:#04x} outside addressable RAM at {address:#06x}")]
    Unmapped { address: u16, value: u8 },
}

impl WriteFault {
    pub fn address(&self) -> u16 {
        match *self {
            WriteFault::ReadOnly { address, .. } | WriteFault::Unmapped { address, .. } => address,
        }
    }
}

/// Address-space zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Rom,
    Ram,
    Unmapped,
}

/// Partition of the address space: ROM is `0..rom_end`, RAM is
/// `rom_end..ram_end`, and everything above is unmapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryMap {
    pub rom_end: usize,
    pub ram_end: usize,
}

impl MemoryMap {
    /// The Space Invaders board: ROM 0x0000-0x1fff, RAM 0x2000-0x3fff.
    pub const SPACE_INVADERS: MemoryMap = MemoryMap {
        rom_end: 0x2000,
        ram_end: 0x4000,
    };

    /// Every address is writable.
    pub const FLAT: MemoryMap = MemoryMap {
        rom_end: 0,
        ram_end: MEMORY_SIZE,
    };

    pub fn region(&self, addr: u16) -> Region {
        let addr = addr as usize;
        if addr < self.rom_end {
            Region::Rom
        } else if addr < self.ram_end {
            Region::Ram
        } else {
            Region::Unmapped
        }
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::SPACE_INVADERS
    }
}

/// Guarded linear memory.
///
/// Reads are unrestricted. Writes succeed only inside the RAM window of the
/// [`MemoryMap`]; anything else is refused with a [`WriteFault`].
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8]>,
    map: MemoryMap,
}

impl Memory {
    pub fn new(map: MemoryMap) -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
            map,
        }
    }

    pub fn map(&self) -> MemoryMap {
        self.map
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), WriteFault> {
        match self.map.region(addr) {
            Region::Ram => {
                self.bytes[addr as usize] = value;
                Ok(())
            }
            Region::Rom => Err(WriteFault::ReadOnly {
                address: addr,
                value,
            }),
            Region::Unmapped => Err(WriteFault::Unmapped {
                address: addr,
                value,
            }),
        }
    }

    /// Copy `image` into memory starting at `offset`, bypassing the guard.
    ///
    /// This is how ROM contents get there in the first place.
    pub fn load(&mut self, offset: u16, image: &[u8]) -> Result<(), crate::LoadError> {
        let start = offset as usize;
        let capacity = MEMORY_SIZE - start;
        if image.len() > capacity {
            return Err(crate::LoadError::ImageTooLarge {
                len: image.len(),
                offset,
                capacity,
            });
        }
        self.bytes[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }

    /// The whole address space, e.g. for disassembly.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(MemoryMap::default())
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("size", &self.bytes.len())
            .field("map", &self.map)
            .finish()
    }
}

impl Bus8080 for Memory {
    fn mem_read(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn mem_write(&mut self, addr: u16, value: u8) -> Result<(), WriteFault> {
        self.write(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_land_only_in_ram() {
        let mut memory = Memory::new(MemoryMap::SPACE_INVADERS);

        assert_eq!(
            memory.write(0x1fff, 0xaa),
            Err(WriteFault::ReadOnly {
                address: 0x1fff,
                value: 0xaa
            })
        );
        assert_eq!(memory.read(0x1fff), 0);

        assert_eq!(memory.write(0x2000, 0xaa), Ok(()));
        assert_eq!(memory.read(0x2000), 0xaa);
        assert_eq!(memory.write(0x3fff, 0xbb), Ok(()));
        assert_eq!(memory.read(0x3fff), 0xbb);

        assert_eq!(
            memory.write(0x4000, 0xcc),
            Err(WriteFault::Unmapped {
                address: 0x4000,
                value: 0xcc
            })
        );
        assert_eq!(memory.read(0x4000), 0);
    }

    #[test]
    fn load_bypasses_guard_and_reads_are_unrestricted() {
        let mut memory = Memory::new(MemoryMap::SPACE_INVADERS);
        memory.load(0x0000, &[0x3e, 0x05]).unwrap();
        memory.load(0x8000, &[0x11]).unwrap();
        assert_eq!(memory.read(0x0000), 0x3e);
        assert_eq!(memory.read(0x0001), 0x05);
        assert_eq!(memory.read(0x8000), 0x11);
    }

    #[test]
    fn load_rejects_oversized_images() {
        let mut memory = Memory::default();
        let image = vec![0u8; 0x11];
        let err = memory.load(0xfff0, &image).unwrap_err();
        assert_eq!(
            err,
            crate::LoadError::ImageTooLarge {
                len: 0x11,
                offset: 0xfff0,
                capacity: 0x10,
            }
        );
        memory.load(0xfff0, &image[..0x10]).unwrap();
    }

    #[test]
    fn fault_messages_name_the_region() {
        let fault = WriteFault::ReadOnly {
            address: 0x0010,
            value: 0x01,
        };
        assert_eq!(
            fault.to_string(),
            "SEGFAULT: write of 0x01 to read-only region at 0x0010"
        );
        assert_eq!(fault.address(), 0x0010);
    }

    #[test]
    fn flat_map_accepts_every_address() {
        let mut memory = Memory::new(MemoryMap::FLAT);
        assert!(memory.write(0x0000, 1).is_ok());
        assert!(memory.write(0xffff, 2).is_ok());
        assert_eq!(memory.read(0xffff), 2);
    }
}
