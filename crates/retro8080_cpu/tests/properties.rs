use proptest::prelude::*;

use retro8080_cpu::{parity, Bus8080, Cpu8080, Flags, Memory, MemoryMap, WriteFault};

struct FlatBus {
    mem: Vec<u8>,
}

impl FlatBus {
    fn with_program(program: &[u8]) -> Self {
        let mut mem = vec![0; 0x10000];
        mem[..program.len()].copy_from_slice(program);
        Self { mem }
    }
}

impl Bus8080 for FlatBus {
    fn mem_read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn mem_write(&mut self, addr: u16, value: u8) -> Result<(), WriteFault> {
        self.mem[addr as usize] = value;
        Ok(())
    }
}

fn any_flags() -> impl Strategy<Value = Flags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(z, s, p, cy, ac)| Flags { z, s, p, cy, ac },
    )
}

#[test]
fn parity_over_every_byte() {
    for v in 0..=255u8 {
        assert_eq!(parity(v), v.count_ones() % 2 == 0);
    }
}

proptest! {
    #[test]
    fn psw_push_pop_round_trip(flags in any_flags(), a in any::<u8>()) {
        // PUSH PSW ; MVI A,0 ; XRA A ; POP PSW
        let mut bus = FlatBus::with_program(&[0xf5, 0x3e, 0x00, 0xaf, 0xf1]);
        let mut cpu = Cpu8080::with_entry(0x0000, 0x8000);
        cpu.a = a;
        cpu.flags = flags;
        for _ in 0..4 {
            cpu.step(&mut bus).unwrap();
        }
        prop_assert_eq!(cpu.flags, flags);
        prop_assert_eq!(cpu.a, a);
        prop_assert_eq!(cpu.sp, 0x8000);
    }

    #[test]
    fn push_pop_restores_pair_and_sp(sp in 0x0010u16..=0xffff, value in any::<u16>()) {
        // PUSH B ; LXI B,0 ; POP B
        let mut bus = FlatBus::with_program(&[0xc5, 0x01, 0x00, 0x00, 0xc1]);
        let mut cpu = Cpu8080::with_entry(0x0000, sp);
        cpu.set_bc(value);
        for _ in 0..3 {
            cpu.step(&mut bus).unwrap();
        }
        prop_assert_eq!(cpu.bc(), value);
        prop_assert_eq!(cpu.sp, sp);
    }

    #[test]
    fn guard_only_admits_ram_writes(addr in any::<u16>(), value in 1u8..=255) {
        let mut memory = Memory::new(MemoryMap::SPACE_INVADERS);
        let before = memory.read(addr);
        let result = memory.write(addr, value);
        if (0x2000..0x4000).contains(&addr) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(memory.read(addr), value);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(memory.read(addr), before);
        }
    }

    #[test]
    fn dad_matches_wide_addition(hl in any::<u16>(), bc in any::<u16>()) {
        let mut bus = FlatBus::with_program(&[0x09]);
        let mut cpu = Cpu8080::new();
        cpu.set_hl(hl);
        cpu.set_bc(bc);
        cpu.step(&mut bus).unwrap();
        let wide = hl as u32 + bc as u32;
        prop_assert_eq!(cpu.hl(), wide as u16);
        prop_assert_eq!(cpu.flags.cy, wide > 0xffff);
    }

    #[test]
    fn add_matches_wide_addition(a in any::<u8>(), b in any::<u8>()) {
        let mut bus = FlatBus::with_program(&[0x80]);
        let mut cpu = Cpu8080::new();
        cpu.a = a;
        cpu.b = b;
        cpu.step(&mut bus).unwrap();
        let wide = a as u16 + b as u16;
        prop_assert_eq!(cpu.a, wide as u8);
        prop_assert_eq!(cpu.flags.cy, wide > 0xff);
        prop_assert_eq!(cpu.flags.z, wide as u8 == 0);
        prop_assert_eq!(cpu.flags.p, parity(wide as u8));
    }

    #[test]
    fn cmp_leaves_accumulator(a in any::<u8>(), b in any::<u8>()) {
        let mut bus = FlatBus::with_program(&[0xb8]);
        let mut cpu = Cpu8080::new();
        cpu.a = a;
        cpu.b = b;
        cpu.step(&mut bus).unwrap();
        prop_assert_eq!(cpu.a, a);
        prop_assert_eq!(cpu.flags.z, a == b);
        prop_assert_eq!(cpu.flags.cy, a < b);
    }
}
