use retro8080_cpu::{disassemble, Machine, MachineConfig, StepError};

fn machine_with(program: &[u8]) -> Machine {
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_program(program).unwrap();
    machine
}

#[test]
fn load_immediate_then_increment() {
    let mut machine = machine_with(&[0x3e, 0x05, 0x3c]);
    machine.step().unwrap();
    machine.step().unwrap();

    let cpu = machine.cpu();
    assert_eq!(cpu.a, 6);
    assert!(!cpu.flags.z);
    assert!(!cpu.flags.s);
    assert!(cpu.flags.p);
    assert_eq!(cpu.pc, 3);
}

#[test]
fn call_leaves_little_endian_return_address_below_sp() {
    let mut machine = machine_with(&[0xcd, 0x10, 0x00]);
    let sp = machine.cpu().sp;
    assert_eq!(sp, 0x2400);

    assert_eq!(machine.step(), Ok(17));
    assert_eq!(machine.cpu().pc, 0x0010);
    assert_eq!(machine.cpu().sp, sp - 2);
    assert_eq!(machine.memory().read(sp - 2), 0x03);
    assert_eq!(machine.memory().read(sp - 1), 0x00);
}

#[test]
fn disassembles_nop() {
    let d = disassemble(&[0x00], 0);
    assert_eq!(d.text, "NOP");
    assert_eq!(d.len, 1);
}

#[test]
fn stack_in_rom_drops_pushes() {
    let config = MachineConfig::builder().stack_top(0x1000).build();
    let mut machine = Machine::new(config).unwrap();
    // LXI B,$BEEF ; PUSH B ; POP D
    machine
        .load_program(&[0x01, 0xef, 0xbe, 0xc5, 0xd1])
        .unwrap();
    machine.run(3).unwrap();

    // sp still moves; the bytes never land.
    assert_eq!(machine.cpu().sp, 0x1000);
    assert_eq!(machine.cpu().de(), 0x0000);
    assert_eq!(machine.take_write_faults().len(), 2);
}

#[test]
fn subroutine_loop_counts_down() {
    // 0000: LXI SP,$2400
    // 0003: MVI B,$03
    // 0005: CALL $000C
    // 0008: JNZ $0005
    // 000B: HLT
    // 000C: DCR B
    // 000D: RET
    let program = [
        0x31, 0x00, 0x24, 0x06, 0x03, 0xcd, 0x0c, 0x00, 0xc2, 0x05, 0x00, 0x76, 0x05, 0xc9,
    ];
    let mut machine = machine_with(&program);
    let mut steps = 0;
    while machine.cpu().pc != 0x000b {
        machine.step().unwrap();
        steps += 1;
        assert!(steps < 100, "loop did not terminate");
    }
    assert_eq!(machine.cpu().b, 0);
    assert!(machine.cpu().flags.z);
    assert_eq!(machine.cpu().sp, 0x2400);
    assert!(machine.take_write_faults().is_empty());
}

#[test]
fn unknown_opcode_is_a_distinguished_failure() {
    let mut machine = machine_with(&[0x00, 0x00, 0x30]);
    machine.step().unwrap();
    machine.step().unwrap();
    match machine.step() {
        Err(StepError::UnknownOpcode {
            address,
            opcode,
            disassembly,
        }) => {
            assert_eq!(address, 0x0002);
            assert_eq!(opcode, 0x30);
            assert_eq!(disassembly, "UNKNOWN");
        }
        other => panic!("expected an unknown opcode failure, got {other:?}"),
    }
    // The driver can patch memory and carry on.
    machine.memory_mut().load(0x0002, &[0x00]).unwrap();
    assert_eq!(machine.step(), Ok(4));
}

#[test]
fn independent_machines_do_not_share_state() {
    let mut first = machine_with(&[0x3e, 0x01]);
    let mut second = machine_with(&[0x3e, 0x02]);
    first.step().unwrap();
    second.step().unwrap();
    assert_eq!(first.cpu().a, 1);
    assert_eq!(second.cpu().a, 2);
}

#[test]
fn pair_addition_wraps_and_carries() {
    // LXI H,$FFFF ; LXI B,$0001 ; DAD B
    let mut machine = machine_with(&[0x21, 0xff, 0xff, 0x01, 0x01, 0x00, 0x09]);
    machine.run(3).unwrap();
    assert_eq!(machine.cpu().hl(), 0x0000);
    assert!(machine.cpu().flags.cy);
}
