//! Integration tests for the Intcode machine.
//!
//! Organized by instruction group, then by execution-model behavior
//! (suspension, cloning, memory growth).

use intcode_common::{DecodeError, Program};
use intcode_vm::{run, Machine, MachineConfig, RuntimeError, State};
use proptest::prelude::*;

// ============================================================
// Helper functions
// ============================================================

/// Run to the first suspension and return the machine.
fn boot(memory: &[i64], input: &[i64]) -> Machine {
    let mut machine = Machine::new(memory.to_vec()).with_input(input);
    machine.run().unwrap();
    machine
}

/// Run with input and return the single value emitted.
fn single_output(memory: &[i64], input: i64) -> i64 {
    let output = run(memory, &[input]).unwrap();
    assert_eq!(output.len(), 1, "expected one output, got {output:?}");
    output[0]
}

/// Prints a copy of itself using relative addressing.
const QUINE: [i64; 16] = [
    109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
];

/// Outputs 999 below 8, 1000 for 8, 1001 above 8.
const COMPARE_TO_EIGHT: [i64; 47] = [
    3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98, 0, 0,
    1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20, 4, 20, 1105,
    1, 46, 98, 99,
];

// ============================================================
// Arithmetic
// ============================================================

#[test]
fn add_multiply_smoke_test() {
    let machine = boot(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50], &[]);
    assert_eq!(machine.state(), State::Halted);
    assert_eq!(machine.peek(0), 3500);
    assert_eq!(machine.memory(), &[3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]);
}

#[test]
fn small_arithmetic_programs() {
    let cases: [(&[i64], &[i64]); 4] = [
        (&[1, 0, 0, 0, 99], &[2, 0, 0, 0, 99]),
        (&[2, 3, 0, 3, 99], &[2, 3, 0, 6, 99]),
        (&[2, 4, 4, 5, 99, 0], &[2, 4, 4, 5, 99, 9801]),
        (&[1, 1, 1, 4, 99, 5, 6, 0, 99], &[30, 1, 1, 4, 2, 5, 6, 0, 99]),
    ];
    for (program, expected) in cases {
        assert_eq!(boot(program, &[]).memory(), expected, "program {program:?}");
    }
}

#[test]
fn immediate_and_position_mix() {
    let machine = boot(&[1002, 4, 3, 4, 33], &[]);
    assert_eq!(machine.memory(), &[1002, 4, 3, 4, 99]);
    assert_eq!(machine.state(), State::Halted);
}

#[test]
fn negative_immediates() {
    let machine = boot(&[1101, 100, -1, 4, 0], &[]);
    assert_eq!(machine.memory(), &[1101, 100, -1, 4, 99]);
}

#[test]
fn large_numbers() {
    assert_eq!(
        run(&[1102, 34_915_192, 34_915_192, 7, 4, 7, 99, 0], &[]).unwrap(),
        vec![1_219_070_632_396_864]
    );
    assert_eq!(
        run(&[104, 1_125_899_906_842_624, 99], &[]).unwrap(),
        vec![1_125_899_906_842_624]
    );
}

// ============================================================
// Comparison and jumps
// ============================================================

#[test]
fn equals_position_mode() {
    let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
    assert_eq!(single_output(&program, 8), 1);
    assert_eq!(single_output(&program, 7), 0);
}

#[test]
fn less_than_position_mode() {
    let program = [3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];
    assert_eq!(single_output(&program, 7), 1);
    assert_eq!(single_output(&program, 8), 0);
}

#[test]
fn equals_immediate_mode() {
    let program = [3, 3, 1108, -1, 8, 3, 4, 3, 99];
    assert_eq!(single_output(&program, 8), 1);
    assert_eq!(single_output(&program, 9), 0);
}

#[test]
fn less_than_immediate_mode() {
    let program = [3, 3, 1107, -1, 8, 3, 4, 3, 99];
    assert_eq!(single_output(&program, -5), 1);
    assert_eq!(single_output(&program, 8), 0);
}

#[test]
fn jump_position_mode() {
    let program = [3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];
    assert_eq!(single_output(&program, 0), 0);
    assert_eq!(single_output(&program, 5), 1);
}

#[test]
fn jump_immediate_mode() {
    let program = [3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];
    assert_eq!(single_output(&program, 0), 0);
    assert_eq!(single_output(&program, -3), 1);
}

#[test]
fn compare_to_eight_branches() {
    assert_eq!(single_output(&COMPARE_TO_EIGHT, 7), 999);
    assert_eq!(single_output(&COMPARE_TO_EIGHT, 8), 1000);
    assert_eq!(single_output(&COMPARE_TO_EIGHT, 9), 1001);
}

// ============================================================
// Relative mode
// ============================================================

#[test]
fn quine_outputs_itself() {
    let machine = boot(&QUINE, &[]);
    assert_eq!(machine.state(), State::Halted);
    assert_eq!(machine.output(), &QUINE);
}

#[test]
fn relative_base_accumulates() {
    // arb 2000; arb 19; out [rb-34] -> cell 1985
    let mut machine = Machine::new(vec![109, 2000, 109, 19, 204, -34, 99]);
    machine.poke(1985, 31_337);
    machine.run().unwrap();
    assert_eq!(machine.relative_base(), 2019);
    assert_eq!(machine.take_output(), vec![31_337]);
}

// ============================================================
// Suspension
// ============================================================

#[test]
fn starved_machine_resumes_with_input() {
    let mut machine = Machine::new(vec![3, 0, 4, 0, 99]);
    assert_eq!(machine.run().unwrap(), State::AwaitingInput);
    assert!(machine.output().is_empty());

    machine.append_input(&[-12]);
    assert_eq!(machine.run().unwrap(), State::Halted);
    assert_eq!(machine.take_output(), vec![-12]);
}

#[test]
fn starved_again_after_partial_input() {
    // in, in, add, out, halt
    let program = [3, 11, 3, 12, 1, 11, 12, 13, 4, 13, 99, 0, 0, 0];
    let mut machine = Machine::new(program.to_vec()).with_input(&[4]);
    assert_eq!(machine.run().unwrap(), State::AwaitingInput);
    assert_eq!(machine.pc(), 2);
    assert!(machine.pending_input().is_empty());

    machine.append_input(&[5]);
    assert_eq!(machine.run().unwrap(), State::Halted);
    assert_eq!(machine.output(), &[9]);
}

#[test]
fn pause_policy_yields_one_value_per_run() {
    let mut machine = Machine::with_config(QUINE.to_vec(), MachineConfig::pausing());
    let mut collected = Vec::new();
    loop {
        let state = machine.run().unwrap();
        let emitted = machine.take_output();
        if state == State::Halted {
            assert!(emitted.is_empty());
            break;
        }
        assert_eq!(state, State::PausedOnOutput);
        assert_eq!(emitted.len(), 1);
        collected.extend(emitted);
    }
    assert_eq!(collected, QUINE);
}

#[test]
fn pause_policy_emits_exactly_one_value_before_suspending() {
    let mut machine =
        Machine::with_config(vec![104, 1, 104, 2, 99], MachineConfig::pausing());
    assert_eq!(machine.run().unwrap(), State::PausedOnOutput);
    assert_eq!(machine.take_output(), vec![1]);
    assert_eq!(machine.run().unwrap(), State::PausedOnOutput);
    assert_eq!(machine.take_output(), vec![2]);
    assert_eq!(machine.run().unwrap(), State::Halted);
    assert!(machine.take_output().is_empty());
}

#[test]
fn halted_machine_ignores_further_runs() {
    let mut machine = Machine::new(vec![104, 7, 99]);
    assert_eq!(machine.run().unwrap(), State::Halted);
    let snapshot = machine.clone();

    machine.append_input(&[1, 2, 3]);
    assert_eq!(machine.run().unwrap(), State::Halted);
    assert_eq!(machine.output(), snapshot.output());
    assert_eq!(machine.pc(), snapshot.pc());
    assert_eq!(machine.instructions_executed(), snapshot.instructions_executed());
}

#[test]
fn draining_empty_output_is_harmless() {
    let mut machine = Machine::new(vec![99]);
    assert!(machine.take_output().is_empty());
    assert_eq!(machine.run().unwrap(), State::Halted);
    assert!(machine.take_output().is_empty());
}

// ============================================================
// Cloning
// ============================================================

#[test]
fn clone_is_independent() {
    let mut original = Machine::new(vec![3, 0, 4, 0, 99]);
    original.run().unwrap();
    let snapshot = original.clone();

    let mut fork = original.clone();
    fork.append_input(&[5]);
    fork.run().unwrap();
    fork.poke(200, 1);

    assert_eq!(original, snapshot);
    assert_eq!(original.state(), State::AwaitingInput);
    assert_eq!(fork.state(), State::Halted);
    assert_eq!(fork.output(), &[5]);
}

#[test]
fn speculative_exploration() {
    // Try every input on a clone and keep the one that yields 1000.
    let mut machine = Machine::new(COMPARE_TO_EIGHT.to_vec());
    assert_eq!(machine.run().unwrap(), State::AwaitingInput);

    let winner = (0..20)
        .find(|&guess| {
            let mut fork = machine.clone();
            fork.append_input(&[guess]);
            fork.run().unwrap();
            fork.output() == [1000]
        })
        .unwrap();

    assert_eq!(winner, 8);
    assert_eq!(machine.state(), State::AwaitingInput);
    assert!(machine.output().is_empty());
}

// ============================================================
// Memory
// ============================================================

#[test]
fn write_far_beyond_program() {
    // add 7 + 0 -> [1000]; out [500]; halt
    let mut machine = Machine::new(vec![1101, 7, 0, 1000, 4, 500, 99]);
    machine.run().unwrap();
    assert_eq!(machine.memory().len(), 1001);
    assert_eq!(machine.peek(1000), 7);
    assert_eq!(machine.output(), &[0]);
    assert!(machine.memory()[7..1000].iter().all(|&cell| cell == 0));
}

#[test]
fn custom_fill_value() {
    let config = MachineConfig::default().with_fill(-9);
    let mut machine = Machine::with_config(vec![4, 50, 99], config);
    machine.run().unwrap();
    assert_eq!(machine.output(), &[-9]);
}

#[test]
fn noun_verb_patching() {
    let program = Program::parse("1,0,0,3,1,1,2,3,1,3,4,3,1,5,0,3,2,1,10,19,99").unwrap();
    let mut machine = Machine::from_program(&program, MachineConfig::default());
    machine.poke(1, 12);
    machine.poke(2, 2);
    machine.run().unwrap();
    // The final multiply stores [1] * [10] = 12 * 4 into cell 19.
    assert_eq!(machine.peek(19), 48);
}

// ============================================================
// Faults
// ============================================================

#[test]
fn decode_fault_reports_word_and_pc() {
    let err = run(&[104, 1, 77, 99], &[]).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Decode {
            at: 2,
            source: DecodeError::UnknownOpcode(77)
        }
    );
    assert_eq!(err.to_string(), "unknown opcode in word 77 at address 2");
}

#[test]
fn fault_keeps_output_emitted_before_it() {
    let mut machine = Machine::new(vec![104, 1, 77, 99]);
    assert!(machine.run().is_err());
    assert_eq!(machine.state(), State::Halted);
    assert_eq!(machine.output(), &[1]);
}

// ============================================================
// Properties
// ============================================================

proptest! {
    /// Delivering input before the first run or after a starvation gives the
    /// same result, as long as order is preserved.
    #[test]
    fn input_timing_does_not_matter(value in -1000i64..1000) {
        let mut early = Machine::new(COMPARE_TO_EIGHT.to_vec()).with_input(&[value]);
        early.run().unwrap();

        let mut late = Machine::new(COMPARE_TO_EIGHT.to_vec());
        prop_assert_eq!(late.run().unwrap(), State::AwaitingInput);
        late.append_input(&[value]);
        late.run().unwrap();

        prop_assert_eq!(early.state(), late.state());
        prop_assert_eq!(early.output(), late.output());
        prop_assert_eq!(early.memory(), late.memory());
    }

    /// Well-formed programs only ever stop halted or starved.
    #[test]
    fn run_stops_halted_or_awaiting(inputs in prop::collection::vec(-50i64..50, 0..3)) {
        let programs: [&[i64]; 4] = [
            &COMPARE_TO_EIGHT,
            &QUINE,
            &[3, 0, 4, 0, 99],
            &[3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8],
        ];
        for program in programs {
            let mut machine = Machine::new(program.to_vec()).with_input(&inputs);
            let state = machine.run().unwrap();
            prop_assert!(matches!(state, State::Halted | State::AwaitingInput));
        }
    }

    /// Cells past the image read as the fill value until written.
    #[test]
    fn untouched_cells_hold_fill(address in 10usize..5000, fill in any::<i64>()) {
        // out [address]; halt
        let config = MachineConfig::default().with_fill(fill);
        let mut machine = Machine::with_config(vec![4, address as i64, 99], config);
        machine.run().unwrap();
        prop_assert_eq!(machine.output(), &[fill]);
        prop_assert_eq!(machine.memory().len(), address + 1);
    }

    /// Running a clone never disturbs the original.
    #[test]
    fn clones_never_alias(value in any::<i64>()) {
        let mut original = Machine::new(vec![3, 0, 4, 0, 99]);
        original.run().unwrap();
        let before = original.clone();

        let mut fork = original.clone();
        fork.append_input(&[value]);
        fork.run().unwrap();

        prop_assert_eq!(&original, &before);
        prop_assert_eq!(fork.output(), &[value]);
    }
}
