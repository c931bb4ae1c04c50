//! CLI command implementations.

use std::fs;
use std::path::Path;

use intcode_common::{disassemble, Program};
use intcode_net::{NetError, Network, NetworkConfig, Pipeline};
use intcode_vm::{Machine, MachineConfig, OutputPolicy, State};
use log::{debug, info, warn};

use crate::{AmplifyArgs, NetworkArgs, RunArgs, Until};

/// Run a program on one machine and print what it emits.
pub fn run(args: &RunArgs) -> Result<(), i32> {
    let program = load(&args.file)?;

    let mut config = MachineConfig::default().with_fill(args.fill);
    if args.pause_on_output {
        config.output = OutputPolicy::Pause;
    }

    let mut machine = Machine::from_program(&program, config);
    for &(address, value) in &args.set {
        debug!("set [{address}] = {value}");
        machine.poke(address, value);
    }
    machine.append_input(&args.input);
    for line in &args.ascii_input {
        machine.append_ascii(line);
    }

    let state = loop {
        let result = machine.run();
        emit(&mut machine, args.ascii);
        let state = result.map_err(|e| {
            eprintln!("runtime error: {e}");
            3
        })?;
        if state != State::PausedOnOutput {
            break state;
        }
    };

    for &address in &args.peek {
        println!("[{address}] = {}", machine.peek(address));
    }
    if args.stats {
        eprintln!(
            "executed {} instructions, final state: {state}",
            machine.instructions_executed()
        );
    }

    if state == State::AwaitingInput {
        eprintln!("error: machine is awaiting input at address {}", machine.pc());
        return Err(2);
    }
    Ok(())
}

/// Run an amplifier chain or feedback loop and print the final signal.
pub fn amplify(args: &AmplifyArgs) -> Result<(), i32> {
    let program = load(&args.file)?;
    let mut pipeline = Pipeline::new(&program.words, &args.phases).map_err(net_error)?;

    let signal = if args.feedback {
        pipeline.run_feedback(args.signal)
    } else {
        pipeline.run_chain(args.signal)
    }
    .map_err(net_error)?;

    println!("{signal}");
    Ok(())
}

/// Boot a peer network and print the packet it stops on.
pub fn network(args: &NetworkArgs) -> Result<(), i32> {
    let program = load(&args.file)?;
    let config = NetworkConfig {
        size: args.size,
        wake_target: Some(args.wake_target),
        ..NetworkConfig::default()
    };
    let mut network = Network::new(&program.words, config);

    let packet = match args.until {
        Until::Sink => network.run_until_sink(),
        Until::Repeat => network.run_until_repeated_wake(),
    }
    .map_err(net_error)?;

    info!("stopped after {} rounds", network.rounds());
    println!("{} {} {}", packet.dest, packet.x, packet.y);
    Ok(())
}

/// Print a disassembly listing.
pub fn disasm(file: &Path) -> Result<(), i32> {
    let program = load(file)?;
    print!("{}", disassemble(&program));
    Ok(())
}

/// Read and parse a program file. Only the first non-empty line is used.
fn load(path: &Path) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })?;

    let mut programs = Program::parse_all(&text).map_err(|e| {
        eprintln!("error: {}: {e}", path.display());
        1
    })?;
    if programs.len() > 1 {
        warn!(
            "{}: {} programs found, running the first",
            path.display(),
            programs.len()
        );
    }

    let program = programs.swap_remove(0);
    info!("loaded {} words from {}", program.len(), path.display());
    Ok(program)
}

/// Drain the machine's output to stdout.
fn emit(machine: &mut Machine, ascii: bool) {
    if !ascii {
        for value in machine.take_output() {
            println!("{value}");
        }
        return;
    }

    let decoded = machine.take_ascii();
    print!("{}", decoded.text);
    for value in decoded.values {
        println!("{value}");
    }
}

fn net_error(e: NetError) -> i32 {
    eprintln!("error: {e}");
    match e {
        NetError::Machine { .. } => 3,
        NetError::Deadlock => 2,
        _ => 1,
    }
}
