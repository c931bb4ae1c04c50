//! Fetch-decode-execute loop and opcode dispatch.

use intcode_common::{Instruction, Mode, Opcode, MAX_OPERANDS};
use log::{debug, trace};

use crate::error::RuntimeError;
use crate::machine::{Machine, OutputPolicy};
use crate::state::State;

/// Operands resolved before dispatch. Of an instruction's operands, the
/// trailing `write_operands()` are destinations; the rest are read.
#[derive(Debug, Default)]
struct Operands {
    reads: [i64; MAX_OPERANDS],
    writes: [usize; MAX_OPERANDS],
}

impl Machine {
    /// Execute until the machine halts or suspends, and return the state it
    /// stopped in.
    ///
    /// Running a halted machine does nothing and returns `Halted`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if an instruction cannot be decoded or an
    /// operand resolves to an invalid address. The machine is left halted.
    pub fn run(&mut self) -> Result<State, RuntimeError> {
        if self.state.is_halted() {
            return Ok(State::Halted);
        }
        self.transition(State::Running)?;

        loop {
            match self.step() {
                Ok(None) => {}
                Ok(Some(next)) => {
                    self.transition(next)?;
                    return Ok(next);
                }
                Err(err) => {
                    debug!("machine fault: {err}");
                    self.state = State::Halted;
                    return Err(err);
                }
            }
        }
    }

    /// Execute one instruction. Returns the state to leave the loop in, or
    /// `None` to keep going.
    fn step(&mut self) -> Result<Option<State>, RuntimeError> {
        let at = self.pc;
        let word = self.memory.read(at);
        let instr =
            Instruction::decode(word).map_err(|source| RuntimeError::Decode { at, source })?;
        trace!("{at:>6}: {word:<6} {:?} rb={}", instr.opcode, self.relative_base);

        if instr.opcode == Opcode::Input && self.input_cursor >= self.input.len() {
            // The read re-executes once input arrives.
            return Ok(Some(State::AwaitingInput));
        }
        let ops = self.resolve(&instr)?;

        let suspend = match instr.opcode {
            Opcode::Halt => Some(State::Halted),
            Opcode::Add => self.exec_binary(&instr, &ops, i64::wrapping_add),
            Opcode::Multiply => self.exec_binary(&instr, &ops, i64::wrapping_mul),
            Opcode::LessThan => self.exec_binary(&instr, &ops, |a, b| i64::from(a < b)),
            Opcode::Equals => self.exec_binary(&instr, &ops, |a, b| i64::from(a == b)),
            Opcode::Input => {
                let value = self.input[self.input_cursor];
                self.input_cursor += 1;
                self.memory.write(ops.writes[0], value);
                self.advance(&instr);
                None
            }
            Opcode::Output => {
                let value = ops.reads[0];
                trace!("output {value}");
                self.output.push(value);
                self.advance(&instr);
                match self.config.output {
                    OutputPolicy::Pause => Some(State::PausedOnOutput),
                    OutputPolicy::Continue => None,
                }
            }
            Opcode::JumpIfTrue => self.exec_jump(&instr, &ops, |a| a != 0)?,
            Opcode::JumpIfFalse => self.exec_jump(&instr, &ops, |a| a == 0)?,
            Opcode::AdjustBase => {
                self.relative_base = self.relative_base.wrapping_add(ops.reads[0]);
                self.advance(&instr);
                None
            }
        };

        self.executed += 1;
        Ok(suspend)
    }

    // ---- Operand resolution ----

    /// Resolve every operand of `instr`: values for the leading read
    /// operands, addresses for the trailing write operands.
    fn resolve(&mut self, instr: &Instruction) -> Result<Operands, RuntimeError> {
        let count = instr.opcode.operand_count();
        let reads = count - instr.opcode.write_operands();
        let mut ops = Operands::default();
        for n in 0..reads {
            ops.reads[n] = self.operand(instr, n)?;
        }
        for n in reads..count {
            ops.writes[n - reads] = self.destination(instr, n)?;
        }
        Ok(ops)
    }

    /// Raw word stored in operand slot `n`.
    fn literal(&mut self, n: usize) -> i64 {
        self.memory.read(self.pc.saturating_add(1 + n))
    }

    /// Resolve a read operand to its value.
    fn operand(&mut self, instr: &Instruction, n: usize) -> Result<i64, RuntimeError> {
        let literal = self.literal(n);
        match instr.mode(n) {
            Mode::Position => {
                let address = self.address(literal)?;
                Ok(self.memory.read(address))
            }
            Mode::Immediate => Ok(literal),
            Mode::Relative => {
                let address = self.address(self.relative_base.wrapping_add(literal))?;
                Ok(self.memory.read(address))
            }
        }
    }

    /// Resolve a write operand to its target address.
    fn destination(&mut self, instr: &Instruction, n: usize) -> Result<usize, RuntimeError> {
        let literal = self.literal(n);
        match instr.mode(n) {
            Mode::Position => self.address(literal),
            Mode::Relative => self.address(self.relative_base.wrapping_add(literal)),
            Mode::Immediate => Err(RuntimeError::ImmediateWrite { at: self.pc }),
        }
    }

    fn address(&self, raw: i64) -> Result<usize, RuntimeError> {
        usize::try_from(raw).map_err(|_| RuntimeError::NegativeAddress {
            at: self.pc,
            address: raw,
        })
    }

    fn advance(&mut self, instr: &Instruction) {
        self.pc = self.pc.saturating_add(instr.opcode.width());
    }

    // ---- Opcode groups ----

    /// `c = op(a, b)`: add, multiply and the two comparisons.
    fn exec_binary(
        &mut self,
        instr: &Instruction,
        ops: &Operands,
        op: fn(i64, i64) -> i64,
    ) -> Option<State> {
        self.memory.write(ops.writes[0], op(ops.reads[0], ops.reads[1]));
        self.advance(instr);
        None
    }

    fn exec_jump(
        &mut self,
        instr: &Instruction,
        ops: &Operands,
        taken: fn(i64) -> bool,
    ) -> Result<Option<State>, RuntimeError> {
        if taken(ops.reads[0]) {
            self.pc = self.address(ops.reads[1])?;
        } else {
            self.advance(instr);
        }
        Ok(None)
    }
}
