//! Linear-sweep disassembler: memory image → listing text.
//!
//! One line per instruction, prefixed with its address. Words that do not
//! decode, or whose operands would run past the end of the image, are listed
//! as `data`. Intcode freely mixes code and data and may rewrite itself, so
//! the listing is a best-effort view of the initial image only.

use crate::instruction::Instruction;
use crate::mode::Mode;
use crate::program::Program;

/// Disassemble a program into a listing.
pub fn disassemble(program: &Program) -> String {
    let words = &program.words;
    let mut lines = Vec::new();
    let mut i = 0;

    while i < words.len() {
        let decoded = Instruction::decode(words[i])
            .ok()
            .filter(|instr| i + instr.opcode.width() <= words.len());

        let line = match decoded {
            Some(instr) => {
                let operands: Vec<String> = (0..instr.opcode.operand_count())
                    .map(|n| format_operand(instr.mode(n), words[i + 1 + n]))
                    .collect();
                let text = if operands.is_empty() {
                    instr.opcode.mnemonic().to_string()
                } else {
                    format!("{} {}", instr.opcode.mnemonic(), operands.join(", "))
                };
                let listing = format!("{i:>5}: {text}");
                i += instr.opcode.width();
                listing
            }
            None => {
                let listing = format!("{i:>5}: data {}", words[i]);
                i += 1;
                listing
            }
        };
        lines.push(line);
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn format_operand(mode: Mode, literal: i64) -> String {
    match mode {
        Mode::Position => format!("[{literal}]"),
        Mode::Immediate => literal.to_string(),
        Mode::Relative if literal < 0 => format!("[rb{literal}]"),
        Mode::Relative => format!("[rb+{literal}]"),
    }
}
