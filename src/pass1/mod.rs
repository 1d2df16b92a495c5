//! # Pass 1
//!
//! Scans the source once, building the symbol table: every label is bound
//! to the location counter's value at the point it is declared, and every
//! directive mutates the location counter the way [`Directive::apply`]
//! describes. The reference's `buildSymbolTable` drives this with a
//! `startSeen` sticky flag (no directive or instruction is legal before
//! `START`) and rejects any further instruction once `END` has been seen;
//! both rules are reproduced here.


use crate::directive::DirectiveTable;
use crate::error::{AsmError, DirectiveError, OpcodeError};
use crate::line::{split_line, strip_comment};
use crate::opcode::OpcodeTable;
use crate::symbol_table::{validate_symbol_name, EndAddress, SymbolTable};

/// Bytes a single SIC/XE instruction occupies in object code. XE format-4
/// instructions are out of scope (see [`crate::error::OpcodeError::XEditionNotSupported`]);
/// every recognized instruction is a 3-byte format-3 instruction.
pub const INSTRUCTION_BYTES: u32 = 3;

#[derive(Debug)]
pub struct Pass1Output {
    pub symbol_table: SymbolTable,
    pub program_name: String,
}

/// Run pass 1 over `source`, returning the resolved symbol table and
/// program name, or the first error encountered.
pub fn run(
    source: &str,
    opcodes: &OpcodeTable,
    directives: &DirectiveTable,
    xe_enabled: bool,
) -> Result<Pass1Output, AsmError> {
    let mut symbol_table = SymbolTable::new();
    let mut program_name = String::new();
    let mut end_seen_at: Option<u32> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_num = (idx + 1) as u32;
        let content = strip_comment(raw_line);
        if content.trim().is_empty() {
            continue;
        }

        let split = match split_line(content, directives, opcodes) {
            Some(split) => split,
            None => continue,
        };

        if end_seen_at.is_some() {
            return Err(AsmError::directive(line_num, DirectiveError::EndSeen));
        }

        let is_directive = directives.get(split.mnemonic);
        let is_opcode = opcodes.get(split.mnemonic);

        if let Some(label) = split.label {
            validate_label(label, directives, opcodes, line_num)?;
            if symbol_table.start_address().is_some() {
                let addr = symbol_table.loc_counter().unwrap_or(0);
                symbol_table.bind(label, addr).map_err(|_| {
                    AsmError::DuplicateSymbol {
                        line: line_num,
                        token: label.to_string(),
                    }
                })?;
            }
            if is_directive == Some(crate::directive::Directive::Start) {
                program_name = label.to_string();
            }
        }

        if let Some(directive) = is_directive {
            directive
                .apply(&mut symbol_table, split.operand_raw)
                .map_err(|source| AsmError::directive(line_num, source))?;
            if directive == crate::directive::Directive::End {
                end_seen_at = Some(line_num);
            }
            continue;
        }

        if let Some(entry) = is_opcode {
            symbol_table
                .require_start_defined()
                .map_err(|source| AsmError::directive(line_num, source))?;
            if (entry.flags.xe_only || entry.flags.floating_point) && !xe_enabled {
                return Err(AsmError::opcode(
                    line_num,
                    OpcodeError::XEditionNotSupported {
                        token: split.mnemonic.to_string(),
                    },
                ));
            }
            check_operand_count(entry, split.operand_raw, split.mnemonic, line_num)?;
            symbol_table.advance_loc_counter(INSTRUCTION_BYTES);
            continue;
        }

        return Err(AsmError::UnknownToken {
            line: line_num,
            token: split.mnemonic.to_string(),
        });
    }

    if end_seen_at.is_none() {
        return Err(AsmError::directive(
            (source.lines().count() as u32).max(1),
            DirectiveError::EndNotDefined,
        ));
    }

    Ok(Pass1Output {
        symbol_table,
        program_name,
    })
}

fn validate_label(
    label: &str,
    directives: &DirectiveTable,
    opcodes: &OpcodeTable,
    line_num: u32,
) -> Result<(), AsmError> {
    validate_symbol_name(label).map_err(|source| AsmError::symbol(line_num, source))?;
    if directives.contains(label) {
        return Err(AsmError::directive(
            line_num,
            DirectiveError::SymbolMatchesDirective {
                token: label.to_string(),
            },
        ));
    }
    if opcodes.contains(label) {
        return Err(AsmError::opcode(
            line_num,
            OpcodeError::SymbolMatchesInstruction {
                token: label.to_string(),
            },
        ));
    }
    Ok(())
}

fn check_operand_count(
    entry: &crate::opcode::OpcodeEntry,
    operand_raw: &str,
    mnemonic: &str,
    line_num: u32,
) -> Result<(), AsmError> {
    let found = if operand_raw.trim().is_empty() {
        0
    } else {
        operand_raw.split_whitespace().count() as u8
    };
    if entry.num_operands > 0 && found == 0 {
        return Err(AsmError::opcode(
            line_num,
            OpcodeError::NoOperandsGiven {
                token: mnemonic.to_string(),
                expected: entry.num_operands,
            },
        ));
    }
    if found != entry.num_operands {
        return Err(AsmError::opcode(
            line_num,
            OpcodeError::WrongNumberOfOperands {
                token: mnemonic.to_string(),
                expected: entry.num_operands,
                found,
            },
        ));
    }
    Ok(())
}

/// Resolve `END`'s address: an explicit operand, or the program's start
/// address when `END` carried none.
pub fn resolve_end_address(symbol_table: &SymbolTable) -> u32 {
    match symbol_table.end_address() {
        EndAddress::Address(addr) => addr,
        EndAddress::Seen | EndAddress::NotSet => symbol_table.start_address().unwrap_or(0),
    }
}
