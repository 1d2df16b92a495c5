//! # Opcode Table
//!
//! Parses the opcode descriptor file (one mnemonic per line:
//! `MNEMONIC OPERAND_COUNT FORMAT OPCODE_HEX [FLAGS...]`) into a
//! mnemonic -> [`OpcodeEntry`] map.

#[cfg(test)]
mod tests;

use crate::error::{AsmError, OpcodeError};
use crate::hash_table::HashTable;

pub const MAX_MNEMONIC_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpFlags {
    pub privileged: bool,
    pub xe_only: bool,
    pub floating_point: bool,
    pub sets_condition_code: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub num_operands: u8,
    pub instruction_format: u8,
    pub opcode: u8,
    pub flags: OpFlags,
}

#[derive(Debug)]
pub struct OpcodeTable {
    table: HashTable<OpcodeEntry>,
}

impl OpcodeTable {
    pub fn get(&self, mnemonic: &str) -> Option<&OpcodeEntry> {
        self.table.get(mnemonic)
    }

    pub fn contains(&self, mnemonic: &str) -> bool {
        self.table.contains_key(mnemonic)
    }

    /// Build the opcode table from a descriptor file's contents.
    pub fn parse(descriptor: &str) -> Result<Self, AsmError> {
        let mut table = HashTable::new(128);

        for (idx, raw_line) in descriptor.lines().enumerate() {
            let line_num = (idx + 1) as u32;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut tokens = raw_line.split_whitespace();

            let mnemonic = tokens.next().ok_or_else(|| {
                AsmError::opcode(
                    line_num,
                    OpcodeError::BadInputParse {
                        token: "mnemonic".into(),
                    },
                )
            })?;
            if mnemonic.len() > MAX_MNEMONIC_LEN {
                return Err(AsmError::opcode(
                    line_num,
                    OpcodeError::InvalidMnemonicLength {
                        token: mnemonic.into(),
                    },
                ));
            }

            let operand_count_tok = tokens.next().ok_or_else(|| {
                AsmError::opcode(
                    line_num,
                    OpcodeError::BadInputParse {
                        token: "number of operands".into(),
                    },
                )
            })?;
            let num_operands: u8 = operand_count_tok.parse().map_err(|_| {
                AsmError::opcode(
                    line_num,
                    OpcodeError::BadInputParse {
                        token: "number of operands".into(),
                    },
                )
            })?;

            let format_tok = tokens.next().ok_or_else(|| {
                AsmError::opcode(
                    line_num,
                    OpcodeError::BadInputParse {
                        token: "instruction format".into(),
                    },
                )
            })?;
            let instruction_format: u8 = if format_tok.len() == 1 {
                format_tok.parse().map_err(|_| {
                    AsmError::opcode(
                        line_num,
                        OpcodeError::BadInputParse {
                            token: "instruction format".into(),
                        },
                    )
                })?
            } else {
                3
            };

            let opcode_tok = tokens.next().ok_or_else(|| {
                AsmError::opcode(
                    line_num,
                    OpcodeError::BadInputParse {
                        token: "opcode".into(),
                    },
                )
            })?;
            let opcode = u8::from_str_radix(opcode_tok, 16).map_err(|_| {
                AsmError::opcode(
                    line_num,
                    OpcodeError::BadInputParse {
                        token: "opcode".into(),
                    },
                )
            })?;

            let mut flags = OpFlags::default();
            for flag_tok in tokens {
                for ch in flag_tok.chars() {
                    match ch {
                        'P' => flags.privileged = true,
                        'X' => flags.xe_only = true,
                        'F' => flags.floating_point = true,
                        'C' => flags.sets_condition_code = true,
                        _ => {}
                    }
                }
            }

            table
                .insert(
                    mnemonic.to_string(),
                    OpcodeEntry {
                        num_operands,
                        instruction_format,
                        opcode,
                        flags,
                    },
                )
                .map_err(|_| {
                    AsmError::opcode(
                        line_num,
                        OpcodeError::BadInputParse {
                            token: mnemonic.into(),
                        },
                    )
                })?;
        }

        Ok(Self { table })
    }
}
