//! # Pass 2
//!
//! Re-scans the source with pass 1's resolved [`SymbolTable`] in hand and
//! emits [`Record`]s: object code for `BYTE`/`WORD`/instructions, a
//! modification record for every instruction with a symbolic operand
//! (addressed at `instruction_address + 1`, naming the *program*, not the
//! operand, per the reference's `secondPassInstructionHelper`), and the
//! bracketing `H`/`E` records.


use crate::directive::{ByteConstant, Directive, DirectiveTable};
use crate::error::{AsmError, OpcodeError};
use crate::line::{split_line, strip_comment};
use crate::opcode::OpcodeTable;
use crate::ordered_list::OrderedList;
use crate::pass1::{resolve_end_address, INSTRUCTION_BYTES};
use crate::scoff::{EndRecord, HeaderRecord, ModificationRecord, Record, TextRecordBuilder};
use crate::symbol_table::SymbolTable;

const INDEX_FLAG: u32 = 0x8000;
const ADDRESS_MASK: u32 = 0x7FFF;

pub fn run(
    source: &str,
    opcodes: &OpcodeTable,
    directives: &DirectiveTable,
    symbol_table: &SymbolTable,
    program_name: &str,
) -> Result<OrderedList<Record>, AsmError> {
    let start_address = symbol_table.start_address().unwrap_or(0);
    let program_length = symbol_table.loc_counter().unwrap_or(start_address) - start_address;

    let mut records = OrderedList::new();
    records.push(Record::Header(HeaderRecord {
        program_name: program_name.to_string(),
        start_address,
        program_length,
    }));

    let mut text = TextRecordBuilder::new();
    let mut modifications = Vec::new();
    let mut loc_counter = start_address;

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

        if let Some(directive) = directives.get(split.mnemonic) {
            match directive {
                Directive::Start => {}
                Directive::End => break,
                Directive::Byte => {
                    let constant = ByteConstant::parse(split.operand_raw)
                        .map_err(|source| AsmError::directive(line_num, source))?;
                    let bytes = byte_constant_bytes(&constant);
                    text.push(loc_counter, &bytes);
                    loc_counter += bytes.len() as u32;
                }
                Directive::Word => {
                    let value = parse_word_value(split.operand_raw, line_num)?;
                    let bytes = (value as u32 & 0xFFFFFF).to_be_bytes();
                    text.push(loc_counter, &bytes[1..]);
                    loc_counter += INSTRUCTION_BYTES;
                }
                Directive::Resb | Directive::Resw => {
                    text.flush();
                    let n = parse_word_value(split.operand_raw, line_num)? as u32;
                    loc_counter += if directive == Directive::Resw {
                        n * crate::directive::WORD_BYTES
                    } else {
                        n
                    };
                }
                Directive::Resr | Directive::Exports => {}
            }
            continue;
        }

        if let Some(entry) = opcodes.get(split.mnemonic) {
            let (address, indexed, operand_symbol) = resolve_operand(split.operand_raw, symbol_table, line_num)?;
            let addr_field = (address & ADDRESS_MASK) | if indexed { INDEX_FLAG } else { 0 };
            let word = ((entry.opcode as u32) << 16) | addr_field;
            let bytes = word.to_be_bytes();
            text.push(loc_counter, &bytes[1..]);

            if operand_symbol.is_some() {
                modifications.push(Record::Modification(ModificationRecord {
                    address: loc_counter + 1,
                    half_byte_count: 6,
                    symbol_name: program_name.to_string(),
                }));
            }
            loc_counter += INSTRUCTION_BYTES;
            continue;
        }
    }

    text.flush();
    records.extend(text.into_records().into_iter().map(Record::Text));
    records.extend(modifications);
    records.push(Record::End(EndRecord {
        first_instruction_address: resolve_end_address(symbol_table),
    }));

    Ok(records)
}

fn byte_constant_bytes(constant: &ByteConstant<'_>) -> Vec<u8> {
    if constant.is_hex {
        constant
            .text
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                let s = std::str::from_utf8(pair).unwrap();
                u8::from_str_radix(s, 16).unwrap()
            })
            .collect()
    } else {
        constant.text.bytes().collect()
    }
}

fn parse_word_value(operand_raw: &str, line_num: u32) -> Result<i64, AsmError> {
    let token = operand_raw
        .split_whitespace()
        .next()
        .ok_or_else(|| AsmError::directive(line_num, crate::error::DirectiveError::NotEnoughOperands))?;
    token
        .parse::<i64>()
        .map_err(|_| AsmError::directive(line_num, crate::error::DirectiveError::ConversionError { token: token.to_string() }))
}

/// Resolve an instruction operand to `(address, indexed, symbolic_operand)`.
fn resolve_operand(
    operand_raw: &str,
    symbol_table: &SymbolTable,
    line_num: u32,
) -> Result<(u32, bool, Option<()>), AsmError> {
    let token = operand_raw.split_whitespace().next();
    let Some(token) = token else {
        return Ok((0, false, None));
    };
    let (symbol, indexed) = match token.strip_suffix(",X") {
        Some(stripped) => (stripped, true),
        None => (token, false),
    };
    let address = symbol_table.get(symbol).ok_or_else(|| {
        AsmError::opcode(
            line_num,
            OpcodeError::InvalidSymbolGiven {
                token: symbol.to_string(),
            },
        )
    })?;
    Ok((address, indexed, Some(())))
}
