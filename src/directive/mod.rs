//! # Directive Table
//!
//! Static map of directive name -> handler identity, and the handler logic
//! itself (`apply`), which mutates the pass-1 [`SymbolTable`](crate::symbol_table::SymbolTable)
//! the way the reference's `directive_callback_*` functions do.
//!
//! The reference's initializer contains the misspelling `EXORTS`; this is a
//! defect, corrected here to `EXPORTS` per the design notes.

#[cfg(test)]
mod tests;

use crate::error::DirectiveError;
use crate::hash_table::HashTable;
use crate::symbol_table::{EndAddress, SymbolTable};

pub const MEMORY_LIMIT: u32 = 0x7FFF;
pub const INTEGER_MAX: i64 = 0x7FFFFF;
pub const WORD_BYTES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Start,
    End,
    Byte,
    Word,
    Resb,
    Resw,
    Resr,
    Exports,
}

pub struct DirectiveTable {
    table: HashTable<Directive>,
}

impl Default for DirectiveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveTable {
    pub fn new() -> Self {
        let mut table = HashTable::new(16);
        for (name, directive) in [
            ("START", Directive::Start),
            ("END", Directive::End),
            ("BYTE", Directive::Byte),
            ("WORD", Directive::Word),
            ("RESB", Directive::Resb),
            ("RESW", Directive::Resw),
            ("RESR", Directive::Resr),
            ("EXPORTS", Directive::Exports),
        ] {
            table.insert(name, directive).expect("static directive names are unique");
        }
        Self { table }
    }

    pub fn get(&self, name: &str) -> Option<Directive> {
        self.table.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }
}

/// Split whitespace-delimited `operand_raw` into its first token and every
/// token after it (used by every directive except BYTE, whose operand may
/// contain embedded spaces inside a `C'...'` constant).
fn split_operand(operand_raw: &str) -> (Option<&str>, Vec<&str>) {
    let mut tokens = operand_raw.split_whitespace();
    let first = tokens.next();
    (first, tokens.collect())
}

fn reject_trailing(rest: &[&str]) -> Result<(), DirectiveError> {
    if let Some(extra) = rest.first() {
        if !extra.starts_with('#') {
            return Err(DirectiveError::TooManyOperands);
        }
    }
    Ok(())
}

/// Parse a decimal/hex integer operand, validating it fits the SIC integer range.
fn get_constant(operand: &str, base: u32) -> Result<i64, DirectiveError> {
    let (sign, digits) = match operand.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, operand),
    };
    if digits.is_empty() {
        return Err(DirectiveError::BadOperandFormat {
            token: operand.to_string(),
        });
    }
    let magnitude = i64::from_str_radix(digits, base).map_err(|_| DirectiveError::ConversionError {
        token: operand.to_string(),
    })?;
    let value = sign * magnitude;
    if value > INTEGER_MAX {
        return Err(DirectiveError::IntegerOverflow {
            token: operand.to_string(),
        });
    }
    if value < -INTEGER_MAX {
        return Err(DirectiveError::IntegerUnderflow {
            token: operand.to_string(),
        });
    }
    Ok(value)
}

/// Parse a single numeric operand out of `operand_raw`, erroring on a
/// trailing (non-comment) extra token.
fn get_operand(operand_raw: &str, base: u32) -> Result<i64, DirectiveError> {
    let (first, rest) = split_operand(operand_raw);
    let first = first.ok_or(DirectiveError::NotEnoughOperands)?;
    let value = get_constant(first, base)?;
    reject_trailing(&rest)?;
    Ok(value)
}

fn check_overflow(symbol_table: &SymbolTable) -> Result<(), DirectiveError> {
    if symbol_table.loc_counter().unwrap_or(0) > MEMORY_LIMIT {
        Err(DirectiveError::MemoryOverflow)
    } else {
        Ok(())
    }
}

impl Directive {
    /// Apply the directive to the symbol table (pass 1 semantics).
    ///
    /// `operand_raw` is everything on the line after the directive's
    /// mnemonic, with only the trailing line terminator stripped — BYTE
    /// re-parses it with its own delimiter-preserving logic, every other
    /// directive splits it on whitespace.
    pub fn apply(self, symbol_table: &mut SymbolTable, operand_raw: &str) -> Result<(), DirectiveError> {
        match self {
            Directive::Start => {
                if symbol_table.start_address().is_some() {
                    return Err(DirectiveError::StartDefinedTwice);
                }
                let addr = get_operand(operand_raw, 16)?;
                if !(0..=MEMORY_LIMIT as i64).contains(&addr) {
                    return Err(DirectiveError::MemoryViolation {
                        token: operand_raw.trim().to_string(),
                    });
                }
                symbol_table.set_start_address(addr as u32);
                Ok(())
            }
            Directive::End => {
                symbol_table.require_start_defined()?;
                if !matches!(symbol_table.end_address(), EndAddress::NotSet) {
                    return Err(DirectiveError::EndDefinedTwice);
                }
                let (first, rest) = split_operand(operand_raw);
                match first {
                    None => {
                        symbol_table.set_end_address(EndAddress::Seen);
                        Ok(())
                    }
                    Some(token) => {
                        let addr = symbol_table.get(token).ok_or_else(|| DirectiveError::EndSymbolNotFound {
                            token: token.to_string(),
                        })?;
                        reject_trailing(&rest)?;
                        symbol_table.set_end_address(EndAddress::Address(addr));
                        Ok(())
                    }
                }
            }
            Directive::Byte => {
                symbol_table.require_start_defined()?;
                if operand_raw.trim().is_empty() {
                    return Err(DirectiveError::NotEnoughOperands);
                }
                let constant = ByteConstant::parse(operand_raw)?;
                reject_trailing(&constant.trailing_tokens())?;
                symbol_table.advance_loc_counter(constant.byte_len);
                check_overflow(symbol_table)
            }
            Directive::Word => {
                symbol_table.require_start_defined()?;
                get_operand(operand_raw, 10)?;
                symbol_table.advance_loc_counter(WORD_BYTES);
                check_overflow(symbol_table)
            }
            Directive::Resb => {
                symbol_table.require_start_defined()?;
                let n = get_operand(operand_raw, 10)?;
                if n < 0 {
                    return Err(DirectiveError::OperandNegative {
                        token: operand_raw.trim().to_string(),
                    });
                }
                symbol_table.advance_loc_counter(n as u32);
                check_overflow(symbol_table)
            }
            Directive::Resw => {
                symbol_table.require_start_defined()?;
                let n = get_operand(operand_raw, 10)?;
                if n < 0 {
                    return Err(DirectiveError::OperandNegative {
                        token: operand_raw.trim().to_string(),
                    });
                }
                symbol_table.advance_loc_counter(n as u32 * WORD_BYTES);
                check_overflow(symbol_table)
            }
            Directive::Resr | Directive::Exports => Err(DirectiveError::NotImplemented),
        }
    }
}

/// A parsed `C'...'` or `X'...'` BYTE operand.
pub struct ByteConstant<'a> {
    pub is_hex: bool,
    /// The raw text between the quotes (characters for `C`, hex digits for `X`).
    pub text: &'a str,
    /// Number of object-code bytes this constant occupies.
    pub byte_len: u32,
    /// Whatever followed the closing quote, unparsed.
    after_quote: &'a str,
}

impl<'a> ByteConstant<'a> {
    pub fn parse(operand_raw: &'a str) -> Result<Self, DirectiveError> {
        let bad_format = || DirectiveError::BadOperandFormat {
            token: operand_raw.trim().to_string(),
        };

        let mut chars = operand_raw.char_indices();
        let (_, kind) = chars.next().ok_or_else(bad_format)?;
        let is_hex = match kind {
            'C' => false,
            'X' => true,
            _ => return Err(bad_format()),
        };
        let (quote_idx, quote_char) = chars.next().ok_or_else(bad_format)?;
        if quote_char != '\'' {
            return Err(bad_format());
        }
        let body_start = quote_idx + 1;
        let end = operand_raw[body_start..].find('\'').ok_or_else(bad_format)?;
        let text = &operand_raw[body_start..body_start + end];
        let after_quote = &operand_raw[body_start + end + 1..];

        let byte_len = if is_hex {
            if text.len() % 2 != 0 {
                return Err(DirectiveError::OddHexLength { token: text.to_string() });
            }
            if !text.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(DirectiveError::BadHexConstant { token: text.to_string() });
            }
            (text.len() / 2) as u32
        } else {
            text.len() as u32
        };

        Ok(Self {
            is_hex,
            text,
            byte_len,
            after_quote,
        })
    }

    fn trailing_tokens(&self) -> Vec<&'a str> {
        self.after_quote.split_whitespace().collect()
    }
}
