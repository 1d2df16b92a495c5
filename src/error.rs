//! # Error Taxonomy
//!
//! Three disjoint error families, mirroring the three places the reference
//! assembler can fail: building a symbol name, dispatching a directive
//! callback, and dispatching an opcode. Each carries the line number the
//! failure occurred on (and, where useful, the offending token) so the CLI
//! can report diagnostics the way the reference's `printSymbolError` /
//! `printDCSError` / `printOPSError` do.

use thiserror::Error;

/// Errors raised while validating a candidate symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("the symbol \"{token}\" exceeded the maximum symbol length of 6 allowed by SIC")]
    ExceededMaxLen { token: String },
    #[error("the symbol \"{token}\" started with an invalid character! symbols can only start with [A-Z]")]
    FirstCharNotValid { token: String },
    #[error("the symbol \"{token}\" contained an invalid character")]
    ContainsInvalidChars { token: String },
}

/// Errors raised by a directive callback during pass 1 or pass 2.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("the given directive is not implemented yet")]
    NotImplemented,
    #[error("zero operands provided to the directive")]
    NotEnoughOperands,
    #[error("more than one operand supplied to the directive")]
    TooManyOperands,
    #[error("conversion error occurred while converting the directive operand \"{token}\"")]
    ConversionError { token: String },
    #[error("the END directive had an operand symbol \"{token}\" which was not found")]
    EndSymbolNotFound { token: String },
    #[error("invalid memory being referenced after parsing start address. given address was \"{token}\"")]
    MemoryViolation { token: String },
    #[error("memory overflowed past the maximum address of 0x7FFF when incrementing the location counter")]
    MemoryOverflow,
    #[error("the given operand was not in a good format and could not be parsed. last thing parsed was \"{token}\"")]
    BadOperandFormat { token: String },
    #[error("the hex constant \"{token}\" contained an invalid hex character")]
    BadHexConstant { token: String },
    #[error("the given operand \"{token}\" was negative when it was expected to be non-negative")]
    OperandNegative { token: String },
    #[error("the integer constant \"{token}\" is larger than the maximum SIC integer capacity of 0x7FFFFF")]
    IntegerOverflow { token: String },
    #[error("the integer constant \"{token}\" is smaller than the minimum SIC integer capacity of -0x7FFFFF")]
    IntegerUnderflow { token: String },
    #[error("the hex constant \"{token}\" has an odd number of characters, this is illegal in SIC")]
    OddHexLength { token: String },
    #[error("the START directive can't be defined twice")]
    StartDefinedTwice,
    #[error("the START directive was not defined. it must be defined before other directives or instructions")]
    StartNotDefined,
    #[error("the END directive can't be defined twice")]
    EndDefinedTwice,
    #[error("there are more SIC instructions after the END directive")]
    EndSeen,
    #[error("the END directive was never seen in the SIC assembly")]
    EndNotDefined,
    #[error("given symbol \"{token}\" is illegal! symbol matches a SIC assembly directive")]
    SymbolMatchesDirective { token: String },
}

/// Errors raised while dispatching or encoding an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpcodeError {
    #[error("the opcode \"{token}\" has an extended-edition flag which is not currently supported")]
    XEditionNotSupported { token: String },
    #[error("the given symbol \"{token}\" is illegal! symbol matches a SIC instruction")]
    SymbolMatchesInstruction { token: String },
    #[error("no operands provided for instruction \"{token}\", which needs {expected} operand(s)")]
    NoOperandsGiven { token: String, expected: u8 },
    #[error("wrong number of operands supplied to instruction \"{token}\", which needs {expected} operand(s), found {found}")]
    WrongNumberOfOperands { token: String, expected: u8, found: u8 },
    #[error("mnemonic \"{token}\" is longer than the max mnemonic length of 6")]
    InvalidMnemonicLength { token: String },
    #[error("unable to parse {token} during opcode table construction")]
    BadInputParse { token: String },
    #[error("the operand \"{token}\" given to the instruction is not a valid symbol")]
    InvalidSymbolGiven { token: String },
    #[error("there were no instructions found in the SIC file")]
    NoInstructionFound,
}

/// Top-level assembler error, carrying the originating line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    #[error("[ERROR : {line}]: {source}")]
    Symbol { line: u32, source: SymbolError },
    #[error("[ERROR : {line}]: {source}")]
    Directive { line: u32, source: DirectiveError },
    #[error("[ERROR : {line}]: {source}")]
    Opcode { line: u32, source: OpcodeError },
    #[error("[ERROR : {line}]: invalid mnemonic or directive found! this is what was parsed \"{token}\"")]
    UnknownToken { line: u32, token: String },
    #[error("[ERROR : {line}]: illegal duplicate symbol detected! the symbol \"{token}\" already exists in the symbol table")]
    DuplicateSymbol { line: u32, token: String },
    #[error("[ERROR : {line}]: the current line is an empty line. this is not allowed by SIC")]
    EmptyLine { line: u32 },
}

impl AsmError {
    pub fn line(&self) -> u32 {
        match self {
            AsmError::Symbol { line, .. }
            | AsmError::Directive { line, .. }
            | AsmError::Opcode { line, .. }
            | AsmError::UnknownToken { line, .. }
            | AsmError::DuplicateSymbol { line, .. }
            | AsmError::EmptyLine { line } => *line,
        }
    }

    pub fn symbol(line: u32, source: SymbolError) -> Self {
        AsmError::Symbol { line, source }
    }

    pub fn directive(line: u32, source: DirectiveError) -> Self {
        AsmError::Directive { line, source }
    }

    pub fn opcode(line: u32, source: OpcodeError) -> Self {
        AsmError::Opcode { line, source }
    }
}
