//! # SIC Assembler
//!
//! A two-pass assembler for the SIC (Simplified Instructional Computer)
//! and SIC/XE architectures, emitting SCOFF (SIC Common Object File Format)
//! object files.
//!
//! ## Pipeline
//!
//! 1. **Opcode table** ([`opcode`]) - parsed from a descriptor file listing
//!    every mnemonic's operand count, instruction format, and opcode byte.
//! 2. **Directive table** ([`directive`]) - the fixed set of assembler
//!    directives (`START`, `END`, `BYTE`, `WORD`, `RESB`, `RESW`, ...).
//! 3. **Pass 1** ([`pass1`]) - scans the source once, building the
//!    [`symbol_table::SymbolTable`] by tracking the location counter.
//! 4. **Pass 2** ([`pass2`]) - re-scans the source with the resolved symbol
//!    table, emitting [`scoff::Record`]s.
//! 5. **SCOFF** ([`scoff`]) - the record types and their fixed-width hex
//!    text serialization.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sic_assembler::directive::DirectiveTable;
//! use sic_assembler::opcode::OpcodeTable;
//! use sic_assembler::{pass1, pass2};
//! use sic_assembler::scoff::write_records;
//!
//! let descriptor = std::fs::read_to_string("res/sic_opcodes.txt").unwrap();
//! let opcodes = OpcodeTable::parse(&descriptor).unwrap();
//! let directives = DirectiveTable::new();
//!
//! let source = std::fs::read_to_string("program.sic").unwrap();
//! let first = pass1::run(&source, &opcodes, &directives, false).unwrap();
//! let records = pass2::run(&source, &opcodes, &directives, &first.symbol_table, &first.program_name).unwrap();
//! println!("{}", write_records(records.as_slice()));
//! ```

pub mod directive;
pub mod error;
pub mod hash_table;
pub mod line;
pub mod opcode;
pub mod ordered_list;
pub mod pass1;
pub mod pass2;
pub mod scoff;
pub mod symbol_table;
