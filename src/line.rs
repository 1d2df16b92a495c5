//! # Line splitting
//!
//! Every source line is logically `[LABEL] MNEMONIC [OPERAND] [# COMMENT]`.
//! The reference consumes a line token-by-token with repeated `strtok`
//! calls and decides what the first token is by looking it up in the
//! directive and opcode tables, not by column position; here we do the
//! same lookup once and keep the untouched remainder so BYTE's `C'...'`
//! operand can be re-parsed with its own rules instead of being mangled by
//! whitespace splitting.

use crate::directive::DirectiveTable;
use crate::opcode::OpcodeTable;

/// Strip a trailing `#`-prefixed comment and the line terminator.
pub fn strip_comment(line: &str) -> &str {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.find('#') {
        Some(idx) => line[..idx].trim_end(),
        None => line.trim_end(),
    }
}

/// A line split into an optional leading label, the mnemonic token, and the
/// raw remainder of the line (not yet whitespace-split) that follows the
/// mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub label: Option<&'a str>,
    pub mnemonic: &'a str,
    pub operand_raw: &'a str,
}

/// Split a comment-stripped line into `label`, `mnemonic`, `operand_raw`.
///
/// The first token is looked up in `directives` then `opcodes`; a match
/// means the line has no label and the first token is the mnemonic. Only
/// when the first token matches neither table is it treated as a label
/// candidate, with the *second* token becoming the mnemonic. Indentation
/// plays no part in the decision, matching the reference's table-driven
/// `buildSymbolTable` classification rather than a column convention.
pub fn split_line<'a>(
    content: &'a str,
    directives: &DirectiveTable,
    opcodes: &OpcodeTable,
) -> Option<SplitLine<'a>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    let first_end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (first_token, after_first) = trimmed.split_at(first_end);
    let after_first = after_first.trim_start();

    let first_is_known = directives.contains(first_token) || opcodes.contains(first_token);
    if first_is_known || after_first.is_empty() {
        return Some(SplitLine {
            label: None,
            mnemonic: first_token,
            operand_raw: after_first,
        });
    }

    let mnemonic_end = after_first.find(char::is_whitespace).unwrap_or(after_first.len());
    let (mnemonic, rest) = after_first.split_at(mnemonic_end);
    Some(SplitLine {
        label: Some(first_token),
        mnemonic,
        operand_raw: rest.trim_start(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::OpcodeTable;

    fn test_opcodes() -> OpcodeTable {
        OpcodeTable::parse("LDA 1 3 00\nRSUB 0 3 4C\n").unwrap()
    }

    #[test]
    fn strips_comment_and_trailing_whitespace() {
        assert_eq!(strip_comment("LDA VALUE   # load it\n"), "LDA VALUE");
        assert_eq!(strip_comment("LDA VALUE\r\n"), "LDA VALUE");
        assert_eq!(strip_comment("# just a comment\n"), "");
    }

    #[test]
    fn splits_labelled_line() {
        let directives = DirectiveTable::new();
        let opcodes = test_opcodes();
        let split = split_line("LOOP LDA VALUE,X", &directives, &opcodes).unwrap();
        assert_eq!(split.label, Some("LOOP"));
        assert_eq!(split.mnemonic, "LDA");
        assert_eq!(split.operand_raw, "VALUE,X");
    }

    #[test]
    fn splits_unlabelled_indented_line() {
        let directives = DirectiveTable::new();
        let opcodes = test_opcodes();
        let split = split_line("    LDA VALUE", &directives, &opcodes).unwrap();
        assert_eq!(split.label, None);
        assert_eq!(split.mnemonic, "LDA");
        assert_eq!(split.operand_raw, "VALUE");
    }

    #[test]
    fn unindented_labelless_instruction_is_not_mistaken_for_a_label() {
        let directives = DirectiveTable::new();
        let opcodes = test_opcodes();
        let split = split_line("LDA FIVE", &directives, &opcodes).unwrap();
        assert_eq!(split.label, None);
        assert_eq!(split.mnemonic, "LDA");
        assert_eq!(split.operand_raw, "FIVE");
    }

    #[test]
    fn indented_labelled_line_still_finds_its_label() {
        let directives = DirectiveTable::new();
        let opcodes = test_opcodes();
        let split = split_line(" L WORD 5", &directives, &opcodes).unwrap();
        assert_eq!(split.label, Some("L"));
        assert_eq!(split.mnemonic, "WORD");
        assert_eq!(split.operand_raw, "5");
    }

    #[test]
    fn preserves_embedded_space_in_byte_operand() {
        let directives = DirectiveTable::new();
        let opcodes = test_opcodes();
        let split = split_line("MSG BYTE C'HELLO WORLD'", &directives, &opcodes).unwrap();
        assert_eq!(split.label, Some("MSG"));
        assert_eq!(split.mnemonic, "BYTE");
        assert_eq!(split.operand_raw, "C'HELLO WORLD'");
    }

    #[test]
    fn mnemonic_only_line_has_empty_operand() {
        let directives = DirectiveTable::new();
        let opcodes = test_opcodes();
        let split = split_line("    RSUB", &directives, &opcodes).unwrap();
        assert_eq!(split.label, None);
        assert_eq!(split.mnemonic, "RSUB");
        assert_eq!(split.operand_raw, "");
    }

    #[test]
    fn blank_line_is_none() {
        let directives = DirectiveTable::new();
        let opcodes = test_opcodes();
        assert!(split_line("", &directives, &opcodes).is_none());
        assert!(split_line("   ", &directives, &opcodes).is_none());
    }
}
