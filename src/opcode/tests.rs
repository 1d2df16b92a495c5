use crate::opcode::OpcodeTable;

#[test]
fn parses_basic_entry() {
    let table = OpcodeTable::parse("LDA 1 3/4 00\n").unwrap();
    let entry = table.get("LDA").unwrap();
    assert_eq!(entry.num_operands, 1);
    assert_eq!(entry.instruction_format, 3);
    assert_eq!(entry.opcode, 0x00);
}

#[test]
fn parses_flags() {
    let table = OpcodeTable::parse("SSK 1 3/4 B8 P\nFIX 0 1 C4 F\n").unwrap();
    assert!(table.get("SSK").unwrap().flags.privileged);
    assert!(table.get("FIX").unwrap().flags.floating_point);
    assert!(!table.get("FIX").unwrap().flags.privileged);
}

#[test]
fn rejects_mnemonic_over_max_length() {
    let err = OpcodeTable::parse("TOOLONGMNEMONIC 1 3/4 00\n").unwrap_err();
    assert!(matches!(
        err,
        crate::error::AsmError::Opcode {
            source: crate::error::OpcodeError::InvalidMnemonicLength { .. },
            ..
        }
    ));
}

#[test]
fn missing_mnemonic_unknown() {
    assert!(!OpcodeTable::parse("").unwrap().contains("LDA"));
}
