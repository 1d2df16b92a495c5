use crate::directive::{ByteConstant, Directive, DirectiveTable};
use crate::error::DirectiveError;
use crate::symbol_table::{EndAddress, SymbolTable};

#[test]
fn table_contains_all_eight_names_including_corrected_exports() {
    let table = DirectiveTable::new();
    for name in ["START", "END", "BYTE", "WORD", "RESB", "RESW", "RESR", "EXPORTS"] {
        assert!(table.contains(name), "missing directive {name}");
    }
    assert!(!table.contains("EXORTS"));
}

#[test]
fn start_sets_addresses_and_rejects_out_of_range() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "1000").unwrap();
    assert_eq!(table.start_address(), Some(0x1000));

    let mut table2 = SymbolTable::new();
    let err = Directive::Start.apply(&mut table2, "8000").unwrap_err();
    assert_eq!(
        err,
        DirectiveError::MemoryViolation {
            token: "8000".into()
        }
    );
}

#[test]
fn start_twice_is_an_error() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "1000").unwrap();
    assert_eq!(
        Directive::Start.apply(&mut table, "2000").unwrap_err(),
        DirectiveError::StartDefinedTwice
    );
}

#[test]
fn end_without_operand_marks_seen() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "1000").unwrap();
    Directive::End.apply(&mut table, "").unwrap();
    assert_eq!(table.end_address(), EndAddress::Seen);
}

#[test]
fn end_with_unknown_symbol_errors() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "1000").unwrap();
    let err = Directive::End.apply(&mut table, "NOPE").unwrap_err();
    assert_eq!(
        err,
        DirectiveError::EndSymbolNotFound {
            token: "NOPE".into()
        }
    );
}

#[test]
fn byte_c_constant_advances_by_character_count() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    Directive::Byte.apply(&mut table, "C'HELLO WORLD'").unwrap();
    assert_eq!(table.loc_counter(), Some(0x100 + 11));
}

#[test]
fn byte_x_constant_advances_by_half_the_hex_digits() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    Directive::Byte.apply(&mut table, "X'AB'").unwrap();
    assert_eq!(table.loc_counter(), Some(0x100 + 1));
}

#[test]
fn byte_x_odd_length_rejected() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    let err = Directive::Byte.apply(&mut table, "X'ABC'").unwrap_err();
    assert_eq!(err, DirectiveError::OddHexLength { token: "ABC".into() });
}

#[test]
fn byte_x_bad_hex_char_rejected() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    let err = Directive::Byte.apply(&mut table, "X'AG'").unwrap_err();
    assert_eq!(err, DirectiveError::BadHexConstant { token: "AG".into() });
}

#[test]
fn byte_constant_preserves_embedded_space() {
    let constant = ByteConstant::parse("C'HELLO WORLD'").unwrap();
    assert!(!constant.is_hex);
    assert_eq!(constant.text, "HELLO WORLD");
    assert_eq!(constant.byte_len, 11);
}

#[test]
fn byte_rejects_trailing_operand_after_closing_quote() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    let err = Directive::Byte.apply(&mut table, "C'HI' EXTRA").unwrap_err();
    assert_eq!(err, DirectiveError::TooManyOperands);
}

#[test]
fn resb_resw_zero_do_not_advance() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    Directive::Resb.apply(&mut table, "0").unwrap();
    Directive::Resw.apply(&mut table, "0").unwrap();
    assert_eq!(table.loc_counter(), Some(0x100));
}

#[test]
fn resw_advances_by_three_times_operand() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    Directive::Resw.apply(&mut table, "4").unwrap();
    assert_eq!(table.loc_counter(), Some(0x100 + 12));
}

#[test]
fn resr_and_exports_are_not_implemented() {
    let mut table = SymbolTable::new();
    Directive::Start.apply(&mut table, "100").unwrap();
    assert_eq!(
        Directive::Resr.apply(&mut table, "1").unwrap_err(),
        DirectiveError::NotImplemented
    );
    assert_eq!(
        Directive::Exports.apply(&mut table, "1").unwrap_err(),
        DirectiveError::NotImplemented
    );
}

#[test]
fn directive_before_start_is_rejected() {
    let mut table = SymbolTable::new();
    assert_eq!(
        Directive::Word.apply(&mut table, "5").unwrap_err(),
        DirectiveError::StartNotDefined
    );
}
