//! # SCOFF (SIC Common Object File Format)
//!
//! Typed object records and the fixed-width, zero-padded-hex text
//! serialization the reference's `generateSCOFFRecords` / `writeSCOFFToFile`
//! produce. Fields within a record are concatenated with no delimiter,
//! matching `scoff.c`'s `%c%s%s%s`-style `fprintf` calls; the file as a
//! whole has no trailing newline after its `E` record.


/// Maximum object-code bytes (30, i.e. 60 hex characters) a single `T`
/// record can carry before it must be split.
pub const TEXT_RECORD_MAX_BYTES: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub program_name: String,
    pub start_address: u32,
    pub program_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub start_address: u32,
    /// Object code as uppercase hex, at most `TEXT_RECORD_MAX_BYTES * 2` chars.
    pub object_code: String,
}

impl TextRecord {
    pub fn byte_len(&self) -> usize {
        self.object_code.len() / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModificationRecord {
    pub address: u32,
    pub half_byte_count: u8,
    pub symbol_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRecord {
    pub first_instruction_address: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Header(HeaderRecord),
    Text(TextRecord),
    Modification(ModificationRecord),
    End(EndRecord),
}

impl Record {
    pub fn to_line(&self) -> String {
        match self {
            Record::Header(h) => format!(
                "H{:<6}{:06X}{:06X}",
                h.program_name, h.start_address, h.program_length
            ),
            Record::Text(t) => format!(
                "T{:06X}{:02X}{}",
                t.start_address,
                t.byte_len(),
                t.object_code
            ),
            Record::Modification(m) => format!(
                "M{:06X}{:02X}+{}",
                m.address, m.half_byte_count, m.symbol_name
            ),
            Record::End(e) => format!("E{:06X}", e.first_instruction_address),
        }
    }
}

/// Serialize `records` into the final SCOFF object file text: one record
/// per line, no trailing newline after the last (`E`) record.
pub fn write_records(records: &[Record]) -> String {
    records
        .iter()
        .map(Record::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accumulates object code bytes into `T` records, flushing automatically
/// once a record reaches [`TEXT_RECORD_MAX_BYTES`] or the caller forces a
/// flush (e.g. across a `RESB`/`RESW` gap).
pub struct TextRecordBuilder {
    pending_start: Option<u32>,
    pending_hex: String,
    records: Vec<TextRecord>,
}

impl Default for TextRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecordBuilder {
    pub fn new() -> Self {
        Self {
            pending_start: None,
            pending_hex: String::new(),
            records: Vec::new(),
        }
    }

    /// Append object code (as raw bytes) emitted starting at `address`.
    pub fn push(&mut self, address: u32, bytes: &[u8]) {
        if self.pending_start.is_none() {
            self.pending_start = Some(address);
        }
        let mut offset = 0;
        for &byte in bytes {
            self.pending_hex.push_str(&format!("{byte:02X}"));
            offset += 1;
            if self.pending_hex.len() / 2 >= TEXT_RECORD_MAX_BYTES {
                self.flush();
                let consumed_start = address + offset as u32;
                self.pending_start = Some(consumed_start);
            }
        }
    }

    pub fn flush(&mut self) {
        if let Some(start) = self.pending_start.take() {
            if !self.pending_hex.is_empty() {
                self.records.push(TextRecord {
                    start_address: start,
                    object_code: std::mem::take(&mut self.pending_hex),
                });
            }
        }
        self.pending_hex.clear();
    }

    pub fn into_records(mut self) -> Vec<TextRecord> {
        self.flush();
        self.records
    }
}
