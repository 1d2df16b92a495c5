use crate::hash_table::HashTable;

#[test]
fn insert_and_get() {
    let mut ht = HashTable::new(0);
    ht.insert("LOOP", 0x1000u32).unwrap();
    ht.insert("DATA", 0x1003u32).unwrap();
    assert_eq!(ht.get("LOOP"), Some(&0x1000));
    assert_eq!(ht.get("DATA"), Some(&0x1003));
    assert_eq!(ht.get("MISSING"), None);
}

#[test]
fn duplicate_insert_is_an_error() {
    let mut ht = HashTable::new(0);
    ht.insert("LOOP", 1u32).unwrap();
    assert!(ht.insert("LOOP", 2u32).is_err());
    // value is unchanged by the failed insert
    assert_eq!(ht.get("LOOP"), Some(&1));
}

#[test]
fn grows_past_load_factor_and_keeps_every_entry() {
    let mut ht = HashTable::new(4);
    for i in 0..50 {
        let key = format!("SYM{i}");
        ht.insert(key, i).unwrap();
    }
    for i in 0..50 {
        let key = format!("SYM{i}");
        assert_eq!(ht.get(&key), Some(&i));
    }
}

#[test]
fn zero_initial_capacity_uses_default() {
    let ht: HashTable<u32> = HashTable::new(0);
    assert_eq!(ht.len(), 0);
    assert!(ht.is_empty());
}
