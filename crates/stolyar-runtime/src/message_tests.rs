use stolyar_core::{FieldKind, MiniTable, MiniTableBuilder};

use crate::Arena;

/// One explicit-presence field of every kind, plus an implicit int32 and a
/// two-member oneof.
fn kitchen_sink() -> MiniTable {
    let mut b = MiniTableBuilder::new();
    b.singular(1, FieldKind::Bool, true)
        .singular(2, FieldKind::Int32, true)
        .singular(3, FieldKind::Int64, true)
        .singular(4, FieldKind::UInt32, true)
        .singular(5, FieldKind::UInt64, true)
        .singular(6, FieldKind::Float, true)
        .singular(7, FieldKind::Double, true)
        .singular(8, FieldKind::String, true)
        .singular(9, FieldKind::Bytes, true)
        .singular(10, FieldKind::Enum, true)
        .singular(11, FieldKind::Message, false)
        .singular(20, FieldKind::Int32, false)
        .oneof(&[(30, FieldKind::Int32), (31, FieldKind::String)]);
    b.build()
}

#[test]
fn scalar_set_get_ignores_default() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let f = mt.find_field_by_number(3).unwrap();
    arena.set_int64(msg, f, i64::MIN);
    assert_eq!(arena.get_int64(msg, f, 0), i64::MIN);
    assert_eq!(arena.get_int64(msg, f, 777), i64::MIN);

    let f = mt.find_field_by_number(5).unwrap();
    arena.set_uint64(msg, f, u64::MAX);
    assert_eq!(arena.get_uint64(msg, f, 0), u64::MAX);

    let f = mt.find_field_by_number(2).unwrap();
    arena.set_int32(msg, f, i32::MIN);
    assert_eq!(arena.get_int32(msg, f, -1), i32::MIN);
}

#[test]
fn float_nan_bits_preserved_through_storage() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let f64_field = mt.find_field_by_number(7).unwrap();
    let nan = f64::from_bits(0x7ff8_0000_0000_cafe);
    arena.set_double(msg, f64_field, nan);
    assert_eq!(
        arena.get_double(msg, f64_field, 0.0).to_bits(),
        0x7ff8_0000_0000_cafe
    );

    let f32_field = mt.find_field_by_number(6).unwrap();
    arena.set_float(msg, f32_field, -0.0);
    assert_eq!(
        arena.get_float(msg, f32_field, 1.0).to_bits(),
        (-0.0f32).to_bits()
    );
}

#[test]
fn has_field_tracks_sets_including_zero_values() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    for number in 1..=10 {
        let f = mt.find_field_by_number(number).unwrap();
        assert!(!arena.has_field(msg, f), "field {number} set at creation");
    }

    let b = mt.find_field_by_number(1).unwrap();
    arena.set_bool(msg, b, false);
    assert!(arena.has_field(msg, b));
    assert!(!arena.get_bool(msg, b, true), "stored false, not default");

    let s = mt.find_field_by_number(8).unwrap();
    let empty = arena.alloc_str("").unwrap();
    arena.set_str(msg, s, empty);
    assert!(arena.has_field(msg, s));
    assert_eq!(arena.get_str(msg, s, "default"), "");
}

#[test]
fn implicit_presence_never_has() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let f = mt.find_field_by_number(20).unwrap();
    assert!(!arena.has_field(msg, f));
    arena.set_int32(msg, f, 42);
    assert!(!arena.has_field(msg, f));
    assert_eq!(arena.get_int32(msg, f, 0), 42);
    // Implicit fields always read their storage; zero is indistinguishable
    // from unset, so a nonzero default never surfaces.
    arena.set_int32(msg, f, 0);
    assert_eq!(arena.get_int32(msg, f, 99), 0);
}

#[test]
fn string_values_are_views_not_copies() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let f = mt.find_field_by_number(8).unwrap();
    let text = arena.alloc_str("zhivago").unwrap();
    arena.set_str(msg, f, text);
    assert_eq!(arena.get_str(msg, f, ""), "zhivago");

    // The getter surfaces the same interned data the setter stored.
    let via_field = arena.get_value(msg, f).unwrap();
    assert_eq!(via_field, crate::Value::Str(text));
}

#[test]
fn bytes_set_get() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let f = mt.find_field_by_number(9).unwrap();
    assert_eq!(arena.get_bytes(msg, f, b"dflt"), b"dflt");
    let blob = arena.alloc_bytes(&[1, 2, 3]).unwrap();
    arena.set_bytes(msg, f, blob);
    assert_eq!(arena.get_bytes(msg, f, b""), &[1, 2, 3]);
}

#[test]
fn message_field_identity() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let outer = arena.new_message(&mt).unwrap();
    let inner = arena.new_message(&mt).unwrap();

    let f = mt.find_field_by_number(11).unwrap();
    assert!(arena.get_message(outer, f).is_none());
    assert!(!arena.has_field(outer, f));

    arena.set_message(outer, f, inner);
    // Message fields implicitly carry explicit presence.
    assert!(arena.has_field(outer, f));
    // Identity equality, not value equality.
    assert_eq!(arena.get_message(outer, f), Some(inner));
    assert_ne!(arena.get_message(outer, f), Some(outer));
}

#[test]
fn oneof_members_displace_each_other() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let int_member = mt.find_field_by_number(30).unwrap();
    let str_member = mt.find_field_by_number(31).unwrap();
    assert!(!arena.has_field(msg, int_member));
    assert!(!arena.has_field(msg, str_member));

    arena.set_int32(msg, int_member, -5);
    assert!(arena.has_field(msg, int_member));
    assert!(!arena.has_field(msg, str_member));
    assert_eq!(arena.get_int32(msg, int_member, 0), -5);

    let text = arena.alloc_str("won").unwrap();
    arena.set_str(msg, str_member, text);
    assert!(!arena.has_field(msg, int_member));
    assert!(arena.has_field(msg, str_member));
    assert_eq!(arena.get_str(msg, str_member, ""), "won");
    // The displaced member reads its default again.
    assert_eq!(arena.get_int32(msg, int_member, 17), 17);
}

#[test]
fn clear_field_resets_presence_and_value() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let f = mt.find_field_by_number(2).unwrap();
    arena.set_int32(msg, f, 9);
    arena.clear_field(msg, f);
    assert!(!arena.has_field(msg, f));
    assert_eq!(arena.get_int32(msg, f, 4), 4);

    // Clearing an inactive oneof member leaves the active one untouched.
    let int_member = mt.find_field_by_number(30).unwrap();
    let str_member = mt.find_field_by_number(31).unwrap();
    let text = arena.alloc_str("keep").unwrap();
    arena.set_str(msg, str_member, text);
    arena.clear_field(msg, int_member);
    assert!(arena.has_field(msg, str_member));
    assert_eq!(arena.get_str(msg, str_member, ""), "keep");

    arena.clear_field(msg, str_member);
    assert!(!arena.has_field(msg, str_member));
}

#[test]
fn generic_value_round_trip() {
    let mt = kitchen_sink();
    let mut arena = Arena::new();
    let msg = arena.new_message(&mt).unwrap();

    let f = mt.find_field_by_number(10).unwrap();
    assert_eq!(arena.get_value(msg, f), None);
    arena.set_value(msg, f, crate::Value::Enum(-3));
    assert_eq!(arena.get_value(msg, f), Some(crate::Value::Enum(-3)));
}
