use crate::{BytesRef, FieldKind, MessageRef, Slot, StrRef, Value};

#[test]
fn slot_size() {
    assert_eq!(std::mem::size_of::<Slot>(), 8);
}

#[test]
fn scalar_slot_round_trips() {
    let cases = [
        Value::Bool(true),
        Value::Bool(false),
        Value::Int32(i32::MIN),
        Value::Int32(-1),
        Value::Int64(i64::MIN),
        Value::Int64(i64::MAX),
        Value::UInt32(u32::MAX),
        Value::UInt64(u64::MAX),
        Value::Enum(-42),
    ];
    for v in cases {
        assert_eq!(Value::from_slot(v.kind(), v.to_slot()), v);
    }
}

#[test]
fn float_bits_survive() {
    // Signed zero distinction.
    let neg = Value::Double(-0.0).to_slot();
    assert_eq!(neg.as_f64().to_bits(), (-0.0f64).to_bits());
    let pos = Value::Double(0.0).to_slot();
    assert_ne!(neg, pos);

    // NaN payload preservation, which value equality cannot check.
    let payload = f64::from_bits(0x7ff8_0000_dead_beef);
    let slot = Value::Double(payload).to_slot();
    assert_eq!(slot.as_f64().to_bits(), 0x7ff8_0000_dead_beef);

    let payload32 = f32::from_bits(0x7fc0_1234);
    let slot32 = Value::Float(payload32).to_slot();
    assert_eq!(slot32.as_f32().to_bits(), 0x7fc0_1234);
}

#[test]
fn i32_sign_extension_does_not_leak() {
    // -1 as i32 must not read back as u64::MAX through the raw cell.
    let slot = Slot::from_i32(-1);
    assert_eq!(slot.as_i32(), -1);
    assert_eq!(slot.as_u64(), u64::from(u32::MAX));
}

#[test]
fn handle_slot_round_trips() {
    let s = Value::Str(StrRef::new(7));
    assert_eq!(Value::from_slot(FieldKind::String, s.to_slot()), s);

    let b = Value::Bytes(BytesRef::new(0));
    assert_eq!(Value::from_slot(FieldKind::Bytes, b.to_slot()), b);

    let m = Value::Message(MessageRef::new(123_456));
    assert_eq!(Value::from_slot(FieldKind::Message, m.to_slot()), m);
}

#[test]
fn value_kind_is_stable() {
    assert_eq!(Value::Bool(true).kind(), FieldKind::Bool);
    assert_eq!(Value::Enum(3).kind(), FieldKind::Enum);
    assert_eq!(Value::Message(MessageRef::new(0)).kind(), FieldKind::Message);
}

#[test]
fn zero_values() {
    assert_eq!(Value::zero(FieldKind::Bool), Value::Bool(false));
    assert_eq!(Value::zero(FieldKind::Double), Value::Double(0.0));
    assert_eq!(Value::zero(FieldKind::Int64), Value::Int64(0));
}

#[test]
#[should_panic(expected = "reference kinds have no zero value")]
fn zero_rejects_reference_kinds() {
    Value::zero(FieldKind::Message);
}

#[test]
fn kind_scalar_split() {
    assert!(FieldKind::Bool.is_scalar());
    assert!(FieldKind::Enum.is_scalar());
    assert!(!FieldKind::String.is_scalar());
    assert!(!FieldKind::Bytes.is_scalar());
    assert!(!FieldKind::Message.is_scalar());
}
