//! Message to JSON text.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value as Json};
use stolyar_core::{MessageRef, Slot, Value};
use stolyar_runtime::Arena;
use stolyar_schema::{DescriptorPool, FieldDef, MessageDef};

use crate::{EncodeOptions, JsonError};

/// Render a message to JSON text. Fields appear in declaration order.
pub fn encode(
    msg: MessageRef,
    def: &MessageDef,
    pool: &DescriptorPool,
    options: &EncodeOptions,
    arena: &Arena,
) -> Result<String, JsonError> {
    let value = encode_value(msg, def, pool, options, arena)?;
    Ok(serde_json::to_string(&value)?)
}

/// Measure-then-fill variant: always returns the full encoding's byte size,
/// copying at most `buf.len()` bytes into `buf`. An empty buffer is the
/// sizing call; truncation is not an error.
pub fn encode_into(
    msg: MessageRef,
    def: &MessageDef,
    pool: &DescriptorPool,
    options: &EncodeOptions,
    arena: &Arena,
    buf: &mut [u8],
) -> Result<usize, JsonError> {
    let text = encode(msg, def, pool, options, arena)?;
    let bytes = text.as_bytes();
    let copied = bytes.len().min(buf.len());
    buf[..copied].copy_from_slice(&bytes[..copied]);
    Ok(bytes.len())
}

/// Render to a JSON tree without serializing, for callers that post-process
/// (pretty-printing, embedding).
pub fn encode_value(
    msg: MessageRef,
    def: &MessageDef,
    pool: &DescriptorPool,
    options: &EncodeOptions,
    arena: &Arena,
) -> Result<Json, JsonError> {
    let mut out = Map::with_capacity(def.fields().len());
    for field in def.fields() {
        let key = if options.use_proto_names {
            field.name()
        } else {
            field.json_name()
        };
        let layout = def.layout(field);

        if field.is_repeated() {
            let rendered = match arena.get_array(msg, layout) {
                Some(arr) if arena.array_len(arr) > 0 => {
                    let mut items = Vec::with_capacity(arena.array_len(arr));
                    for index in 0..arena.array_len(arr) {
                        let value = arena.array_get_value(arr, field.kind(), index);
                        items.push(render_value(value, field, pool, options, arena)?);
                    }
                    Some(Json::Array(items))
                }
                _ if options.emit_defaults => Some(Json::Array(Vec::new())),
                _ => None,
            };
            if let Some(rendered) = rendered {
                out.insert(key.to_string(), rendered);
            }
            continue;
        }

        // Explicit-presence fields (optionals, oneof members, messages) are
        // emitted only when present, emit_defaults or not; defaults are a
        // concept of implicit-presence fields only.
        match arena.get_value(msg, layout) {
            Some(value) => {
                let implicit_zero = !layout.has_presence() && is_zero_value(value, arena);
                if implicit_zero && !options.emit_defaults {
                    continue;
                }
                out.insert(
                    key.to_string(),
                    render_value(value, field, pool, options, arena)?,
                );
            }
            // Implicit string/bytes fields hold a null handle until first
            // write; their default is the empty string either way.
            None if !layout.has_presence() && options.emit_defaults => {
                out.insert(key.to_string(), Json::String(String::new()));
            }
            None => {}
        }
    }
    Ok(Json::Object(out))
}

/// Whether a stored value equals its kind's default. For string/bytes the
/// zero value is emptiness of the interned data, not the null handle; a
/// field set to `""` reads back the same as one never set.
fn is_zero_value(value: Value, arena: &Arena) -> bool {
    match value {
        Value::Str(r) => arena.str(r).is_empty(),
        Value::Bytes(r) => arena.bytes(r).is_empty(),
        _ => value.to_slot() == Slot::ZERO,
    }
}

fn render_value(
    value: Value,
    field: &FieldDef,
    pool: &DescriptorPool,
    options: &EncodeOptions,
    arena: &Arena,
) -> Result<Json, JsonError> {
    Ok(match value {
        Value::Bool(v) => Json::Bool(v),
        Value::Int32(v) => Json::Number(v.into()),
        Value::UInt32(v) => Json::Number(v.into()),
        // 64-bit integers render as strings to survive IEEE-754 consumers.
        Value::Int64(v) => Json::String(v.to_string()),
        Value::UInt64(v) => Json::String(v.to_string()),
        Value::Float(v) => render_f64(f64::from(v)),
        Value::Double(v) => render_f64(v),
        Value::Str(r) => Json::String(arena.str(r).to_string()),
        Value::Bytes(r) => Json::String(STANDARD.encode(arena.bytes(r))),
        Value::Enum(v) => render_enum(v, field, pool, options),
        Value::Message(sub) => {
            let sub_def = pool.message(field.message_type().expect("message field without type"));
            encode_value(sub, sub_def, pool, options, arena)?
        }
    })
}

fn render_f64(v: f64) -> Json {
    match Number::from_f64(v) {
        Some(n) => Json::Number(n),
        None if v.is_nan() => Json::String("NaN".to_string()),
        None if v > 0.0 => Json::String("Infinity".to_string()),
        None => Json::String("-Infinity".to_string()),
    }
}

fn render_enum(v: i32, field: &FieldDef, pool: &DescriptorPool, options: &EncodeOptions) -> Json {
    if !options.format_enums_as_integers
        && let Some(id) = field.enum_type()
        && let Some(name) = pool.enum_def(id).name_by_number(v)
    {
        return Json::String(name.to_string());
    }
    // Numeric form, also the fallback for values the schema has no name for.
    Json::Number(v.into())
}
