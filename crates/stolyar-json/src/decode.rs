//! JSON text to message.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use serde_json::Value as Json;
use stolyar_core::{FieldKind, MessageRef, Value};
use stolyar_runtime::Arena;
use stolyar_schema::{DescriptorPool, FieldDef, MessageDef};

use crate::{DecodeOptions, JsonError, json_kind};

/// Parse a JSON document and populate `msg` through the accessor layer.
///
/// Accepts both the JSON (lowerCamelCase) and the declared proto name for
/// every key. On failure the message may be partially written; the caller
/// discards it.
pub fn decode(
    text: &str,
    msg: MessageRef,
    def: &MessageDef,
    pool: &DescriptorPool,
    options: &DecodeOptions,
    arena: &mut Arena,
) -> Result<(), JsonError> {
    let root: Json = serde_json::from_str(text)?;
    decode_message(&root, msg, def, pool, options, arena, def.full_name())
}

fn decode_message(
    value: &Json,
    msg: MessageRef,
    def: &MessageDef,
    pool: &DescriptorPool,
    options: &DecodeOptions,
    arena: &mut Arena,
    path: &str,
) -> Result<(), JsonError> {
    let Json::Object(entries) = value else {
        return Err(JsonError::TypeMismatch {
            path: path.to_string(),
            expected: "object",
            found: json_kind(value),
        });
    };

    for (key, item) in entries {
        let field = def
            .field_by_json_name(key)
            .or_else(|| def.field_by_name(key));
        let Some(field) = field else {
            if options.ignore_unknown {
                continue;
            }
            return Err(JsonError::UnknownField {
                path: path.to_string(),
                name: key.clone(),
            });
        };

        // JSON null means "leave unset" for any field.
        if item.is_null() {
            continue;
        }

        let field_path = format!("{path}.{}", field.name());
        let layout = def.layout(field);
        if field.is_repeated() {
            let Json::Array(items) = item else {
                return Err(JsonError::TypeMismatch {
                    path: field_path,
                    expected: "array",
                    found: json_kind(item),
                });
            };
            let arr = arena.get_or_create_array(msg, layout)?;
            for (index, elem) in items.iter().enumerate() {
                let elem_path = format!("{field_path}[{index}]");
                let value = decode_single(elem, field, pool, options, arena, &elem_path)?;
                arena.array_append_value(arr, value)?;
            }
        } else {
            let value = decode_single(item, field, pool, options, arena, &field_path)?;
            arena.set_value(msg, layout, value);
        }
    }
    Ok(())
}

/// Decode one JSON value under a field's declared kind.
fn decode_single(
    item: &Json,
    field: &FieldDef,
    pool: &DescriptorPool,
    options: &DecodeOptions,
    arena: &mut Arena,
    path: &str,
) -> Result<Value, JsonError> {
    match field.kind() {
        FieldKind::Bool => match item {
            Json::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(mismatch(path, "bool", other)),
        },
        FieldKind::Int32 => {
            let wide = json_to_i64(item, path, "int32")?;
            let narrow = i32::try_from(wide).map_err(|_| JsonError::NumberOutOfRange {
                path: path.to_string(),
                kind: "int32",
            })?;
            Ok(Value::Int32(narrow))
        }
        FieldKind::Int64 => Ok(Value::Int64(json_to_i64(item, path, "int64")?)),
        FieldKind::UInt32 => {
            let wide = json_to_u64(item, path, "uint32")?;
            let narrow = u32::try_from(wide).map_err(|_| JsonError::NumberOutOfRange {
                path: path.to_string(),
                kind: "uint32",
            })?;
            Ok(Value::UInt32(narrow))
        }
        FieldKind::UInt64 => Ok(Value::UInt64(json_to_u64(item, path, "uint64")?)),
        FieldKind::Float => Ok(Value::Float(json_to_f64(item, path)? as f32)),
        FieldKind::Double => Ok(Value::Double(json_to_f64(item, path)?)),
        FieldKind::String => match item {
            Json::String(s) => Ok(Value::Str(arena.alloc_str(s)?)),
            other => Err(mismatch(path, "string", other)),
        },
        FieldKind::Bytes => match item {
            Json::String(s) => {
                let decoded = STANDARD
                    .decode(s)
                    .or_else(|_| URL_SAFE.decode(s))
                    .map_err(|_| JsonError::InvalidBase64 {
                        path: path.to_string(),
                    })?;
                Ok(Value::Bytes(arena.alloc_bytes(&decoded)?))
            }
            other => Err(mismatch(path, "base64 string", other)),
        },
        FieldKind::Enum => {
            let def = pool.enum_def(field.enum_type().expect("enum field without enum type"));
            match item {
                Json::String(name) => def.number_by_name(name).map(Value::Enum).ok_or_else(|| {
                    JsonError::UnknownEnumValue {
                        path: path.to_string(),
                        value: name.clone(),
                    }
                }),
                Json::Number(_) => {
                    let wide = json_to_i64(item, path, "enum")?;
                    let narrow = i32::try_from(wide).map_err(|_| JsonError::NumberOutOfRange {
                        path: path.to_string(),
                        kind: "enum",
                    })?;
                    Ok(Value::Enum(narrow))
                }
                other => Err(mismatch(path, "enum name or number", other)),
            }
        }
        FieldKind::Message => {
            let sub_def = pool.message(field.message_type().expect("message field without type"));
            let sub = arena.new_message(sub_def.minitable())?;
            decode_message(item, sub, sub_def, pool, options, arena, path)?;
            Ok(Value::Message(sub))
        }
    }
}

fn mismatch(path: &str, expected: &'static str, found: &Json) -> JsonError {
    JsonError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: json_kind(found),
    }
}

/// Integers arrive as JSON numbers, integral floats (exponent notation), or
/// decimal strings, per the protobuf JSON mapping.
fn json_to_i64(item: &Json, path: &str, kind: &'static str) -> Result<i64, JsonError> {
    if let Some(n) = item.as_i64() {
        return Ok(n);
    }
    if let Some(f) = item.as_f64()
        && f.fract() == 0.0
        && f >= i64::MIN as f64
        && f < i64::MAX as f64
    {
        return Ok(f as i64);
    }
    if let Json::String(s) = item {
        return s.parse::<i64>().map_err(|_| JsonError::NumberOutOfRange {
            path: path.to_string(),
            kind,
        });
    }
    match item {
        Json::Number(_) => Err(JsonError::NumberOutOfRange {
            path: path.to_string(),
            kind,
        }),
        other => Err(mismatch(path, "number or decimal string", other)),
    }
}

fn json_to_u64(item: &Json, path: &str, kind: &'static str) -> Result<u64, JsonError> {
    if let Some(n) = item.as_u64() {
        return Ok(n);
    }
    if let Some(f) = item.as_f64()
        && f.fract() == 0.0
        && f >= 0.0
        && f < u64::MAX as f64
    {
        return Ok(f as u64);
    }
    if let Json::String(s) = item {
        return s.parse::<u64>().map_err(|_| JsonError::NumberOutOfRange {
            path: path.to_string(),
            kind,
        });
    }
    match item {
        Json::Number(_) => Err(JsonError::NumberOutOfRange {
            path: path.to_string(),
            kind,
        }),
        other => Err(mismatch(path, "number or decimal string", other)),
    }
}

/// Floats additionally accept the `"NaN"` / `"Infinity"` / `"-Infinity"`
/// spellings.
fn json_to_f64(item: &Json, path: &str) -> Result<f64, JsonError> {
    if let Some(f) = item.as_f64() {
        return Ok(f);
    }
    if let Json::String(s) = item {
        return match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other.parse::<f64>().map_err(|_| JsonError::NumberOutOfRange {
                path: path.to_string(),
                kind: "double",
            }),
        };
    }
    Err(mismatch(path, "number", item))
}
