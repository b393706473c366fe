//! JSON name derivation.

/// Derive the lowerCamelCase JSON name from a proto field name, per the
/// protobuf JSON mapping: underscores are removed and the following letter
/// is capitalized. Used when the descriptor does not carry an explicit
/// `json_name`.
pub fn to_json_name(proto_name: &str) -> String {
    let mut out = String::with_capacity(proto_name.len());
    let mut capitalize = false;
    for c in proto_name.chars() {
        if c == '_' {
            capitalize = true;
        } else if capitalize {
            out.extend(c.to_uppercase());
            capitalize = false;
        } else {
            out.push(c);
        }
    }
    out
}
