//! Dump one message type's computed layout as an aligned table.

use serde_json::{Value as Json, json};
use stolyar_core::Presence;
use stolyar_schema::MessageDef;

use crate::cli::FieldsArgs;
use crate::util;

pub fn run(args: &FieldsArgs) {
    let pool = util::load_pool(&args.schema.schema);
    let Some(def) = pool.find_message_by_name(&args.type_name) else {
        eprintln!("error: unknown type: {}", args.type_name);
        std::process::exit(1);
    };
    if args.json {
        let out = serde_json::to_string_pretty(&render_json(def)).expect("JSON tree serializes");
        println!("{out}");
    } else {
        print!("{}", render(def));
    }
}

/// Machine-readable form of the layout; kinds and presence serialize
/// through their derives (`"int32"`, `"implicit"`, `{"hasbit": 0}`,
/// `{"oneof": {"case_slot": 3}}`).
pub(crate) fn render_json(def: &MessageDef) -> Json {
    let rows: Vec<Json> = def
        .fields()
        .iter()
        .map(|field| {
            let layout = def.layout(field);
            json!({
                "number": field.number(),
                "name": field.name(),
                "json_name": field.json_name(),
                "kind": field.kind(),
                "repeated": field.is_repeated(),
                "presence": layout.presence,
                "slot": layout.slot,
            })
        })
        .collect();
    json!({ "type": def.full_name(), "fields": rows })
}

/// One row per field in declaration order: number, name, kind, presence, slot.
pub(crate) fn render(def: &MessageDef) -> String {
    let mut rows = vec![[
        "#".to_string(),
        "name".to_string(),
        "kind".to_string(),
        "presence".to_string(),
        "slot".to_string(),
    ]];
    for field in def.fields() {
        let layout = def.layout(field);
        let kind = if field.is_repeated() {
            format!("repeated {}", field.kind().name())
        } else {
            field.kind().name().to_string()
        };
        let presence = match layout.presence {
            Presence::Implicit => "implicit".to_string(),
            Presence::Hasbit(bit) => format!("hasbit({bit})"),
            Presence::Oneof { case_slot } => format!("oneof(case={case_slot})"),
        };
        rows.push([
            field.number().to_string(),
            field.name().to_string(),
            kind,
            presence,
            layout.slot.to_string(),
        ]);
    }

    // Pad every column but the last to its widest cell.
    let mut widths = [0usize; 4];
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    let mut out = String::new();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            match widths.get(i) {
                Some(&w) => {
                    out.push_str(cell);
                    out.extend(std::iter::repeat_n(' ', w - cell.len()));
                }
                None => out.push_str(cell),
            }
        }
        out.push('\n');
    }
    out
}
