//! Decode JSON against a schema and re-encode it.

use stolyar_json::{DecodeOptions, EncodeOptions, decode, encode, encode_value};
use stolyar_runtime::Arena;

use crate::cli::FmtArgs;
use crate::util;

pub fn run(args: &FmtArgs) {
    let pool = util::load_pool(&args.schema.schema);
    let Some(def) = pool.find_message_by_name(&args.type_name) else {
        eprintln!("error: unknown type: {}", args.type_name);
        std::process::exit(1);
    };
    let text = util::read_input(args.input.as_deref());

    let mut arena = Arena::new();
    let msg = arena.new_message(def.minitable()).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    let decode_options = DecodeOptions {
        ignore_unknown: args.ignore_unknown,
    };
    if let Err(e) = decode(&text, msg, def, &pool, &decode_options, &mut arena) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let encode_options = EncodeOptions {
        emit_defaults: args.emit_defaults,
        use_proto_names: args.proto_names,
        format_enums_as_integers: args.enums_as_ints,
    };
    let rendered = if args.pretty {
        encode_value(msg, def, &pool, &encode_options, &arena)
            .map(|v| serde_json::to_string_pretty(&v).expect("JSON tree serializes"))
    } else {
        encode(msg, def, &pool, &encode_options, &arena)
    };
    match rendered {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
