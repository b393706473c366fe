use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stolyar", bin_name = "stolyar")]
#[command(about = "Inspect protobuf descriptor sets and format JSON against them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List message types in a descriptor set
    Types(TypesArgs),

    /// Dump the computed field layout of one message type
    Fields(FieldsArgs),

    /// Decode JSON against a schema and re-encode it
    #[command(after_help = r#"EXAMPLES:
  stolyar fmt --schema set.desc --type pkg.Message input.json
  cat input.json | stolyar fmt --schema set.desc --type pkg.Message --pretty
  stolyar fmt --schema set.desc --type pkg.Message --emit-defaults input.json"#)]
    Fmt(FmtArgs),
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Serialized FileDescriptorSet (protoc --descriptor_set_out)
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,
}

#[derive(Args)]
pub struct TypesArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
}

#[derive(Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Fully-qualified message name (e.g. "pkg.Message")
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Emit the layout as JSON instead of aligned text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FmtArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Fully-qualified message name
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// Input JSON file (stdin if omitted or "-")
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Emit zero-valued implicit fields instead of omitting them
    #[arg(long)]
    pub emit_defaults: bool,

    /// Use declared field names instead of lowerCamelCase
    #[arg(long)]
    pub proto_names: bool,

    /// Emit enum fields as numbers instead of symbolic names
    #[arg(long)]
    pub enums_as_ints: bool,

    /// Skip unknown JSON keys instead of failing on them
    #[arg(long)]
    pub ignore_unknown: bool,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}
