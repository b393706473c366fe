//! List fully-qualified message names in a descriptor set.

use crate::cli::TypesArgs;
use crate::util;

pub fn run(args: &TypesArgs) {
    let pool = util::load_pool(&args.schema.schema);
    for def in pool.all_messages() {
        println!("{}", def.full_name());
    }
}
