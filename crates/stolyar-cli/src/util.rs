use std::fs;
use std::io::{self, Read};
use std::path::Path;

use stolyar_schema::DescriptorPool;

/// Read a serialized `FileDescriptorSet` and build a pool, exiting with a
/// diagnostic on any failure.
pub fn load_pool(path: &Path) -> DescriptorPool {
    let bytes = fs::read(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read {}: {}", path.display(), e);
        std::process::exit(1);
    });
    let mut pool = DescriptorPool::new();
    if let Err(e) = pool.add_file_set(&bytes) {
        eprintln!("error: {}: {}", path.display(), e);
        std::process::exit(1);
    }
    pool
}

/// Read the input document from a file, or stdin when the path is absent
/// or "-".
pub fn read_input(path: Option<&Path>) -> String {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("error: cannot read {}: {}", path.display(), e);
                std::process::exit(1);
            })
        }
        _ => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("error: cannot read stdin: {}", e);
                std::process::exit(1);
            }
            buf
        }
    }
}
