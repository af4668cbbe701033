//! zerostart-inspect: report where a symbol lives in an ELF image
//!
//! Usage: zerostart-inspect <elf> [symbol]
//!
//! Exit status: 0 when the symbol is in zero-fill storage, 1 when its bytes
//! are stored in the file, 2 on usage or inspection errors.

use std::env;
use std::process;

use zerostart_inspect::{inspect_file, RESERVED_REGION_SYMBOL};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: zerostart-inspect <elf> [symbol]");
        process::exit(2);
    }

    let path = &args[1];
    let symbol = args.get(2).map_or(RESERVED_REGION_SYMBOL, String::as_str);

    match inspect_file(path, symbol) {
        Ok(placement) => {
            println!("{path}: {placement}");
            if placement.occupies_file_bytes() {
                eprintln!("{symbol} is stored in the image, not zero-filled");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            process::exit(2);
        }
    }
}
