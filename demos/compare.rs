//! Print the differences between two text files.
//!
//! ```text
//! cargo run --example compare -- oldfile newfile
//! ```

use blockdiff::DiffOptions;
use std::{env, fs::File, io, io::BufReader, process::ExitCode};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let [old, new] = args.as_slice() else {
        eprintln!("Usage: compare oldfile newfile");
        return ExitCode::from(2);
    };

    match compare(old, new) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            eprintln!("compare: {}", e);
            ExitCode::from(2)
        }
    }
}

fn compare(old: &str, new: &str) -> Result<bool, Box<dyn std::error::Error>> {
    // both files are closed when they go out of scope, on every path
    let old = BufReader::new(File::open(old)?);
    let new = BufReader::new(File::open(new)?);

    let stdout = io::stdout();
    let changed = DiffOptions::new().diff_readers(old, new, stdout.lock())?;
    Ok(changed)
}
