//! Dumps the high-level content of one or more SQLite files to the log.
//! Grounded on `examples/original_source/cmd/sqlite-dump/main.go`: same
//! per-file fields, same "keep going on a per-file error" behavior, same
//! "no arguments is a usage error" exit code, rewritten onto this crate's
//! `Database`/`log` instead of `flag`/`log.Printf` with a fixed prefix.

use std::env;
use std::process::ExitCode;

use sqlite_reader::Database;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: sqlite-dump file1 [file2 [...]]");
        return ExitCode::FAILURE;
    }

    for path in &args {
        if let Err(e) = dump(path) {
            log::error!("{}: {}", path, e);
        }
    }
    ExitCode::SUCCESS
}

fn dump(path: &str) -> anyhow::Result<()> {
    log::debug!("opening {:?}", path);
    let db = Database::open(path)?;

    println!("{}:", path);
    println!("  version: {}", db.version());
    println!("  page size: {}", db.page_size());
    println!("  num pages: {}", db.num_pages());
    println!("  num tables: {}", db.tables().len());

    for table in db.tables() {
        let cols = table
            .columns()
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  table {} ({})", table.name(), cols);
    }

    Ok(())
}
