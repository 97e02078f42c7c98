use apple_dict_reader::AppleDictReader;
use std::env;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <path-to-Body.data> [--parse] [--limit <N>] [--encoding <LABEL>]",
        program
    );
    std::process::exit(1);
}

/// Returns the value following `flag`, exiting with an error if it is missing.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|arg| arg == flag)?;
    match args.get(idx + 1) {
        Some(value) => Some(value.as_str()),
        None => {
            eprintln!("ERROR: {} flag requires an argument.", flag);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let path = &args[1];
    let parse = args.iter().any(|arg| arg == "--parse");
    let encoding = flag_value(&args, "--encoding");
    let limit = match flag_value(&args, "--limit").map(str::parse::<usize>) {
        None => usize::MAX,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("ERROR: Invalid --limit value: {}", e);
            std::process::exit(1);
        }
    };

    println!("Reading Apple dictionary: {}", path);
    println!("{}", "=".repeat(60));

    let reader = match AppleDictReader::open(path, encoding) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("\nERROR: Failed to open dictionary");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("  Chunk table ends at: {:#x}", reader.chunk_limit());
    println!("  Text encoding: {}", reader.encoding().name());
    println!();

    let mut shown = 0usize;
    let mut failed = 0usize;
    let chunks_read;

    if parse {
        let mut entries = reader.entries();
        for result in entries.by_ref() {
            if shown >= limit {
                break;
            }
            match result {
                Ok((_, entry)) => {
                    shown += 1;
                    let pos: Vec<&str> = entry.senses.iter().filter_map(|s| s.pos.as_deref()).collect();
                    let variant = entry.variant.map(|v| format!(" ({})", v)).unwrap_or_default();
                    println!(
                        "  {}. {}{} [{}] {} sense(s)",
                        shown,
                        entry.word,
                        variant,
                        pos.join(", "),
                        entry.senses.len()
                    );
                }
                Err(e) if e.is_fragment_error() => {
                    failed += 1;
                    eprintln!("  skipped: {}", e);
                }
                Err(e) => {
                    eprintln!("\nERROR: {}", e);
                    std::process::exit(1);
                }
            }
        }
        chunks_read = entries.chunks_read();
    } else {
        let mut definitions = reader.definitions();
        for result in definitions.by_ref() {
            if shown >= limit {
                break;
            }
            match result {
                Ok(definition) => {
                    shown += 1;
                    println!("  {}. {}", shown, definition.title);
                }
                Err(e) if e.is_fragment_error() => {
                    failed += 1;
                    eprintln!("  skipped: {}", e);
                }
                Err(e) => {
                    eprintln!("\nERROR: {}", e);
                    std::process::exit(1);
                }
            }
        }
        chunks_read = definitions.chunks_read();
    }

    println!("\n{}", "=".repeat(60));
    println!("Statistics:");
    println!("  Chunks read: {}", chunks_read);
    println!("  Entries shown: {}", shown);
    println!("  Fragments skipped: {}", failed);
}
