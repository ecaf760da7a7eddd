//! ATTRMAP - Interactive Demo Shell
//! A small REPL over one shared map, exercising the typed read
//! surface and the metrics counters.

use std::io::{self, BufRead, Write};

use attrmap::IntStringMap;

fn main() {
    env_logger::init();

    println!();
    println!("  ╔═══════════════════════════════════════════╗");
    println!("  ║              ATTRMAP Shell                ║");
    println!("  ║   Concurrent Int→String Map v{}        ║", attrmap::VERSION);
    println!("  ╚═══════════════════════════════════════════╝");
    println!();
    println!("  Commands:");
    println!("    set <key> <value>   - Store a key-value pair");
    println!("    get <key>           - Read a value (empty if absent)");
    println!("    geti <key>          - Read as integer (0 on bad input)");
    println!("    getb <key>          - Read as boolean");
    println!("    getf <key>          - Read as float");
    println!("    getd <key>          - Read as duration");
    println!("    del <key>           - Remove a key");
    println!("    keys                - List all keys");
    println!("    scan                - List all key-value pairs");
    println!("    info                - Show map statistics");
    println!("    clear               - Remove all entries");
    println!("    exit                - Quit");
    println!();

    let map = IntStringMap::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("attrmap> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }

        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "set" | "put" => {
                let Some(key) = parse_key(&parts, 3, "set <key> <value>") else {
                    continue;
                };
                let value = parts[2..].join(" ");
                map.insert(key, value);
                println!("  OK");
            }
            "get" => {
                let Some(key) = parse_key(&parts, 2, "get <key>") else {
                    continue;
                };
                let value = map.get(key);
                if map.contains(key) {
                    println!("  \"{}\"", value);
                } else {
                    println!("  (nil)");
                }
            }
            "geti" => {
                let Some(key) = parse_key(&parts, 2, "geti <key>") else {
                    continue;
                };
                println!("  {}", map.get_i64(key));
            }
            "getb" => {
                let Some(key) = parse_key(&parts, 2, "getb <key>") else {
                    continue;
                };
                println!("  {}", map.get_bool(key));
            }
            "getf" => {
                let Some(key) = parse_key(&parts, 2, "getf <key>") else {
                    continue;
                };
                println!("  {}", map.get_f64(key));
            }
            "getd" => {
                let Some(key) = parse_key(&parts, 2, "getd <key>") else {
                    continue;
                };
                println!("  {:?}", map.get_duration(key));
            }
            "del" | "delete" => {
                let Some(key) = parse_key(&parts, 2, "del <key>") else {
                    continue;
                };
                map.remove(key);
                println!("  OK (deleted)");
            }
            "keys" => {
                let mut keys = map.keys();
                keys.sort_unstable();
                println!("  {:?}", keys);
            }
            "scan" | "list" => {
                let entries = map.snapshot();
                if entries.is_empty() {
                    println!("  (empty)");
                } else {
                    for (key, value) in &entries {
                        println!("  {} -> {}", key, value);
                    }
                    println!("  ({} entries)", entries.len());
                }
            }
            "info" | "stats" => {
                println!("  Entries: {}", map.len());
                println!("{}", map.metrics().report());
            }
            "clear" => {
                map.clear();
                println!("  OK (cleared)");
            }
            "exit" | "quit" | "q" => {
                println!("  Bye.");
                break;
            }
            _ => {
                println!("  Unknown command: '{}'. Type 'exit' to quit.", parts[0]);
            }
        }
    }
}

/// Parse the key argument, printing a usage line when the command is
/// malformed.
fn parse_key(parts: &[&str], min_len: usize, usage: &str) -> Option<i64> {
    if parts.len() < min_len {
        println!("  Usage: {}", usage);
        return None;
    }
    match parts[1].parse::<i64>() {
        Ok(key) => Some(key),
        Err(_) => {
            println!("  Keys are integers, got '{}'", parts[1]);
            None
        }
    }
}
