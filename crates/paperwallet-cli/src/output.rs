//! Output formatting for human-readable and JSON modes.
//!
//! Human mode uses colored terminal output.
//! JSON mode outputs pure JSON with no ANSI escapes.

use colored::Colorize;
use serde_json::{Map, Value};

/// Prints a success line in human mode.
fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Prints a single key-value pair in human mode.
fn print_kv(key: &str, value: &str) {
    println!("{}: {}", key.bold(), value);
}

/// Prints a titled list of fields: one JSON object in JSON mode, a
/// success line followed by one `key: value` line per field otherwise.
pub fn print_fields(title: &str, fields: &[(&str, Value)], json_mode: bool) {
    if json_mode {
        let mut obj = Map::new();
        obj.insert("status".into(), Value::String("ok".into()));
        obj.insert("message".into(), Value::String(title.into()));
        for (key, value) in fields {
            obj.insert((*key).to_string(), value.clone());
        }
        println!("{}", Value::Object(obj));
        return;
    }

    print_success(title);
    for (key, value) in fields {
        match value {
            Value::String(s) => print_kv(key, s),
            other => print_kv(key, &other.to_string()),
        }
    }
}

/// Prints an error message.
pub fn print_error(msg: &str, json_mode: bool) {
    if json_mode {
        let obj = serde_json::json!({ "error": msg });
        eprintln!("{}", obj);
    } else {
        eprintln!("{} {}", "error:".red().bold(), msg);
    }
}
