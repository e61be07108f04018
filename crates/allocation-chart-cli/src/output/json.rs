use serde_json::Value;

/// Pretty-print a command result to stdout.
pub fn print_json(value: &Value) {
    match render_json(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to encode result as JSON: {e}"),
    }
}

fn render_json(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
