//! Terminal output utilities

use owo_colors::OwoColorize;

/// Print a section header
pub fn header(msg: &str) {
    println!("{}", msg.bold().underline());
}

/// Print one list entry, dimming an optional note
pub fn item(value: &str, note: Option<&str>) {
    match note {
        Some(note) => println!("  {} {}", value, format!("({})", note).dimmed()),
        None => println!("  {}", value),
    }
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("{} {}", format!("{:<11}", format!("{}:", key)).dimmed(), value);
}
