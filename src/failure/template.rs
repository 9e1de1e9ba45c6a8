//! Positional `{}` templates for failure details.
//!
//! The syntax is a small subset of `format!`:
//! - `{}` is a placeholder, filled left to right.
//! - `{{` and `}}` are escapes for a literal `{` / `}`.
//! - Any other brace is copied through as-is.

use std::fmt::{self, Write};

/// Count the `{}` placeholders in a template. Escaped braces are not counted.
pub fn count_placeholders(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => match chars.peek() {
                Some('{') => {
                    chars.next();
                }
                Some('}') => {
                    chars.next();
                    count += 1;
                }
                _ => {}
            },
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
            }
            _ => {}
        }
    }

    count
}

/// Substitute `args` into the placeholders of `template`, left to right.
///
/// Placeholders without a matching argument stay as a literal `{}`; surplus
/// arguments are ignored. Never fails.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next_arg = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => match chars.peek() {
                Some('{') => {
                    chars.next();
                    out.push('{');
                }
                Some('}') => {
                    chars.next();
                    match next_arg.next() {
                        // Writing into a String cannot fail.
                        Some(arg) => {
                            let _ = write!(out, "{}", arg);
                        }
                        None => out.push_str("{}"),
                    }
                }
                _ => out.push('{'),
            },
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            other => out.push(other),
        }
    }

    out
}
