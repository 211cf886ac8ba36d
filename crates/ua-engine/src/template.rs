//! Result templates with sequential `%s` placeholders.
//!
//! `%%` renders a literal `%`. Any other `%` is copied through unchanged.

/// Counts the `%s` placeholders in a template.
pub fn count_placeholders(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c == '%' && chars.next() == Some('s') {
            count += 1;
        }
    }

    count
}

/// Substitutes `captures` into the template's placeholders, in order.
///
/// Placeholders beyond the supplied captures expand to nothing. Rule tables
/// reject that shape at compile time, so it only occurs for hand-built input.
pub fn expand<S: AsRef<str>>(template: &str, captures: &[S]) -> String {
    let mut output = String::with_capacity(template.len() + captures.len() * 4);
    let mut captures = captures.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            output.push(c);
            continue;
        }

        match chars.peek() {
            Some('s') => {
                chars.next();
                if let Some(capture) = captures.next() {
                    output.push_str(capture.as_ref());
                }
            }
            Some('%') => {
                chars.next();
                output.push('%');
            }
            _ => output.push('%'),
        }
    }

    output
}
