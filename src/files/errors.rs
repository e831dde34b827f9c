//! User-facing error formatting.

use std::error::Error as StdError;

/// Flattens an error and its sources into one line, skipping repeats.
pub fn format_error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut current = Some(error);
    let mut parts = Vec::new();

    while let Some(err) = current {
        let text = err.to_string();
        if !text.is_empty() && parts.last() != Some(&text) {
            parts.push(text);
        }
        current = err.source();
    }

    if parts.is_empty() {
        "unknown error".to_owned()
    } else {
        parts.join(": ")
    }
}

#[cfg(test)]
mod tests {
    use super::format_error_chain;
    use std::io;

    #[test]
    fn joins_sources_and_skips_duplicates() {
        let error = anyhow::Error::new(io::Error::other("disk on fire"))
            .context("disk on fire")
            .context("failed to load old file");

        let formatted = format_error_chain(&*error);

        assert_eq!(formatted, "failed to load old file: disk on fire");
    }
}
