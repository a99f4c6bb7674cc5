//! `pml list` command.

use crate::directives::DirectiveKind;

/// Render one line per known directive.
#[must_use]
pub fn render() -> String {
    DirectiveKind::ALL
        .iter()
        .map(|kind| {
            let note = if kind.can_generate_blocks() { "  (can generate blocks)" } else { "" };
            format!("{kind}{note}\n")
        })
        .collect()
}

/// Execute the `list` command.
///
/// # Errors
///
/// Never fails; returns `Result` for dispatch uniformity.
pub fn run() -> Result<(), String> {
    print!("{}", render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn lists_every_directive() {
        assert_eq!(render(), ":ask\n:do  (can generate blocks)\n");
    }
}
