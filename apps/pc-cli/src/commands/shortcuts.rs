// shortcuts.rs — Print the keyboard shortcut help table.

use std::io::Write;

use pc_shortcuts::default_help;

pub fn execute() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    print_help(&mut stdout.lock())
}

pub fn print_help(out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{:<10} DESCRIPTION", "KEY")?;
    writeln!(out, "{}", "-".repeat(40))?;
    for (key, description) in default_help() {
        writeln!(out, "{:<10} {}", key, description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_table_lists_every_shortcut() {
        let mut out = Vec::new();
        print_help(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 2 + default_help().len());
        assert!(text.contains("Ctrl+N     Create new project"));
        assert!(text.contains("Escape     Close dialog"));
    }
}
