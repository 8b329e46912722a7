//! POSIX shell quoting for the `quote` subcommand

/// Characters that never need quoting
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '_' | '-')
}

/// Quote one argument so `sh` reads it back as a single literal word
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if arg.chars().all(is_safe) {
        return arg.to_string();
    }
    // Close the quote, emit a double-quoted ', reopen
    format!("'{}'", arg.replace('\'', r#"'"'"'"#))
}

/// Join arguments into one shell-escaped command line
pub fn quote_command<S: AsRef<str>>(parts: &[S]) -> String {
    parts.iter().map(|p| quote_arg(p.as_ref())).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_safe_words_unchanged() {
        assert_eq!(quote_arg("ls"), "ls");
        assert_eq!(quote_arg("--color=auto"), "--color=auto");
        assert_eq!(quote_arg("/usr/bin/env"), "/usr/bin/env");
        assert_eq!(quote_arg("user@host:path,1%"), "user@host:path,1%");
    }

    #[test]
    fn test_special_characters_quoted() {
        assert_eq!(quote_arg("hello world"), "'hello world'");
        assert_eq!(quote_arg("$HOME"), "'$HOME'");
        assert_eq!(quote_arg("a;b"), "'a;b'");
        assert_eq!(quote_arg("*.rs"), "'*.rs'");
    }

    #[test]
    fn test_single_quote_escaped() {
        assert_eq!(quote_arg("it's"), r#"'it'"'"'s'"#);
    }

    #[test]
    fn test_empty_argument() {
        assert_eq!(quote_arg(""), "''");
    }

    #[test]
    fn test_quote_command_joins() {
        assert_eq!(quote_command(&["echo", "hello world", ""]), "echo 'hello world' ''");
        assert_eq!(quote_command::<&str>(&[]), "");
    }

    #[cfg(unix)]
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_quoted_arg_round_trips_through_sh(arg in "[ -~\t\n]{0,24}") {
            let script = format!("printf %s {}", quote_arg(&arg));
            let output = std::process::Command::new("sh").arg("-c").arg(&script).output().unwrap();
            prop_assert_eq!(String::from_utf8_lossy(&output.stdout), arg);
        }
    }
}
