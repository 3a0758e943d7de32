// command_line.rs — CLI argument parsing (custom, no clap)
//
// fremark <command> [switches] <folder>...
// Windows-style /switch and -switch prefixes; long switches take a value
// after ':' (or '=' with --), e.g. /tip:"Project X"  --tags=urgent;review

use std::path::PathBuf;

use crate::ehm::AppError;
use crate::folder_info::FolderField;

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Read,   // print the remark fields
    Write,  // set fields from /alias: /tip: /title: /subject: /author: /tags:
    Clear,  // delete desktop.ini, clear folder read-only
    Has,    // report whether desktop.ini exists
}

impl Command {
    pub fn from_name(name: &str) -> Option<Command> {
        match name.to_ascii_lowercase().as_str() {
            "read"  | "show"   => Some(Command::Read),
            "write" | "set"    => Some(Command::Write),
            "clear" | "remove" => Some(Command::Clear),
            "has"   | "check"  => Some(Command::Has),
            _ => None,
        }
    }
}

// ── CommandLine struct ────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CommandLine {
    pub command:        Option<Command>,
    pub folders:        Vec<PathBuf>,
    pub edits:          Vec<(FolderField, String)>,
    pub replace:        bool,
    pub show_help:      bool,
    pub show_env_help:  bool,
    pub show_config:    bool,
    pub switch_prefix:  char,
}

impl Default for CommandLine {
    fn default() -> Self {
        CommandLine {
            command:       None,
            folders:       Vec::new(),
            edits:         Vec::new(),
            replace:       false,
            show_help:     false,
            show_env_help: false,
            show_config:   false,
            switch_prefix: '-',
        }
    }
}

impl CommandLine {
    /// Parse command-line arguments into a CommandLine struct.
    /// Args should NOT include argv[0] (program name).
    pub fn parse_from<I, S>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = CommandLine::default();

        for arg_ref in args {
            let arg = arg_ref.as_ref();
            if arg.is_empty() {
                continue;
            }

            let Some(first_char) = arg.chars().next() else {
                continue;
            };

            match first_char {
                '-' | '/' if arg.len() > 1 => {
                    cmd.switch_prefix = first_char;

                    let (switch_arg, is_double_dash) = match arg.strip_prefix("--") {
                        Some(rest) => (rest, true),
                        None       => (&arg[1..], false),
                    };

                    // Reject single-dash long switches (e.g., -tip:x → error)
                    if first_char == '-' && !is_double_dash && Self::is_long(switch_arg) {
                        return Err(AppError::InvalidArg(format!("Unknown switch: {}", arg)));
                    }

                    cmd.handle_switch(switch_arg, arg)?;
                }
                _ => {
                    if cmd.command.is_none() && cmd.folders.is_empty() {
                        if let Some(command) = Command::from_name(arg) {
                            cmd.command = Some(command);
                            continue;
                        }
                    }
                    cmd.folders.push(PathBuf::from(arg));
                }
            }
        }

        Ok(cmd)
    }

    /// True if nothing needs to run beyond printing help text.
    pub fn is_informational(&self) -> bool {
        self.show_help || self.show_env_help || self.show_config
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  validate
    //
    //  Cross-argument checks done after parsing: a command and at least one
    //  folder are required, and field switches only make sense for write.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn validate(&self) -> Result<Command, AppError> {
        let command = self.command
            .ok_or_else(|| AppError::InvalidArg("Missing command (read, write, clear or has)".into()))?;

        if self.folders.is_empty() {
            return Err(AppError::InvalidArg("No folder given".into()));
        }

        if command != Command::Write && (!self.edits.is_empty() || self.replace) {
            return Err(AppError::InvalidArg("Field switches are only valid with write".into()));
        }

        if command == Command::Write && self.edits.is_empty() && !self.replace {
            return Err(AppError::InvalidArg("write needs at least one field switch".into()));
        }

        Ok(command)
    }

    /// Long switch: 2+ chars before any ':' / '=' value separator.
    fn is_long(switch_arg: &str) -> bool {
        let name_len = switch_arg.find([':', '=']).unwrap_or(switch_arg.len());
        name_len >= 2
    }

    /// Route a switch argument to the appropriate handler.
    fn handle_switch(&mut self, switch_arg: &str, original: &str) -> Result<(), AppError> {
        if Self::is_long(switch_arg) {
            return self.handle_long_switch(switch_arg, original);
        }

        match switch_arg.to_ascii_lowercase().as_str() {
            "?" | "h" => { self.show_help = true; Ok(()) }
            "r"       => { self.replace   = true; Ok(()) }
            _ => Err(AppError::InvalidArg(format!("Unknown switch: {}", original))),
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  handle_long_switch
    //
    //  Flags (help, env, config, replace) or field assignments
    //  (<field>:<value>).  A field switch with an empty value clears it.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn handle_long_switch(&mut self, switch_arg: &str, original: &str) -> Result<(), AppError> {
        let (name, value) = match switch_arg.find([':', '=']) {
            Some(pos) => (&switch_arg[..pos], Some(&switch_arg[pos + 1..])),
            None      => (switch_arg, None),
        };

        if value.is_none() {
            if name.eq_ignore_ascii_case("help") {
                self.show_help = true;
                return Ok(());
            } else if name.eq_ignore_ascii_case("env") {
                self.show_env_help = true;
                return Ok(());
            } else if name.eq_ignore_ascii_case("config") {
                self.show_config = true;
                return Ok(());
            } else if name.eq_ignore_ascii_case("replace") {
                self.replace = true;
                return Ok(());
            }
        }

        let field = FolderField::from_name(name)
            .ok_or_else(|| AppError::InvalidArg(format!("Unknown switch: {}", original)))?;

        let value = value
            .ok_or_else(|| AppError::InvalidArg(format!("Missing value for {} (use {}:<text>)", original, original)))?;

        self.edits.retain(|(f, _)| *f != field);
        self.edits.push((field, value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cmd = CommandLine::default();
        assert!(cmd.command.is_none());
        assert!(cmd.folders.is_empty());
        assert!(cmd.edits.is_empty());
        assert!(!cmd.replace);
        assert!(!cmd.is_informational());
        assert_eq!(cmd.switch_prefix, '-');
    }

    #[test]
    fn parse_read_with_folders() {
        let cmd = CommandLine::parse_from(["read", r"C:\A", r"C:\B"]).unwrap();
        assert_eq!(cmd.command, Some(Command::Read));
        assert_eq!(cmd.folders, vec![PathBuf::from(r"C:\A"), PathBuf::from(r"C:\B")]);
        assert_eq!(cmd.validate().unwrap(), Command::Read);
    }

    #[test]
    fn command_word_after_folder_is_a_folder() {
        let cmd = CommandLine::parse_from(["clear", "read"]).unwrap();
        assert_eq!(cmd.command, Some(Command::Clear));
        assert_eq!(cmd.folders, vec![PathBuf::from("read")]);
    }

    #[test]
    fn parse_field_switches() {
        let cmd = CommandLine::parse_from([
            "write", "/tip:Project X", "--tags=urgent;review", "/Title:", r"C:\P",
        ]).unwrap();

        assert_eq!(cmd.edits, vec![
            (FolderField::InfoTip, "Project X".to_string()),
            (FolderField::Tags,    "urgent;review".to_string()),
            (FolderField::Title,   String::new()),
        ]);
        assert_eq!(cmd.switch_prefix, '/');
        assert_eq!(cmd.validate().unwrap(), Command::Write);
    }

    #[test]
    fn value_may_contain_separators() {
        let cmd = CommandLine::parse_from(["write", "/tip:a:b=c", "x"]).unwrap();
        assert_eq!(cmd.edits, vec![(FolderField::InfoTip, "a:b=c".to_string())]);
    }

    #[test]
    fn repeated_field_keeps_last_value() {
        let cmd = CommandLine::parse_from(["write", "/alias:one", "/alias:two", "x"]).unwrap();
        assert_eq!(cmd.edits, vec![(FolderField::Alias, "two".to_string())]);
    }

    #[test]
    fn parse_help_and_info_switches() {
        assert!(CommandLine::parse_from(["/?"]).unwrap().show_help);
        assert!(CommandLine::parse_from(["--help"]).unwrap().show_help);
        assert!(CommandLine::parse_from(["--env"]).unwrap().show_env_help);
        assert!(CommandLine::parse_from(["/CONFIG"]).unwrap().show_config);
    }

    #[test]
    fn parse_replace_short_and_long() {
        assert!(CommandLine::parse_from(["write", "/r", "x"]).unwrap().replace);
        assert!(CommandLine::parse_from(["write", "--replace", "x"]).unwrap().replace);
    }

    #[test]
    fn single_dash_long_switch_errors() {
        assert!(CommandLine::parse_from(["write", "-tip:x", "f"]).is_err());
    }

    #[test]
    fn unknown_switch_errors() {
        assert!(CommandLine::parse_from(["/z"]).is_err());
        assert!(CommandLine::parse_from(["/colour:red"]).is_err());
        assert!(CommandLine::parse_from(["/tip"]).is_err());
    }

    #[test]
    fn lone_dash_is_a_folder() {
        let cmd = CommandLine::parse_from(["has", "-"]).unwrap();
        assert_eq!(cmd.folders, vec![PathBuf::from("-")]);
    }

    #[test]
    fn validate_rejects_incomplete_command_lines() {
        assert!(CommandLine::parse_from([r"C:\A"]).unwrap().validate().is_err());
        assert!(CommandLine::parse_from(["read"]).unwrap().validate().is_err());
        assert!(CommandLine::parse_from(["read", "/tip:x", "f"]).unwrap().validate().is_err());
        assert!(CommandLine::parse_from(["write", "f"]).unwrap().validate().is_err());
        assert!(CommandLine::parse_from(["write", "/r", "f"]).unwrap().validate().is_ok());
    }
}
