// env_overrides.rs — FREMARK environment variable parsing
//
// Syntax: ;-separated key=value entries, keys case-insensitive.
//   temp=<dir>            staging directory for desktop.ini
//   timeout=<ms>          wait for the shell move to land
//   shell=com|fs          Shell.Application move or plain rename
//   readonly=force|keep   folder read-only handling after a write

use std::path::PathBuf;
use std::time::Duration;

use crate::environment_provider::EnvironmentProvider;

use super::{Config, ErrorInfo, ReadOnlyPolicy, ShellMode, FREMARK_ENV_VAR_NAME};





/// Longest accepted timeout; anything above is almost certainly a typo.
const MAX_TIMEOUT_MS: u64 = 10 * 60 * 1000;





////////////////////////////////////////////////////////////////////////////////
//
//  impl Config — env var parsing methods
//
////////////////////////////////////////////////////////////////////////////////

impl Config {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  apply_env_overrides
    //
    //  Parse the FREMARK environment variable and apply each entry.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub(super) fn apply_env_overrides(&mut self, provider: &dyn EnvironmentProvider) {
        self.errors.clear();

        let env_value = match provider.get_env_var (FREMARK_ENV_VAR_NAME) {
            Some (v) => v,
            None => return,
        };

        for entry_raw in env_value.split (';') {
            let entry = entry_raw.trim();
            if entry.is_empty() {
                continue;
            }
            self.process_override_entry (entry);
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  process_override_entry
    //
    //  Apply a single key=value entry or record why it was rejected.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn process_override_entry(&mut self, entry: &str) {
        let Some ((key, value)) = entry.split_once ('=') else {
            self.push_error ("Invalid entry format (expected key=value)", entry);
            return;
        };

        let key   = key.trim().to_ascii_lowercase();
        let value = value.trim();

        let result = match key.as_str() {
            "temp"     => self.apply_temp (value),
            "timeout"  => self.apply_timeout (value),
            "shell"    => self.apply_shell (value),
            "readonly" => self.apply_readonly (value),
            _          => Err (format!("Unknown setting '{}'", key)),
        };

        if let Err (message) = result {
            self.push_error (&message, entry);
        }
    }





    fn push_error(&mut self, message: &str, entry: &str) {
        self.errors.push (ErrorInfo {
            message: message.into(),
            entry:   entry.into(),
        });
    }





    fn apply_temp(&mut self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err ("Temp directory must not be empty".into());
        }

        self.temp_root = PathBuf::from (value);
        Ok (())
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  apply_timeout
    //
    //  Milliseconds, 0 ..= MAX_TIMEOUT_MS.  0 disables waiting.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn apply_timeout(&mut self, value: &str) -> Result<(), String> {
        let ms: u64 = value.parse()
            .map_err (|_| format!("Invalid timeout '{}' (expected milliseconds)", value))?;

        if ms > MAX_TIMEOUT_MS {
            return Err (format!("Timeout {} exceeds {} ms", ms, MAX_TIMEOUT_MS));
        }

        self.move_timeout = Duration::from_millis (ms);
        Ok (())
    }





    fn apply_shell(&mut self, value: &str) -> Result<(), String> {
        self.shell_mode = match value.to_ascii_lowercase().as_str() {
            "com" | "shell" => ShellMode::Com,
            "fs" | "file"   => ShellMode::FileSystem,
            _ => return Err (format!("Invalid shell mode '{}' (expected com or fs)", value)),
        };
        Ok (())
    }





    fn apply_readonly(&mut self, value: &str) -> Result<(), String> {
        self.readonly_policy = match value.to_ascii_lowercase().as_str() {
            "force" => ReadOnlyPolicy::Force,
            "keep"  => ReadOnlyPolicy::Keep,
            _ => return Err (format!("Invalid readonly policy '{}' (expected force or keep)", value)),
        };
        Ok (())
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  Unit Tests
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment_provider::MockEnvironmentProvider;

    fn config_from(value: &str) -> Config {
        Config::load_with_provider (&MockEnvironmentProvider::with_fremark (value))
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  applies_all_keys
    //
    //  Every supported key is applied; keys and enum values ignore case.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn applies_all_keys() {
        let config = config_from (r"Temp=D:\stage; TIMEOUT=250 ;shell=FS;readonly=Keep");

        assert_eq! (config.temp_root, PathBuf::from (r"D:\stage"));
        assert_eq! (config.move_timeout, Duration::from_millis (250));
        assert_eq! (config.shell_mode, ShellMode::FileSystem);
        assert_eq! (config.readonly_policy, ReadOnlyPolicy::Keep);
        assert! (config.errors.is_empty());
    }

    #[test]
    fn empty_entries_are_skipped() {
        let config = config_from (";;shell=com;;");
        assert_eq! (config.shell_mode, ShellMode::Com);
        assert! (config.errors.is_empty());
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  bad_entries_are_reported_and_ignored
    //
    //  Each malformed entry yields one ErrorInfo; valid entries still apply.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn bad_entries_are_reported_and_ignored() {
        let config = config_from ("timeout=soon;colour=red;readonly;shell=fs;timeout=99999999");

        assert_eq! (config.shell_mode, ShellMode::FileSystem);
        assert_eq! (config.move_timeout, crate::config::DEFAULT_MOVE_TIMEOUT);
        assert_eq! (config.errors.len(), 4);
        assert_eq! (config.errors[0].entry, "timeout=soon");
        assert! (config.errors[1].message.contains ("colour"));
        assert! (config.errors[2].message.contains ("key=value"));
        assert! (config.errors[3].message.contains ("exceeds"));
    }

    #[test]
    fn empty_temp_is_rejected() {
        let config = config_from ("temp=");
        assert_eq! (config.errors.len(), 1);
        assert_eq! (config.temp_root, std::env::temp_dir());
    }
}
