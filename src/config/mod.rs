// config/mod.rs — Runtime settings and FREMARK env var overrides
//
// Holds the knobs of the write pipeline: where desktop.ini is staged, how
// long to wait for the shell move, which provider performs the move, and
// whether the folder is forced read-only after a write.

mod env_overrides;

use std::path::PathBuf;
use std::time::Duration;

use crate::environment_provider::{DefaultEnvironmentProvider, EnvironmentProvider};





/// Environment variable name
pub const FREMARK_ENV_VAR_NAME: &str = "FREMARK";

/// Default upper bound on waiting for the shell to finish a move.
pub const DEFAULT_MOVE_TIMEOUT: Duration = Duration::from_millis(5000);





////////////////////////////////////////////////////////////////////////////////

/// How desktop.ini is moved into the target folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    Com,        // shell=com: Shell.Application MoveHere (Explorer notified)
    FileSystem, // shell=fs: plain rename
}

impl ShellMode {
    pub fn name(self) -> &'static str {
        match self {
            ShellMode::Com        => "com",
            ShellMode::FileSystem => "fs",
        }
    }
}

/// What a write does to the folder's read-only bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOnlyPolicy {
    Force,  // readonly=force: set it if clear (needed for info-tips)
    Keep,   // readonly=keep: leave it as found
}

impl ReadOnlyPolicy {
    pub fn name(self) -> &'static str {
        match self {
            ReadOnlyPolicy::Force => "force",
            ReadOnlyPolicy::Keep  => "keep",
        }
    }
}





/// A FREMARK entry that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub entry:   String,
}





////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Config {
    pub temp_root:       PathBuf,
    pub move_timeout:    Duration,
    pub shell_mode:      ShellMode,
    pub readonly_policy: ReadOnlyPolicy,
    pub errors:          Vec<ErrorInfo>,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl Default for Config
//
//  Built-in defaults with the process temp directory; no env var applied.
//
////////////////////////////////////////////////////////////////////////////////

impl Default for Config {
    fn default() -> Self {
        Self::with_temp_root(std::env::temp_dir())
    }
}





impl Config {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  with_temp_root
    //
    //  Built-in defaults staging under `temp_root`.  Windows moves through
    //  the shell; other platforms fall back to rename.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn with_temp_root(temp_root: impl Into<PathBuf>) -> Self {
        Config {
            temp_root:       temp_root.into(),
            move_timeout:    DEFAULT_MOVE_TIMEOUT,
            shell_mode:      if cfg!(windows) { ShellMode::Com } else { ShellMode::FileSystem },
            readonly_policy: ReadOnlyPolicy::Force,
            errors:          Vec::new(),
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  load
    //
    //  Defaults plus the FREMARK variable from the process environment.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn load() -> Self {
        Self::load_with_provider(&DefaultEnvironmentProvider)
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  load_with_provider
    //
    //  Defaults plus the FREMARK variable from `provider`.  Bad entries are
    //  recorded in `errors` and skipped.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn load_with_provider(provider: &dyn EnvironmentProvider) -> Self {
        let mut config = Self::with_temp_root(provider.temp_dir());
        config.apply_env_overrides(provider);
        config
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  describe
    //
    //  Effective settings as "key = value" lines, for the help screen.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("temp     = {}", self.temp_root.display()),
            format!("timeout  = {}", self.move_timeout.as_millis()),
            format!("shell    = {}", self.shell_mode.name()),
            format!("readonly = {}", self.readonly_policy.name()),
        ]
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  Unit Tests
//
////////////////////////////////////////////////////////////////////////////////
