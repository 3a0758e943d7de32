// environment_provider.rs — Process environment abstraction
//
// Config reads the FREMARK variable and the temp directory through this
// trait so tests can supply both without touching the real environment.

use std::path::PathBuf;

/// Trait for environment access.
pub trait EnvironmentProvider {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  get_env_var
    //
    //  Returns the value of the named environment variable, if set.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn get_env_var(&self, name: &str) -> Option<String>;

    ////////////////////////////////////////////////////////////////////////////
    //
    //  temp_dir
    //
    //  Directory used to stage desktop.ini before it is moved into place.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn temp_dir(&self) -> PathBuf;
}





/// Reads from the actual process environment.
pub struct DefaultEnvironmentProvider;





impl EnvironmentProvider for DefaultEnvironmentProvider {
    fn get_env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}





/// Mock implementation for unit tests.
/// Stores preset variables and a fixed temp directory.
#[cfg(test)]
pub struct MockEnvironmentProvider {
    vars:     std::collections::HashMap<String, String>,
    temp_dir: PathBuf,
}





#[cfg(test)]
impl MockEnvironmentProvider {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  new
    //
    //  Creates an empty mock whose temp directory is `temp_dir`.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        MockEnvironmentProvider {
            vars:     std::collections::HashMap::new(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Mock with the FREMARK variable set to `value`.
    pub fn with_fremark(value: &str) -> Self {
        let mut mock = Self::new(std::env::temp_dir());
        mock.set(crate::config::FREMARK_ENV_VAR_NAME, value);
        mock
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.into(), value.into());
    }
}





#[cfg(test)]
impl EnvironmentProvider for MockEnvironmentProvider {
    fn get_env_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone()
    }
}
