// shell_provider.rs — Shell move + file attribute abstraction
//
// The write pipeline needs three platform operations: the Shell's
// "move item here" (so Explorer is notified of the new desktop.ini), and
// reading/writing file attributes.  They sit behind ShellProvider so the
// pipeline can be tested with MockShellProvider.
//
// ShellApplicationProvider: Shell.Application COM object (IShellDispatch)
// FileSystemProvider: plain rename, no shell notification
// MockShellProvider: real moves, attributes kept in memory (tests)

use std::fs;
use std::path::Path;

use crate::config::{Config, ShellMode};
use crate::ehm::AppError;

// ── File attribute constants (Win32 values) ───────────────────────────────────

pub const FILE_ATTRIBUTE_READONLY:  u32 = 0x0000_0001;
pub const FILE_ATTRIBUTE_HIDDEN:    u32 = 0x0000_0002;
pub const FILE_ATTRIBUTE_SYSTEM:    u32 = 0x0000_0004;
pub const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x0000_0010;
pub const FILE_ATTRIBUTE_ARCHIVE:   u32 = 0x0000_0020;
pub const FILE_ATTRIBUTE_NORMAL:    u32 = 0x0000_0080;

/// FOF_SILENT | FOF_NOCONFIRMATION | FOF_NOERRORUI: no progress, no
/// prompts, no error dialogs.
pub const MOVE_HERE_FLAGS: i32 = 0x0004 | 0x0010 | 0x0400;





/// Platform operations used by the folder remark pipeline.
pub trait ShellProvider {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  move_here
    //
    //  Moves `source` into `folder`, keeping its file name.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn move_here(&self, source: &Path, folder: &Path) -> Result<(), AppError>;

    fn get_attributes(&self, path: &Path) -> Result<u32, AppError>;

    fn set_attributes(&self, path: &Path, attributes: u32) -> Result<(), AppError>;
}





impl<T: ShellProvider + ?Sized> ShellProvider for Box<T> {
    fn move_here(&self, source: &Path, folder: &Path) -> Result<(), AppError> {
        (**self).move_here(source, folder)
    }

    fn get_attributes(&self, path: &Path) -> Result<u32, AppError> {
        (**self).get_attributes(path)
    }

    fn set_attributes(&self, path: &Path, attributes: u32) -> Result<(), AppError> {
        (**self).set_attributes(path, attributes)
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  default_provider
//
//  Picks the provider named by the configuration.
//
////////////////////////////////////////////////////////////////////////////////

pub fn default_provider(config: &Config) -> Box<dyn ShellProvider> {
    match config.shell_mode {
        #[cfg(windows)]
        ShellMode::Com => Box::new(ShellApplicationProvider),
        #[cfg(not(windows))]
        ShellMode::Com => {
            log::debug!("shell=com is Windows-only; using plain filesystem moves");
            Box::new(FileSystemProvider)
        }
        ShellMode::FileSystem => Box::new(FileSystemProvider),
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  move_by_rename
//
//  Moves a file into a folder by rename, falling back to copy + delete when
//  the rename crosses volumes.
//
////////////////////////////////////////////////////////////////////////////////

pub(crate) fn move_by_rename(source: &Path, folder: &Path) -> Result<(), AppError> {
    let file_name = source.file_name()
        .ok_or_else(|| AppError::InvalidArg(format!("{} has no file name", source.display())))?;
    let target = folder.join(file_name);

    if fs::rename(source, &target).is_err() {
        fs::copy(source, &target)?;
        fs::remove_file(source)?;
    }

    Ok(())
}





// ── Attribute access ──────────────────────────────────────────────────────────

#[cfg(windows)]
mod attributes {
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::{
        GetFileAttributesW, SetFileAttributesW, FILE_FLAGS_AND_ATTRIBUTES,
        INVALID_FILE_ATTRIBUTES,
    };

    use crate::ehm::AppError;

    fn to_wide(path: &Path) -> Vec<u16> {
        path.as_os_str().encode_wide().chain(Some(0)).collect()
    }

    pub fn get(path: &Path) -> Result<u32, AppError> {
        let path_wide = to_wide(path);
        let attrs = unsafe { GetFileAttributesW(PCWSTR(path_wide.as_ptr())) };

        if attrs == INVALID_FILE_ATTRIBUTES {
            return Err(std::io::Error::last_os_error().into());
        }

        Ok(attrs)
    }

    pub fn set(path: &Path, attributes: u32) -> Result<(), AppError> {
        let path_wide = to_wide(path);
        unsafe { SetFileAttributesW(PCWSTR(path_wide.as_ptr()), FILE_FLAGS_AND_ATTRIBUTES(attributes))? };
        Ok(())
    }
}





// Outside Windows only the read-only bit of plain files maps onto the
// filesystem.  Directory read-only, hidden and system are not representable
// (a read-only Unix directory would block writing desktop.ini itself).
#[cfg(not(windows))]
mod attributes {
    use std::fs;
    use std::path::Path;

    use super::{FILE_ATTRIBUTE_DIRECTORY, FILE_ATTRIBUTE_NORMAL, FILE_ATTRIBUTE_READONLY};
    use crate::ehm::AppError;

    pub fn get(path: &Path) -> Result<u32, AppError> {
        let meta = fs::metadata(path)?;

        if meta.is_dir() {
            return Ok(FILE_ATTRIBUTE_DIRECTORY);
        }

        if meta.permissions().readonly() {
            Ok(FILE_ATTRIBUTE_READONLY)
        } else {
            Ok(FILE_ATTRIBUTE_NORMAL)
        }
    }

    pub fn set(path: &Path, attributes: u32) -> Result<(), AppError> {
        let meta = fs::metadata(path)?;

        if meta.is_dir() {
            return Ok(());
        }

        let mut perms = meta.permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(attributes & FILE_ATTRIBUTE_READONLY != 0);
        fs::set_permissions(path, perms)?;
        Ok(())
    }
}





// ── ShellApplicationProvider ──────────────────────────────────────────────────

/// Moves through the Shell.Application automation object so the shell's
/// change notification fires and Explorer refreshes the folder.
#[cfg(windows)]
pub struct ShellApplicationProvider;





#[cfg(windows)]
mod com {
    use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};

    /// Balances a successful CoInitializeEx on drop.
    pub struct ComApartment {
        initialized: bool,
    }

    impl ComApartment {
        pub fn enter() -> Self {
            // S_FALSE (already initialized) still needs a matching uninit;
            // RPC_E_CHANGED_MODE means another model owns the thread.
            let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
            ComApartment { initialized: hr.is_ok() }
        }
    }

    impl Drop for ComApartment {
        fn drop(&mut self) {
            if self.initialized {
                unsafe { CoUninitialize() };
            }
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl ShellProvider for ShellApplicationProvider
//
//  Shell.Application → NameSpace(folder) → MoveHere(source, flags).
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(windows)]
impl ShellProvider for ShellApplicationProvider {
    fn move_here(&self, source: &Path, folder: &Path) -> Result<(), AppError> {
        use windows::core::{BSTR, VARIANT};
        use windows::Win32::System::Com::{CoCreateInstance, CLSCTX_INPROC_SERVER};
        use windows::Win32::UI::Shell::{Folder, IShellDispatch, Shell};

        let source = std::path::absolute(source)?;
        let folder = std::path::absolute(folder)?;

        let _apartment = com::ComApartment::enter();

        let shell: IShellDispatch = unsafe { CoCreateInstance(&Shell, None, CLSCTX_INPROC_SERVER) }
            .map_err(|e| AppError::ShellUnavailable(e.to_string()))?;

        let folder_var = VARIANT::from(BSTR::from(folder.to_string_lossy().as_ref()));
        let target: Folder = unsafe { shell.NameSpace(&folder_var) }
            .map_err(|e| AppError::ShellUnavailable(format!("NameSpace({}): {}", folder.display(), e)))?;

        let item_var  = VARIANT::from(BSTR::from(source.to_string_lossy().as_ref()));
        let flags_var = VARIANT::from(MOVE_HERE_FLAGS);
        unsafe { target.MoveHere(&item_var, &flags_var)? };

        Ok(())
    }

    fn get_attributes(&self, path: &Path) -> Result<u32, AppError> {
        attributes::get(path)
    }

    fn set_attributes(&self, path: &Path, attributes: u32) -> Result<(), AppError> {
        attributes::set(path, attributes)
    }
}





// ── FileSystemProvider ────────────────────────────────────────────────────────

/// Plain filesystem move.  Explorer only notices the change after a refresh.
pub struct FileSystemProvider;





impl ShellProvider for FileSystemProvider {
    fn move_here(&self, source: &Path, folder: &Path) -> Result<(), AppError> {
        move_by_rename(source, folder)
    }

    fn get_attributes(&self, path: &Path) -> Result<u32, AppError> {
        attributes::get(path)
    }

    fn set_attributes(&self, path: &Path, attributes: u32) -> Result<(), AppError> {
        attributes::set(path, attributes)
    }
}





// ── MockShellProvider ─────────────────────────────────────────────────────────

/// Mock implementation for unit tests.
/// Moves files for real; attributes live in a map so every platform sees
/// Windows semantics.  Moves and attribute writes can be made to fail.
#[cfg(test)]
pub struct MockShellProvider {
    attributes:     std::cell::RefCell<std::collections::HashMap<std::path::PathBuf, u32>>,
    moves:          std::cell::RefCell<Vec<(std::path::PathBuf, std::path::PathBuf)>>,
    pub fail_move:  std::cell::Cell<bool>,
    pub fail_set:   std::cell::Cell<bool>,
}





#[cfg(test)]
impl Default for MockShellProvider {
    fn default() -> Self {
        Self::new()
    }
}





#[cfg(test)]
impl MockShellProvider {
    pub fn new() -> Self {
        MockShellProvider {
            attributes: Default::default(),
            moves:      Default::default(),
            fail_move:  std::cell::Cell::new(false),
            fail_set:   std::cell::Cell::new(false),
        }
    }

    /// Number of move_here calls that succeeded.
    pub fn move_count(&self) -> usize {
        self.moves.borrow().len()
    }

    /// (source, folder) of every successful move, oldest first.
    pub fn moves(&self) -> Vec<(std::path::PathBuf, std::path::PathBuf)> {
        self.moves.borrow().clone()
    }

    /// Attribute value as last set (or the default for the path).
    pub fn attributes_of(&self, path: &Path) -> u32 {
        self.get_attributes(path).unwrap_or(0)
    }

    pub fn preset(&self, path: &Path, attributes: u32) {
        self.attributes.borrow_mut().insert(path.to_path_buf(), attributes);
    }
}





#[cfg(test)]
impl ShellProvider for MockShellProvider {
    fn move_here(&self, source: &Path, folder: &Path) -> Result<(), AppError> {
        if self.fail_move.get() {
            return Err(AppError::ShellUnavailable("mock shell refused the move".into()));
        }

        move_by_rename(source, folder)?;
        self.moves.borrow_mut().push((source.to_path_buf(), folder.to_path_buf()));
        Ok(())
    }

    fn get_attributes(&self, path: &Path) -> Result<u32, AppError> {
        let meta = fs::metadata(path)?;

        if let Some(attrs) = self.attributes.borrow().get(path) {
            return Ok(*attrs);
        }

        Ok(if meta.is_dir() { FILE_ATTRIBUTE_DIRECTORY } else { FILE_ATTRIBUTE_ARCHIVE })
    }

    fn set_attributes(&self, path: &Path, attributes: u32) -> Result<(), AppError> {
        if self.fail_set.get() {
            return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "mock access denied").into());
        }

        fs::metadata(path)?;
        self.attributes.borrow_mut().insert(path.to_path_buf(), attributes);
        Ok(())
    }
}
