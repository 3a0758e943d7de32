// remark_manager.rs — Folder remark read / write / probe / clear
//
// Writing is a staged pipeline:
//   1. stage      desktop.ini (UTF-16) in a private temp subdirectory
//   2. remove     the folder's current desktop.ini, keeping a backup
//   3. move       the staged file in through the shell provider
//   4. mark ini   Hidden + System
//   5. mark dir   ReadOnly (Explorer only honors InfoTip on read-only folders)
//
// A failure in step 3 puts the backup back.  A failure in step 4 or 5
// leaves the new desktop.ini in place.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{Config, ReadOnlyPolicy};
use crate::desktop_ini::{self, DESKTOP_INI};
use crate::ehm::AppError;
use crate::folder_info::FolderInfo;
use crate::shell_provider::{
    self, ShellProvider,
    FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_NORMAL, FILE_ATTRIBUTE_READONLY, FILE_ATTRIBUTE_SYSTEM,
};





const MOVE_POLL_INTERVAL: Duration = Duration::from_millis(50);

const STAGING_PREFIX: &str = "fremark-";





////////////////////////////////////////////////////////////////////////////////

/// Steps of the write pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    StageTempFile,
    RemoveExisting,
    MoveIntoFolder,
    MarkIniFile,
    MarkFolder,
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WriteStage::StageTempFile  => "stage desktop.ini in the temp directory",
            WriteStage::RemoveExisting => "remove the existing desktop.ini",
            WriteStage::MoveIntoFolder => "move desktop.ini into the folder",
            WriteStage::MarkIniFile    => "mark desktop.ini hidden and system",
            WriteStage::MarkFolder     => "mark the folder read-only",
        };
        f.write_str(text)
    }
}





/// Previous desktop.ini, held while the replacement is moved in.
struct Backup {
    bytes:      Vec<u8>,
    attributes: u32,
}





/// desktop.ini written to a uniquely named temp subdirectory.  Dropping it
/// removes the subdirectory and anything left in it.
struct StagedIni {
    _dir: tempfile::TempDir,
    path: PathBuf,
}





////////////////////////////////////////////////////////////////////////////////
//
//  ensure_folder
//
//  Not-found check done before any I/O.
//
////////////////////////////////////////////////////////////////////////////////

fn ensure_folder(folder: &Path) -> Result<(), AppError> {
    if folder.as_os_str().is_empty() || !folder.is_dir() {
        return Err(AppError::FolderNotFound(folder.to_path_buf()));
    }
    Ok(())
}





////////////////////////////////////////////////////////////////////////////////
//
//  absolute_folder
//
//  Shell NameSpace only resolves fully qualified paths.  Not canonicalize:
//  the \\?\ form it produces is not accepted by the shell either.
//
////////////////////////////////////////////////////////////////////////////////

fn absolute_folder(folder: &Path) -> Result<PathBuf, AppError> {
    Ok(std::path::absolute(folder)?)
}





////////////////////////////////////////////////////////////////////////////////
//
//  read_folder_remark
//
//  Parses the folder's desktop.ini.  Never fails: a missing folder, missing
//  file or unreadable file all give an empty FolderInfo.
//
////////////////////////////////////////////////////////////////////////////////

pub fn read_folder_remark(folder: &Path) -> FolderInfo {
    if folder.as_os_str().is_empty() || !folder.is_dir() {
        return FolderInfo::default();
    }

    let ini_path = folder.join(DESKTOP_INI);
    if !ini_path.is_file() {
        return FolderInfo::default();
    }

    match fs::read(&ini_path) {
        Ok(bytes) => desktop_ini::parse_ini_text(&desktop_ini::decode_text(&bytes)),
        Err(e) => {
            log::debug!("cannot read {}: {}", ini_path.display(), e);
            FolderInfo::default()
        }
    }
}





/// True iff the folder exists and holds a desktop.ini.  Content is not checked.
pub fn has_folder_remark(folder: &Path) -> bool {
    !folder.as_os_str().is_empty() && folder.is_dir() && folder.join(DESKTOP_INI).is_file()
}





/// Writes a remark using the environment's configuration and default provider.
pub fn write_folder_remark(folder: &Path, info: &FolderInfo) -> Result<(), AppError> {
    RemarkManager::from_env().write(folder, info)
}





/// Clears a remark using the environment's configuration and default provider.
pub fn clear_folder_remark(folder: &Path) -> Result<(), AppError> {
    RemarkManager::from_env().clear(folder)
}





////////////////////////////////////////////////////////////////////////////////

/// Runs remark operations through a ShellProvider with a given Config.
pub struct RemarkManager<P: ShellProvider> {
    provider: P,
    config:   Config,
}





impl RemarkManager<Box<dyn ShellProvider>> {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_env
    //
    //  Config from FREMARK, provider chosen by that config.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn from_env() -> Self {
        let config = Config::load();
        for error in &config.errors {
            log::warn!("ignoring FREMARK entry '{}': {}", error.entry, error.message);
        }
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Self {
        let provider = shell_provider::default_provider(&config);
        RemarkManager { provider, config }
    }
}





impl<P: ShellProvider> RemarkManager<P> {
    pub fn new(provider: P, config: Config) -> Self {
        RemarkManager { provider, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn read(&self, folder: &Path) -> FolderInfo {
        read_folder_remark(folder)
    }

    pub fn has(&self, folder: &Path) -> bool {
        has_folder_remark(folder)
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  write
    //
    //  Replaces the folder's desktop.ini with one built from `info` and
    //  marks the folder so Explorer shows it.  Errors name the stage that
    //  failed.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn write(&self, folder: &Path, info: &FolderInfo) -> Result<(), AppError> {
        ensure_folder(folder)?;
        let folder = &absolute_folder(folder)?;

        let text     = desktop_ini::to_ini_text(&info.cleaned());
        let ini_path = folder.join(DESKTOP_INI);

        log::debug!("writing remark for {}", folder.display());

        let staged = self.stage_temp_file(&text)
            .map_err(AppError::at_stage(WriteStage::StageTempFile))?;
        log::debug!("staged {}", staged.path.display());

        let backup = self.remove_existing(&ini_path)
            .map_err(AppError::at_stage(WriteStage::RemoveExisting))?;

        if let Err(e) = self.move_into_folder(&staged.path, folder, &ini_path) {
            self.restore_backup(&ini_path, backup);
            return Err(AppError::at_stage(WriteStage::MoveIntoFolder)(e));
        }
        log::debug!("moved desktop.ini into {}", folder.display());

        self.provider.set_attributes(&ini_path, FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM)
            .map_err(AppError::at_stage(WriteStage::MarkIniFile))?;

        if self.config.readonly_policy == ReadOnlyPolicy::Force {
            self.mark_folder_readonly(folder)
                .map_err(AppError::at_stage(WriteStage::MarkFolder))?;
        }

        Ok(())
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  clear
    //
    //  Deletes desktop.ini (attributes reset to Normal first) and clears the
    //  folder's ReadOnly bit.  Clearing an already clear folder succeeds.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn clear(&self, folder: &Path) -> Result<(), AppError> {
        ensure_folder(folder)?;
        let folder = &absolute_folder(folder)?;

        let ini_path = folder.join(DESKTOP_INI);
        if ini_path.is_file() {
            self.provider.set_attributes(&ini_path, FILE_ATTRIBUTE_NORMAL)?;
            fs::remove_file(&ini_path)?;
            log::debug!("removed {}", ini_path.display());
        }

        let attrs = self.provider.get_attributes(folder)?;
        if attrs & FILE_ATTRIBUTE_READONLY != 0 {
            self.provider.set_attributes(folder, attrs & !FILE_ATTRIBUTE_READONLY)?;
        }

        Ok(())
    }





    fn stage_temp_file(&self, text: &str) -> Result<StagedIni, AppError> {
        let temp_root = std::path::absolute(&self.config.temp_root)?;
        fs::create_dir_all(&temp_root)?;

        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&temp_root)?;
        let path = dir.path().join(DESKTOP_INI);

        fs::write(&path, desktop_ini::encode_utf16(text))?;

        Ok(StagedIni { _dir: dir, path })
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  remove_existing
    //
    //  Deletes the current desktop.ini, returning its bytes and attributes
    //  so a failed move can put it back.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn remove_existing(&self, ini_path: &Path) -> Result<Option<Backup>, AppError> {
        if !ini_path.is_file() {
            return Ok(None);
        }

        let bytes      = fs::read(ini_path)?;
        let attributes = self.provider.get_attributes(ini_path)?;

        self.provider.set_attributes(ini_path, FILE_ATTRIBUTE_NORMAL)?;
        fs::remove_file(ini_path)?;

        Ok(Some(Backup { bytes, attributes }))
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  move_into_folder
    //
    //  Shell move, then wait for the file to land; the shell may complete
    //  the move after MoveHere returns, and with FOF_NOERRORUI it can fail
    //  without reporting anything.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn move_into_folder(&self, staged: &Path, folder: &Path, ini_path: &Path) -> Result<(), AppError> {
        self.provider.move_here(staged, folder)?;

        let deadline = Instant::now() + self.config.move_timeout;
        while !ini_path.is_file() {
            if Instant::now() >= deadline {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("{} did not appear within {} ms", ini_path.display(), self.config.move_timeout.as_millis()),
                ).into());
            }
            thread::sleep(MOVE_POLL_INTERVAL);
        }

        Ok(())
    }





    fn restore_backup(&self, ini_path: &Path, backup: Option<Backup>) {
        let Some(backup) = backup else {
            return;
        };

        if let Err(e) = fs::write(ini_path, &backup.bytes) {
            log::error!("could not restore {}: {}", ini_path.display(), e);
            return;
        }

        match self.provider.set_attributes(ini_path, backup.attributes) {
            Ok(()) => log::warn!("restored previous {}", ini_path.display()),
            Err(e) => log::warn!("restored {} but not its attributes: {}", ini_path.display(), e),
        }
    }





    fn mark_folder_readonly(&self, folder: &Path) -> Result<(), AppError> {
        let attrs = self.provider.get_attributes(folder)?;
        if attrs & FILE_ATTRIBUTE_READONLY == 0 {
            self.provider.set_attributes(folder, attrs | FILE_ATTRIBUTE_READONLY)?;
        }
        Ok(())
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
    use crate::ehm::ErrorKind;
    use crate::shell_provider::{MockShellProvider, FILE_ATTRIBUTE_DIRECTORY};
    use proptest::prelude::*;
    use tempfile::{tempdir, TempDir};

    /// Scratch area: `root/folder` is the target, `root/tmp` the staging root.
    struct Fixture {
        root:    TempDir,
        manager: RemarkManager<MockShellProvider>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_config(|_| {})
        }

        fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
            let root = tempdir().unwrap();
            fs::create_dir(root.path().join("folder")).unwrap();

            let mut config = Config::with_temp_root(root.path().join("tmp"));
            config.move_timeout = Duration::from_millis(0);
            adjust(&mut config);

            Fixture { root, manager: RemarkManager::new(MockShellProvider::new(), config) }
        }

        fn folder(&self) -> PathBuf {
            self.root.path().join("folder")
        }

        fn ini(&self) -> PathBuf {
            self.folder().join(DESKTOP_INI)
        }

        fn ini_text(&self) -> String {
            desktop_ini::decode_text(&fs::read(self.ini()).unwrap())
        }

        fn mock(&self) -> &MockShellProvider {
            self.manager.provider()
        }
    }

    fn full_info() -> FolderInfo {
        FolderInfo {
            localized_resource_name: "My Alias".into(),
            info_tip:                "Tip \u{5907}\u{6CE8}".into(),
            prop2:                   "Title".into(),
            prop3:                   "Subject".into(),
            prop4:                   "Author".into(),
            prop5:                   "urgent;review".into(),
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  round_trip_all_fields
    //
    //  Every field written comes back identical.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn round_trip_all_fields() {
        let fx = Fixture::new();
        fx.manager.write(&fx.folder(), &full_info()).unwrap();

        assert_eq!(fx.manager.read(&fx.folder()), full_info());
        assert_eq!(fx.mock().move_count(), 1);
    }

    #[test]
    fn file_on_disk_is_utf16_with_bom() {
        let fx = Fixture::new();
        fx.manager.write(&fx.folder(), &full_info()).unwrap();

        let bytes = fs::read(fx.ini()).unwrap();
        assert_eq!(&bytes[..4], &[0xFF, 0xFE, b'[', 0x00]);
    }

    #[test]
    fn empty_fields_have_no_key_on_disk() {
        let fx = Fixture::new();
        let info = FolderInfo { prop2: "Only title".into(), ..Default::default() };
        fx.manager.write(&fx.folder(), &info).unwrap();

        let text = fx.ini_text();
        assert!(text.contains("Prop2=31,Only title"));
        assert!(!text.contains("InfoTip"));
        assert!(!text.contains("Prop3"));

        let back = fx.manager.read(&fx.folder());
        assert_eq!(back.info_tip, "");
        assert_eq!(back.prop3, "");
    }

    #[test]
    fn trailing_whitespace_is_not_persisted() {
        let fx = Fixture::new();
        let info = FolderInfo { info_tip: "Hello\r\n  ".into(), ..Default::default() };
        fx.manager.write(&fx.folder(), &info).unwrap();

        assert!(fx.ini_text().contains("InfoTip=Hello\r\n"));
        assert_eq!(fx.manager.read(&fx.folder()).info_tip, "Hello");
    }

    #[test]
    fn unprefixed_prop_reads_unchanged() {
        let fx = Fixture::new();
        let text = "[{F29F85E0-4FF9-1068-AB91-08002B27B3D9}]\r\nProp2=31,Hello\r\nProp4=Hello";
        fs::write(fx.ini(), desktop_ini::encode_utf16(text)).unwrap();

        let info = fx.manager.read(&fx.folder());
        assert_eq!(info.prop2, "Hello");
        assert_eq!(info.prop4, "Hello");
    }

    #[test]
    fn lowercase_keys_are_recognized() {
        let fx = Fixture::new();
        fs::write(fx.ini(), desktop_ini::encode_utf16("[.ShellClassInfo]\r\ninfotip=quiet")).unwrap();

        assert_eq!(fx.manager.read(&fx.folder()).info_tip, "quiet");
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  project_folder_scenario
    //
    //  Info-tip + tags on a folder with no prior desktop.ini: the probe,
    //  the read-back and the folder's ReadOnly bit all reflect the write.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn project_folder_scenario() {
        let fx = Fixture::new();
        assert!(!fx.manager.has(&fx.folder()));

        fx.manager.write(&fx.folder(), &FolderInfo::with_remark("Project X", "urgent;review")).unwrap();

        assert!(fx.manager.has(&fx.folder()));
        let info = fx.manager.read(&fx.folder());
        assert_eq!(info.info_tip, "Project X");
        assert_eq!(info.prop5, "urgent;review");

        assert_ne!(fx.mock().attributes_of(&fx.folder()) & FILE_ATTRIBUTE_READONLY, 0);
        assert_eq!(fx.mock().attributes_of(&fx.ini()), FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM);
    }

    #[test]
    fn rewrite_replaces_previous_remark() {
        let fx = Fixture::new();
        fx.manager.write(&fx.folder(), &full_info()).unwrap();
        fx.manager.write(&fx.folder(), &FolderInfo::with_remark("second", "")).unwrap();

        let info = fx.manager.read(&fx.folder());
        assert_eq!(info.info_tip, "second");
        assert_eq!(info.prop2, "");
        assert_eq!(info.prop5, "");
    }

    #[test]
    fn staging_directory_is_cleaned_up() {
        let fx = Fixture::new();
        fx.manager.write(&fx.folder(), &full_info()).unwrap();

        let leftovers = fs::read_dir(fx.root.path().join("tmp")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn readonly_folder_keeps_its_attributes() {
        let fx = Fixture::new();
        let attrs = FILE_ATTRIBUTE_DIRECTORY | FILE_ATTRIBUTE_READONLY;
        fx.mock().preset(&fx.folder(), attrs);

        fx.manager.write(&fx.folder(), &full_info()).unwrap();
        assert_eq!(fx.mock().attributes_of(&fx.folder()), attrs);
    }

    #[test]
    fn keep_policy_leaves_folder_writable() {
        let fx = Fixture::with_config(|c| c.readonly_policy = ReadOnlyPolicy::Keep);
        fx.manager.write(&fx.folder(), &full_info()).unwrap();

        assert_eq!(fx.mock().attributes_of(&fx.folder()) & FILE_ATTRIBUTE_READONLY, 0);
        assert!(fx.manager.has(&fx.folder()));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  missing_folder_is_not_found_everywhere
    //
    //  Write and clear report NotFound without touching the shell; read
    //  and probe quietly return empty results.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn missing_folder_is_not_found_everywhere() {
        let fx = Fixture::new();
        let missing = fx.root.path().join("no such folder");

        let err = fx.manager.write(&missing, &full_info()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.stage().is_none());
        assert_eq!(fx.mock().move_count(), 0);

        assert_eq!(fx.manager.clear(&missing).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fx.manager.read(&missing), FolderInfo::default());
        assert!(!fx.manager.has(&missing));
        assert_eq!(read_folder_remark(Path::new("")), FolderInfo::default());
    }

    #[test]
    fn file_path_is_not_a_folder() {
        let fx = Fixture::new();
        let file = fx.root.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        let err = fx.manager.write(&file, &full_info()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn clear_is_idempotent() {
        let fx = Fixture::new();
        fx.manager.write(&fx.folder(), &full_info()).unwrap();

        fx.manager.clear(&fx.folder()).unwrap();
        fx.manager.clear(&fx.folder()).unwrap();

        assert!(!fx.ini().exists());
        assert!(!fx.manager.has(&fx.folder()));
        assert_eq!(fx.mock().attributes_of(&fx.folder()) & FILE_ATTRIBUTE_READONLY, 0);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  failed_move_restores_previous_file
    //
    //  The old desktop.ini is deleted before the move; when the move fails
    //  it comes back with its bytes and attributes.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn failed_move_restores_previous_file() {
        let fx = Fixture::new();
        fx.manager.write(&fx.folder(), &full_info()).unwrap();
        let before = fs::read(fx.ini()).unwrap();

        fx.mock().fail_move.set(true);
        let err = fx.manager.write(&fx.folder(), &FolderInfo::with_remark("new", "")).unwrap_err();

        assert_eq!(err.stage(), Some(WriteStage::MoveIntoFolder));
        assert_eq!(err.kind(), ErrorKind::ShellUnavailable);
        assert_eq!(fs::read(fx.ini()).unwrap(), before);
        assert_eq!(fx.mock().attributes_of(&fx.ini()), FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM);
        assert_eq!(fx.manager.read(&fx.folder()), full_info());
    }

    #[test]
    fn failed_move_without_previous_file_leaves_none() {
        let fx = Fixture::new();
        fx.mock().fail_move.set(true);

        let err = fx.manager.write(&fx.folder(), &full_info()).unwrap_err();
        assert_eq!(err.stage(), Some(WriteStage::MoveIntoFolder));
        assert!(!fx.ini().exists());
    }

    #[test]
    fn failed_attribute_write_keeps_new_file() {
        let fx = Fixture::new();
        fx.mock().fail_set.set(true);

        let err = fx.manager.write(&fx.folder(), &full_info()).unwrap_err();
        assert_eq!(err.stage(), Some(WriteStage::MarkIniFile));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(fx.manager.read(&fx.folder()), full_info());
    }

    #[test]
    fn stage_failure_leaves_folder_untouched() {
        let fx = Fixture::new();
        fx.manager.write(&fx.folder(), &full_info()).unwrap();

        // temp root occupied by a plain file: staging cannot create its directory
        let blocked = fx.root.path().join("blocked");
        fs::write(&blocked, b"x").unwrap();
        let mut config = fx.manager.config().clone();
        config.temp_root = blocked;
        let manager = RemarkManager::new(MockShellProvider::new(), config);

        let err = manager.write(&fx.folder(), &FolderInfo::default()).unwrap_err();
        assert_eq!(err.stage(), Some(WriteStage::StageTempFile));
        assert_eq!(manager.read(&fx.folder()), full_info());
    }

    #[test]
    fn relative_paths_reach_the_provider_absolute() {
        let cwd     = std::env::current_dir().unwrap();
        let target  = tempfile::Builder::new().prefix("fremark-rel-").tempdir_in(&cwd).unwrap();
        let staging = tempfile::Builder::new().prefix("fremark-rel-tmp-").tempdir_in(&cwd).unwrap();
        let folder  = PathBuf::from(target.path().file_name().unwrap());

        let mut config = Config::with_temp_root(PathBuf::from(staging.path().file_name().unwrap()));
        config.move_timeout = Duration::from_millis(0);
        let manager = RemarkManager::new(MockShellProvider::new(), config);

        manager.write(&folder, &FolderInfo::with_remark("relative", "")).unwrap();

        let moves = manager.provider().moves();
        assert_eq!(moves.len(), 1);
        assert!(moves[0].0.is_absolute());
        assert_eq!(moves[0].1, cwd.join(&folder));
        assert_eq!(manager.read(&folder).info_tip, "relative");

        manager.clear(&folder).unwrap();
        assert!(!manager.has(&folder));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn written_values_read_back_trimmed(
            alias in "[ -~]{0,24}",
            tip   in "[a-zA-Z0-9 ;,.=\u{4E00}-\u{4E20}]{0,24}",
            title   in "((31,)?[a-zA-Z0-9,][a-zA-Z0-9 ,]{0,15})?",
            subject in "([a-zA-Z0-9,=][a-zA-Z0-9 ,=]{0,15})?[\r\n]{0,2}",
            author  in "([a-zA-Z.\u{4E00}-\u{4E20}][a-zA-Z .\u{4E00}-\u{4E20}]{0,15})?",
            tags  in "[a-z;]{0,12}[ \t\r\n]{0,3}",
        ) {
            let fx = Fixture::new();
            let info = FolderInfo {
                localized_resource_name: alias.clone(),
                info_tip:                tip.clone(),
                prop2:                   title.clone(),
                prop3:                   subject.clone(),
                prop4:                   author.clone(),
                prop5:                   tags.clone(),
            };
            fx.manager.write(&fx.folder(), &info).unwrap();

            let back = fx.manager.read(&fx.folder());
            prop_assert_eq!(back.localized_resource_name, alias.trim());
            prop_assert_eq!(back.info_tip, tip.trim());
            prop_assert_eq!(back.prop2, title.trim());
            prop_assert_eq!(back.prop3, subject.trim());
            prop_assert_eq!(back.prop4, author.trim());
            prop_assert_eq!(back.prop5, tags.trim());

            let text = fx.ini_text();
            if !title.trim().is_empty() {
                prop_assert!(text.contains(&format!("Prop2=31,{}", title.trim_end())), "{}", text);
            }
        }
    }
}
