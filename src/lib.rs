// fremark - Folder remarks for Windows
// Edits a folder's alias, info-tip and custom properties through desktop.ini

pub mod ehm;
pub mod environment_provider;
pub mod config;
pub mod folder_info;
pub mod desktop_ini;
pub mod shell_provider;
pub mod remark_manager;
pub mod batch;
pub mod command_line;
pub mod usage;

use std::io::{self, Write};

use batch::BatchEditor;
use command_line::{Command, CommandLine};
use config::Config;
use shell_provider::ShellProvider;

pub use ehm::{AppError, ErrorKind};
pub use folder_info::{FolderField, FolderInfo};
pub use remark_manager::{
    clear_folder_remark, has_folder_remark, read_folder_remark, write_folder_remark,
    RemarkManager, WriteStage,
};





/// Main entry point for the library.
/// Called by main.rs; Ok(false) means the command ran but some folder
/// failed (or, for `has`, lacks a remark).
pub fn run() -> Result<bool, AppError> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let cmd = CommandLine::parse_from(&args)?;

    let config = Config::load();
    if !config.errors.is_empty() && !cmd.show_config {
        usage::display_env_var_issues(&mut io::stderr().lock(), &config)?;
    }

    let manager = RemarkManager::from_config(config);
    let stdout  = io::stdout();
    let mut out = stdout.lock();

    let ok = execute(&cmd, &manager, &mut out)?;
    out.flush()?;
    Ok(ok)
}





////////////////////////////////////////////////////////////////////////////////
//
//  execute
//
//  Runs a parsed command line against a manager, writing one line (or
//  block) per folder to `out`.
//
////////////////////////////////////////////////////////////////////////////////

pub fn execute<P: ShellProvider>(
    cmd: &CommandLine,
    manager: &RemarkManager<P>,
    out: &mut dyn Write,
) -> Result<bool, AppError> {
    if cmd.is_informational() {
        if cmd.show_help {
            usage::display_usage(out, cmd.switch_prefix)?;
        }
        if cmd.show_env_help {
            usage::display_env_var_help(out)?;
        }
        if cmd.show_config {
            usage::display_current_configuration(out, manager.config())?;
        }
        return Ok(true);
    }

    match cmd.validate()? {
        Command::Read  => read_folders(cmd, manager, out),
        Command::Write => write_folders(cmd, manager, out),
        Command::Clear => clear_folders(cmd, manager, out),
        Command::Has   => probe_folders(cmd, manager, out),
    }
}





fn read_folders<P: ShellProvider>(cmd: &CommandLine, manager: &RemarkManager<P>, out: &mut dyn Write) -> Result<bool, AppError> {
    let mut ok = true;

    for folder in &cmd.folders {
        if !folder.is_dir() {
            writeln!(out, "{}: {}", folder.display(), AppError::FolderNotFound(folder.clone()))?;
            ok = false;
            continue;
        }

        let info = manager.read(folder);
        writeln!(out, "{}", folder.display())?;
        if info.is_empty() {
            writeln!(out, "  (no remark)")?;
            continue;
        }
        for field in FolderField::ALL {
            writeln!(out, "  {:<8} {}", field.display_name(), info.get(field))?;
        }
    }

    Ok(ok)
}





////////////////////////////////////////////////////////////////////////////////
//
//  write_folders
//
//  Read-modify-write through the batch editor: each folder keeps the
//  fields not named on the command line unless /R was given.
//
////////////////////////////////////////////////////////////////////////////////

fn write_folders<P: ShellProvider>(cmd: &CommandLine, manager: &RemarkManager<P>, out: &mut dyn Write) -> Result<bool, AppError> {
    let mut editor = BatchEditor::load(&cmd.folders);

    if cmd.replace {
        for field in FolderField::ALL {
            editor.clear_selected(field);
        }
    }

    for (field, value) in &cmd.edits {
        editor.apply_to_selected(*field, value);
    }

    let report = editor.save_selected(manager);

    for entry in editor.entries() {
        match &entry.error {
            Some(message) => writeln!(out, "{}: {}", entry.folder_path.display(), message)?,
            None          => writeln!(out, "{}: remark written", entry.folder_path.display())?,
        }
    }

    Ok(report.is_success())
}





fn clear_folders<P: ShellProvider>(cmd: &CommandLine, manager: &RemarkManager<P>, out: &mut dyn Write) -> Result<bool, AppError> {
    let mut ok = true;

    for folder in &cmd.folders {
        match manager.clear(folder) {
            Ok(())  => writeln!(out, "{}: remark cleared", folder.display())?,
            Err(e)  => {
                ok = false;
                writeln!(out, "{}: {}", folder.display(), e)?;
            }
        }
    }

    Ok(ok)
}





fn probe_folders<P: ShellProvider>(cmd: &CommandLine, manager: &RemarkManager<P>, out: &mut dyn Write) -> Result<bool, AppError> {
    let mut all = true;

    for folder in &cmd.folders {
        let has = manager.has(folder);
        all &= has;
        writeln!(out, "{}: {}", folder.display(), if has { "yes" } else { "no" })?;
    }

    Ok(all)
}
