// usage.rs — Help screen, env-var help, config display

use std::io::{self, Write};

use crate::config::{Config, FREMARK_ENV_VAR_NAME};
use crate::folder_info::FolderField;





////////////////////////////////////////////////////////////////////////////////

pub const VERSION_STRING:    &str = env!("FREMARK_VERSION_STRING");
pub const VERSION_YEAR:      &str = env!("FREMARK_VERSION_YEAR");
pub const BUILD_TIMESTAMP:   &str = env!("FREMARK_BUILD_TIMESTAMP");





////////////////////////////////////////////////////////////////////////////////
//
//  architecture
//
//  Returns the current CPU architecture as a display string.
//
////////////////////////////////////////////////////////////////////////////////

fn architecture() -> &'static str {
    if cfg!(target_arch = "x86_64") {
        "x64"
    } else if cfg!(target_arch = "aarch64") {
        "ARM64"
    } else if cfg!(target_arch = "x86") {
        "x86"
    } else {
        "unknown"
    }
}





////////////////////////////////////////////////////////////////////////////////

struct FieldInfo {
    field:       FolderField,
    description: &'static str,
}





const FIELD_INFOS: &[FieldInfo] = &[
    FieldInfo { field: FolderField::Alias,   description: "Name Explorer shows for the folder" },
    FieldInfo { field: FolderField::InfoTip, description: "Tooltip shown when hovering the folder" },
    FieldInfo { field: FolderField::Title,   description: "Title property" },
    FieldInfo { field: FolderField::Subject, description: "Subject property" },
    FieldInfo { field: FolderField::Author,  description: "Author property" },
    FieldInfo { field: FolderField::Tags,    description: "Tags property" },
];





////////////////////////////////////////////////////////////////////////////////
//
//  display_usage
//
//  Display the main usage/help screen.
//
////////////////////////////////////////////////////////////////////////////////

pub fn display_usage(out: &mut dyn Write, prefix: char) -> io::Result<()> {
    let short = if prefix == '-' { "-" } else { "/" };
    let long  = if prefix == '-' { "--" } else { "/" };

    writeln!(out, "fremark version {} {} ({})", VERSION_STRING, architecture(), BUILD_TIMESTAMP)?;
    writeln!(out, "Copyright {} relmer.  Folder remarks via desktop.ini.", VERSION_YEAR)?;
    writeln!(out)?;
    writeln!(out, "fremark read  <folder>...")?;
    writeln!(out, "fremark write [{long}<field>:<text>]... [{short}R] <folder>...")?;
    writeln!(out, "fremark clear <folder>...")?;
    writeln!(out, "fremark has   <folder>...")?;
    writeln!(out)?;
    writeln!(out, "  read     Show the remark of each folder")?;
    writeln!(out, "  write    Set the given fields; other fields keep their value")?;
    writeln!(out, "  clear    Delete desktop.ini and clear the folder's read-only bit")?;
    writeln!(out, "  has      Report whether each folder has a desktop.ini")?;
    writeln!(out)?;
    writeln!(out, "Fields:")?;

    for info in FIELD_INFOS {
        let switch = format!("{}{}:", long, info.field.display_name());
        writeln!(out, "  {:<12} {} ({})", switch, info.description, info.field.key())?;
    }

    writeln!(out)?;
    writeln!(out, "  {short}R          Replace: fields not given are removed")?;
    writeln!(out, "  {short}?          Display this help")?;
    writeln!(out, "  {long}env        Display {} environment variable help", FREMARK_ENV_VAR_NAME)?;
    writeln!(out, "  {long}config     Display the effective configuration")?;
    writeln!(out)?;
    writeln!(out, "An empty value clears a field, e.g. {long}tags:")?;
    Ok(())
}





////////////////////////////////////////////////////////////////////////////////
//
//  display_env_var_help
//
//  Syntax of the FREMARK environment variable.
//
////////////////////////////////////////////////////////////////////////////////

pub fn display_env_var_help(out: &mut dyn Write) -> io::Result<()> {
    let name = FREMARK_ENV_VAR_NAME;

    writeln!(out, "Set the {} environment variable to change defaults.", name)?;
    writeln!(out)?;
    writeln!(out, "Syntax:  set {}=<setting>[;<setting>...]", name)?;
    writeln!(out)?;
    writeln!(out, "  temp=<dir>            Staging directory for desktop.ini (default: %TEMP%)")?;
    writeln!(out, "  timeout=<ms>          Wait for the shell move to finish (default: 5000)")?;
    writeln!(out, "  shell=com|fs          Move through Shell.Application, or plain rename")?;
    writeln!(out, "  readonly=force|keep   Set the folder read-only after writing (default: force)")?;
    writeln!(out)?;
    writeln!(out, "Example: set {}=timeout=2000;readonly=keep", name)?;
    Ok(())
}





////////////////////////////////////////////////////////////////////////////////
//
//  display_current_configuration
//
//  Effective settings plus any FREMARK entries that were rejected.
//
////////////////////////////////////////////////////////////////////////////////

pub fn display_current_configuration(out: &mut dyn Write, config: &Config) -> io::Result<()> {
    writeln!(out, "Current configuration:")?;
    for line in config.describe() {
        writeln!(out, "  {}", line)?;
    }

    display_env_var_issues(out, config)
}





/// Rejected FREMARK entries, one line each.  Prints nothing when clean.
pub fn display_env_var_issues(out: &mut dyn Write, config: &Config) -> io::Result<()> {
    if config.errors.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "There are some problems with your {} environment variable:", FREMARK_ENV_VAR_NAME)?;
    for error in &config.errors {
        writeln!(out, "  {}: \"{}\"", error.message, error.entry)?;
    }
    Ok(())
}
