// desktop_ini.rs — desktop.ini text format
//
// Serializes a FolderInfo to the INI text Explorer reads for folder
// customization, parses it back, and converts between that text and the
// UTF-16 bytes stored on disk.
//
// Layout written:
//   [.ShellClassInfo]
//   LocalizedResourceName=<alias>
//   InfoTip=<tip>
//   [{F29F85E0-4FF9-1068-AB91-08002B27B3D9}]
//   Prop2=31,<title>  ..  Prop5=31,<tags>
//   [ViewState]
//   Mode=
//   Vid=
//   FolderType=Generic

use widestring::U16String;

use crate::folder_info::{FolderField, FolderInfo};





pub const DESKTOP_INI:         &str = "desktop.ini";
pub const SHELL_CLASS_INFO:    &str = ".ShellClassInfo";
pub const FOLDER_OPTIONS_GUID: &str = "{F29F85E0-4FF9-1068-AB91-08002B27B3D9}";
pub const VIEW_STATE:          &str = "ViewState";

/// VT_LPWSTR type marker the shell expects in front of PropN values.
pub const PROP_PREFIX: &str = "31,";

const LINE_ENDING: &str = "\r\n";

const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_UTF8:     [u8; 3] = [0xEF, 0xBB, 0xBF];





////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    ShellClassInfo,
    FolderOptions,
}





////////////////////////////////////////////////////////////////////////////////
//
//  single_line
//
//  Cleans a value for writing: trailing whitespace removed, interior line
//  breaks folded to spaces.
//
////////////////////////////////////////////////////////////////////////////////

fn single_line(value: &str) -> String {
    let cleaned = crate::folder_info::clean_text(value);

    if !cleaned.contains(['\r', '\n']) {
        return cleaned.to_string();
    }

    cleaned
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}





////////////////////////////////////////////////////////////////////////////////
//
//  to_ini_text
//
//  Builds the desktop.ini text for a FolderInfo.  Empty fields produce no
//  line at all.  No trailing line ending.
//
////////////////////////////////////////////////////////////////////////////////

pub fn to_ini_text(info: &FolderInfo) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(14);

    lines.push(format!("[{}]", SHELL_CLASS_INFO));
    for field in [FolderField::Alias, FolderField::InfoTip] {
        let value = single_line(info.get(field));
        if !value.is_empty() {
            lines.push(format!("{}={}", field.key(), value));
        }
    }

    lines.push(format!("[{}]", FOLDER_OPTIONS_GUID));
    for field in FolderField::ALL.iter().copied().filter(|f| f.is_folder_option()) {
        let value = single_line(info.get(field));
        if !value.is_empty() {
            lines.push(format!("{}={}{}", field.key(), PROP_PREFIX, value));
        }
    }

    lines.push(format!("[{}]", VIEW_STATE));
    lines.push("Mode=".into());
    lines.push("Vid=".into());
    lines.push("FolderType=Generic".into());

    lines.join(LINE_ENDING)
}





////////////////////////////////////////////////////////////////////////////////
//
//  section_for_header
//
//  Maps a trimmed "[...]" line to the section it opens.  Unknown sections
//  map to Section::None so their keys are ignored.
//
////////////////////////////////////////////////////////////////////////////////

fn section_for_header(header: &str) -> Section {
    let name = header
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();

    if name.eq_ignore_ascii_case(SHELL_CLASS_INFO) {
        Section::ShellClassInfo
    } else if name.eq_ignore_ascii_case(FOLDER_OPTIONS_GUID) {
        Section::FolderOptions
    } else {
        Section::None
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  parse_ini_text
//
//  Extracts the known keys from desktop.ini text.  Never fails; anything
//  unrecognized is skipped.  Keys match case-insensitively, and only inside
//  the section they belong to.
//
////////////////////////////////////////////////////////////////////////////////

pub fn parse_ini_text(text: &str) -> FolderInfo {
    let mut info    = FolderInfo::default();
    let mut section = Section::None;

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if line.starts_with('[') {
            section = section_for_header(line);
            continue;
        }

        if section == Section::None {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let Some(field) = FolderField::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(key.trim()))
        else {
            continue;
        };

        let value = value.trim();

        match section {
            Section::ShellClassInfo if !field.is_folder_option() => {
                info.set(field, value);
            }
            Section::FolderOptions if field.is_folder_option() => {
                info.set(field, value.strip_prefix(PROP_PREFIX).unwrap_or(value));
            }
            _ => {}
        }
    }

    info
}





////////////////////////////////////////////////////////////////////////////////
//
//  encode_utf16
//
//  Encodes text as UTF-16LE with a byte-order mark; the shell's INI reader
//  only renders non-ASCII aliases and tips correctly from a Unicode file.
//
////////////////////////////////////////////////////////////////////////////////

pub fn encode_utf16(text: &str) -> Vec<u8> {
    let wide  = U16String::from_str(text);
    let mut bytes = Vec::with_capacity(2 + wide.len() * 2);

    bytes.extend_from_slice(&BOM_UTF16_LE);
    for unit in wide.as_slice() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    bytes
}





////////////////////////////////////////////////////////////////////////////////
//
//  looks_like_utf16_le
//
//  BOM-less UTF-16LE detection.  Every desktop.ini has section brackets,
//  '=' and line breaks; in UTF-16LE those land on even offsets with a NUL
//  high byte, however much of the value text is CJK.  UTF-8 never puts a
//  NUL there.
//
////////////////////////////////////////////////////////////////////////////////

fn looks_like_utf16_le(bytes: &[u8]) -> bool {
    if bytes.len() < 2 || bytes.len() % 2 != 0 {
        return false;
    }

    bytes
        .chunks_exact(2)
        .any(|p| p[1] == 0 && matches!(p[0], b'[' | b']' | b'=' | b'\r' | b'\n'))
}





////////////////////////////////////////////////////////////////////////////////
//
//  utf16_units
//
//  Reassembles code units from raw bytes in the given byte order.  An odd
//  trailing byte is dropped.
//
////////////////////////////////////////////////////////////////////////////////

fn utf16_units(bytes: &[u8], big_endian: bool) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|p| {
            if big_endian {
                u16::from_be_bytes([p[0], p[1]])
            } else {
                u16::from_le_bytes([p[0], p[1]])
            }
        })
        .collect()
}





////////////////////////////////////////////////////////////////////////////////
//
//  decode_text
//
//  Decodes desktop.ini bytes.  Handles the BOMs Windows tools write and
//  falls back to UTF-8 (lossy) for plain ANSI/ASCII files.
//
////////////////////////////////////////////////////////////////////////////////

pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&BOM_UTF16_LE) {
        return U16String::from_vec(utf16_units(rest, false)).to_string_lossy();
    }

    if let Some(rest) = bytes.strip_prefix(&BOM_UTF16_BE) {
        return U16String::from_vec(utf16_units(rest, true)).to_string_lossy();
    }

    if let Some(rest) = bytes.strip_prefix(&BOM_UTF8) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    if looks_like_utf16_le(bytes) {
        return U16String::from_vec(utf16_units(bytes, false)).to_string_lossy();
    }

    String::from_utf8_lossy(bytes).into_owned()
}





////////////////////////////////////////////////////////////////////////////////
//
//  Unit Tests
//
////////////////////////////////////////////////////////////////////////////////
