// ehm.rs — Error handling module
//
// Every fallible operation returns Result<T, AppError> and propagates with ?.
// Callers branch on AppError::kind(); the Display text is only for people.

use std::fmt;
use std::path::PathBuf;

use crate::remark_manager::WriteStage;





/// Coarse classification of an AppError, for callers that need to branch
/// on the outcome without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Io,
    ShellUnavailable,
    InvalidArg,
}





/// Unified error type for fremark.
#[derive(Debug)]
pub enum AppError {
    /// Win32 API error (wraps windows::core::Error)
    #[cfg(windows)]
    Win32(windows::core::Error),

    /// Standard I/O error
    Io(std::io::Error),

    /// Invalid command-line argument (triggers usage display + exit 1)
    InvalidArg(String),

    /// Folder does not exist (or the path names a file)
    FolderNotFound(PathBuf),

    /// Shell automation object could not be created or refused the move
    ShellUnavailable(String),

    /// A write pipeline stage failed
    Stage {
        stage:  WriteStage,
        source: Box<AppError>,
    },
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl AppError
//
//  Classification and stage wrapping helpers.
//
////////////////////////////////////////////////////////////////////////////////

impl AppError {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  kind
    //
    //  Returns the structured failure reason.  Stage errors report the kind
    //  of the error that stopped the pipeline.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(windows)]
            AppError::Win32(_)            => ErrorKind::Io,
            AppError::Io(_)               => ErrorKind::Io,
            AppError::InvalidArg(_)       => ErrorKind::InvalidArg,
            AppError::FolderNotFound(_)   => ErrorKind::NotFound,
            AppError::ShellUnavailable(_) => ErrorKind::ShellUnavailable,
            AppError::Stage { source, .. } => source.kind(),
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  stage
    //
    //  Returns the write stage that failed, if this error came from the
    //  write pipeline.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn stage(&self) -> Option<WriteStage> {
        match self {
            AppError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  at_stage
    //
    //  Wraps an error with the write stage it occurred in.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn at_stage(stage: WriteStage) -> impl FnOnce(AppError) -> AppError {
        move |e| AppError::Stage { stage, source: Box::new(e) }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl fmt::Display for AppError
//
//  Formats AppError variants for display output.
//
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(windows)]
            AppError::Win32(e) => write!(f, "{}", e),
            AppError::Io(e) => write!(f, "{}", e),
            AppError::InvalidArg(msg) => write!(f, "{}", msg),
            AppError::FolderNotFound(path) => {
                write!(f, "Error:   folder {} does not exist", path.display())
            }
            AppError::ShellUnavailable(msg) => {
                write!(f, "Error:   shell automation unavailable: {}", msg)
            }
            AppError::Stage { stage, source } => {
                write!(f, "Error:   failed to {}: {}", stage, source)
            }
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl std::error::Error for AppError
//
//  Returns the underlying error source, if any.
//
////////////////////////////////////////////////////////////////////////////////

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(windows)]
            AppError::Win32(e) => Some(e),
            AppError::Io(e) => Some(e),
            AppError::Stage { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl From<windows::core::Error> for AppError
//
//  Converts a Win32 error into AppError::Win32.
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(windows)]
impl From<windows::core::Error> for AppError {
    fn from(e: windows::core::Error) -> Self {
        AppError::Win32(e)
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl From<std::io::Error> for AppError
//
//  Converts a standard I/O error into AppError::Io.
//
////////////////////////////////////////////////////////////////////////////////

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}





#[cfg(test)]
mod tests {
    use super::*;

    ////////////////////////////////////////////////////////////////////////////
    //
    //  display_invalid_arg
    //
    //  Verifies display output for InvalidArg error.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn display_invalid_arg() {
        let e = AppError::InvalidArg("bad switch".into());
        assert_eq!(format!("{}", e), "bad switch");
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  display_folder_not_found
    //
    //  Verifies display output for FolderNotFound error.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn display_folder_not_found() {
        let e = AppError::FolderNotFound(PathBuf::from(r"C:\NoSuchDir"));
        assert_eq!(format!("{}", e), r"Error:   folder C:\NoSuchDir does not exist");
        assert_eq!(e.kind(), ErrorKind::NotFound);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_io_error
    //
    //  Verifies conversion from std::io::Error to AppError::Io.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert_eq!(app_err.kind(), ErrorKind::Io);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  stage_reports_inner_kind
    //
    //  A stage wrapper keeps the kind of the error it wraps and exposes
    //  the stage.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn stage_reports_inner_kind() {
        let inner = AppError::ShellUnavailable("no Shell.Application".into());
        let e = AppError::at_stage(WriteStage::MoveIntoFolder)(inner);

        assert_eq!(e.kind(), ErrorKind::ShellUnavailable);
        assert_eq!(e.stage(), Some(WriteStage::MoveIntoFolder));
        assert!(format!("{}", e).contains("no Shell.Application"));
        assert!(std::error::Error::source(&e).is_some());
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_win32_error
    //
    //  Verifies conversion from windows::core::Error to AppError::Win32.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[cfg(windows)]
    #[test]
    fn from_win32_error() {
        let win_err = windows::core::Error::from_hresult(windows::core::HRESULT(0x80070002u32 as i32));
        let app_err: AppError = win_err.into();
        assert!(matches!(app_err, AppError::Win32(_)));
    }
}
