// fremark - Folder remarks for Windows
// Edits a folder's alias, info-tip and custom properties through desktop.ini

use std::process;

use fremark::AppError;

fn main() {
    match fremark::run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            if matches!(e, AppError::InvalidArg(_)) {
                eprintln!("Run fremark /? for help.");
            }
            process::exit(1);
        }
    }
}
