// build.rs — Inject version + build timestamp.
//
// Emits cargo:rustc-env directives so src/ can use env!() macros.
//
// Env vars injected:
//   FREMARK_VERSION_STRING  e.g. "0.1.0"
//   FREMARK_VERSION_YEAR    e.g. "2026"
//   FREMARK_BUILD_TIMESTAMP e.g. "Feb  9 2026 14:30"

use chrono::Local;





////////////////////////////////////////////////////////////////////////////////
//
//  build_timestamp
//
//  Returns the current local time formatted as a build timestamp string.
//
////////////////////////////////////////////////////////////////////////////////

fn build_timestamp() -> String {
    Local::now().format("%b %e %Y %H:%M").to_string()
}





////////////////////////////////////////////////////////////////////////////////
//
//  current_year
//
//  Returns the current year as a four-digit string.
//
////////////////////////////////////////////////////////////////////////////////

fn current_year() -> String {
    Local::now().format("%Y").to_string()
}





////////////////////////////////////////////////////////////////////////////////
//
//  emit_env_vars
//
//  Emits cargo:rustc-env directives for version, timestamp, and year.
//
////////////////////////////////////////////////////////////////////////////////

fn emit_env_vars(version: &str, timestamp: &str, year: &str) {
    println!("cargo:rustc-env=FREMARK_VERSION_STRING={version}");
    println!("cargo:rustc-env=FREMARK_VERSION_YEAR={year}");
    println!("cargo:rustc-env=FREMARK_BUILD_TIMESTAMP={timestamp}");
}





////////////////////////////////////////////////////////////////////////////////
//
//  main
//
//  Entry point: reads the package version and emits env vars.
//
////////////////////////////////////////////////////////////////////////////////

fn main() {
    let version   = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".into());
    let timestamp = build_timestamp();
    let year      = current_year();



    println!("cargo:rerun-if-changed=build.rs");

    emit_env_vars(&version, &timestamp, &year);
}
