//! The executable computing the script names of a translation unit.

use std::process::ExitCode;

use clap::Parser;
use scriptc_driver::Arguments;

fn main() -> ExitCode {
    env_logger::init();

    scriptc_driver::run(Arguments::parse())
}
