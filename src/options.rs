//! command line options and the interactive bits around them

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Result};
use clap::{App, Arg};

/// store option selections parsed by args_to_opts()
pub struct Options {
    pub src_dir: String,
    pub dest_dir: String,
    pub assume_yes: bool,
}

pub fn args_to_opts() -> Options
{
    let app = App::new("picimport")
        .version(env!("CARGO_PKG_VERSION"))
        .about("picimport is a utility to grab piles of photo and video \n\
            files and move them into a yyyy-MM/dd tree under a destination \n\
            directory, dated by filename, exif, or mtime")
        .arg(Arg::with_name("source")
            .value_name("SOURCE_DIR")
            .help("directory to import from")
            )
        .arg(Arg::with_name("dest")
            .value_name("DEST_DIR")
            .help("directory to import into")
            )
        .arg(Arg::with_name("yes")
            .short("y")
            .long("yes")
            .help("skip the confirmation prompt")
            )
        ;
    let amats = app.get_matches();

    Options {
        src_dir: amats.value_of("source").unwrap_or("").to_string(),
        dest_dir: amats.value_of("dest").unwrap_or("").to_string(),
        assume_yes: amats.is_present("yes"),
    }
}

/// this tool moves and deletes files; make the operator say so
pub fn confirmed(assume_yes: bool) -> bool
{
    if assume_yes {
        return true;
    }

    println!("picimport MOVES files out of the source tree and DELETES");
    println!("source files that already exist at the destination.");
    print!("continue [y/N]: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y")
}

/// Take the folder from the command line, or ask for it. Anything that
/// still isn't a directory is a configuration error and stops the run
/// before any file is touched.
pub fn settle_dir(kind: &str, given: &str) -> Result<String>
{
    if !given.is_empty() && Path::new(given).is_dir() {
        return Ok(given.to_string());
    }

    print!("enter {} folder: ", kind);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let entered = line.trim();

    if !entered.is_empty() && Path::new(entered).is_dir() {
        Ok(entered.to_string())
    } else {
        bail!("{} folder {:?} is not a directory", kind, entered)
    }
}
