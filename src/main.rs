use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

mod actions;
mod dates;
mod options;
mod scan;

use actions::{DirGuard, Outcome};

fn main() -> Result<()> {
    let opts = options::args_to_opts();

    if !options::confirmed(opts.assume_yes) {
        println!("exiting without doing anything");
        return Ok(());
    }

    let src_root = options::settle_dir("source", &opts.src_dir)?;
    let dest_root = options::settle_dir("destination", &opts.dest_dir)?;

    let files = scan::scan_path(&src_root);
    println!("scan {} ({} files)\n", src_root, files.len());

    let guard = DirGuard::new();
    let dest = Path::new(&dest_root);

    // unordered per-file dispatch; the only thing workers share is the guard
    files.par_iter().for_each(|file| {
        let date = dates::resolve(file);
        match actions::relocate(file, date, dest, &guard) {
            Outcome::Moved { dest } => {
                println!("{} ---> {}", file.display(), dest.display());
            }
            Outcome::DuplicateDeleted { dest } => {
                println!(
                    "{} ---> {} :::: destination already exists, source deleted as duplicate",
                    file.display(),
                    dest.display()
                );
            }
            Outcome::Failed { dest, err } => {
                println!("{} ---> {} :::: {}", file.display(), dest.display(), err);
            }
        }
    });

    println!("\nCreated {} folders", guard.created());
    Ok(())
}
