use env_logger::Target;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Initialize logging, writing to `log_file` when one is given.
///
/// If the file cannot be opened (permissions, readonly FS, etc.), fall back
/// to stderr rather than refusing to start.
pub fn init_with(log_file: Option<PathBuf>) {
    let target = log_file
        .map(|path| -> io::Result<Target> {
            let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
            Ok(Target::Pipe(Box::new(file)))
        })
        .and_then(|result| result.ok())
        .unwrap_or(Target::Stderr);

    env_logger::Builder::from_default_env()
        .target(target)
        .filter_level(log::LevelFilter::Info)
        .init();
}
