use anyhow::{bail, Context, Result};
use portafs::{
    config::{load_config, CliConfig, CONFIG_ENV_VAR},
    observability::{init_logging, shutdown_logging},
    Filesystem,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(all(
    feature = "mimalloc",
    any(target_os = "linux", target_os = "macos", target_os = "android")
))]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || matches!(args[0].as_str(), "--help" | "-h") {
        print_help();
        return Ok(());
    }

    // Optional --config <file> ahead of the command
    let config_path = if args[0] == "--config" {
        if args.len() < 2 {
            bail!("--config requires a file path");
        }
        let path = PathBuf::from(&args[1]);
        args.drain(..2);
        Some(path)
    } else {
        std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)
    };

    let config = match &config_path {
        Some(path) => load_config(path).context("Failed to load configuration")?,
        None => CliConfig::default(),
    };

    init_logging(
        &config.log_level,
        config.log_directory.as_deref(),
        config.log_rotation.into(),
    )?;

    info!("portafs v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        debug!("Using configuration from: {}", path.display());
    }

    let fs = Filesystem::from_config(&config);
    let result = run(&fs, &config, &args);

    shutdown_logging();
    result
}

fn run(fs: &Filesystem, config: &CliConfig, args: &[String]) -> Result<()> {
    let Some((command, rest)) = args.split_first() else {
        print_help();
        return Ok(());
    };

    match (command.as_str(), rest) {
        ("ls", [dir]) => list(fs, Path::new(dir)),
        ("du", [dir]) => {
            println!("{}", fs.calculate_directory_size(dir));
            check_recorded(fs)
        }
        ("stat", [path]) => {
            stat(fs, Path::new(path));
            Ok(())
        }
        ("mkdir", [path]) => {
            if !fs.mkdir(path) {
                bail!("Failed to create directory: {}", path);
            }
            Ok(())
        }
        ("cwd", []) => {
            let cwd = fs.get_cwd(config.cwd_capacity).with_context(|| {
                format!(
                    "Current directory unavailable or longer than {} bytes",
                    config.cwd_capacity
                )
            })?;
            println!("{}", cwd.display());
            Ok(())
        }
        ("join", [left, right]) => {
            println!("{}", fs.join_path(left, right).display());
            Ok(())
        }
        ("native", [path]) => {
            println!("{}", fs.to_native_path(path));
            Ok(())
        }
        ("expand", [path]) => {
            let expanded = fs
                .expand_user(path)
                .context("Cannot resolve the home directory")?;
            println!("{}", expanded);
            Ok(())
        }
        _ => {
            print_help();
            bail!("Unknown command or wrong number of arguments: {}", args.join(" "));
        }
    }
}

fn list(fs: &Filesystem, dir: &Path) -> Result<()> {
    let Some(mut iter) = fs.dir_iter_start(dir) else {
        return check_recorded(fs);
    };

    loop {
        if let Some(name) = iter.entry_name() {
            println!("{}", name.to_string_lossy());
        }
        if !fs.dir_iter_next(&mut iter) {
            break;
        }
    }
    fs.dir_iter_end(Some(iter));

    check_recorded(fs)
}

fn stat(fs: &Filesystem, path: &Path) {
    println!("path:      {}", path.display());
    println!("exists:    {}", fs.exists(path));
    println!("directory: {}", fs.is_directory(path));
    println!("file:      {}", fs.is_file(path));
    println!("readable:  {}", fs.is_readable(path));
    println!("writable:  {}", fs.is_writable(path));
    if fs.is_file(path) {
        println!("size:      {}", fs.file_size(path));
    }
}

/// Turn a recorded error into a failing exit status
fn check_recorded(fs: &Filesystem) -> Result<()> {
    match fs.recorder().error_message() {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

fn print_help() {
    println!("portafs v{} - portable filesystem queries", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("  portafs [--config FILE] COMMAND [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("  ls <dir>            List every entry, including . and ..");
    println!("  du <dir>            Total size of the files directly inside <dir>");
    println!("  stat <path>         Existence, type, permissions and size");
    println!("  mkdir <abs-path>    Create one directory level");
    println!("  cwd                 Print the current working directory");
    println!("  join <a> <b>        Join two segments with the native delimiter");
    println!("  native <path>       Convert / to the native delimiter");
    println!("  expand <path>       Expand a leading ~ to the home directory");
    println!();
    println!("The config file may also be named by {}.", CONFIG_ENV_VAR);
}
