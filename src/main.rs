use clap::{CommandFactory, Parser};
use resize_images::process::{self, ProcessOptions};
use resize_images::{config, logging, output};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for a missing or unusable folder argument.
const USAGE_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "resize-images")]
#[command(about = "Shrink oversized photos in place, keeping backups")]
#[command(long_about = "\
Shrink oversized photos in place, keeping backups

Walks FOLDER and every subfolder. Each image larger than MaxWidth x MaxHeight
is scaled down, keeping its aspect ratio:

  photos/
  ├── a.jpg                 # overwritten with the resized image
  ├── backupimages/a.jpg    # untouched original
  └── resized/a.jpg         # resized copy (SubfolderName)

Settings are read from appsettings.json next to the executable unless
--config is given. Run 'resize-images --print-config' for an example.")]
#[command(version)]
struct Cli {
    /// Folder to scan recursively
    folder: Option<PathBuf>,

    /// Settings file (default: appsettings.json beside the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report what would be resized without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Print an example settings file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", config::stock_config_json());
        return ExitCode::SUCCESS;
    }

    let Some(folder) = cli.folder else {
        // Printing help only fails if stdout is gone
        let _ = Cli::command().print_help();
        return ExitCode::from(USAGE_ERROR);
    };

    let settings = match cli.config {
        Some(path) => config::load_settings(&path),
        None => config::default_config_path().and_then(|path| config::load_settings(&path)),
    };

    let log_file = settings.as_ref().ok().and_then(|s| s.log_path.as_deref());
    if let Err(e) = logging::init(log_file) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if folder.as_os_str().is_empty() || !folder.is_dir() {
        log::error!("Invalid folder path: {}. Exiting.", folder.display());
        return ExitCode::from(USAGE_ERROR);
    }

    let options = ProcessOptions {
        dry_run: cli.dry_run,
    };

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::log_event(&event);
        }
    });
    let stats = process::process(&folder, &settings, &options, Some(&tx));
    drop(tx);
    if printer.join().is_err() {
        eprintln!("Log printer thread panicked");
    }

    log::info!("{}", output::format_summary(&stats, options.dry_run));
    ExitCode::SUCCESS
}
