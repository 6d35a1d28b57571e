#[cfg(not(feature = "cli"))]
compile_error!("The `ibooks` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;

use ibk::cli;
use ibk::cli::app::{Cli, ColorMode, Commands};
use ibk::IbkError;

fn main() {
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, IbkError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| IbkError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Books {
            library,
            store,
            hidden,
            verbose,
            json,
        } => cli::books::execute(
            &cli::books::BooksOptions {
                library,
                store,
                hidden,
                verbose,
                json,
            },
            &mut writer,
        ),

        Commands::Annotations {
            library,
            store,
            book,
            deleted,
            unsorted,
            verbose,
            json,
        } => cli::annotations::execute(
            &cli::annotations::AnnotationsOptions {
                library,
                store,
                book,
                deleted,
                unsorted,
                verbose,
                json,
            },
            &mut writer,
        ),

        Commands::Export {
            library,
            store,
            format,
            deleted,
        } => cli::export::execute(
            &cli::export::ExportOptions {
                library,
                store,
                format,
                deleted,
            },
            &mut writer,
        ),

        Commands::Info {
            library,
            store,
            json,
        } => cli::info::execute(
            &cli::info::InfoOptions {
                library,
                store,
                json,
            },
            &mut writer,
        ),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "ibooks", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
