//! `kiln`: bakes models, scripts, and textures into runtime-ready form.
//!
//! Exit codes: 0 on a clean bake, 1 on any failure. Failures that
//! produce messages (job errors, load failures) are also written to
//! `errors.txt` in the output directory. An interrupted run terminates
//! by signal with no special code.

mod args;
mod error;
mod model;
mod script;
mod texture;

use std::fs;
use std::path::Path;

use clap::Parser;

use args::{infer_kind, Args, AssetKind};
use error::CliError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

/// Stem of the input file name, used to derive output file names.
pub(crate) fn input_stem(input: &Path) -> Result<&str, CliError> {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| CliError::BadInputPath(input.display().to_string()))
}

fn write_error_file(output_dir: &Path, errors: &[String]) {
    let path = output_dir.join("errors.txt");
    if let Err(error) = fs::write(&path, errors.join("\n")) {
        log::error!("failed to write {}: {error}", path.display());
    }
}

fn run(args: &Args) -> i32 {
    let kind = match args.kind.or_else(|| infer_kind(&args.input)) {
        Some(kind) => kind,
        None => {
            log::error!(
                "cannot infer asset kind of '{}'; pass --kind",
                args.input.display()
            );
            return EXIT_FAILURE;
        }
    };

    if let Err(error) = fs::create_dir_all(&args.output_dir) {
        log::error!(
            "cannot create output directory '{}': {error}",
            args.output_dir.display()
        );
        return EXIT_FAILURE;
    }

    let outcome = match kind {
        AssetKind::Model => model::bake_model(&args.input, &args.output_dir),
        AssetKind::Script => script::bake_script(&args.input, &args.output_dir).map(|_| Vec::new()),
        AssetKind::Texture => {
            texture::bake_texture(&args.input, &args.output_dir).map(|_| Vec::new())
        }
    };

    match outcome {
        Ok(errors) if errors.is_empty() => EXIT_SUCCESS,
        Ok(errors) => {
            log::warn!("bake finished with {} error(s)", errors.len());
            write_error_file(&args.output_dir, &errors);
            EXIT_FAILURE
        }
        Err(error) => {
            log::error!("bake failed: {error}");
            write_error_file(&args.output_dir, &[error.to_string()]);
            EXIT_FAILURE
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    std::process::exit(run(&args));
}
