//! Letterhead core CLI (for checking layouts outside the browser)
//! The main interface is through WASM bindings.

use letterhead_core::{paginate_text, LayoutVariant, PageSetup};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

type InitError = Box<dyn std::error::Error + Send + Sync>;

fn init_logging() -> Result<(), InitError> {
    let filter = EnvFilter::try_from_env("LETTERHEAD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
}

fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err}");
    }

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        println!("Letterhead Core");
        println!("===============");
        println!();
        println!("Usage: letterhead-core <letter.txt> [setup.json]");
        println!();
        println!("Prints how the letter body splits across pages.");
        println!("Set LETTERHEAD_LOG=debug for pagination details.");
        return ExitCode::SUCCESS;
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            error!(%path, %err, "cannot read letter");
            return ExitCode::FAILURE;
        }
    };

    let setup = match args.next() {
        Some(setup_path) => {
            let loaded = std::fs::read_to_string(&setup_path)
                .map_err(|err| err.to_string())
                .and_then(|json| PageSetup::from_json(&json).map_err(|err| err.to_string()));
            match loaded {
                Ok(setup) => setup,
                Err(err) => {
                    error!(path = %setup_path, %err, "cannot load page setup");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => PageSetup::default(),
    };

    if let Err(err) = setup.geometry().validate() {
        error!(%err, "page setup leaves no usable geometry");
        return ExitCode::FAILURE;
    }

    let pagination = paginate_text(&text, &setup, LayoutVariant::default());
    info!(pages = pagination.page_count(), "paginated {}", path);

    for (page, paragraphs) in pagination.iter() {
        println!(
            "page {:>3}: paragraphs {:?} ({} items), {:.1}/{:.1} mm{}",
            page.page_index + 1,
            page.paragraphs,
            paragraphs.len(),
            page.content_height,
            page.available_height,
            if page.has_signature() { ", signature" } else { "" },
        );
    }

    ExitCode::SUCCESS
}
