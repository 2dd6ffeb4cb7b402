// SPDX-License-Identifier: MPL-2.0
use iced_collage::app::{self, Flags};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    app::run(parse_flags(pico_args::Arguments::from_env()))
}

/// Reads `--lang`, `--config-dir` and the image paths to preload.
///
/// Malformed options are logged and ignored.
fn parse_flags(mut args: pico_args::Arguments) -> Flags {
    let lang = args
        .opt_value_from_str::<_, String>("--lang")
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring --lang");
            None
        });
    let config_dir = args
        .opt_value_from_os_str("--config-dir", |s| Ok::<_, std::convert::Infallible>(PathBuf::from(s)))
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring --config-dir");
            None
        });
    let files = args
        .finish()
        .into_iter()
        .filter(|arg| !arg.to_string_lossy().starts_with("--"))
        .map(PathBuf::from)
        .collect();

    Flags {
        lang,
        files,
        config_dir,
    }
}
