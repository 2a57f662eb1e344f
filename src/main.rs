// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, create a sizer client and hand it
//   to the UI loop.
// - Endpoints default to production; see `config::SizerConfig::from_env`.

use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use sizer_cli::{api::SizerClient, config::log_level_from_env, ui::main_menu};

fn main() -> anyhow::Result<()> {
    TermLogger::init(
        log_level_from_env(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let api = SizerClient::from_env()?;

    // Blocks until the user exits.
    main_menu(api)?;
    Ok(())
}
