// SPDX-License-Identifier: MPL-2.0
use iced_preview::app::{self, paths, Flags};
use iced_preview::domain::preview::FileCategory;
use iced_preview::logging::{self, LoggingConfig};

const HELP: &str = "\
Usage: iced_preview [OPTIONS] [FILE]

Options:
  --type <KIND>         Preview FILE as image, document, audio or video
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --config-dir <DIR>    Directory holding settings.toml
  --log-level <FILTER>  Log filter (e.g. info, iced_preview=debug)
  --cursor-settings     Open the cursor effects dialog on startup
  -h, --help            Print this help
";

struct Args {
    flags: Flags,
    config_dir: Option<String>,
    log_level: Option<String>,
}

fn parse_category(value: &str) -> Result<FileCategory, String> {
    FileCategory::parse(value).ok_or_else(|| format!("unknown file type: {value}"))
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let file_type = args.opt_value_from_fn("--type", parse_category)?;
    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let log_level = args.opt_value_from_str("--log-level")?;
    let cursor_settings = args.contains("--cursor-settings");
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Some(Args {
        flags: Flags {
            lang,
            file_path,
            file_type,
            cursor_settings,
        },
        config_dir,
        log_level,
    }))
}

fn main() -> iced::Result {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return Ok(()),
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    logging::init(LoggingConfig::from_cli(args.log_level));
    paths::init_cli_overrides(args.config_dir);

    app::run(args.flags)
}
