//! hotshot command-line entry point.

use std::path::Path;
use std::process::ExitCode;

use hotshot::cli::{Cli, Command, KeySpec, USAGE};
use hotshot::hotkey::default_synthesizer;
use hotshot::{Config, Key, KeyCode, Projectile};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("hotshot: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Help => println!("{USAGE}"),
        Command::Version => println!("hotshot v{}", env!("CARGO_PKG_VERSION")),
        Command::Keys => {
            for key in KeyCode::all() {
                println!("{key}");
            }
        }
        Command::Fire(direction) => {
            let config = load_config(cli.config.as_deref())?;
            let direction = direction
                .try_normalize()
                .ok_or("fire direction must be a non-zero vector")?;
            let mut projectile = Projectile::new(config.projectile);
            projectile.fire_in_direction(direction);
            let v = projectile.velocity();
            println!("{} {} {}", v.x, v.y, v.z);
        }
        Command::Press(spec) => {
            let config = load_config(cli.config.as_deref())?;
            let keys = resolve_keys(&config, spec)?;
            default_synthesizer()
                .try_send(&keys, true)
                .map_err(|e| e.to_string())?;
        }
        Command::Release(spec) => {
            let config = load_config(cli.config.as_deref())?;
            let keys = resolve_keys(&config, spec)?;
            default_synthesizer()
                .try_send(&keys, false)
                .map_err(|e| e.to_string())?;
        }
        Command::Tap { keys, hold } => {
            let config = load_config(cli.config.as_deref())?;
            let keys = resolve_keys(&config, keys)?;
            default_synthesizer()
                .tap(&keys, hold.unwrap_or(config.hold))
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    Config::load_or_default(path).map_err(|e| e.to_string())
}

fn resolve_keys(config: &Config, spec: KeySpec) -> Result<Vec<Key>, String> {
    match spec {
        KeySpec::Keys(keys) => Ok(keys),
        KeySpec::Chord(name) => config
            .chord(&name)
            .map(<[Key]>::to_vec)
            .ok_or_else(|| format!("no chord named {name:?} in config")),
    }
}
