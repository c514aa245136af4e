use std::path::PathBuf;

use anyhow::{Context, Result};
use log::error;
use pkg_hooks::cli::Args;
use pkg_hooks::{Layout, hooks};

fn main() {
    // Progress lines go to stdout for the installer log; diagnostics to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();

    if let Err(e) = real_main() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let self_path = std::env::args_os().next().map(PathBuf::from);
    let args = Args::parse_args();
    let step = args.resolve_step(self_path.as_deref());

    let layout = Layout::load_or_default(args.layout.as_deref())
        .context("Failed to load payload layout")?;
    // Link targets are stored verbatim and resolve from the link's directory
    let volume = std::path::absolute(&args.target_volume).with_context(|| {
        format!("Failed to resolve target volume {}", args.target_volume.display())
    })?;
    let resolved = layout.resolve(&volume);
    log::debug!("Target volume {}: {:?}", volume.display(), resolved);

    hooks::run(step, &resolved).with_context(|| format!("{step} script failed"))?;
    log::info!("{step} script finished");
    Ok(())
}
