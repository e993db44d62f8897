use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod output;

use cargo_relocate::build::BuildDriver;
use cargo_relocate::log_status;
use cargo_relocate::paths;
use cargo_relocate::pipeline::{self, Context, RunReport};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "cargo-relocate")]
#[command(version = VERSION)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(about = "Run the cargo build driver and copy the produced artifact to a destination")]
#[command(
    after_help = "Wrapper options must come before the first build argument.\n\
                  Example: cargo-relocate --release --rename squeekboard /build/src/squeekboard"
)]
struct Cli {
    /// Print help (`--help` itself is forwarded to the build)
    #[arg(long = "wrapper-help", action = ArgAction::Help)]
    #[allow(dead_code)]
    wrapper_help: Option<bool>,

    /// Print version (`--version` itself is forwarded to the build)
    #[arg(long = "wrapper-version", action = ArgAction::Version)]
    #[allow(dead_code)]
    wrapper_version: Option<bool>,

    /// Build working directory holding cargo.sh and the debug/ and release/ outputs
    /// [default: directory of this executable]
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Build driver script, run as `sh <PATH> build ...` [default: <base-dir>/cargo.sh]
    #[arg(long, value_name = "PATH")]
    build_script: Option<PathBuf>,

    /// Print a JSON summary on stdout when finished
    #[arg(long)]
    json: bool,

    /// Build arguments, `--rename <NAME>` and the destination path
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let result = build_context(&cli).and_then(|ctx| pipeline::run(&cli.args, &ctx));

    match &result {
        Ok(report) => log_status!("done", "{}", summary(report)),
        Err(err) => output::print_error(err),
    }

    if cli.json {
        if let Err(err) = output::print_json_result(&result) {
            output::print_error(&err);
        }
    }

    let exit_code = match &result {
        Ok(_) => 0,
        Err(err) => output::exit_code_for_error(err),
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn build_context(cli: &Cli) -> cargo_relocate::Result<Context> {
    let caller_dir = paths::caller_dir()?;
    let base_dir = paths::resolve_base_dir(cli.base_dir.as_deref(), &caller_dir)?;

    let mut ctx = Context::new(base_dir, caller_dir);
    if let Some(script) = &cli.build_script {
        let script = paths::absolutize(script, &ctx.caller_dir);
        ctx = ctx.with_driver(BuildDriver::new(script));
    }

    Ok(ctx)
}

fn summary(report: &RunReport) -> String {
    match &report.relocation {
        Some(relocation) => format!("{} -> {}", relocation.source, relocation.destination),
        None => "build only".to_string(),
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
