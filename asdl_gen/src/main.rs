use clap::Parser;
use clap::error::ErrorKind;
use cmds::codegen::CodegenArgs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cmds;

#[derive(Parser)]
#[command(name = "asdl-gen")]
#[command(about = "Generate zero-copy C++ readers from ASDL schemas", long_about = None)]
struct Cli {
    /* Action to perform; the only action is `cpp` */
    #[arg(value_name = "ACTION")]
    action: Option<String>,

    /* Schema file (.asdl text, or .yaml/.yml) */
    #[arg(value_name = "SCHEMA")]
    schema: Option<PathBuf>,

    /* Buffer alignment in bytes (1, 2, 4 or 8); selects the base pointer type */
    #[arg(long = "alignment", value_name = "BYTES", default_value_t = asdl_gen::encoding::DEFAULT_ALIGNMENT)]
    alignment: u32,

    /* Width in bytes of each offset slot */
    #[arg(long = "ref-width", value_name = "BYTES", default_value_t = asdl_gen::encoding::DEFAULT_REF_WIDTH)]
    ref_width: u32,

    /* Print the emitter IR (JSON) instead of C++ */
    #[arg(long = "print-ir")]
    print_ir: bool,

    /* Enable verbose logging on stderr */
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/* First line of a clap error, without its `error: ` prefix */
fn usage_error_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().find(|line| !line.trim().is_empty()).unwrap_or_default();
    line.trim_start_matches("error: ").trim_end().to_string()
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            eprintln!("FATAL: {}", usage_error_line(&err));
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.verbose);

    let args = CodegenArgs {
        action: cli.action,
        schema: cli.schema,
        alignment: cli.alignment,
        ref_width: cli.ref_width,
        print_ir: cli.print_ir,
    };

    match cmds::codegen::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("FATAL: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_is_reported_on_one_line() {
        let err = Cli::try_parse_from(["asdl-gen", "cpp", "m.asdl", "--bogus"])
            .err()
            .expect("unknown flag should be rejected");
        let line = usage_error_line(&err);
        assert!(line.starts_with("unexpected argument '--bogus'"), "{}", line);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn bad_flag_value_is_reported_on_one_line() {
        let err = Cli::try_parse_from(["asdl-gen", "cpp", "m.asdl", "--alignment", "four"])
            .err()
            .expect("non-numeric alignment should be rejected");
        let line = usage_error_line(&err);
        assert!(line.starts_with("invalid value 'four'"), "{}", line);
    }
}
