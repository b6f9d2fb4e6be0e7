//! ec compiler driver
//!
//! Command-line front door: dumps tokens or the AST, translates ec source
//! to C, and optionally hands the C to a system compiler.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::DriverConfig;
use ec_frontend::{Frontend, Lexer, ParseOutput};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use which::which;

#[derive(Parser, Debug)]
#[command(name = "ec")]
#[command(about = "ec compiler - translates ec programs to C")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of diagnostics to print before summarizing the rest
    #[arg(long, global = true)]
    max_errors: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream
    Tokens {
        /// Input ec source file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the syntax tree
    Ast {
        /// Input ec source file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate to C
    Emit {
        /// Input ec source file
        input: PathBuf,

        /// Output C file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Translate to C and compile it
    Build {
        /// Input ec source file
        input: PathBuf,

        /// Output executable (defaults to the input name without extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// C compiler to invoke
        #[arg(long)]
        cc: Option<String>,

        /// Keep the generated C file next to the executable
        #[arg(short = 'k', long)]
        keep_c: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Parse `input`, printing diagnostics and failing if there are any
fn parse(input: &Path, config: &DriverConfig) -> Result<ParseOutput> {
    let output = Frontend::parse_file(input, config.parser_config())
        .with_context(|| format!("Failed to compile {}", input.display()))?;
    if output.diagnostics.has_errors() {
        output.diagnostics.print_diagnostics();
        return Err(ec_common::CompilerError::Rejected {
            errors: output.diagnostics.error_count(),
        })
        .with_context(|| format!("Failed to compile {}", input.display()));
    }
    log::info!("parsed {}: {} item(s)", input.display(), output.unit.items.len());
    Ok(output)
}

fn emit_c(input: &Path, config: &DriverConfig) -> Result<String> {
    let output = parse(input, config)?;
    Ok(Frontend::emit(&output, config.codegen_config())?)
}

fn tokens_command(input: &Path, json: bool) -> Result<()> {
    let tokens = Lexer::open(input)?.tokenize();
    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            let start = &token.span.start;
            println!("{}:{}\t{}", start.line, start.column, token.token_type);
        }
    }
    Ok(())
}

fn ast_command(input: &Path, json: bool, config: &DriverConfig) -> Result<()> {
    let output = parse(input, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&output.unit)?);
    } else {
        print!("{}", ec_frontend::ast::dump(&output.unit));
    }
    Ok(())
}

fn emit_command(input: &Path, output: Option<&Path>, config: &DriverConfig) -> Result<()> {
    let code = emit_c(input, config)?;
    match output {
        Some(path) => {
            fs::write(path, &code)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("C written to {}", path.display());
        }
        None => print!("{}", code),
    }
    Ok(())
}

fn run_command(cmd: &mut Command) -> Result<()> {
    log::debug!("running {:?}", cmd);
    let output = cmd.output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("Command failed: {}", stderr);
    }
    Ok(())
}

fn build_command(
    input: &Path,
    output: Option<&Path>,
    keep_c: bool,
    config: &DriverConfig,
) -> Result<PathBuf> {
    let code = emit_c(input, config)?;
    let cc = which(&config.cc).with_context(|| format!("Could not find '{}' in PATH", config.cc))?;

    let executable = match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(""),
    };
    let stem = executable
        .file_stem()
        .context("Invalid output filename")?
        .to_string_lossy()
        .into_owned();

    // The temp dir must outlive the compiler run
    let temp_dir = if keep_c { None } else { Some(TempDir::new()?) };
    let c_file = match &temp_dir {
        Some(dir) => dir.path().join(format!("{}.c", stem)),
        None => executable.with_extension("c"),
    };
    fs::write(&c_file, &code).with_context(|| format!("Failed to write {}", c_file.display()))?;

    let mut cmd = Command::new(cc);
    cmd.args(&config.cflags).arg(&c_file).arg("-o").arg(&executable);
    run_command(&mut cmd).with_context(|| format!("Failed to compile {}", c_file.display()))?;

    Ok(executable)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = DriverConfig::resolve(cli.config.as_deref())?;
    if let Some(max_errors) = cli.max_errors {
        config.max_errors = max_errors;
    }

    match cli.command {
        Commands::Tokens { input, json } => tokens_command(&input, json),
        Commands::Ast { input, json } => ast_command(&input, json, &config),
        Commands::Emit { input, output } => emit_command(&input, output.as_deref(), &config),
        Commands::Build {
            input,
            output,
            cc,
            keep_c,
        } => {
            if let Some(cc) = cc {
                config.cc = cc;
            }
            let executable = build_command(&input, output.as_deref(), keep_c, &config)?;
            println!("Output: {}", executable.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ec", "emit", "in.ec", "-o", "out.c", "--max-errors", "9", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.max_errors, Some(9));
        match cli.command {
            Commands::Emit { input, output } => {
                assert_eq!(input, PathBuf::from("in.ec"));
                assert_eq!(output, Some(PathBuf::from("out.c")));
            }
            other => panic!("Expected emit, got {:?}", other),
        }
    }

    #[test]
    fn test_emit_to_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("prog.ec");
        let output = dir.path().join("prog.c");
        fs::write(&input, "fn main() int { var x: int = 2; vardump x; return 0; }").unwrap();

        emit_command(&input, Some(&output), &DriverConfig::default()).unwrap();
        let code = fs::read_to_string(&output).unwrap();
        assert!(code.starts_with("#include <stdio.h>\n"));
        assert!(code.contains("printf(\"#  x => %d (int)\\n\", x);"));
    }

    #[test]
    fn test_diagnostics_fail_the_command() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.ec");
        fs::write(&input, "fn main() {\n  return 1\n}\n").unwrap();

        let err = emit_c(&input, &DriverConfig::default()).unwrap_err();
        let rejected = err.downcast_ref::<ec_common::CompilerError>();
        assert!(matches!(
            rejected,
            Some(ec_common::CompilerError::Rejected { errors: 1 })
        ));
    }

    #[test]
    fn test_missing_input() {
        let err = emit_c(Path::new("/nonexistent/prog.ec"), &DriverConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to compile"));
    }

    #[test]
    fn test_build_reports_missing_compiler() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("prog.ec");
        fs::write(&input, "fn main() {}").unwrap();
        let config = DriverConfig {
            cc: "definitely-not-a-c-compiler".to_string(),
            ..DriverConfig::default()
        };
        let err = build_command(&input, None, false, &config).unwrap_err();
        assert!(err.to_string().contains("Could not find"));
    }
}
