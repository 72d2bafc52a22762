//! LDF CLI - command line front end for the LIN Description File parser.
//! LDF CLI - LIN 描述文件解析器的命令行界面。

mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "ldf")]
#[command(author, version, about = "Parse LIN Description Files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output. / 抑制输出。
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Parse a file and print the document as JSON. / 解析文件并以 JSON 输出文档。
    Parse {
        /// The file to parse. / 要解析的文件。
        file: String,

        /// Echo the input and trace the parse. / 回显输入并跟踪解析过程。
        #[arg(long)]
        debug: bool,

        /// Print JSON on a single line. / 单行输出 JSON。
        #[arg(long)]
        compact: bool,
    },

    /// Check a file for errors. / 检查文件错误。
    Check {
        /// The file to check. / 要检查的文件。
        file: String,

        /// Echo the input and trace the parse. / 回显输入并跟踪解析过程。
        #[arg(long)]
        debug: bool,
    },

    /// Dump the token stream of a file. / 输出文件的词法单元流。
    Tokens {
        /// The file to tokenize. / 要分词的文件。
        file: String,
    },
}

/// Install the log subscriber. `RUST_LOG` wins over the flags.
/// 安装日志订阅器。`RUST_LOG` 优先于命令行参数。
fn init_tracing(debug: bool, verbose: bool, quiet: bool) {
    let default = if debug {
        "trace"
    } else if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();

    let debug = match &cli.command {
        Commands::Parse { debug, .. } | Commands::Check { debug, .. } => *debug,
        Commands::Tokens { .. } => false,
    };
    init_tracing(debug, cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Parse {
            file,
            debug,
            compact,
        } => commands::parse::run(&file, debug, compact, cli.quiet),
        Commands::Check { file, debug } => {
            commands::check::run(&file, debug, cli.verbose, cli.quiet)
        }
        Commands::Tokens { file } => commands::tokens::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
