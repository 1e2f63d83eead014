use std::path::PathBuf;
use clap::{Parser, Subcommand};

use vocab_cli as cli;


#[derive(Parser)]
/// typed objects in, typed objects out
struct Args {
	#[clap(subcommand)]
	/// command to run
	command: Mode,

	/// path to config file, leave empty to not use any
	#[arg(short, long)]
	config: Option<PathBuf>,

	#[arg(long)]
	/// schema toml file to load instead of builtin vocabulary, overrides config value
	schema: Option<String>,

	#[arg(long, default_value_t=false)]
	/// run with debug level tracing
	debug: bool,
}

#[derive(Clone, Subcommand)]
enum Mode {
	/// print current or default configuration
	Config,

	#[command(flatten)]
	Cli(cli::CliCommand),
}

fn main() {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.compact()
		.with_max_level(if args.debug { tracing::Level::DEBUG } else { tracing::Level::INFO })
		.init();

	let mut config = cli::Config::load(args.config.as_ref());

	if let Some(schema) = args.schema {
		config.schema.path = schema;
	}

	let command = match args.command {
		Mode::Config => {
			println!("{}", toml::to_string_pretty(&config).expect("failed serializing config"));
			return;
		},
		Mode::Cli(command) => command,
	};

	let ctx = cli::Context::new(config)
		.expect("failed loading schema");

	if let Err(e) = cli::run(ctx, command) {
		tracing::error!("failed running cli task: {e}");
		std::process::exit(1);
	}
}
