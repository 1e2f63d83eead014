mod config;
pub use config::*;

mod ext;
pub use ext::*;

mod describe;
pub use describe::*;

mod inspect;
pub use inspect::*;

mod resolve;
pub use resolve::*;

mod demo;
pub use demo::*;

use std::path::PathBuf;
use std::sync::Arc;

/// everything tasks need: loaded configuration and the schema it points to
#[derive(Clone)]
pub struct Context {
	pub config: Config,
	pub schema: Arc<vocab::Schema>,
}

impl Context {
	pub fn new(config: Config) -> Result<Self, vocab::SchemaError> {
		let schema = Arc::new(config.load_schema()?);
		tracing::debug!("schema ready with {} types", schema.len());
		Ok(Context { config, schema })
	}

	/// serialize a document according to output settings
	pub fn emit(&self, doc: serde_json::Map<String, serde_json::Value>) -> serde_json::Result<String> {
		let doc = if self.config.output.ld_context {
			use vocab::LD;
			doc.ld_context()
		} else {
			doc
		};

		if self.config.output.pretty {
			serde_json::to_string_pretty(&doc)
		} else {
			serde_json::to_string(&doc)
		}
	}
}

/// read given file, or stdin, as a json document. arrays are taken as many documents
pub fn read_documents(path: Option<&PathBuf>) -> Result<Vec<serde_json::Value>, Box<dyn std::error::Error>> {
	let raw = match path {
		Some(p) => std::fs::read_to_string(p)?,
		None => std::io::read_to_string(std::io::stdin())?,
	};
	Ok(split_documents(serde_json::from_str(&raw)?))
}

fn split_documents(value: serde_json::Value) -> Vec<serde_json::Value> {
	match value {
		serde_json::Value::Array(docs) => docs,
		doc => vec![doc],
	}
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum CliCommand {
	/// list declared types, or describe properties of one
	Schema {
		/// type to describe, list all types if not given
		type_tag: Option<String>,
	},

	/// decode a document and print it back normalized
	Inspect {
		/// json file to read, stdin if not given
		path: Option<PathBuf>,
	},

	/// dispatch documents to handlers by their type
	Resolve {
		/// json file to read, stdin if not given
		path: Option<PathBuf>,

		#[arg(long)]
		/// register a handler for this type, can be repeated, defaults to config value
		handle: Vec<String>,
	},

	/// build, encode and resolve a few objects step by step
	Demo,
}

pub fn run(ctx: Context, command: CliCommand) -> Result<(), Box<dyn std::error::Error>> {
	tracing::info!("running cli task: {command:?}");
	match command {
		CliCommand::Schema { type_tag } =>
			Ok(describe(&ctx, type_tag.as_deref())?),
		CliCommand::Inspect { path } =>
			inspect(&ctx, read_documents(path.as_ref())?),
		CliCommand::Resolve { path, handle } =>
			resolve(&ctx, read_documents(path.as_ref())?, handle),
		CliCommand::Demo =>
			demo(&ctx),
	}
}

#[cfg(test)]
pub(crate) fn test_context() -> Context {
	let mut config = Config::default();
	config.output.pretty = false;
	Context::new(config).expect("builtin schema loads")
}
