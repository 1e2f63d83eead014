#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub schema: SchemaConfig,

	#[serde(default)]
	pub output: OutputConfig,

	#[serde(default)]
	pub resolver: ResolverConfig,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct SchemaConfig {
	#[serde(default)]
	/// toml file with type declarations, leave empty to use builtin activitystreams vocabulary
	pub path: String,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct OutputConfig {
	#[serde_inline_default(true)]
	/// indent emitted json documents
	pub pretty: bool,

	#[serde(default)]
	/// add activitystreams @context to emitted documents which don't carry one
	pub ld_context: bool,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct ResolverConfig {
	#[serde_inline_default(vec!["Note".to_string(), "Person".to_string()])]
	/// types to register handlers for when none are given on command line
	pub handle: Vec<String>,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}

	pub fn load_schema(&self) -> Result<vocab::Schema, vocab::SchemaError> {
		if self.schema.path.is_empty() {
			tracing::debug!("using builtin activitystreams schema");
			vocab::Schema::activitystreams()
		} else {
			tracing::debug!("loading schema from {}", self.schema.path);
			vocab::Schema::from_toml_file(&self.schema.path)
		}
	}
}

#[cfg(test)]
mod test {
	use super::Config;

	#[test]
	fn empty_config_uses_defaults() {
		let cfg : Config = toml::from_str("").unwrap();
		assert!(cfg.schema.path.is_empty());
		assert!(cfg.output.pretty);
		assert!(!cfg.output.ld_context);
		assert_eq!(cfg.resolver.handle, vec!["Note".to_string(), "Person".to_string()]);
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let cfg : Config = toml::from_str("[output]\nld_context = true\n").unwrap();
		assert!(cfg.output.ld_context);
		assert!(cfg.output.pretty);
	}

	#[test]
	fn missing_file_falls_back_to_defaults() {
		let cfg = Config::load(Some(&std::path::PathBuf::from("/definitely/not/here.toml")));
		assert!(cfg.output.pretty);
		assert!(Config::load(None).schema.path.is_empty());
	}

	#[test]
	fn default_schema_is_builtin() {
		let schema = Config::default().load_schema().unwrap();
		assert!(schema.contains("Person"));
	}
}
