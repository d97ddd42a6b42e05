//! Shared configuration loader for the codoc tools.
//!
//! The values in `defaults/codoc.default.toml` are compiled in. A [Loader] stacks
//! at most one user file ([UserLayer]) and the command-line overrides on top, then
//! checks the result with [CodocConfig::validate].

use codoc::{DiffOptions, MoveDetection, ParseOptions};
use config::{Config, ConfigError, File, FileFormat, FileSourceFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_TOML: &str = include_str!("../defaults/codoc.default.toml");

/// Name of the project-local file picked up when present
pub const LOCAL_CONFIG_FILE: &str = "codoc.toml";

/// Top-level configuration consumed by codoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CodocConfig {
    pub parser: ParserConfig,
    pub diff: DiffConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub indent_width: usize,
}

/// Mirrors the knobs exposed by the diff engine.
#[derive(Debug, Clone, Deserialize)]
pub struct DiffConfig {
    pub move_detection: MoveDetection,
    pub detect_refactors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl CodocConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            indent_width: self.parser.indent_width,
        }
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            move_detection: self.diff.move_detection,
            detect_refactors: self.diff.detect_refactors,
        }
    }

    /// Reject values that deserialize but cannot drive the parser.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parser.indent_width == 0 {
            return Err(ConfigError::Message(
                "parser.indent_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Message(format!(
                "unknown output format '{}', expected text or json",
                other
            ))),
        }
    }
}

/// Where the user layer of a [Loader] comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLayer {
    /// Defaults only
    None,
    /// `codoc.toml` inside the directory, when it exists
    Discovered(PathBuf),
    /// A file the user named; it must exist
    Explicit(PathBuf),
}

impl UserLayer {
    /// `--config` wins; otherwise look for [LOCAL_CONFIG_FILE] in `dir`.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Self {
        match explicit {
            Some(path) => UserLayer::Explicit(path.to_path_buf()),
            None => UserLayer::Discovered(dir.join(LOCAL_CONFIG_FILE)),
        }
    }
}

/// Builds a [CodocConfig] from embedded defaults, one user layer and flag overrides.
///
/// Layers apply in that order, so a flag beats the user file and the user file
/// beats the defaults. Keys missing from a layer fall through to the one below.
#[derive(Debug, Clone)]
pub struct Loader {
    user: UserLayer,
    format: Option<OutputFormat>,
    indent_width: Option<usize>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            user: UserLayer::None,
            format: None,
            indent_width: None,
        }
    }

    pub fn user_layer(mut self, layer: UserLayer) -> Self {
        self.user = layer;
        self
    }

    /// Force `output.format`, as the `--format` flag does.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Force `parser.indent_width`.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = Some(width);
        self
    }

    pub fn build(self) -> Result<CodocConfig, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        builder = match &self.user {
            UserLayer::None => builder,
            UserLayer::Discovered(path) => builder.add_source(toml_file(path).required(false)),
            UserLayer::Explicit(path) => builder.add_source(toml_file(path).required(true)),
        };
        if let Some(format) = self.format {
            builder = builder.set_override("output.format", format.as_str())?;
        }
        if let Some(width) = self.indent_width {
            builder = builder.set_override("parser.indent_width", width as u64)?;
        }

        let config: CodocConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(path: &Path) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<CodocConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Fresh directory under the system temp dir, unique per test
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("codoc-config-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }

    fn write_file(path: &Path, contents: &str) {
        let mut file = std::fs::File::create(path).expect("temp file");
        write!(file, "{}", contents).expect("write temp file");
    }

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parser.indent_width, 2);
        assert_eq!(config.diff.move_detection, MoveDetection::OwningFile);
        assert!(config.diff.detect_refactors);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.show_line_numbers);
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parse_options(), ParseOptions::default());
        assert_eq!(config.diff_options(), DiffOptions::default());
    }

    #[test]
    fn flags_beat_the_user_file() {
        let dir = scratch_dir("flags");
        write_file(
            &dir.join(LOCAL_CONFIG_FILE),
            "[output]\nformat = \"text\"\n[diff]\nmove_detection = \"path-prefix\"\n",
        );

        let config = Loader::new()
            .user_layer(UserLayer::resolve(None, &dir))
            .format(OutputFormat::Json)
            .build()
            .expect("config to build");
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.diff.move_detection, MoveDetection::PathPrefix);
    }

    #[test]
    fn discovered_file_is_layered_over_defaults() {
        let dir = scratch_dir("discover");
        write_file(&dir.join(LOCAL_CONFIG_FILE), "[parser]\nindent_width = 4\n");

        let config = Loader::new()
            .user_layer(UserLayer::resolve(None, &dir))
            .build()
            .expect("config to build");
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(config.parser.indent_width, 4);
        assert!(config.diff.detect_refactors);
    }

    #[test]
    fn missing_discovered_file_is_ignored() {
        let config = Loader::new()
            .user_layer(UserLayer::resolve(None, Path::new("/definitely/not/here")))
            .build()
            .expect("config to build");
        assert_eq!(config.parser.indent_width, 2);
    }

    #[test]
    fn explicit_file_must_exist() {
        let layer = UserLayer::resolve(Some(Path::new("/definitely/not/here.toml")), Path::new("."));
        assert_eq!(layer, UserLayer::Explicit(PathBuf::from("/definitely/not/here.toml")));
        assert!(Loader::new().user_layer(layer).build().is_err());
    }

    #[test]
    fn output_format_names() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::Text.as_str(), "text");
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn rejects_zero_indent_width() {
        let result = Loader::new().indent_width(0).build();
        assert!(result.is_err());
    }
}
