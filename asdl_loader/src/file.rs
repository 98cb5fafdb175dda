use crate::parser::parse_asdl;
use anyhow::Context;
use asdl_types::Module;
use std::fs;
use std::path::Path;

/* Source notation of a schema file */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /* ASDL text notation */
    Asdl,
    /* YAML rendering of the schema model */
    Yaml,
}

impl SchemaFormat {
    /// Pick the format from the file extension. Anything that is not
    /// `.yaml`/`.yml` is read as ASDL text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SchemaFormat::Yaml
            }
            _ => SchemaFormat::Asdl,
        }
    }
}

/* Parse schema source already held in memory */
pub fn parse_schema(source: &str, format: SchemaFormat) -> anyhow::Result<Module> {
    let module = match format {
        SchemaFormat::Asdl => parse_asdl(source)?,
        SchemaFormat::Yaml => serde_yml::from_str(source).context("invalid YAML schema")?,
    };
    Ok(module)
}

/// Load and parse a schema file from disk.
pub fn load_schema(path: &Path) -> anyhow::Result<Module> {
    let format = SchemaFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "loading schema");

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    let module = parse_schema(&source, format)
        .with_context(|| format!("failed to parse schema file {}", path.display()))?;

    tracing::debug!(
        module = %module.name,
        definitions = module.types.len(),
        "schema loaded"
    );
    Ok(module)
}
