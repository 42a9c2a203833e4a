//! Template compilation pipeline: decode, bind, check, synthesize, validate.

use std::path::Path;

use stackform_core::{Diagnostics, PackageSchema, validate_package};
use stackform_schema::{TemplateDecl, check_component, parse_template, schema};
use tracing::{debug, info};

use crate::config::FrontendConfig;
use crate::encoding::{decode_json, decode_yaml};
use crate::error::{LoaderError, Result};

/// Template source encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Infers the format from a file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackform_loader::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::from_filename("Pulumi.yaml"), Some(SourceFormat::Yaml));
    /// assert_eq!(SourceFormat::from_filename("main.JSON"), Some(SourceFormat::Json));
    /// assert_eq!(SourceFormat::from_filename("README"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename).extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// The result of compiling a template.
///
/// `template` is present whenever the source decoded; `schema` only when
/// there were no error diagnostics.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub template: Option<TemplateDecl>,
    pub schema: Option<PackageSchema>,
    pub diagnostics: Diagnostics,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Pretty-printed JSON of the synthesized schema, if there is one.
    pub fn schema_json(&self) -> Result<Option<String>> {
        self.schema
            .as_ref()
            .map(serde_json::to_string_pretty)
            .transpose()
            .map_err(LoaderError::from)
    }
}

/// Compiles a component template into a package schema.
///
/// Problems in the template come back as diagnostics in an `Ok`
/// [`Compilation`]. Synthesis stops at the first stage that reports an
/// error.
///
/// # Errors
///
/// Returns [`LoaderError::Synthesis`] or [`LoaderError::InvalidSchema`] if
/// a template that passed every check still produced a bad schema.
///
/// # Examples
///
/// ```
/// use stackform_loader::{FrontendConfig, SourceFormat, compile};
///
/// let source = "name: webapp\nconfiguration:\n  size:\n    type: Number\n";
/// let config = FrontendConfig::default();
/// let compilation = compile("Pulumi.yaml", source, SourceFormat::Yaml, &config).unwrap();
///
/// assert!(compilation.diagnostics.is_empty());
/// let schema = compilation.schema.unwrap();
/// assert_eq!(schema.resources["webapp:index:Component"].required_inputs, vec!["size"]);
/// ```
pub fn compile(
    filename: &str,
    source: &str,
    format: SourceFormat,
    config: &FrontendConfig,
) -> Result<Compilation> {
    info!(filename, ?format, bytes = source.len(), "Compiling template");

    let (node, mut diagnostics) = match format {
        SourceFormat::Yaml => decode_yaml(filename, source),
        SourceFormat::Json => decode_json(filename, source),
    };
    let Some(node) = node else {
        return Ok(Compilation {
            template: None,
            schema: None,
            diagnostics,
        });
    };

    let (decl, bind_diags) = parse_template(&node, &config.bind);
    diagnostics.append(bind_diags);
    diagnostics.append(check_component(&decl));

    if diagnostics.has_errors() {
        debug!(
            filename,
            diagnostics = diagnostics.len(),
            "Template has errors, skipping synthesis"
        );
        return Ok(Compilation {
            template: Some(decl),
            schema: None,
            diagnostics,
        });
    }

    let package = schema(&decl)?;
    if config.validate_schema {
        let errors = validate_package(&package);
        if !errors.is_empty() {
            return Err(LoaderError::InvalidSchema(errors));
        }
    }

    info!(
        package = %package.name,
        inputs = decl.configuration.len(),
        outputs = decl.outputs.len(),
        warnings = diagnostics.len(),
        "Synthesized package schema"
    );
    Ok(Compilation {
        template: Some(decl),
        schema: Some(package),
        diagnostics,
    })
}
