/* Codegen command - generate a C++ reader from an ASDL schema */

use anyhow::Context;
use asdl_gen::codegen::{build_ir, generate_cpp};
use asdl_gen::encoding::EncodingParams;
use asdl_loader::load_schema;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
  #[error("Action required")]
  ActionRequired,
  #[error("Invalid action '{0}'")]
  InvalidAction(String),
  #[error("Schema path required for action '{0}'")]
  SchemaPathRequired(&'static str),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
  Cpp,
}

impl Action {
  pub fn name(&self) -> &'static str {
    match self {
      Action::Cpp => "cpp",
    }
  }
}

impl FromStr for Action {
  type Err = UsageError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "cpp" => Ok(Action::Cpp),
      other => Err(UsageError::InvalidAction(other.to_string())),
    }
  }
}

pub struct CodegenArgs {
  pub action: Option<String>,
  pub schema: Option<PathBuf>,
  pub alignment: u32,
  pub ref_width: u32,
  pub print_ir: bool,
}

/* Validate the action and produce the complete output text */
pub fn render(args: &CodegenArgs) -> anyhow::Result<String> {
  let action: Action = args.action.as_deref().ok_or(UsageError::ActionRequired)?.parse()?;
  let schema = args
    .schema
    .as_ref()
    .ok_or(UsageError::SchemaPathRequired(action.name()))?;

  let params = EncodingParams::new(args.alignment)?.with_ref_width(args.ref_width)?;
  tracing::info!(
    action = action.name(),
    schema = %schema.display(),
    alignment = params.alignment,
    ref_width = params.ref_width,
    "generating"
  );

  let module = load_schema(schema)?;
  match action {
    Action::Cpp if args.print_ir => {
      let ir = build_ir(&module, params)?;
      let mut json = serde_json::to_string_pretty(&ir).context("failed to serialize IR")?;
      json.push('\n');
      Ok(json)
    }
    Action::Cpp => Ok(generate_cpp(&module, params)?),
  }
}

/* Execute the codegen command; stdout is only written once rendering succeeded */
pub fn run(args: CodegenArgs) -> anyhow::Result<()> {
  let output = render(&args)?;
  let mut stdout = std::io::stdout().lock();
  stdout
    .write_all(output.as_bytes())
    .and_then(|()| stdout.flush())
    .context("failed to write generated code to stdout")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(action: Option<&str>, schema: Option<&str>) -> CodegenArgs {
    CodegenArgs {
      action: action.map(str::to_string),
      schema: schema.map(PathBuf::from),
      alignment: 4,
      ref_width: 3,
      print_ir: false,
    }
  }

  #[test]
  fn missing_action_is_a_usage_error() {
    let err = render(&args(None, None)).unwrap_err();
    assert_eq!(err.downcast_ref::<UsageError>(), Some(&UsageError::ActionRequired));
    assert_eq!(err.to_string(), "Action required");
  }

  #[test]
  fn unknown_action_is_named() {
    let err = render(&args(Some("java"), Some("x.asdl"))).unwrap_err();
    assert_eq!(err.to_string(), "Invalid action 'java'");
  }

  #[test]
  fn cpp_needs_a_schema() {
    let err = render(&args(Some("cpp"), None)).unwrap_err();
    assert_eq!(
      err.downcast_ref::<UsageError>(),
      Some(&UsageError::SchemaPathRequired("cpp"))
    );
  }

  #[test]
  fn bad_alignment_is_rejected_before_loading() {
    let mut bad = args(Some("cpp"), Some("does-not-exist.asdl"));
    bad.alignment = 3;
    let err = render(&bad).unwrap_err();
    assert!(err.to_string().contains("unsupported alignment 3"), "{err}");
  }
}
