//! Key command - derive the cache key for a call

use crate::cache::{derive_key, CallArgs, FnIdentity, Value};
use crate::cli::args::KeyArgs;
use crate::error::MemoResult;
use tracing::debug;

/// Execute the key command
pub fn execute(args: KeyArgs) -> MemoResult<()> {
    let identity = FnIdentity::from_source_file(&args.name, &args.source);
    let call_args = build_call_args(&args.args, &args.kw);

    debug!(
        "Deriving key for {} with {}{}",
        identity.qualified_name(),
        call_args.positional_repr(),
        call_args.keyword_repr()
    );

    let key = derive_key(&identity, &call_args)?;
    println!("{}", key);
    Ok(())
}

fn build_call_args(positional: &[String], keyword: &[(String, String)]) -> CallArgs {
    let args = positional
        .iter()
        .fold(CallArgs::new(), |args, raw| args.arg(parse_literal(raw)));
    keyword
        .iter()
        .fold(args, |args, (name, raw)| args.kwarg(name.as_str(), parse_literal(raw)))
}

/// Parse an argument as a JSON literal, falling back to a plain string
fn parse_literal(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}
