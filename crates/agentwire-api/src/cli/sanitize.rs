//! `awire sanitize`: recover and pretty-print a raw tool output.

use std::path::Path;

use tokio::io::AsyncReadExt;

use agentwire_core::sanitize::Sanitizer;

/// Sanitize the contents of `file` (or stdin) and print the result.
pub async fn sanitize(file: Option<&Path>, tag: &str) -> anyhow::Result<()> {
    let sanitizer = Sanitizer::new(tag)?;
    let raw = read_input(file).await?;
    println!("{}", sanitizer.sanitize(trim_line_ending(&raw)));
    Ok(())
}

async fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            Ok(raw)
        }
    }
}

/// Drop the single trailing newline editors and shells append.
fn trim_line_ending(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}
