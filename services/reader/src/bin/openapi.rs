//! services/reader/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the reader REST API. The output path is the
//! first argument, `openapi.json` when omitted.

use reader_lib::web::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let doc = ApiDoc::openapi();
    std::fs::write(&output, doc.to_pretty_json()?)?;
    println!(
        "Wrote {} operations across {} paths to {}",
        doc.paths
            .paths
            .values()
            .map(|item| [&item.get, &item.post, &item.put, &item.delete]
                .iter()
                .filter(|op| op.is_some())
                .count())
            .sum::<usize>(),
        doc.paths.paths.len(),
        output
    );
    Ok(())
}
