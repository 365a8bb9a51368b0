//! CLI command implementations

pub mod generate;
pub mod render;

pub use generate::GenerateArgs;
pub use render::RenderArgs;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use koreplan_core::PlanKind;

/// `-` reads standard input
pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}

/// Write to `path`, or standard output when there is none
pub(crate) fn write_output(path: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

pub(crate) fn plan_kind(korean: bool) -> PlanKind {
    if korean {
        PlanKind::Korean
    } else {
        PlanKind::Regular
    }
}
