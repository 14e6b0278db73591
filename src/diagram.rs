use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Mermaid flowchart of a chat turn.
pub fn mermaid() -> &'static str {
    "flowchart TD\n    __start__([START]) --> chatbot\n    chatbot --> __end__([END])\n"
}

pub fn try_export_diagram(path: &Path) -> io::Result<()> {
    fs::write(path, mermaid())
}

/// Write the diagram if possible. Failures are only logged.
pub fn export_diagram(path: &Path) {
    match try_export_diagram(path) {
        Ok(()) => debug!(path = %path.display(), "diagram written"),
        Err(e) => debug!(path = %path.display(), error = %e, "diagram export skipped"),
    }
}
