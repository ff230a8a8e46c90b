//! Paths command handler.
//!
//! Prints every path the server would use, in `key = value` form, and
//! whether each one exists. Useful when the UI cannot find the model or the
//! weights asset.

use std::fmt::Write as _;
use std::path::Path;

use edgewriter_axum::{CorsConfig, ServerConfig};

fn describe(path: &Path) -> String {
    let state = if path.exists() { "found" } else { "missing" };
    format!("{} ({state})", path.display())
}

/// Render the resolved configuration.
pub fn render(config: &ServerConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "listen = {}:{}", config.host, config.port);
    let _ = writeln!(out, "model = {}", describe(&config.engine.model_path));
    let _ = writeln!(out, "model_name = {}", config.engine.model_name);
    let _ = writeln!(out, "weights = {}", describe(&config.weights_path));
    let _ = writeln!(out, "llama_server = {}", config.engine.llama_server.display());
    match &config.static_dir {
        Some(dir) => {
            let _ = writeln!(out, "static_dir = {}", describe(dir));
        }
        None => out.push_str("static_dir = (api only)\n"),
    }
    match &config.cors {
        CorsConfig::AllowAll => out.push_str("cors = *\n"),
        CorsConfig::AllowOrigins(origins) => {
            let _ = writeln!(out, "cors = {}", origins.join(", "));
        }
    }
    out
}

pub fn execute(config: &ServerConfig) {
    print!("{}", render(config));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let weights = dir.path().join("weights.bin");
        std::fs::write(&weights, b"w").unwrap();

        let config = ServerConfig::with_defaults()
            .with_weights_path(&weights)
            .with_engine(edgewriter_runtime::EngineSettings::new(dir.path().join("m.gguf")));
        let out = render(&config);

        assert!(out.contains("listen = 127.0.0.1:8000"));
        assert!(out.contains("weights.bin (found)"));
        assert!(out.contains("m.gguf (missing)"));
        assert!(out.contains("model_name = m"));
        assert!(out.contains("static_dir = (api only)"));
        assert!(out.contains("cors = *"));
    }
}
