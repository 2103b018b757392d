use std::path::Path;

use tokio_util::sync::CancellationToken;

use noisebank_catalog::ExemplarSpec;

use crate::error::KbError;

/// Options controlling catalog construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Upper bound on clips encoded concurrently. Values below 1 are
    /// treated as 1.
    pub concurrency: usize,
    /// Cooperative cancellation for the whole build.
    pub cancel: CancellationToken,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            cancel: CancellationToken::new(),
        }
    }
}

/// Reads an exemplar list from a JSON file.
///
/// The format is a flat array of `{"source_path", "caption"}` objects;
/// list order becomes catalog insertion order.
pub fn load_exemplar_specs(path: &Path) -> Result<Vec<ExemplarSpec>, KbError> {
    let data = std::fs::read(path)
        .map_err(|e| KbError::Config(format!("read {}: {e}", path.display())))?;
    serde_json::from_slice(&data)
        .map_err(|e| KbError::Config(format!("parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_load_specs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exemplars.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"source_path": "clips/hum.wav", "caption": "mains hum"}},
                {{"source_path": "clips/hiss.wav", "caption": "broadband hiss"}}
            ]"#
        )
        .unwrap();

        let specs = load_exemplar_specs(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].source_path, "clips/hum.wav");
        assert_eq!(specs[1].caption, "broadband hiss");
    }

    #[test]
    fn test_load_specs_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_exemplar_specs(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, KbError::Config(_)));
    }

    #[test]
    fn test_load_specs_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{not json").unwrap();
        let err = load_exemplar_specs(&path).unwrap_err();
        assert!(matches!(err, KbError::Config(_)));
    }

    #[test]
    fn test_default_build_options() {
        let opts = BuildOptions::default();
        assert_eq!(opts.concurrency, 4);
        assert!(!opts.cancel.is_cancelled());
    }
}
