use std::path::{Path, PathBuf};

pub const OUTPUT_FILE_NAME: &str = "spectrogram.png";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Returns `None` when either path is empty. Existence and writability are
/// left to the generator.
pub fn resolve_request(input_file: &str, output_folder: &str) -> Option<GenerationRequest> {
    if input_file.is_empty() || output_folder.is_empty() {
        return None;
    }

    Some(GenerationRequest {
        input: PathBuf::from(input_file),
        output: Path::new(output_folder).join(OUTPUT_FILE_NAME),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_fixed_name_inside_folder() {
        let req = resolve_request("/tmp/a.wav", "/tmp/out").unwrap();
        assert_eq!(req.input, PathBuf::from("/tmp/a.wav"));
        assert_eq!(req.output, PathBuf::from("/tmp/out/spectrogram.png"));
    }

    #[test]
    fn trailing_separator_is_tolerated() {
        let req = resolve_request("/tmp/a.wav", "/tmp/out/").unwrap();
        assert_eq!(req.output, PathBuf::from("/tmp/out/spectrogram.png"));
    }

    #[test]
    fn empty_paths_decline() {
        assert!(resolve_request("", "/tmp/out").is_none());
        assert!(resolve_request("/tmp/a.wav", "").is_none());
        assert!(resolve_request("", "").is_none());
    }

    #[test]
    fn missing_files_are_not_checked() {
        let req = resolve_request("/does/not/exist.wav", "/nowhere").unwrap();
        assert_eq!(req.output, PathBuf::from("/nowhere/spectrogram.png"));
    }
}
