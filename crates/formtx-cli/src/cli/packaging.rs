use std::io::{Cursor, Write};

use formtx_core::errors::BuilderError;
use formtx_core::export::{ArtifactPackager, ExportArtifact};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Serializes an export artifact into a zip archive held in memory; the
/// caller decides where the bytes go.
pub struct ZipPackager;

impl ArtifactPackager for ZipPackager {
    fn package(&self, artifact: &ExportArtifact) -> Result<Vec<u8>, BuilderError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (path, content) in artifact.files.iter() {
            writer
                .start_file(path.as_str(), options)
                .map_err(|e| BuilderError::ExportFailed(format!("archive entry {}: {}", path, e)))?;
            writer
                .write_all(content.as_bytes())
                .map_err(|e| BuilderError::ExportFailed(format!("archive entry {}: {}", path, e)))?;
        }
        let cursor = writer
            .finish()
            .map_err(|e| BuilderError::ExportFailed(format!("archive finalization: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formtx_core::export::FileContent;
    use formtx_core::kit::indexmap::IndexMap;
    use formtx_core::manifest::DependencyManifest;
    use std::io::Read;

    #[test]
    fn archive_round_trips_every_file() {
        let mut files = IndexMap::new();
        files.insert(
            "package.json".to_string(),
            FileContent::Text("{\"name\":\"x\"}".to_string()),
        );
        files.insert("src/App.tsx".to_string(), FileContent::Text("export {};".to_string()));
        let artifact = ExportArtifact {
            files,
            manifest: DependencyManifest::new(),
            warnings: vec![],
        };

        let bytes = ZipPackager.package(&artifact).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut entry = archive.by_name("src/App.tsx").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "export {};");
    }
}
