use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tokio::fs;

use crate::places::models::Venue;

pub const DEFAULT_IMPORT_LINE: &str = r#"import { Venue } from "@/types/venue";"#;
pub const DEFAULT_EXPORT_NAME: &str = "venues";

/// Writes the venue list as a TypeScript module the app imports at build time.
pub struct ArtifactWriter {
    path: PathBuf,
    import_line: String,
    export_name: String,
}

impl ArtifactWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            import_line: DEFAULT_IMPORT_LINE.to_string(),
            export_name: DEFAULT_EXPORT_NAME.to_string(),
        }
    }

    pub fn with_export_name(mut self, export_name: impl Into<String>) -> Self {
        self.export_name = export_name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, venues: &[Venue]) -> Result<String> {
        let json = serde_json::to_string_pretty(venues).context("Failed to serialize venues")?;
        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        Ok(format!(
            "// Generated by scene-ingest on {}. Do not edit by hand.\n{}\n\nexport const {}: Venue[] = {};\n",
            generated_at, self.import_line, self.export_name, json
        ))
    }

    /// Replaces the artifact in one go. Content goes to a sibling temp file
    /// first, then is renamed over the target.
    pub async fn write(&self, venues: &[Venue]) -> Result<usize> {
        let content = self.render(venues)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to move artifact into {}", self.path.display()))?;

        Ok(content.len())
    }
}
