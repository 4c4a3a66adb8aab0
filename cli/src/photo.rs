//! Profile photo lookup and download.

use colored::Colorize;
use cvtex::ResumeDocument;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extensions `\includegraphics` understands.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf", "eps"];

const DEFAULT_EXTENSION: &str = "jpg";

/// Where the document's `contact.photo` points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// An http(s) URL to download
    Remote(String),
    /// A path used as is
    Local(PathBuf),
}

/// Read `contact.photo`, if set.
pub fn source(doc: &ResumeDocument) -> Option<PhotoSource> {
    let photo = doc
        .get("contact")
        .and_then(|contact| contact.get("photo"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|photo| !photo.is_empty())?;

    let lower = photo.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(PhotoSource::Remote(photo.to_string()))
    } else {
        Some(PhotoSource::Local(PathBuf::from(photo)))
    }
}

/// File name for a downloaded photo, keeping a known image extension.
pub fn file_name(url: &str, stem: &str) -> String {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("{}-photo.{}", stem, extension)
}

/// Download `url` into `dir` and return the file name to reference.
///
/// The returned path is relative to `dir`, the directory the LaTeX file is
/// written to.
pub fn fetch(url: &str, dir: &Path, stem: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let name = file_name(url, stem);
    let dest = dir.join(&name);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Downloading {}", url));

    let rt = tokio::runtime::Runtime::new()?;
    let bytes = rt.block_on(async {
        let response = reqwest::get(url).await?.error_for_status()?;
        response.bytes().await
    });
    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    fs::create_dir_all(dir)?;
    fs::write(&dest, &bytes)?;
    pb.finish_and_clear();

    log::debug!("photo saved to {} ({} bytes)", dest.display(), bytes.len());
    eprintln!("{} {}", "Photo saved to".green(), dest.display());
    Ok(PathBuf::from(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ResumeDocument {
        ResumeDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_remote_and_local_sources() {
        let remote = doc(json!({"contact": {"photo": "HTTPS://cdn.example.com/me.png"}}));
        assert_eq!(
            source(&remote),
            Some(PhotoSource::Remote("HTTPS://cdn.example.com/me.png".to_string()))
        );

        let local = doc(json!({"contact": {"photo": "img/me.jpg"}}));
        assert_eq!(source(&local), Some(PhotoSource::Local(PathBuf::from("img/me.jpg"))));
    }

    #[test]
    fn test_missing_photo() {
        assert_eq!(source(&doc(json!({}))), None);
        assert_eq!(source(&doc(json!({"contact": {"photo": "  "}}))), None);
        assert_eq!(source(&doc(json!({"contact": {"photo": null}}))), None);
    }

    #[test]
    fn test_file_name_keeps_image_extension() {
        assert_eq!(file_name("https://x.org/a/me.PNG?size=200", "cv"), "cv-photo.png");
        assert_eq!(file_name("https://x.org/avatar", "cv"), "cv-photo.jpg");
        assert_eq!(file_name("https://x.org/me.webp", "resume"), "resume-photo.jpg");
    }
}
