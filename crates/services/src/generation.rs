//! Client for the external quiz generation service.
//!
//! The service takes one uploaded document as a multipart `file` field and
//! answers with `{"quiz": [{"question": .., "answer": ..}, ..]}`. Failures
//! carry a `{"detail": ..}` body.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use flashy_core::model::Card;
use reqwest::{Client, StatusCode, multipart};
use serde::Deserialize;
use url::Url;

use crate::error::GenerationError;

/// Extensions accepted for upload, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "pptx", "txt"];

//
// ─── UPLOAD FILE ───────────────────────────────────────────────────────────────
//

/// A document picked for generation.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    bytes: Vec<u8>,
    mime: &'static str,
}

impl UploadFile {
    /// # Errors
    ///
    /// Returns `GenerationError::UnsupportedFile` if the extension is not one
    /// of [`SUPPORTED_EXTENSIONS`].
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, GenerationError> {
        let name = name.into();
        let mime = mime_for(&name).ok_or_else(|| GenerationError::UnsupportedFile(name.clone()))?;
        Ok(Self { name, bytes, mime })
    }

    /// Read a document from disk; the stored name is the file name only.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::UnsupportedFile` for disallowed extensions and
    /// `GenerationError::Read` if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, GenerationError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        mime_for(&name).ok_or_else(|| GenerationError::UnsupportedFile(name.clone()))?;
        let bytes = std::fs::read(path).map_err(|e| GenerationError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::new(name, bytes)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

fn mime_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "pptx" => Some("application/vnd.openxmlformats-officedocument.presentationml.presentation"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Turns a document into an ordered, non-empty card sequence.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns `GenerationError` on transport failures, rejected uploads, and
    /// empty or malformed results.
    async fn generate(&self, file: &UploadFile) -> Result<Vec<Card>, GenerationError>;
}

/// HTTP client for the generation service.
#[derive(Clone)]
pub struct GenerationService {
    client: Client,
    endpoint: Url,
}

impl GenerationService {
    /// # Errors
    ///
    /// Returns `GenerationError` if the HTTP client cannot be built or the
    /// upload endpoint cannot be derived from `base`.
    pub fn new(base: &Url, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: upload_endpoint(base)?,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl QuizGenerator for GenerationService {
    async fn generate(&self, file: &UploadFile) -> Result<Vec<Card>, GenerationError> {
        tracing::info!(file = file.name(), bytes = file.len(), "requesting quiz generation");

        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let result = parse_generation_body(status, &body);
        match &result {
            Ok(cards) => tracing::info!(cards = cards.len(), "quiz generated"),
            Err(err) => tracing::warn!(status = status.as_u16(), error = %err, "quiz generation failed"),
        }
        result
    }
}

/// `{base}/upload/`, keeping any path prefix on `base`.
///
/// # Errors
///
/// Returns `GenerationError::InvalidEndpoint` if the URL cannot be joined.
pub fn upload_endpoint(base: &Url) -> Result<Url, GenerationError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("upload/")
        .map_err(|e| GenerationError::InvalidEndpoint(e.to_string()))
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    quiz: Option<Vec<RawCard>>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
    question: Option<String>,
    answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Interpret a generation response.
///
/// # Errors
///
/// Non-2xx statuses become `GenerationError::Rejected` carrying the server's
/// `detail`. A missing or empty `quiz` list is `GenerationError::Empty`;
/// entries with a missing field are `Malformed`, blank ones `InvalidCard`.
pub fn parse_generation_body(status: StatusCode, body: &str) -> Result<Vec<Card>, GenerationError> {
    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| match b.detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| status.to_string(), str::to_string)
            });
        return Err(GenerationError::Rejected { status, detail });
    }

    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    let raw = parsed.quiz.unwrap_or_default();
    if raw.is_empty() {
        return Err(GenerationError::Empty);
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, entry)| match (entry.question, entry.answer) {
            (Some(q), Some(a)) => Card::from_generated(q, a).map_err(GenerationError::from),
            _ => Err(GenerationError::Malformed(format!(
                "entry {i} is missing question or answer"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_file_allows_only_known_extensions() {
        assert_eq!(
            UploadFile::new("Notes.PDF", vec![1]).unwrap().mime(),
            "application/pdf"
        );
        assert_eq!(UploadFile::new("a.txt", vec![]).unwrap().mime(), "text/plain");
        assert!(UploadFile::new("deck.pptx", vec![]).is_ok());
        assert!(matches!(
            UploadFile::new("image.png", vec![]),
            Err(GenerationError::UnsupportedFile(_))
        ));
        assert!(UploadFile::new("README", vec![]).is_err());
    }

    #[test]
    fn from_path_keeps_file_name_and_bytes() {
        let dir = std::env::temp_dir().join(format!("flashy-upload-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lecture.txt");
        std::fs::write(&path, b"photosynthesis").unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.name(), "lecture.txt");
        assert_eq!(file.bytes(), b"photosynthesis");
        assert_eq!(file.mime(), "text/plain");

        assert!(matches!(
            UploadFile::from_path(&dir.join("missing.pdf")),
            Err(GenerationError::Read { .. })
        ));
        assert!(matches!(
            UploadFile::from_path(&dir.join("photo.png")),
            Err(GenerationError::UnsupportedFile(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let root = Url::parse("http://localhost:8000").unwrap();
        assert_eq!(
            upload_endpoint(&root).unwrap().as_str(),
            "http://localhost:8000/upload/"
        );
        let nested = Url::parse("https://gen.example.com/api").unwrap();
        assert_eq!(
            upload_endpoint(&nested).unwrap().as_str(),
            "https://gen.example.com/api/upload/"
        );
    }

    #[test]
    fn success_body_yields_cards_in_order() {
        let body = r#"{"quiz":[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2"}]}"#;
        let cards = parse_generation_body(StatusCode::OK, body).unwrap();
        assert_eq!(cards, vec![Card::new("Q1", "A1"), Card::new("Q2", "A2")]);
    }

    #[test]
    fn empty_or_missing_quiz_is_empty_error() {
        assert!(matches!(
            parse_generation_body(StatusCode::OK, r#"{"quiz":[]}"#),
            Err(GenerationError::Empty)
        ));
        assert!(matches!(
            parse_generation_body(StatusCode::OK, "{}"),
            Err(GenerationError::Empty)
        ));
    }

    #[test]
    fn bad_shapes_are_rejected() {
        assert!(matches!(
            parse_generation_body(StatusCode::OK, "not json"),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            parse_generation_body(StatusCode::OK, r#"{"quiz":[{"question":"Q"}]}"#),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            parse_generation_body(StatusCode::OK, r#"{"quiz":[{"question":"Q","answer":" "}]}"#),
            Err(GenerationError::InvalidCard(_))
        ));
    }

    #[test]
    fn server_detail_is_surfaced() {
        let err = parse_generation_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail":"Ollama did not return valid JSON"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Ollama did not return valid JSON");

        let err = parse_generation_body(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");
    }
}
