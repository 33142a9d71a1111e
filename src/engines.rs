// Narrow interfaces to the external engines.
//
// Speech recognition and natural-language generation are owned by outside
// collaborators; this crate only hands them finished containers and
// already-chunked transcript text.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

/// External speech-recognition engine. Called once per full-session
/// container and once per checkpoint container, never blocking capture.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, container: &Path) -> Result<String>;
}

/// External generation engine. Operates only on bounded text chunks
/// assembled by the chunk builder; prompt construction happens behind
/// this boundary.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn revise(&self, chunk: &str) -> Result<String>;

    async fn summarize(&self, chunk: &str) -> Result<String>;
}
