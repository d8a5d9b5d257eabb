//! OCR providers

use async_trait::async_trait;

use super::types::{OcrError, OcrProvider, OcrResult};

/// OCR provider trait
#[async_trait]
pub trait OcrProviderTrait: Send + Sync {
    /// Get the provider type
    fn provider_type(&self) -> OcrProvider;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Perform OCR on an image
    async fn recognize(&self, image_data: &[u8], language: &str) -> Result<OcrResult, OcrError>;
}

/// Tesseract OCR provider.
///
/// Invokes the `tesseract` binary through temp files rather than linking
/// the C library, so the server builds without the Leptonica toolchain.
pub struct TesseractProvider {
    binary: String,
}

impl TesseractProvider {
    pub fn new() -> Self {
        Self {
            binary: "tesseract".to_string(),
        }
    }
}

impl Default for TesseractProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrProviderTrait for TesseractProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Tesseract
    }

    async fn is_available(&self) -> bool {
        tokio::process::Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .is_ok()
    }

    async fn recognize(&self, image_data: &[u8], language: &str) -> Result<OcrResult, OcrError> {
        let temp_dir = std::env::temp_dir();
        let input_path = temp_dir.join(format!("label_ocr_{}.png", uuid::Uuid::new_v4()));
        let output_base = temp_dir.join(format!("label_ocr_{}", uuid::Uuid::new_v4()));

        tokio::fs::write(&input_path, image_data)
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        // --psm 3: fully automatic page segmentation, the best default for
        // a photographed label with mixed headline and ingredient lines.
        let output = tokio::process::Command::new(&self.binary)
            .arg(&input_path)
            .arg(&output_base)
            .arg("-l")
            .arg(language)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3")
            .output()
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)));

        let _ = tokio::fs::remove_file(&input_path).await;
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr
            )));
        }

        let output_file = format!("{}.txt", output_base.display());
        let text = tokio::fs::read_to_string(&output_file)
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to read output: {}", e)))?;

        let _ = tokio::fs::remove_file(&output_file).await;

        Ok(OcrResult {
            text: text.trim().to_string(),
            confidence: 80.0, // tesseract does not report confidence on this path
            provider: OcrProvider::Tesseract,
        })
    }
}

/// Ollama vision model provider
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl OcrProviderTrait for OllamaProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Ollama
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn recognize(&self, image_data: &[u8], language: &str) -> Result<OcrResult, OcrError> {
        use base64::Engine;

        let url = format!("{}/api/generate", self.base_url);
        let image_base64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        let prompt = format!(
            "This is a photo of a packaged-food label. Transcribe all text exactly as written, \
             keeping line breaks. The text is in {}. Return only the transcription, nothing else.",
            language
        );

        let request = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "images": [image_base64],
            "stream": false
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to call Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::ApiError(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to parse response: {}", e)))?;

        let text = result["response"].as_str().unwrap_or("").trim().to_string();

        Ok(OcrResult {
            text,
            confidence: 75.0, // LLMs don't provide confidence scores
            provider: OcrProvider::Ollama,
        })
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub response: Result<OcrResult, String>,
    pub available: bool,
    pub kind: OcrProvider,
}

#[cfg(test)]
#[async_trait]
impl OcrProviderTrait for MockProvider {
    fn provider_type(&self) -> OcrProvider {
        self.kind
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, _image_data: &[u8], _language: &str) -> Result<OcrResult, OcrError> {
        self.response
            .clone()
            .map_err(OcrError::ProcessingError)
    }
}
