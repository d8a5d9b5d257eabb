//! OCR service
//!
//! Owns the configured providers and picks one per request: a preferred
//! provider when the caller names one, otherwise the first available in
//! configured order, falling through on per-provider failure.

use std::sync::Arc;

use crate::config::OcrConfig;

use super::{
    provider::{OcrProviderTrait, OllamaProvider, TesseractProvider},
    types::{OcrError, OcrProvider, OcrResult},
};

pub struct OcrService {
    default_language: String,
    providers: Vec<Arc<dyn OcrProviderTrait>>,
}

impl OcrService {
    /// Build the service from configuration, instantiating providers in
    /// the configured preference order.
    pub fn new(config: &OcrConfig) -> Self {
        let providers = config
            .providers
            .iter()
            .map(|p| -> Arc<dyn OcrProviderTrait> {
                match p {
                    OcrProvider::Tesseract => Arc::new(TesseractProvider::new()),
                    OcrProvider::Ollama => {
                        Arc::new(OllamaProvider::new(&config.ollama_url, &config.ollama_model))
                    }
                }
            })
            .collect();

        Self {
            default_language: config.language.clone(),
            providers,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_providers(
        language: &str,
        providers: Vec<Arc<dyn OcrProviderTrait>>,
    ) -> Self {
        Self {
            default_language: language.to_string(),
            providers,
        }
    }

    /// Get the providers that are currently usable.
    pub async fn available_providers(&self) -> Vec<OcrProvider> {
        let mut available = Vec::new();
        for provider in &self.providers {
            if provider.is_available().await {
                available.push(provider.provider_type());
            }
        }
        available
    }

    /// Run OCR on an image.
    pub async fn recognize(
        &self,
        image_data: &[u8],
        preferred_provider: Option<OcrProvider>,
        language: Option<&str>,
    ) -> Result<OcrResult, OcrError> {
        let lang = language.unwrap_or(&self.default_language);

        if let Some(preferred) = preferred_provider {
            for provider in &self.providers {
                if provider.provider_type() == preferred {
                    if provider.is_available().await {
                        return provider.recognize(image_data, lang).await;
                    }
                    return Err(OcrError::ProviderNotAvailable(format!(
                        "{:?} provider is not available",
                        preferred
                    )));
                }
            }
            return Err(OcrError::ProviderNotAvailable(format!(
                "{:?} provider is not configured",
                preferred
            )));
        }

        for provider in &self.providers {
            if provider.is_available().await {
                match provider.recognize(image_data, lang).await {
                    Ok(result) => return Ok(result),
                    Err(e) => {
                        tracing::warn!(
                            "OCR provider {:?} failed: {}, trying next",
                            provider.provider_type(),
                            e
                        );
                        continue;
                    }
                }
            }
        }

        Err(OcrError::ProviderNotAvailable(
            "No OCR providers available".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::provider::MockProvider;

    fn ok_result(text: &str, provider: OcrProvider) -> OcrResult {
        OcrResult {
            text: text.to_string(),
            confidence: 90.0,
            provider,
        }
    }

    #[tokio::test]
    async fn test_no_providers_configured() {
        let service = OcrService::with_providers("eng", vec![]);
        let result = service.recognize(b"img", None, None).await;
        assert!(matches!(result, Err(OcrError::ProviderNotAvailable(_))));
    }

    #[tokio::test]
    async fn test_falls_through_failing_provider() {
        let service = OcrService::with_providers(
            "eng",
            vec![
                Arc::new(MockProvider {
                    response: Err("boom".to_string()),
                    available: true,
                    kind: OcrProvider::Tesseract,
                }),
                Arc::new(MockProvider {
                    response: Ok(ok_result("Ingredients: Oats", OcrProvider::Ollama)),
                    available: true,
                    kind: OcrProvider::Ollama,
                }),
            ],
        );

        let result = service.recognize(b"img", None, None).await.unwrap();
        assert_eq!(result.provider, OcrProvider::Ollama);
        assert_eq!(result.text, "Ingredients: Oats");
    }

    #[tokio::test]
    async fn test_skips_unavailable_provider() {
        let service = OcrService::with_providers(
            "eng",
            vec![
                Arc::new(MockProvider {
                    response: Ok(ok_result("unreachable", OcrProvider::Tesseract)),
                    available: false,
                    kind: OcrProvider::Tesseract,
                }),
                Arc::new(MockProvider {
                    response: Ok(ok_result("reached", OcrProvider::Ollama)),
                    available: true,
                    kind: OcrProvider::Ollama,
                }),
            ],
        );

        let result = service.recognize(b"img", None, None).await.unwrap();
        assert_eq!(result.text, "reached");

        let available = service.available_providers().await;
        assert_eq!(available, vec![OcrProvider::Ollama]);
    }

    #[tokio::test]
    async fn test_preferred_provider_unavailable_is_an_error() {
        let service = OcrService::with_providers(
            "eng",
            vec![Arc::new(MockProvider {
                response: Ok(ok_result("text", OcrProvider::Tesseract)),
                available: false,
                kind: OcrProvider::Tesseract,
            })],
        );

        let result = service
            .recognize(b"img", Some(OcrProvider::Tesseract), None)
            .await;
        assert!(matches!(result, Err(OcrError::ProviderNotAvailable(_))));
    }
}
