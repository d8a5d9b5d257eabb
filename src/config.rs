//! Configuration management for the NutriScan server

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ocr::OcrProvider;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
    pub ocr: OcrConfig,
    pub recommend: RecommendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Provider preference order
    pub providers: Vec<OcrProvider>,
    pub ollama_url: String,
    pub ollama_model: String,
    /// Default OCR language (ISO 639-2 code as tesseract expects)
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendConfig {
    pub dataset_path: PathBuf,
    pub scaler_path: Option<PathBuf>,
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite:./nutriscan.db".to_string(),
            },
            uploads: UploadConfig {
                dir: PathBuf::from("./uploads"),
            },
            ocr: OcrConfig {
                providers: vec![OcrProvider::Tesseract, OcrProvider::Ollama],
                ollama_url: "http://localhost:11434".to_string(),
                ollama_model: "llava".to_string(),
                language: "eng".to_string(),
            },
            recommend: RecommendConfig {
                dataset_path: PathBuf::from("./data/nutrition_dataset.csv"),
                scaler_path: None,
                top_k: 3,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(defaults.server.port),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
            },
            uploads: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.uploads.dir),
            },
            ocr: OcrConfig {
                providers: env::var("OCR_PROVIDERS")
                    .map(|s| parse_providers(&s))
                    .unwrap_or(defaults.ocr.providers),
                ollama_url: env::var("OCR_OLLAMA_URL").unwrap_or(defaults.ocr.ollama_url),
                ollama_model: env::var("OCR_OLLAMA_MODEL").unwrap_or(defaults.ocr.ollama_model),
                language: env::var("OCR_LANGUAGE").unwrap_or(defaults.ocr.language),
            },
            recommend: RecommendConfig {
                dataset_path: env::var("DATASET_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.recommend.dataset_path),
                scaler_path: env::var("SCALER_PATH").ok().map(PathBuf::from),
                top_k: env::var("RECOMMEND_TOP_K")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .unwrap_or(defaults.recommend.top_k),
            },
        })
    }
}

/// Parse a comma-separated provider list, e.g. "tesseract,ollama".
/// Unknown names are skipped with a warning.
fn parse_providers(raw: &str) -> Vec<OcrProvider> {
    raw.split(',')
        .filter_map(|name| match name.trim().to_lowercase().as_str() {
            "" => None,
            "tesseract" => Some(OcrProvider::Tesseract),
            "ollama" => Some(OcrProvider::Ollama),
            other => {
                tracing::warn!("Unknown OCR provider '{}' in OCR_PROVIDERS, skipping", other);
                None
            }
        })
        .collect()
}
