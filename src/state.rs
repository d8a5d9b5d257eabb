//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::intake::ImageStore;
use crate::label::recommend::Recommender;
use crate::ocr::OcrService;

const SESSION_LIFETIME_HOURS: i64 = 24 * 7;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    sessions: SessionStore,
    ocr: OcrService,
    images: ImageStore,
    recommender: Recommender,
}

impl AppState {
    /// Create the application state from configuration and a live pool.
    pub fn new(config: Config, db: SqlitePool) -> Self {
        let ocr = OcrService::new(&config.ocr);
        let images = ImageStore::new(config.uploads.dir.clone());
        let recommender = Recommender::new(
            config.recommend.dataset_path.clone(),
            config.recommend.scaler_path.as_deref(),
            config.recommend.top_k,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                sessions: SessionStore::new(SESSION_LIFETIME_HOURS),
                ocr,
                images,
                recommender,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Get the OCR service
    pub fn ocr(&self) -> &OcrService {
        &self.inner.ocr
    }

    /// Get the image store
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }

    /// Get the recommender
    pub fn recommender(&self) -> &Recommender {
        &self.inner.recommender
    }
}
