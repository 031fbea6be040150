use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::jwt::JwtKeys;
use crate::config::Config;
use crate::resume::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub jwt: JwtKeys,
    /// Pluggable resume skill extractor. Default: KeywordSkillExtractor.
    pub skill_extractor: Arc<dyn SkillExtractor>,
    pub config: Config,
}
