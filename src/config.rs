use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub s3_bucket: String,
    /// Override for the S3 endpoint (e.g. MinIO in development). When unset
    /// the standard regional endpoint is used.
    pub s3_endpoint: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let aws_region = env::var("AWS_REGION").map_err(|_| "AWS_REGION must be set".to_string())?;

        let aws_access_key_id = env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| "AWS_ACCESS_KEY_ID must be set".to_string())?;

        let aws_secret_access_key = env::var("AWS_SECRET_ACCESS_KEY")
            .map_err(|_| "AWS_SECRET_ACCESS_KEY must be set".to_string())?;

        let s3_bucket = env::var("AWS_S3_BUCKET_NAME")
            .map_err(|_| "AWS_S3_BUCKET_NAME must be set".to_string())?;

        let s3_endpoint = env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty());

        // The assistant is optional: without a key the chat route reports
        // itself as unconfigured instead of failing startup.
        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty());
        let openai_model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            database_url,
            aws_region,
            aws_access_key_id,
            aws_secret_access_key,
            s3_bucket,
            s3_endpoint,
            openai_api_key,
            openai_model,
            cors_origin,
        })
    }
}
