/// Store service configuration loaded from environment variables.
#[derive(Debug)]
pub struct StoreConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3100). Env var: `STORE_PORT`.
    pub store_port: u16,
    /// HS256 signing key for access and email-confirmation tokens.
    pub jwt_secret: String,
    /// Public base URL of this service, used in confirmation links.
    pub public_url: String,
    /// HTTP mail gateway endpoint (e.g. "http://mailer:9925/send").
    pub mail_api_url: String,
    /// From address on outgoing mail.
    pub mail_sender: String,
    /// Media store upload endpoint (e.g. "http://blobs:9000").
    pub blob_api_url: String,
    /// Public base URL media files are served from.
    pub blob_public_url: String,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            store_port: std::env::var("STORE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            public_url: std::env::var("PUBLIC_URL").expect("PUBLIC_URL"),
            mail_api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
            mail_sender: std::env::var("MAIL_SENDER")
                .unwrap_or_else(|_| "no-reply@gamestore.dev".to_owned()),
            blob_api_url: std::env::var("BLOB_API_URL").expect("BLOB_API_URL"),
            blob_public_url: std::env::var("BLOB_PUBLIC_URL").expect("BLOB_PUBLIC_URL"),
        }
    }
}
