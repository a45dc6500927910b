//! Minimal S3 client: PUT and DELETE with AWS Signature Version 4, path-style
//! URLs. Keys are generated internally (`staff-photos/...`), so no general
//! URI escaping is needed.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::{BlobError, BlobStore};
use crate::AppConfig;

type HmacSha256 = Hmac<Sha256>;

const SIGNED_HEADERS: &str = "content-type;host;x-amz-content-sha256;x-amz-date";

pub struct S3Client {
    http: reqwest::Client,
    bucket: String,
    region: String,
    access_key_id: String,
    secret_access_key: String,
    endpoint: String,
}

impl S3Client {
    pub fn new(config: &AppConfig) -> Self {
        let endpoint = config
            .s3_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", config.aws_region));

        Self {
            http: reqwest::Client::new(),
            bucket: config.s3_bucket.clone(),
            region: config.aws_region.clone(),
            access_key_id: config.aws_access_key_id.clone(),
            secret_access_key: config.aws_secret_access_key.clone(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }

    /// Recover the object key from a URL this client produced.
    fn key_from_url(&self, url: &str) -> Result<String, BlobError> {
        let prefix = format!("{}/{}/", self.endpoint, self.bucket);
        url.strip_prefix(&prefix)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| BlobError::BadUrl(url.to_string()))
    }

    fn host(&self) -> String {
        self.endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string()
    }

    async fn send(
        &self,
        method: reqwest::Method,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BlobError> {
        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();

        let payload_hash = hex::encode(Sha256::digest(&body));
        let canonical_uri = format!("/{}/{}", self.bucket, key);
        let host = self.host();

        let canonical_request = format!(
            "{method}\n{uri}\n\ncontent-type:{ct}\nhost:{host}\nx-amz-content-sha256:{hash}\nx-amz-date:{date}\n\n{signed}\n{hash}",
            method = method.as_str(),
            uri = canonical_uri,
            ct = content_type,
            host = host,
            hash = payload_hash,
            date = amz_date,
            signed = SIGNED_HEADERS,
        );

        let scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes())),
        );

        let signing_key = derive_signing_key(&self.secret_access_key, &date_stamp, &self.region);
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            self.access_key_id, scope, SIGNED_HEADERS, signature,
        );

        let url = self.object_url(key);
        let response = self
            .http
            .request(method, &url)
            .header("Authorization", authorization)
            .header("Content-Type", content_type)
            .header("x-amz-date", amz_date)
            .header("x-amz-content-sha256", payload_hash)
            .body(body)
            .send()
            .await
            .map_err(|e| BlobError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status, body, url, "S3 request failed");
            return Err(BlobError::Status { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl BlobStore for S3Client {
    async fn store(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        self.send(reqwest::Method::PUT, key, bytes, content_type)
            .await?;
        Ok(self.object_url(key))
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        let key = self.key_from_url(url)?;
        self.send(reqwest::Method::DELETE, &key, Vec::new(), "application/octet-stream")
            .await
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// AWS SigV4 key derivation chain: date, region, service, terminator.
fn derive_signing_key(secret: &str, date_stamp: &str, region: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, b"s3");
    hmac_sha256(&k_service, b"aws4_request")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> S3Client {
        S3Client {
            http: reqwest::Client::new(),
            bucket: "showstaff-media".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: "AKIATEST".to_string(),
            secret_access_key: "secret".to_string(),
            endpoint: "https://s3.us-east-1.amazonaws.com".to_string(),
        }
    }

    #[test]
    fn object_url_round_trips_through_key_extraction() {
        let c = client();
        let url = c.object_url("staff-photos/1700000000-42.jpg");
        assert_eq!(
            url,
            "https://s3.us-east-1.amazonaws.com/showstaff-media/staff-photos/1700000000-42.jpg"
        );
        assert_eq!(
            c.key_from_url(&url).unwrap(),
            "staff-photos/1700000000-42.jpg"
        );
    }

    #[test]
    fn key_extraction_rejects_foreign_urls() {
        let c = client();
        assert!(c.key_from_url("https://elsewhere.example/file.jpg").is_err());
        assert!(c
            .key_from_url("https://s3.us-east-1.amazonaws.com/showstaff-media/")
            .is_err());
    }

    #[test]
    fn signing_key_depends_on_date_and_region() {
        let a = derive_signing_key("secret", "20250101", "us-east-1");
        let b = derive_signing_key("secret", "20250102", "us-east-1");
        let c = derive_signing_key("secret", "20250101", "us-west-2");

        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
        assert_ne!(a, c);
        // Deterministic for identical inputs.
        assert_eq!(a, derive_signing_key("secret", "20250101", "us-east-1"));
    }
}
