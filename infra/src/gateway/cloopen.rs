//! Cloopen template-SMS gateway client
//!
//! One request per dispatch, signed per the Cloopen REST scheme: the
//! signature is the uppercase hex MD5 of `sid + token + timestamp`, the
//! `Authorization` header is the Base64 of `sid:timestamp`, both built
//! from the same timestamp. The account token never leaves this module
//! and is never logged.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::Local;
use md5::{Digest, Md5};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

use cl_core::gateway::{ProviderOutcome, SmsGateway};
use cl_shared::config::GatewayConfig;
use cl_shared::utils::phone::mask_phone_number;

use super::catalog::ErrorCatalog;
use crate::InfrastructureError;

/// Gateway request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Template-SMS request body in the provider's wire format
#[derive(Debug, Serialize)]
struct TemplateSmsBody<'a> {
    /// Comma-joined recipient numbers
    to: String,
    #[serde(rename = "appId")]
    app_id: &'a str,
    #[serde(rename = "templateId")]
    template_id: &'a str,
    datas: &'a [String],
    #[serde(rename = "reqId", skip_serializing_if = "Option::is_none")]
    req_id: Option<&'a str>,
    #[serde(rename = "subAppend", skip_serializing_if = "Option::is_none")]
    sub_append: Option<&'a str>,
}

/// Envelope the provider wraps every response in
#[derive(Debug, Deserialize)]
struct TemplateSmsResponse {
    #[serde(rename = "statusCode")]
    status_code: String,
    #[serde(rename = "statusMsg")]
    status_msg: Option<String>,
}

/// HTTP client for the Cloopen template-SMS endpoint
pub struct CloopenGateway {
    config: GatewayConfig,
    catalog: ErrorCatalog,
    client: reqwest::Client,
}

impl CloopenGateway {
    /// Build a gateway client with the default status-code catalog
    pub fn new(config: GatewayConfig) -> Result<Self, InfrastructureError> {
        Self::with_catalog(config, ErrorCatalog::new())
    }

    /// Build a gateway client with a caller-supplied status-code catalog
    pub fn with_catalog(
        config: GatewayConfig,
        catalog: ErrorCatalog,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            config,
            catalog,
            client,
        })
    }

    /// Current local time as the provider's `YmdHis` timestamp
    fn timestamp() -> String {
        Local::now().format("%Y%m%d%H%M%S").to_string()
    }

    /// Uppercase hex MD5 of `sid + token + timestamp`
    fn signature(&self, timestamp: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.config.account_sid.as_bytes());
        hasher.update(self.config.account_token.as_bytes());
        hasher.update(timestamp.as_bytes());
        hex::encode_upper(hasher.finalize())
    }

    /// `Authorization` header value: Base64 of `sid:timestamp`
    fn authorization(&self, timestamp: &str) -> String {
        general_purpose::STANDARD.encode(format!(
            "{}:{}",
            self.config.account_sid, timestamp
        ))
    }

    /// Template-SMS endpoint URL with the signature query parameter
    fn request_url(&self, signature: &str) -> String {
        format!(
            "https://{}:{}/{}/Accounts/{}/SMS/TemplateSMS?sig={}",
            self.config.server_ip,
            self.config.server_port,
            self.config.soft_version,
            self.config.account_sid,
            signature
        )
    }

    async fn send_template_sms(
        &self,
        recipients: &[String],
        variables: &[String],
        template_id: &str,
        request_id: Option<&str>,
        sub_append: Option<&str>,
    ) -> Result<TemplateSmsResponse, reqwest::Error> {
        let timestamp = Self::timestamp();
        let signature = self.signature(&timestamp);
        let url = self.request_url(&signature);

        let body = TemplateSmsBody {
            to: recipients.join(","),
            app_id: &self.config.app_id,
            template_id,
            datas: variables,
            req_id: request_id,
            sub_append,
        };

        if self.config.enable_log {
            // Body only; the URL carries the signature and stays out of the log
            match serde_json::to_string(&body) {
                Ok(serialized) => info!(body = %serialized, "template sms request"),
                Err(e) => warn!("Failed to serialize request body for logging: {}", e),
            }
        }

        // Header values are ASCII by construction; an invalid value
        // would surface as a builder error at send().
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json;charset=utf-8")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.authorization(&timestamp))
            .json(&body)
            .send()
            .await?;

        response.json::<TemplateSmsResponse>().await
    }
}

#[async_trait]
impl SmsGateway for CloopenGateway {
    async fn dispatch(
        &self,
        recipients: &[String],
        variables: &[String],
        template_id: &str,
        request_id: Option<&str>,
        sub_append: Option<&str>,
    ) -> ProviderOutcome {
        let masked: Vec<String> = recipients.iter().map(|r| mask_phone_number(r)).collect();

        let response = match self
            .send_template_sms(recipients, variables, template_id, request_id, sub_append)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(
                    recipients = ?masked,
                    template_id = %template_id,
                    "gateway transport failure: {}", e
                );
                return ProviderOutcome::transport(e.to_string());
            }
        };

        if ErrorCatalog::is_success(&response.status_code) {
            info!(
                recipients = ?masked,
                template_id = %template_id,
                "template sms accepted"
            );
            return ProviderOutcome::Success;
        }

        let (class, catalog_message) = self.catalog.classify(&response.status_code);
        let message = response.status_msg.unwrap_or(catalog_message);
        warn!(
            recipients = ?masked,
            template_id = %template_id,
            status_code = %response.status_code,
            "template sms rejected: {}", message
        );

        match class {
            super::catalog::OutcomeClass::Recoverable => ProviderOutcome::Recoverable {
                code: response.status_code,
                message,
            },
            super::catalog::OutcomeClass::Fatal => ProviderOutcome::Fatal {
                code: response.status_code,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_shared::config::ConfigError;

    fn gateway() -> CloopenGateway {
        let config = GatewayConfig::new(
            "app.cloopen.com",
            8883,
            "2013-12-26",
            "8aaf07087",
            "token123",
            "app1",
            false,
        )
        .unwrap();
        CloopenGateway::new(config).unwrap()
    }

    #[test]
    fn test_signature_is_uppercase_md5() {
        // md5("abc") and md5("") are fixed points of the scheme; the
        // gateway hashes sid + token + timestamp in that order.
        let mut hasher = Md5::new();
        hasher.update(b"abc");
        assert_eq!(
            hex::encode_upper(hasher.finalize()),
            "900150983CD24FB0D6963F7D28E17F72"
        );

        let empty = Md5::new();
        assert_eq!(
            hex::encode_upper(empty.finalize()),
            "D41D8CD98F00B204E9800998ECF8427E"
        );

        let gw = gateway();
        let sig = gw.signature("20260827120000");
        let mut expected = Md5::new();
        expected.update(b"8aaf07087token12320260827120000");
        assert_eq!(sig, hex::encode_upper(expected.finalize()));
        assert_eq!(sig, sig.to_uppercase());
        assert_eq!(sig.len(), 32);
    }

    #[test]
    fn test_authorization_is_base64_of_sid_and_timestamp() {
        let gw = gateway();
        let auth = gw.authorization("20260827120000");
        let decoded = general_purpose::STANDARD.decode(&auth).unwrap();
        assert_eq!(decoded, b"8aaf07087:20260827120000");
    }

    #[test]
    fn test_request_url_shape() {
        let gw = gateway();
        let url = gw.request_url("ABCDEF");
        assert_eq!(
            url,
            "https://app.cloopen.com:8883/2013-12-26/Accounts/8aaf07087/SMS/TemplateSMS?sig=ABCDEF"
        );
    }

    #[test]
    fn test_timestamp_format() {
        let ts = CloopenGateway::timestamp();
        assert_eq!(ts.len(), 14);
        assert!(ts.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_body_serialization_omits_absent_optionals() {
        let datas = vec!["482913".to_string(), "5分钟".to_string()];
        let body = TemplateSmsBody {
            to: "13800001111,13900002222".to_string(),
            app_id: "app1",
            template_id: "T1",
            datas: &datas,
            req_id: None,
            sub_append: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"], "13800001111,13900002222");
        assert_eq!(json["appId"], "app1");
        assert_eq!(json["templateId"], "T1");
        assert_eq!(json["datas"][1], "5分钟");
        assert!(json.get("reqId").is_none());
        assert!(json.get("subAppend").is_none());
    }

    #[test]
    fn test_body_serialization_includes_present_optionals() {
        let datas = vec!["111111".to_string()];
        let body = TemplateSmsBody {
            to: "13800001111".to_string(),
            app_id: "app1",
            template_id: "T1",
            datas: &datas,
            req_id: Some("req-7"),
            sub_append: Some("1701"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["reqId"], "req-7");
        assert_eq!(json["subAppend"], "1701");
    }

    #[test]
    fn test_response_deserialization() {
        let ok: TemplateSmsResponse =
            serde_json::from_str(r#"{"statusCode":"000000"}"#).unwrap();
        assert_eq!(ok.status_code, "000000");
        assert!(ok.status_msg.is_none());

        let rejected: TemplateSmsResponse = serde_json::from_str(
            r#"{"statusCode":"160042","statusMsg":"Invalid phone number"}"#,
        )
        .unwrap();
        assert_eq!(rejected.status_code, "160042");
        assert_eq!(rejected.status_msg.as_deref(), Some("Invalid phone number"));
    }

    #[test]
    fn test_supplied_catalog_drives_classification() {
        use super::super::catalog::OutcomeClass;

        let config = GatewayConfig::new(
            "app.cloopen.com",
            8883,
            "2013-12-26",
            "8aaf07087",
            "token123",
            "app1",
            false,
        )
        .unwrap();
        let catalog =
            ErrorCatalog::new().with_entry("160038", OutcomeClass::Fatal, "Quota exhausted");
        let gw = CloopenGateway::with_catalog(config, catalog).unwrap();

        let (class, message) = gw.catalog.classify("160038");
        assert_eq!(class, OutcomeClass::Fatal);
        assert_eq!(message, "Quota exhausted");
    }

    #[test]
    fn test_invalid_config_rejected_before_client_build() {
        let err = GatewayConfig::new("", 8883, "2013-12-26", "sid", "tok", "app1", false)
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("server_ip"));
    }
}
