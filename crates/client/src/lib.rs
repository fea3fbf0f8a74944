pub mod wire;

use reqwest::Url;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{future::Future, time::Duration};
use thiserror::Error;
use tracing::debug;
pub use wire::{
    BalanceResponse, Bank, BanksResponse, CombinedWithdrawBody, DepositBody, DepositResponse,
    SplitWithdrawBody, WireFormat, WithdrawBody, WithdrawResponse,
};

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (refused, reset, timed out)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-success HTTP status with a body that is not a contract response
    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status but the body is not the expected JSON
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Well-formed response with `success: false`
    #[error("Backend rejected the request: {0}")]
    Rejected(String),
}

impl ClientError {
    /// True for failures where the backend could not be reached or did not
    /// answer with a contract response.
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Status { .. })
    }
}

/// Request paths of the backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub banks: String,
    pub balance: String,
    pub withdraw: String,
    pub deposit: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            banks: "/api/banks".to_string(),
            balance: "/api/balance".to_string(),
            withdraw: "/api/withdraw".to_string(),
            deposit: "/api/deposit".to_string(),
        }
    }
}

/// The remote payment backend.
pub trait Backend: Send + Sync {
    /// Banks available for bank withdrawals.
    fn banks(&self) -> impl Future<Output = Result<Vec<Bank>, ClientError>> + Send;

    /// Current account balance.
    fn balance(&self) -> impl Future<Output = Result<Decimal, ClientError>> + Send;

    /// Submit a withdrawal.
    ///
    /// A response with `success: false` is returned as `Ok`; the caller
    /// decides how to surface it.
    fn withdraw(
        &self,
        body: &WithdrawBody,
    ) -> impl Future<Output = Result<WithdrawResponse, ClientError>> + Send;

    /// Submit a deposit. Same `success` handling as [`Backend::withdraw`].
    fn deposit(
        &self,
        body: &DepositBody,
    ) -> impl Future<Output = Result<DepositResponse, ClientError>> + Send;
}

impl<T: Backend> Backend for &T {
    fn banks(&self) -> impl Future<Output = Result<Vec<Bank>, ClientError>> + Send {
        (**self).banks()
    }

    fn balance(&self) -> impl Future<Output = Result<Decimal, ClientError>> + Send {
        (**self).balance()
    }

    fn withdraw(
        &self,
        body: &WithdrawBody,
    ) -> impl Future<Output = Result<WithdrawResponse, ClientError>> + Send {
        (**self).withdraw(body)
    }

    fn deposit(
        &self,
        body: &DepositBody,
    ) -> impl Future<Output = Result<DepositResponse, ClientError>> + Send {
        (**self).deposit(body)
    }
}

/// [`Backend`] over HTTPS with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    endpoints: Endpoints,
}

/// Convenience function to create an HTTP backend from a base url.
pub fn create_backend(
    base_url: &str,
    endpoints: Endpoints,
    timeout: Duration,
) -> Result<HttpBackend, ClientError> {
    let base_url: Url = base_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    if base_url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(base_url.to_string()));
    }

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::Connection(format!("{}", e)))?;

    Ok(HttpBackend::with_client(client, base_url, endpoints))
}

impl HttpBackend {
    /// Creates a backend with a custom HTTP client.
    pub const fn with_client(client: reqwest::Client, base_url: Url, endpoints: Endpoints) -> Self {
        Self {
            client,
            base_url,
            endpoints,
        }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Connection(format!("{}", e)))?;

        read_json(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Connection(format!("{}", e)))?;

        read_json(response).await
    }
}

impl Backend for HttpBackend {
    async fn banks(&self) -> Result<Vec<Bank>, ClientError> {
        let response: BanksResponse = self.get(&self.endpoints.banks).await?;
        if !response.success {
            return Err(ClientError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Could not load banks".to_string()),
            ));
        }

        Ok(response.banks)
    }

    async fn balance(&self) -> Result<Decimal, ClientError> {
        let response: BalanceResponse = self.get(&self.endpoints.balance).await?;
        match (response.success, response.balance) {
            (true, Some(balance)) => Ok(balance),
            (true, None) => Err(ClientError::Malformed(
                "balance missing from response".to_string(),
            )),
            (false, _) => Err(ClientError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Could not load balance".to_string()),
            )),
        }
    }

    async fn withdraw(&self, body: &WithdrawBody) -> Result<WithdrawResponse, ClientError> {
        self.post(&self.endpoints.withdraw, body).await
    }

    async fn deposit(&self, body: &DepositBody) -> Result<DepositResponse, ClientError> {
        self.post(&self.endpoints.deposit, body).await
    }
}

/// Decode a contract response.
///
/// A body that parses is returned whatever the status code, so that
/// `{success: false, message}` error payloads reach the caller.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Connection(format!("{}", e)))?;

    debug!(status = status.as_u16(), "Backend responded");

    match serde_json::from_str(&body) {
        Ok(parsed) => Ok(parsed),
        Err(e) if status.is_success() => Err(ClientError::Malformed(format!("{}", e))),
        Err(_) => Err(ClientError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn backend(server: &MockServer) -> HttpBackend {
        create_backend(&server.uri(), Endpoints::default(), Duration::from_secs(5))
            .expect("Failed to create backend")
    }

    #[test]
    fn test_invalid_url() {
        let result = create_backend("not a url", Endpoints::default(), Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_banks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/banks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "banks": [{"code": "01", "name": "KCB"}, {"code": "11", "name": "Equity"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let banks = backend(&server).await.banks().await.unwrap();
        assert_eq!(banks.len(), 2);
        assert_eq!(banks[1].name, "Equity");
    }

    #[tokio::test]
    async fn test_balance_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/balance"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "Account locked"})),
            )
            .mount(&server)
            .await;

        let err = backend(&server).await.balance().await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected(ref m) if m == "Account locked"));
        assert!(!err.is_network());
    }

    #[tokio::test]
    async fn test_withdraw_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/withdraw"))
            .and(body_json(json!({
                "amount": 5000.0,
                "method": "bank",
                "accountName": "Jane",
                "accountDetails": "0123456789 - KCB",
                "phoneNumber": ""
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "transactionId": "T1",
                "netAmount": 4950
            })))
            .expect(1)
            .mount(&server)
            .await;

        let body = WithdrawBody::Combined(CombinedWithdrawBody {
            amount: Decimal::from(5_000),
            method: withdrawal::WithdrawalMethod::Bank,
            account_name: "Jane".to_string(),
            account_details: "0123456789 - KCB".to_string(),
            phone_number: String::new(),
        });

        let response = backend(&server).await.withdraw(&body).await.unwrap();
        assert!(response.success);
        assert_eq!(response.transaction_id.as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_error_payload_on_bad_status_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/deposit"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"success": false, "message": "Amount too low"})),
            )
            .mount(&server)
            .await;

        let body = DepositBody {
            amount: Decimal::from(10),
            return_url: "https://shop.example".to_string(),
        };
        let response = backend(&server).await.deposit(&body).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Amount too low"));
    }

    #[tokio::test]
    async fn test_unparsable_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/banks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/balance"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let backend = backend(&server).await;

        let err = backend.banks().await.unwrap_err();
        assert!(matches!(err, ClientError::Malformed(_)));

        let err = backend.balance().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 502, .. }));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // Nothing listens on the discard port.
        let backend = create_backend(
            "http://127.0.0.1:9",
            Endpoints::default(),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = backend.balance().await.unwrap_err();
        assert!(matches!(err, ClientError::Connection(_)));
    }
}
