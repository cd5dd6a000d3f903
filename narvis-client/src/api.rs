use std::time::Duration;

use async_trait::async_trait;
use futures::{
    future::{select, Either},
    pin_mut, Future,
};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
#[cfg(test)]
use mockall::automock;
use narvis_common::{AccessToken, ApiErrorBody, Credentials, Narrative, RegisterRequest, User};
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    session::SessionToken,
};

const LOGIN_PATH: &str = "/login/access-token";
const REGISTER_PATH: &str = "/users/register";
const CURRENT_USER_PATH: &str = "/users/me";
const NARRATIVES_PATH: &str = "/narratives/";

/// Operations the client performs against the Narvis API
#[cfg_attr(test, automock)]
#[async_trait(?Send)]
pub trait NarvisApi {
    /// Exchange credentials for a session token
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken>;
    /// Create an account. The returned user carries the canonical email.
    async fn register(&self, request: &RegisterRequest) -> Result<User>;
    /// The narratives owned by the token's user, in server order
    async fn narratives(&self, token: &SessionToken) -> Result<Vec<Narrative>>;
    /// The account the token belongs to
    async fn current_user(&self, token: &SessionToken) -> Result<User>;
}

/// [NarvisApi] implementation talking HTTP through the browser's `fetch`
#[derive(Clone, Copy, Debug)]
pub struct GatewayApi {
    url: &'static str,
    timeout: Duration,
}

impl GatewayApi {
    pub const fn new(url: &'static str, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    pub const fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url, config.request_timeout)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url.trim_end_matches('/'))
    }

    /// Send `request` and decode its body, both under the configured deadline
    async fn fetch<T>(&self, request: Request) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let head = async { request.send().await.map_err(ClientError::from) };
        exchange(head, parse_response, TimeoutFuture::new(millis)).await
    }

    async fn fetch_authorized<T>(&self, request: Request, token: &SessionToken) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.fetch(request.header("Authorization", &token.bearer())).await
    }
}

#[async_trait(?Send)]
impl NarvisApi for GatewayApi {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        let request = Request::post(&self.endpoint(LOGIN_PATH))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(login_form_body(credentials));
        let token: AccessToken = self.fetch(request).await?;
        if token.access_token.trim().is_empty() {
            return Err(ClientError::Server(
                "Login response did not contain an access token".to_owned(),
            ));
        }
        Ok(SessionToken::new(token.access_token))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let request = Request::post(&self.endpoint(REGISTER_PATH)).json(request)?;
        self.fetch(request).await
    }

    async fn narratives(&self, token: &SessionToken) -> Result<Vec<Narrative>> {
        let request = Request::get(&self.endpoint(NARRATIVES_PATH));
        self.fetch_authorized(request, token).await
    }

    async fn current_user(&self, token: &SessionToken) -> Result<User> {
        let request = Request::get(&self.endpoint(CURRENT_USER_PATH));
        self.fetch_authorized(request, token).await
    }
}

/// Form body for the token endpoint. The endpoint follows the OAuth2 password flow, so the email
/// is sent as `username`.
pub fn login_form_body(credentials: &Credentials) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("username", &credentials.email)
        .append_pair("password", &credentials.password)
        .finish()
}

/// Resolve `request`, or fail with [ClientError::Network] if `deadline` completes first
pub async fn with_timeout<F, D, T>(request: F, deadline: D) -> Result<T>
where
    F: Future<Output = Result<T>>,
    D: Future<Output = ()>,
{
    pin_mut!(request);
    pin_mut!(deadline);
    match select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::warn!("Request timed out");
            Err(ClientError::Network("The request timed out".to_owned()))
        }
    }
}

/// Await the response head then read its body with `read_body`, failing with
/// [ClientError::Network] if `deadline` completes before the body has been read
pub async fn exchange<H, R, B, F, D, T>(head: H, read_body: B, deadline: D) -> Result<T>
where
    H: Future<Output = Result<R>>,
    B: FnOnce(R) -> F,
    F: Future<Output = Result<T>>,
    D: Future<Output = ()>,
{
    let whole = async move {
        let response = head.await?;
        read_body(response).await
    };
    with_timeout(whole, deadline).await
}

async fn parse_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;
    decode_body(status, &body)
}

/// Turn a status and raw body into either the expected payload or a classified error
pub fn decode_body<T>(status: u16, body: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if (200..300).contains(&status) {
        return Ok(serde_json::from_str(body)?);
    }
    let reason = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(error_body) => error_body.reason(),
        Err(_) => body.to_owned(),
    };
    let error = ClientError::from_status(status, &reason);
    log::warn!("API responded with {status}: {error}");
    Err(error)
}
