use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use shared_types::{
    bearer, AuthResponse, ErrorBody, LoginRequest, MeaningResponse, SaveWordRequest, SavedWord,
    SignupRequest, WordsResponse,
};

use crate::config::api_base;
use crate::error::ApiError;

/// Characters escaped when a word id is used as a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Result of a successful save call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// 409: the word is already in the dictionary
    AlreadySaved,
}

/// The backend calls the extension makes.
#[async_trait(?Send)]
pub trait LexlyApi {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn list_words(&self, token: &str) -> Result<Vec<SavedWord>, ApiError>;

    async fn save_word(&self, token: &str, word: &str) -> Result<SaveOutcome, ApiError>;

    async fn delete_word(&self, token: &str, word_id: &str) -> Result<(), ApiError>;

    /// Ask the backend to generate (or return) the definition of a saved word
    async fn fetch_meaning(&self, token: &str, word_id: &str) -> Result<String, ApiError>;
}

/// `gloo-net` client for the Lexly REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpApi {
    base: String,
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(api_base())
    }
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn word_url(&self, word_id: &str, suffix: &str) -> String {
        let id = utf8_percent_encode(word_id, PATH_SEGMENT);
        format!("{}/words/{id}{suffix}", self.base)
    }

    async fn auth(&self, path: &str, body: &impl serde::Serialize) -> Result<AuthResponse, ApiError> {
        let request = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = send(request.send()).await?;
        read_json(response).await
    }
}

#[async_trait(?Send)]
impl LexlyApi for HttpApi {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.auth("/auth/signup", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.auth("/auth/login", request).await
    }

    async fn list_words(&self, token: &str) -> Result<Vec<SavedWord>, ApiError> {
        let response = send(authorized(Request::get(&self.url("/words")), token).send()).await?;
        let data: WordsResponse = read_json(response).await?;
        Ok(data.words)
    }

    async fn save_word(&self, token: &str, word: &str) -> Result<SaveOutcome, ApiError> {
        let request = authorized(Request::post(&self.url("/words")), token)
            .json(&SaveWordRequest {
                word: word.to_string(),
            })
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        match send(request.send()).await {
            Ok(_) => Ok(SaveOutcome::Saved),
            Err(ApiError::Status { status: 409, .. }) => Ok(SaveOutcome::AlreadySaved),
            Err(e) => Err(e),
        }
    }

    async fn delete_word(&self, token: &str, word_id: &str) -> Result<(), ApiError> {
        let url = self.word_url(word_id, "");
        send(authorized(Request::delete(&url), token).send()).await?;
        Ok(())
    }

    async fn fetch_meaning(&self, token: &str, word_id: &str) -> Result<String, ApiError> {
        let url = self.word_url(word_id, "/meaning");
        let response = send(authorized(Request::post(&url), token).send()).await?;
        let data: MeaningResponse = read_json(response).await?;
        data.meaning
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| ApiError::Decode("response carried no meaning".to_string()))
    }
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &bearer(token))
}

/// Await a request and turn non-2xx statuses into [`ApiError::Status`].
async fn send(
    pending: impl std::future::Future<Output = Result<Response, gloo_net::Error>>,
) -> Result<Response, ApiError> {
    let response = pending
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(&body),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extract `{"error": "..."}` from an error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}
