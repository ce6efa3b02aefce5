//! HTTP calls against the chat server.

use std::path::Path;

use kairan_server::infrastructure::dto::http::{
    ChatMessageDto, ClearRequest, ClearResponse, ErrorResponse, HeartbeatRequest, OnlineResponse,
    SendMessageResponse, SetNameRequest, SetNameResponse, StatusResponse,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Thin wrapper around `reqwest::Client` bound to one server and one user id
#[derive(Debug, Clone)]
pub struct ChatApi {
    http: reqwest::Client,
    base_url: String,
    user_id: String,
}

impl ChatApi {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self.http.get(self.url("/api/health")).send().await?;
        decode::<StatusResponse>(response).await.map(|_| ())
    }

    /// `POST /send` with a text-only form
    pub async fn send_text(
        &self,
        text: &str,
        name_hint: Option<&str>,
    ) -> Result<SendMessageResponse, ClientError> {
        let form = self.base_form(text, name_hint);
        self.post_form(form).await
    }

    /// `POST /send` with an image read from `path`
    pub async fn send_image(
        &self,
        path: &Path,
        caption: &str,
        name_hint: Option<&str>,
    ) -> Result<SendMessageResponse, ClientError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::FileRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let form = self
            .base_form(caption, name_hint)
            .part("image", Part::bytes(bytes).file_name(file_name));
        self.post_form(form).await
    }

    /// `GET /messages?userId=...`
    pub async fn messages(&self) -> Result<Vec<ChatMessageDto>, ClientError> {
        let response = self
            .http
            .get(self.url("/messages"))
            .query(&[("userId", self.user_id.as_str())])
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /name`
    pub async fn set_name(&self, name: &str) -> Result<SetNameResponse, ClientError> {
        let request = SetNameRequest {
            user_id: self.user_id.clone(),
            name: name.to_string(),
        };
        let response = self
            .http
            .post(self.url("/name"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /clear`
    pub async fn clear(&self) -> Result<ClearResponse, ClientError> {
        let request = ClearRequest {
            user_id: self.user_id.clone(),
        };
        let response = self
            .http
            .post(self.url("/clear"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /heartbeat`
    pub async fn heartbeat(&self, name_hint: Option<&str>) -> Result<(), ClientError> {
        let request = HeartbeatRequest {
            user_id: self.user_id.clone(),
            name: name_hint.map(str::to_string),
        };
        let response = self
            .http
            .post(self.url("/heartbeat"))
            .json(&request)
            .send()
            .await?;
        decode::<StatusResponse>(response).await.map(|_| ())
    }

    /// `GET /online`
    pub async fn online(&self) -> Result<Vec<String>, ClientError> {
        let response = self.http.get(self.url("/online")).send().await?;
        decode::<OnlineResponse>(response)
            .await
            .map(|body| body.online)
    }

    fn base_form(&self, text: &str, name_hint: Option<&str>) -> Form {
        let form = Form::new()
            .text("userId", self.user_id.clone())
            .text("text", text.to_string());
        match name_hint {
            Some(name) => form.text("name", name.to_string()),
            None => form,
        }
    }

    async fn post_form(&self, form: Form) -> Result<SendMessageResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/send"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a success body, or turn `{"status":"error","message":...}` into `Rejected`
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        // テスト項目: 末尾のスラッシュが除去され、パスが正しく連結される
        // given (前提条件):
        let api = ChatApi::new("http://127.0.0.1:3000/", "u1");

        // when (操作):
        let url = api.url("/messages");

        // then (期待する結果):
        assert_eq!(api.base_url(), "http://127.0.0.1:3000");
        assert_eq!(url, "http://127.0.0.1:3000/messages");
    }

    #[tokio::test]
    async fn test_send_image_missing_file() {
        // テスト項目: 存在しない画像ファイルは送信前に FileRead エラーになる
        // given (前提条件):
        let api = ChatApi::new("http://127.0.0.1:9", "u1");
        let path = std::env::temp_dir().join("kairan-client-no-such-image.png");

        // when (操作):
        let result = api.send_image(&path, "caption", None).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::FileRead { .. })));
    }
}
