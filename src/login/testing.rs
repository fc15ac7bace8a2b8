//! Test doubles for the flow's capabilities.

use super::captcha::CaptchaWidget;
use crate::api::{ApiReply, AppError, OtpApi, SendCodeRequest, VerifyCodeRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type Scripted = Mutex<VecDeque<Result<ApiReply, AppError>>>;

/// `OtpApi` answering from queued replies and recording every request.
#[derive(Default)]
pub struct ScriptedApi {
    send_replies: Scripted,
    verify_replies: Scripted,
    sent: Mutex<Vec<(String, SendCodeRequest)>>,
    verified: Mutex<Vec<(String, VerifyCodeRequest)>>,
}

impl ScriptedApi {
    pub fn push_send(&self, status: u16, body: &str) {
        self.send_replies
            .lock()
            .expect("send replies")
            .push_back(ApiReply::decode(status, body.as_bytes()));
    }

    pub fn push_send_error(&self, err: AppError) {
        self.send_replies
            .lock()
            .expect("send replies")
            .push_back(Err(err));
    }

    pub fn push_verify(&self, status: u16, body: &str) {
        self.verify_replies
            .lock()
            .expect("verify replies")
            .push_back(ApiReply::decode(status, body.as_bytes()));
    }

    pub fn push_verify_error(&self, err: AppError) {
        self.verify_replies
            .lock()
            .expect("verify replies")
            .push_back(Err(err));
    }

    pub fn sent(&self) -> Vec<(String, SendCodeRequest)> {
        self.sent.lock().expect("sent").clone()
    }

    pub fn verified(&self) -> Vec<(String, VerifyCodeRequest)> {
        self.verified.lock().expect("verified").clone()
    }

    fn next(replies: &Scripted) -> Result<ApiReply, AppError> {
        replies
            .lock()
            .expect("replies")
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("no scripted reply".to_string())))
    }
}

#[async_trait]
impl OtpApi for ScriptedApi {
    async fn send_code(&self, path: &str, request: &SendCodeRequest) -> Result<ApiReply, AppError> {
        self.sent
            .lock()
            .expect("sent")
            .push((path.to_string(), request.clone()));
        Self::next(&self.send_replies)
    }

    async fn verify_code(
        &self,
        path: &str,
        request: &VerifyCodeRequest,
    ) -> Result<ApiReply, AppError> {
        self.verified
            .lock()
            .expect("verified")
            .push((path.to_string(), request.clone()));
        Self::next(&self.verify_replies)
    }
}

/// Widget that counts how often the flow reset it.
#[derive(Debug, Default)]
pub struct CountingCaptcha {
    pub resets: usize,
}

impl CaptchaWidget for CountingCaptcha {
    fn reset(&mut self) {
        self.resets += 1;
    }
}
