//! Test doubles shared by the core unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{PortError, PortResult, TextGenerationService};

/// Records every instruction and answers from a queue of canned replies.
pub struct RecordingService {
    replies: Mutex<VecDeque<String>>,
    failure: Option<String>,
    instructions: Mutex<Vec<String>>,
}

impl RecordingService {
    pub fn replying(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(String::from).collect()),
            failure: None,
            instructions: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            failure: Some(message.to_string()),
            instructions: Mutex::new(Vec::new()),
        }
    }

    pub fn instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationService for RecordingService {
    async fn generate_text(&self, instruction: &str) -> PortResult<String> {
        self.instructions.lock().unwrap().push(instruction.to_string());
        if let Some(message) = &self.failure {
            return Err(PortError::Generation(message.clone()));
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PortError::Generation("no canned reply left".to_string()))
    }
}

/// Accepts exactly one username/password pair.
pub struct SingleAccount {
    pub username: &'static str,
    pub password: &'static str,
}

#[async_trait]
impl crate::ports::CredentialStore for SingleAccount {
    async fn register(
        &self,
        username: &str,
        _email: &str,
        _password: &str,
    ) -> PortResult<crate::domain::UserAccount> {
        Err(PortError::DuplicateUsername(username.to_string()))
    }

    async fn login(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
