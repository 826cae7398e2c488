//! Shared test utilities for controller workflow tests.
//!
//! Provides `FakeBackend` - a scripted [`Backend`] that records every request
//! it receives - and `TestController`, a controller wired to it, an in-memory
//! session and a quiet console view.

use anyhow::{anyhow, Result};
use std::cell::RefCell;

use montage::api::{
    Backend, CreateVideoRequest, CreateVideoResponse, Credentials, ImagesResponse, LoginResponse,
    SignupResponse, UploadFile, UploadResponse,
};
use montage::cli::ConsoleView;
use montage::controller::Controller;
use montage::session::{MemorySessionStore, SessionStore};
use montage::view::Route;

/// Controller used across the workflow tests
#[allow(dead_code)]
pub type TestController = Controller<FakeBackend, MemorySessionStore, ConsoleView>;

/// A request the fake backend received
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Call {
    Signup(Credentials),
    Login(Credentials),
    GetImages { token: String },
    Upload { token: String, name: String },
    CreateVideo { token: String, request: CreateVideoRequest },
}

/// Scripted answer: a parsed body, or a transport failure
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply<T> {
    Body(T),
    Fail(&'static str),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T> {
        match self {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Fail(reason) => Err(anyhow!("{}", reason)),
        }
    }
}

/// Backend answering from fixed replies.
///
/// Every reply defaults to a transport failure, so a test only scripts the
/// endpoints it expects to be hit.
#[derive(Debug)]
#[allow(dead_code)]
pub struct FakeBackend {
    pub signup: Reply<SignupResponse>,
    pub login: Reply<LoginResponse>,
    pub images: Reply<ImagesResponse>,
    pub upload: Reply<UploadResponse>,
    pub video: Reply<CreateVideoResponse>,
    calls: RefCell<Vec<Call>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            signup: Reply::Fail("signup not scripted"),
            login: Reply::Fail("login not scripted"),
            images: Reply::Fail("get_images not scripted"),
            upload: Reply::Fail("upload not scripted"),
            video: Reply::Fail("create_video not scripted"),
            calls: RefCell::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signup(mut self, reply: Reply<SignupResponse>) -> Self {
        self.signup = reply;
        self
    }

    pub fn with_login(mut self, reply: Reply<LoginResponse>) -> Self {
        self.login = reply;
        self
    }

    pub fn with_images(mut self, reply: Reply<ImagesResponse>) -> Self {
        self.images = reply;
        self
    }

    pub fn with_upload(mut self, reply: Reply<UploadResponse>) -> Self {
        self.upload = reply;
        self
    }

    pub fn with_video(mut self, reply: Reply<CreateVideoResponse>) -> Self {
        self.video = reply;
        self
    }

    /// Every request received so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Backend for FakeBackend {
    async fn signup(&self, credentials: &Credentials) -> Result<SignupResponse> {
        self.record(Call::Signup(credentials.clone()));
        self.signup.get()
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.record(Call::Login(credentials.clone()));
        self.login.get()
    }

    async fn get_images(&self, token: &str) -> Result<ImagesResponse> {
        self.record(Call::GetImages {
            token: token.to_string(),
        });
        self.images.get()
    }

    async fn upload(&self, token: &str, file: &UploadFile) -> Result<UploadResponse> {
        self.record(Call::Upload {
            token: token.to_string(),
            name: file.name().to_string(),
        });
        self.upload.get()
    }

    async fn create_video(
        &self,
        token: &str,
        request: &CreateVideoRequest,
    ) -> Result<CreateVideoResponse> {
        self.record(Call::CreateVideo {
            token: token.to_string(),
            request: request.clone(),
        });
        self.video.get()
    }
}

/// Controller on `route` with no stored session
#[allow(dead_code)]
pub fn controller(backend: FakeBackend, route: Route) -> TestController {
    Controller::new(backend, MemorySessionStore::new(), ConsoleView::quiet(route))
}

/// Controller on `route` with `alice` logged in under token `tok-123`
#[allow(dead_code)]
pub fn logged_in_controller(backend: FakeBackend, route: Route) -> TestController {
    Controller::new(
        backend,
        MemorySessionStore::logged_in("tok-123", "alice"),
        ConsoleView::quiet(route),
    )
}

/// Images response listing `urls`
#[allow(dead_code)]
pub fn images(urls: &[&str]) -> Reply<ImagesResponse> {
    Reply::Body(ImagesResponse {
        success: true,
        images: urls.iter().map(|u| u.to_string()).collect(),
        message: None,
    })
}

/// Session store whose writes all fail, like a read-only config directory
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct ReadOnlySessionStore {
    inner: MemorySessionStore,
}

#[allow(dead_code)]
impl ReadOnlySessionStore {
    pub fn logged_in(token: &str, username: &str) -> Self {
        Self {
            inner: MemorySessionStore::logged_in(token, username),
        }
    }
}

impl SessionStore for ReadOnlySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("Failed to write session file: {} is read-only", key))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        Err(anyhow!("Failed to remove session file: {} is read-only", key))
    }
}
