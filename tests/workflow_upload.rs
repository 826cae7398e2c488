//! Integration tests for the image upload workflow.

mod common;

use common::{controller, logged_in_controller, Call, FakeBackend, Reply};
use montage::api::{UploadFile, UploadResponse};
use montage::controller::{
    Outcome, MSG_INVALID_FILE_TYPE, MSG_NOT_LOGGED_IN, MSG_UPLOAD_ERROR, MSG_UPLOAD_OK,
};
use montage::view::Route;
use std::path::Path;

fn uploaded() -> Reply<UploadResponse> {
    Reply::Body(UploadResponse {
        success: true,
        image_url: Some("http://127.0.0.1:5000/uploads/cat.png".to_string()),
        message: None,
    })
}

#[tokio::test]
async fn disallowed_extensions_are_rejected_locally() {
    for name in ["notes.txt", "clip.gif", "archive.png.zip", "noext", "scan.xpng"] {
        let mut ctl = logged_in_controller(FakeBackend::new().with_upload(uploaded()), Route::Home);

        let outcome = ctl.upload_file(&UploadFile::from_path(Path::new(name))).await;

        assert_eq!(outcome, Outcome::Rejected, "{} should be rejected", name);
        assert_eq!(ctl.backend().call_count(), 0, "{} reached the server", name);
        assert_eq!(ctl.view().alerts(), [MSG_INVALID_FILE_TYPE.to_string()]);
    }
}

#[tokio::test]
async fn allowed_extensions_ignore_case() {
    for name in ["a.jpg", "b.JPEG", "c.Png"] {
        let mut ctl = logged_in_controller(FakeBackend::new().with_upload(uploaded()), Route::Home);

        let outcome = ctl.upload_file(&UploadFile::from_path(Path::new(name))).await;

        assert_eq!(outcome, Outcome::Succeeded, "{} should upload", name);
        assert_eq!(ctl.view().alerts(), [MSG_UPLOAD_OK.to_string()]);
    }
}

#[tokio::test]
async fn bare_extension_names_are_uploaded() {
    for name in [".png", ".JPG"] {
        let mut ctl = logged_in_controller(FakeBackend::new().with_upload(uploaded()), Route::Home);

        let outcome = ctl.upload_file(&UploadFile::from_path(Path::new(name))).await;

        assert_eq!(outcome, Outcome::Succeeded, "{} should upload", name);
        assert_eq!(ctl.backend().call_count(), 1);
    }
}

#[tokio::test]
async fn upload_sends_token_and_file_name() {
    let mut ctl = logged_in_controller(FakeBackend::new().with_upload(uploaded()), Route::Home);

    ctl.upload_file(&UploadFile::from_path(Path::new("/pics/cat.png")))
        .await;

    assert_eq!(
        ctl.backend().calls(),
        vec![Call::Upload {
            token: "tok-123".to_string(),
            name: "cat.png".to_string(),
        }]
    );
}

#[tokio::test]
async fn upload_without_session_goes_to_login() {
    let mut ctl = controller(FakeBackend::new().with_upload(uploaded()), Route::Home);

    let outcome = ctl.upload_file(&UploadFile::from_path(Path::new("cat.png"))).await;

    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(ctl.backend().call_count(), 0);
    assert_eq!(ctl.view().alerts(), [MSG_NOT_LOGGED_IN.to_string()]);
    assert_eq!(ctl.view().last_navigation(), Some(Route::Login));
}

#[tokio::test]
async fn upload_rejection_shows_server_message() {
    let backend = FakeBackend::new().with_upload(Reply::Body(UploadResponse {
        success: false,
        image_url: None,
        message: Some("No selected file".to_string()),
    }));
    let mut ctl = logged_in_controller(backend, Route::Home);

    let outcome = ctl.upload_file(&UploadFile::from_path(Path::new("cat.png"))).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(
        ctl.view().alerts(),
        ["Upload failed: No selected file".to_string()]
    );
}

#[tokio::test]
async fn upload_transport_error_shows_upload_alert() {
    let mut ctl = logged_in_controller(FakeBackend::new(), Route::Home);

    let outcome = ctl.upload_file(&UploadFile::from_path(Path::new("cat.png"))).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(ctl.view().alerts(), [MSG_UPLOAD_ERROR.to_string()]);
}
