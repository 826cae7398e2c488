//! Integration tests for the video creation workflow.

mod common;

use common::{controller, images, logged_in_controller, Call, FakeBackend, Reply};
use montage::api::{CreateVideoRequest, CreateVideoResponse};
use montage::controller::{Outcome, MSG_NOT_LOGGED_IN, MSG_VIDEO_FAILED};
use montage::video::{AudioMood, Resolution};
use montage::view::{Display, Route, View, DOWNLOAD_FILE_NAME};

fn rendered(url: &str) -> Reply<CreateVideoResponse> {
    Reply::Body(CreateVideoResponse {
        success: true,
        video_url: Some(url.to_string()),
        message: None,
    })
}

#[tokio::test]
async fn request_carries_selection_and_options() {
    let backend = FakeBackend::new()
        .with_images(images(&["a.png", "b.png", "c.png"]))
        .with_video(rendered("http://h/videos/out.mp4"));
    let mut ctl = logged_in_controller(backend, Route::Video);
    ctl.on_page_load().await;

    ctl.toggle_image(2);
    ctl.toggle_image(0);
    {
        let options = ctl.view_mut().page_mut().video_options.as_mut().unwrap();
        options.resolution = Resolution::P720;
        options.audio_mood = AudioMood::Epic;
    }

    assert_eq!(ctl.create_video().await, Outcome::Succeeded);

    let calls = ctl.backend().calls();
    assert_eq!(
        calls.last(),
        Some(&Call::CreateVideo {
            token: "tok-123".to_string(),
            request: CreateVideoRequest {
                image_urls: vec!["a.png".to_string(), "c.png".to_string()],
                resolution: Resolution::P720,
                audio_mood: AudioMood::Epic,
            },
        })
    );
}

#[tokio::test]
async fn default_options_are_480p_happy() {
    let backend = FakeBackend::new()
        .with_images(images(&["a.png"]))
        .with_video(rendered("http://h/v.mp4"));
    let mut ctl = logged_in_controller(backend, Route::Video);
    ctl.on_page_load().await;
    ctl.toggle_image(0);

    ctl.create_video().await;

    match ctl.backend().calls().last() {
        Some(Call::CreateVideo { request, .. }) => {
            assert_eq!(request.resolution, Resolution::P480);
            assert_eq!(request.audio_mood, AudioMood::Happy);
        }
        other => panic!("expected a create_video call, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_selection_is_still_sent() {
    let backend = FakeBackend::new()
        .with_images(images(&["a.png"]))
        .with_video(rendered("http://h/v.mp4"));
    let mut ctl = logged_in_controller(backend, Route::Video);
    ctl.on_page_load().await;

    ctl.create_video().await;

    match ctl.backend().calls().last() {
        Some(Call::CreateVideo { request, .. }) => assert!(request.image_urls.is_empty()),
        other => panic!("expected a create_video call, got {:?}", other),
    }
}

#[tokio::test]
async fn success_fills_preview_and_download_link() {
    let backend = FakeBackend::new()
        .with_images(images(&["a.png"]))
        .with_video(rendered("http://h/videos/out.mp4"));
    let mut ctl = logged_in_controller(backend, Route::Video);
    ctl.on_page_load().await;
    ctl.toggle_image(0);

    ctl.create_video().await;

    assert!(ctl.view().alerts().is_empty());
    let panel = ctl.view_mut().video_panel().unwrap();
    assert_eq!(panel.preview_src.as_deref(), Some("http://h/videos/out.mp4"));
    assert_eq!(
        panel.download_link.href.as_deref(),
        Some("http://h/videos/out.mp4")
    );
    assert_eq!(panel.download_link.download.as_deref(), Some(DOWNLOAD_FILE_NAME));
    assert_eq!(panel.download_link.display, Display::Block);
}

#[tokio::test]
async fn server_failure_alerts_and_leaves_panel_hidden() {
    let backend = FakeBackend::new()
        .with_images(images(&["a.png"]))
        .with_video(Reply::Body(CreateVideoResponse {
            success: false,
            video_url: None,
            message: Some("ffmpeg exploded".to_string()),
        }));
    let mut ctl = logged_in_controller(backend, Route::Video);
    ctl.on_page_load().await;

    assert_eq!(ctl.create_video().await, Outcome::Failed);

    assert_eq!(ctl.view().alerts(), [MSG_VIDEO_FAILED.to_string()]);
    let panel = ctl.view_mut().video_panel().unwrap();
    assert!(panel.preview_src.is_none());
    assert_eq!(panel.download_link.display, Display::None);
}

#[tokio::test]
async fn transport_failure_alerts_too() {
    let backend = FakeBackend::new().with_images(images(&["a.png"]));
    let mut ctl = logged_in_controller(backend, Route::Video);
    ctl.on_page_load().await;

    assert_eq!(ctl.create_video().await, Outcome::Failed);
    assert_eq!(ctl.view().alerts(), [MSG_VIDEO_FAILED.to_string()]);
}

#[tokio::test]
async fn success_without_url_counts_as_failure() {
    let backend = FakeBackend::new()
        .with_images(images(&["a.png"]))
        .with_video(Reply::Body(CreateVideoResponse {
            success: true,
            video_url: None,
            message: None,
        }));
    let mut ctl = logged_in_controller(backend, Route::Video);
    ctl.on_page_load().await;

    assert_eq!(ctl.create_video().await, Outcome::Failed);
    assert_eq!(ctl.view().alerts(), [MSG_VIDEO_FAILED.to_string()]);
}

#[tokio::test]
async fn create_video_without_session_goes_to_login() {
    let mut ctl = controller(FakeBackend::new().with_video(rendered("x")), Route::Video);

    assert_eq!(ctl.create_video().await, Outcome::Rejected);
    assert_eq!(ctl.backend().call_count(), 0);
    assert_eq!(ctl.view().alerts(), [MSG_NOT_LOGGED_IN.to_string()]);
    assert_eq!(ctl.view().last_navigation(), Some(Route::Login));
}
