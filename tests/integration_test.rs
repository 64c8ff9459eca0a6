use async_trait::async_trait;
use image_to_video::models::JobRequest;
use image_to_video::utils::logging;
use image_to_video::{
    ClientError, Config, Credential, FalQueueClient, Session, SourceImage, SubmitError, UiStatus,
    VideoJobApi,
};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;

/// 依次返回预设结果的测试客户端
struct ScriptedClient {
    responses: Vec<Result<Value, String>>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl VideoJobApi for ScriptedClient {
    async fn subscribe(
        &self,
        _credential: &Credential,
        _model_id: &str,
        request: &JobRequest,
    ) -> Result<Value, ClientError> {
        assert!(request.image_url.starts_with("data:image/jpeg;base64,"));
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.responses[n] {
            Ok(v) => Ok(v.clone()),
            Err(msg) => Err(ClientError::JobFailed(msg.clone())),
        }
    }
}

fn scripted_session(responses: Vec<Result<Value, String>>) -> (Session<ScriptedClient>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = ScriptedClient {
        responses,
        calls: calls.clone(),
    };
    (Session::new(client, Config::default()), calls)
}

fn write_png() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a])
        .unwrap();
    file
}

#[tokio::test]
async fn test_session_walkthrough() {
    logging::init(false);

    let (mut session, calls) = scripted_session(vec![
        Ok(json!({ "video": { "url": "https://cdn.example/first.mp4" } })),
        Ok(json!({ "detail": "nsfw content detected" })),
        Err("GPU OOM".to_string()),
        Ok(json!({ "video": "https://cdn.example/second.mp4" })),
    ]);
    let cancel = CancellationToken::new();

    // 未选择图片时不能提交
    assert!(!session.can_submit());
    let err = assert_err!(session.generate(&cancel).await);
    assert!(matches!(err, SubmitError::MissingImage));

    let png = write_png();
    session.select_image(SourceImage::from_path(png.path()));
    assert!(session.can_submit());
    assert_eq!(session.view().error_message, None);

    // 未输入密钥
    session.set_credential("   ");
    let err = assert_err!(session.generate(&cancel).await);
    assert!(matches!(err, SubmitError::MissingCredential));
    assert_eq!(session.view().status, UiStatus::AwaitingCredentialError);

    session.set_credential("fal-key");
    assert_eq!(session.view().status, UiStatus::Idle);

    let url = assert_ok!(session.generate(&cancel).await);
    assert_eq!(url.as_str(), "https://cdn.example/first.mp4");
    assert_eq!(session.view().status, UiStatus::Succeeded);

    let err = assert_err!(session.generate(&cancel).await);
    assert!(matches!(err, SubmitError::GenerationFailed));
    assert_eq!(session.view().video_url, None);

    let err = assert_err!(session.generate(&cancel).await);
    assert_eq!(err.to_string(), "生成视频时出错：任务失败: GPU OOM");
    assert_eq!(session.view().status, UiStatus::Failed);

    // 重新选择图片后回到空闲
    session.select_image(SourceImage::from_path(png.path()));
    assert_eq!(session.view().status, UiStatus::Idle);
    assert_eq!(session.view().error_message, None);

    let url = assert_ok!(session.generate(&cancel).await);
    assert_eq!(url.as_str(), "https://cdn.example/second.mp4");

    let view = session.view();
    assert_eq!(view.video_url, Some(url));
    assert_eq!(view.error_message, None);
    assert_eq!(view.attempts, 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_selecting_image_clears_error() {
    let (mut session, calls) = scripted_session(vec![]);

    let _ = session.generate(&CancellationToken::new()).await;
    assert_eq!(session.view().status, UiStatus::AwaitingImageError);

    session.select_image(SourceImage::from_bytes(vec![1, 2, 3], "image/jpeg"));
    assert_eq!(session.view().status, UiStatus::Idle);
    assert_eq!(session.view().error_message, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// 真实调用 fal.ai，需要设置 FAL_KEY 和 TEST_IMAGE
#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_generate_with_real_api() {
    logging::init(true);

    let key = std::env::var("FAL_KEY").expect("需要设置 FAL_KEY");
    let image = std::env::var("TEST_IMAGE").expect("需要设置 TEST_IMAGE");

    let config = Config::from_env();
    let mut session = Session::new(FalQueueClient::new(&config), config);
    session.set_credential(key);
    session.select_image(SourceImage::from_path(image));

    let url = session
        .generate(&CancellationToken::new())
        .await
        .expect("生成视频失败");

    println!("生成的视频: {}", url);
    assert!(url.as_str().starts_with("http"));
}
