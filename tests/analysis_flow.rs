use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cv_match::view::labels::EN;
use cv_match::{
    AnalysisClient, AnalysisController, AnalysisService, CvFile, InputCapture, Phase,
    RequestError, SubmitOutcome, TerminalSurface,
};

const SCENARIO_BODY: &str = r#"{
    "total_score": 72, "skill_score": 60, "text_similarity": 80, "education_score": 90,
    "matching_skills": ["Go"], "missing_skills": ["Kubernetes"], "emails": ["a@b.com"],
    "cv_skills_count": 5, "job_skills_count": 8
}"#;

#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone)]
struct MockService {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
}

impl MockService {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
            hits: Arc::new(AtomicUsize::new(0)),
            parts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn analyze(State(mock): State<MockService>, mut multipart: Multipart) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        mock.parts.lock().unwrap().push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    tokio::time::sleep(mock.delay).await;
    (
        mock.status,
        [("content-type", "application/json")],
        mock.body,
    )
        .into_response()
}

async fn spawn_service(mock: MockService) -> String {
    let app = Router::new()
        .route("/analyze", post(analyze))
        .with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn scenario_input() -> InputCapture {
    let mut input = InputCapture::new(&EN);
    input.select_file(CvFile::new("resume.pdf", b"%PDF-1.4 resume".to_vec()));
    input.set_job_description("Go backend engineer");
    input
}

fn terminal_controller(
    base_url: &str,
) -> AnalysisController<AnalysisClient, TerminalSurface<Vec<u8>>> {
    let client = AnalysisClient::new(base_url, "/analyze", 5).unwrap();
    AnalysisController::new(
        client,
        TerminalSurface::new(Vec::new(), &EN),
        &EN,
        Duration::ZERO,
    )
}

#[tokio::test]
async fn scenario_resume_against_go_backend_job() {
    let mock = MockService::new(StatusCode::OK, SCENARIO_BODY);
    let parts = mock.parts.clone();
    let base_url = spawn_service(mock).await;

    let controller = terminal_controller(&base_url);
    let outcome = controller.submit(&scenario_input()).await;
    assert_eq!(outcome, SubmitOutcome::Rendered);
    controller.surface().present().await.unwrap();

    let received = parts.lock().unwrap().clone();
    assert_eq!(received.len(), 2);
    let cv = received.iter().find(|p| p.name == "cv").expect("cv part sent");
    assert_eq!(cv.file_name.as_deref(), Some("resume.pdf"));
    assert_eq!(cv.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(cv.data, b"%PDF-1.4 resume");
    let job = received
        .iter()
        .find(|p| p.name == "job_desc")
        .expect("job_desc part sent");
    assert_eq!(job.data, b"Go backend engineer");

    let state = controller.state();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.last_result.unwrap().matching_skills, vec!["Go"]);

    let output = String::from_utf8(controller.surface().clone_output()).unwrap();
    for expected in [
        "Overall Score  72%",
        "Skills  60%",
        "Experience  80%",
        "Education  90%",
        "[+ Go]",
        "[- Kubernetes]",
        "Emails: a@b.com",
        "CV Skills: 5",
        "Required Skills: 8",
    ] {
        assert!(output.contains(expected), "missing {:?} in {:?}", expected, output);
    }
}

#[tokio::test]
async fn server_error_restores_idle_without_results() {
    let mock = MockService::new(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let base_url = spawn_service(mock).await;

    let controller = terminal_controller(&base_url);
    let outcome = controller.submit(&scenario_input()).await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(RequestError::NetworkFailure(_))
    ));
    controller.surface().present().await.unwrap();

    let output = String::from_utf8(controller.surface().clone_output()).unwrap();
    assert!(output.contains(EN.failure_notice));
    assert!(!output.contains(EN.results_title));
    // loading indicator was erased after being shown
    assert!(output.contains(EN.loading));
    assert!(output.contains("\r\x1b[2K"));

    let state = controller.state();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.last_result.is_none());
}

#[tokio::test]
async fn malformed_body_is_reported_as_contract_violation() {
    let mock = MockService::new(StatusCode::OK, r#"{"total_score": "high"}"#);
    let base_url = spawn_service(mock).await;

    let client = AnalysisClient::new(&base_url, "/analyze", 5).unwrap();
    let request = scenario_input().validate().unwrap();
    let err = client.submit(request).await.unwrap_err();
    assert!(matches!(err, RequestError::MalformedResponse(_)));
    assert!(err.is_contract_violation());
}

#[tokio::test]
async fn validation_failure_sends_nothing() {
    let mock = MockService::new(StatusCode::OK, SCENARIO_BODY);
    let hits = mock.hits.clone();
    let base_url = spawn_service(mock).await;

    let controller = terminal_controller(&base_url);
    let mut input = InputCapture::new(&EN);
    input.select_file(CvFile::new("resume.pdf", b"%PDF".to_vec()));
    input.set_job_description("   ");

    let outcome = controller.submit(&input).await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    let output = String::from_utf8(controller.surface().clone_output()).unwrap();
    assert!(output.contains(EN.validation_notice));
}

#[tokio::test]
async fn second_submission_in_flight_issues_no_request() {
    let mut mock = MockService::new(StatusCode::OK, SCENARIO_BODY);
    mock.delay = Duration::from_millis(200);
    let hits = mock.hits.clone();
    let base_url = spawn_service(mock).await;

    let controller = terminal_controller(&base_url);
    let input = scenario_input();

    let (first, second) = tokio::join!(controller.submit(&input), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.submit(&input).await
    });

    assert_eq!(first, SubmitOutcome::Rendered);
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
