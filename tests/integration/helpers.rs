use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde::de::DeserializeOwned;
use skywatch::{
    config::Config,
    domain::{
        detection::{
            errors::DetectionError,
            report::{BoundingBox, Detection, DetectionReport, ImageDimensions},
        },
        weather::{
            errors::WeatherError,
            snapshot::{
                CloudCover, Coordinates, CurrentConditions, LocationInfo, SunTimes,
                WeatherSnapshot, Wind,
            },
        },
    },
    infrastructure::{
        spool::image_spool::ImageSpool,
        vision::traits::CloudDetectionService,
        weather::traits::{WeatherService, validate_forecast_days},
    },
    presentation::http::{routes::create_router, state::AppState},
};
use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicU8, AtomicUsize, Ordering},
};
use tokio::sync::Semaphore;
use tower::ServiceExt;
use uuid::Uuid;

/// Detection stub with a fixed outcome and a call counter.
pub struct StubDetector {
    outcome: Result<DetectionReport, DetectionError>,
    calls: AtomicUsize,
}

impl StubDetector {
    pub fn returning(outcome: Result<DetectionReport, DetectionError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CloudDetectionService for StubDetector {
    async fn detect(&self, _image_path: &Path) -> Result<DetectionReport, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Weather stub mirroring the real client's fail-fast days validation.
pub struct StubWeather {
    outcome: Result<WeatherSnapshot, WeatherError>,
    calls: AtomicUsize,
    last_days: AtomicU8,
}

impl StubWeather {
    pub fn returning(outcome: Result<WeatherSnapshot, WeatherError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_days: AtomicU8::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_days(&self) -> u8 {
        self.last_days.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherService for StubWeather {
    async fn current_conditions(
        &self,
        _city: &str,
        _country: Option<&str>,
    ) -> Result<WeatherSnapshot, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    async fn forecast(
        &self,
        _city: &str,
        _country: Option<&str>,
        days: u8,
    ) -> Result<WeatherSnapshot, WeatherError> {
        validate_forecast_days(days)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_days.store(days, Ordering::SeqCst);
        self.outcome.clone()
    }
}

pub struct TestApp {
    pub app: Router,
    pub detector: Arc<StubDetector>,
    pub weather: Arc<StubWeather>,
    spool_dir: tempfile::TempDir,
}

impl TestApp {
    pub fn spooled_files(&self) -> usize {
        std::fs::read_dir(self.spool_dir.path()).unwrap().count()
    }
}

fn build_config() -> Config {
    Config {
        roboflow_api_url: "https://serverless.roboflow.test".into(),
        roboflow_api_key: Some("test-rf-key".into()),
        roboflow_model_id: "cloud-types2-vljyy/1".into(),
        openweather_api_key: Some("test-ow-key".into()),
        openweather_base_url: "https://weather.test".into(),
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: None,
        detect_concurrency: 4,
        detection_timeout_seconds: 5,
        weather_timeout_seconds: 5,
        spool_dir: std::env::temp_dir(),
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

pub fn spawn_app(
    detection: Result<DetectionReport, DetectionError>,
    weather: Result<WeatherSnapshot, WeatherError>,
) -> TestApp {
    spawn_app_with_permits(detection, weather, 4)
}

pub fn spawn_app_with_permits(
    detection: Result<DetectionReport, DetectionError>,
    weather: Result<WeatherSnapshot, WeatherError>,
    permits: usize,
) -> TestApp {
    spawn_app_with_config(detection, weather, permits, build_config())
}

pub fn spawn_unconfigured_app() -> TestApp {
    let config = Config {
        roboflow_api_key: None,
        openweather_api_key: None,
        ..build_config()
    };
    spawn_app_with_config(Ok(empty_report()), Ok(sample_snapshot()), 4, config)
}

fn spawn_app_with_config(
    detection: Result<DetectionReport, DetectionError>,
    weather: Result<WeatherSnapshot, WeatherError>,
    permits: usize,
    config: Config,
) -> TestApp {
    let spool_dir = tempfile::tempdir().expect("failed to create spool dir");
    let detector = StubDetector::returning(detection);
    let weather = StubWeather::returning(weather);

    let state = AppState {
        config,
        spool: Arc::new(ImageSpool::new(spool_dir.path())),
        detector: detector.clone(),
        weather: weather.clone(),
        detect_permits: Arc::new(Semaphore::new(permits)),
    };

    TestApp {
        app: create_router(state),
        detector,
        weather,
        spool_dir,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// Bytes with a JPEG magic number; nothing in the facade decodes the image,
/// so this is enough to exercise the upload path.
pub fn tiny_jpeg_bytes() -> Vec<u8> {
    let mut bytes = vec![0xff, 0xd8, 0xff, 0xe0];
    bytes.extend_from_slice(Uuid::now_v7().as_bytes());
    bytes.extend_from_slice(&[0xff, 0xd9]);
    bytes
}

pub fn multipart_image_body(
    content_type: &str,
    filename: &str,
    image_bytes: &[u8],
) -> (String, Vec<u8>) {
    let boundary = format!("----sky-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(image_bytes);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

pub fn multipart_post(uri: &str, content_type: &str, image_bytes: &[u8]) -> Request<Body> {
    let (boundary, body) = multipart_image_body(content_type, "sky.jpg", image_bytes);
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build request")
}

pub fn sample_report() -> DetectionReport {
    DetectionReport::new(
        "cloud-types2-vljyy/1".into(),
        ImageDimensions {
            width: Some(640),
            height: Some(480),
        },
        vec![Detection {
            label: "cumulus".into(),
            confidence: 0.87,
            bounding_box: BoundingBox {
                x: 320.0,
                y: 180.0,
                width: 120.0,
                height: 90.0,
            },
        }],
    )
}

pub fn empty_report() -> DetectionReport {
    DetectionReport::new(
        "cloud-types2-vljyy/1".into(),
        ImageDimensions {
            width: Some(640),
            height: Some(480),
        },
        vec![],
    )
}

pub fn sample_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        location: LocationInfo {
            name: "London".into(),
            country: Some("GB".into()),
            coordinates: Coordinates {
                lat: 51.51,
                lon: -0.13,
            },
        },
        current: CurrentConditions {
            temperature: 17.2,
            feels_like: 16.8,
            humidity: 72,
            pressure: 1013,
            description: "Scattered Clouds".into(),
            main: "Clouds".into(),
            icon: "03d".into(),
            visibility_km: 10.0,
        },
        wind: Wind {
            speed: 4.1,
            direction: Some(230),
            gust: None,
        },
        clouds: CloudCover { coverage: 40 },
        sun: SunTimes {
            sunrise: Some(1_724_300_000),
            sunset: Some(1_724_350_000),
        },
        timestamp: 1_724_320_000,
        forecast: None,
        forecast_days: None,
    }
}
