// staff-client/tests/http_api.rs
// Wire-level checks against an in-process mock of the staff API

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::{
    Department, DepartmentInput, Employee, EmployeeField, EmployeeInput, MedicalStaff,
    MedicalStaffInput, MedicalStaffSearchField, Position, SearchCondition,
};
use staff_client::{
    Attachment, ClientConfig, ClientError, Command, EntityApi, ImageUploadApi, NetworkHttpClient,
    RestApi, Settlement, StaffDirectory,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct RecordedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone, Default)]
struct Recorder {
    parts: Arc<Mutex<Vec<RecordedPart>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    fn parts(&self) -> Vec<RecordedPart> {
        self.parts.lock().unwrap().clone()
    }

    fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    async fn record_multipart(&self, mut multipart: Multipart) {
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let body = field.bytes().await.unwrap().to_vec();
            self.parts.lock().unwrap().push(RecordedPart {
                name,
                file_name,
                content_type,
                body,
            });
        }
    }
}

fn ok(result: Value) -> Json<Value> {
    Json(json!({"success": true, "message": "ok", "result": result}))
}

fn employee_json(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "department": "ICU", "createdAt": "2024-01-01T00:00:00"})
}

async fn list_employees() -> Json<Value> {
    ok(json!([employee_json(1, "Kim"), employee_json(2, "Lee")]))
}

async fn search_employees(
    State(rec): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.queries.lock().unwrap().push(query);
    // single object instead of an array
    ok(employee_json(3, "Park"))
}

async fn get_employee(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    if id == 999 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "employee not found", "result": null})),
        );
    }
    if id == 998 {
        // rejected with a leftover payload that is not an employee
        return (
            StatusCode::OK,
            Json(json!({"success": false, "message": "not found", "result": {}})),
        );
    }
    (StatusCode::OK, ok(employee_json(id, "Kim")))
}

async fn create_employee(State(rec): State<Recorder>, multipart: Multipart) -> Json<Value> {
    rec.record_multipart(multipart).await;
    ok(employee_json(10, "New"))
}

async fn update_employee(
    State(rec): State<Recorder>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    rec.bodies.lock().unwrap().push(body);
    ok(employee_json(id, &name))
}

async fn delete_employee() -> Json<Value> {
    Json(json!({"success": true, "message": "deleted"}))
}

async fn upload_image(State(rec): State<Recorder>, multipart: Multipart) -> Json<Value> {
    rec.record_multipart(multipart).await;
    ok(json!("/uploads/portrait.png"))
}

async fn list_medical_staff() -> Json<Value> {
    Json(json!({"success": false, "message": "access denied", "result": null}))
}

async fn search_medical_staff(
    State(rec): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.queries.lock().unwrap().push(query);
    ok(json!([{"id": 4, "username": "dr.han", "departmentId": 2, "departmentName": "ER"}]))
}

async fn create_medical_staff(State(rec): State<Recorder>, multipart: Multipart) -> Json<Value> {
    rec.record_multipart(multipart).await;
    ok(json!({"id": 5, "username": "dr.new"}))
}

async fn create_department(State(rec): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().unwrap().push(body.clone());
    let mut created = body;
    created["id"] = json!(7);
    ok(created)
}

async fn list_positions() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn spawn_server(rec: Recorder) -> String {
    let app = Router::new()
        .route("/api/jpa/employees", get(list_employees).post(create_employee))
        .route("/api/jpa/employees/search", get(search_employees))
        .route("/api/jpa/employees/images", post(upload_image))
        .route(
            "/api/jpa/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(
            "/api/jpa/medical-staff",
            get(list_medical_staff).post(create_medical_staff),
        )
        .route("/api/jpa/medical-staff/search", get(search_medical_staff))
        .route("/api/jpa/departments", post(create_department))
        .route("/api/jpa/positions", get(list_positions))
        .with_state(rec);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/jpa", addr)
}

async fn setup() -> (Recorder, Arc<NetworkHttpClient>, ClientConfig) {
    let rec = Recorder::default();
    let base = spawn_server(rec.clone()).await;
    let config = ClientConfig::new(base).with_timeout(5);
    let http = Arc::new(NetworkHttpClient::new(&config).unwrap());
    (rec, http, config)
}

fn api<E: shared::Entity>(http: &Arc<NetworkHttpClient>, config: &ClientConfig) -> RestApi<E> {
    RestApi::from_config(Arc::clone(http), config).unwrap()
}

#[tokio::test]
async fn test_fetch_all_unwraps_envelope() {
    let (_rec, http, config) = setup().await;
    let employees = api::<Employee>(&http, &config).fetch_all().await.unwrap();

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].name.as_deref(), Some("Kim"));
    assert_eq!(employees[0].created_at.as_deref(), Some("2024-01-01T00:00:00"));
}

#[tokio::test]
async fn test_search_sends_condition_and_normalizes_single_result() {
    let (rec, http, config) = setup().await;
    let condition = SearchCondition::new(EmployeeField::EmployeeId, "E-003");
    let found = api::<Employee>(&http, &config).search(&condition).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 3);
    let queries = rec.queries.lock().unwrap().clone();
    assert_eq!(queries[0]["condition"], "employeeId");
    assert_eq!(queries[0]["value"], "E-003");
}

#[tokio::test]
async fn test_medical_staff_search_uses_snake_case_conditions() {
    let (rec, http, config) = setup().await;
    let condition = SearchCondition::new(MedicalStaffSearchField::StaffType, "doctor");
    let found = api::<MedicalStaff>(&http, &config).search(&condition).await.unwrap();

    assert_eq!(found[0].department_name.as_deref(), Some("ER"));
    assert_eq!(rec.queries.lock().unwrap()[0]["condition"], "staff_type");
}

#[tokio::test]
async fn test_error_status_with_envelope_is_rejection() {
    let (_rec, http, config) = setup().await;
    let err = api::<Employee>(&http, &config).fetch_one(999).await.unwrap_err();

    assert!(err.is_rejection());
    assert_eq!(err.failure_message(), "employee not found");
}

#[tokio::test]
async fn test_success_false_is_rejection() {
    let (_rec, http, config) = setup().await;
    let err = api::<MedicalStaff>(&http, &config).fetch_all().await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m == "access denied"));
}

#[tokio::test]
async fn test_success_false_ignores_result_shape() {
    let (_rec, http, config) = setup().await;
    let err = api::<Employee>(&http, &config).fetch_one(998).await.unwrap_err();

    assert!(err.is_rejection());
    assert_eq!(err.failure_message(), "not found");
}

#[tokio::test]
async fn test_error_status_without_envelope() {
    let (_rec, http, config) = setup().await;
    let err = api::<Position>(&http, &config).fetch_all().await.unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_employee_create_is_multipart_with_file() {
    let (rec, http, config) = setup().await;
    let input = EmployeeInput {
        name: Some("New".into()),
        department: Some("ICU".into()),
        ..Default::default()
    };
    let attachment = Attachment::new("portrait.png", "image/png", vec![0x89, b'P', b'N', b'G']);

    let created = api::<Employee>(&http, &config)
        .create(&input, Some(attachment))
        .await
        .unwrap();
    assert_eq!(created.id, 10);

    let parts = rec.parts();
    assert_eq!(parts.len(), 2);

    let data = &parts[0];
    assert_eq!(data.name, "employee");
    assert_eq!(data.file_name.as_deref(), Some("employee.json"));
    assert_eq!(data.content_type.as_deref(), Some("application/json"));
    let payload: Value = serde_json::from_slice(&data.body).unwrap();
    assert_eq!(payload, json!({"name": "New", "department": "ICU"}));

    let file = &parts[1];
    assert_eq!(file.name, "file");
    assert_eq!(file.file_name.as_deref(), Some("portrait.png"));
    assert_eq!(file.content_type.as_deref(), Some("image/png"));
    assert_eq!(file.body, vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_employee_create_without_file_sends_only_json_part() {
    let (rec, http, config) = setup().await;
    api::<Employee>(&http, &config)
        .create(&EmployeeInput::default(), None)
        .await
        .unwrap();

    let parts = rec.parts();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "employee");
}

#[tokio::test]
async fn test_medical_staff_create_uses_staff_part() {
    let (rec, http, config) = setup().await;
    let input = MedicalStaffInput {
        username: Some("dr.new".into()),
        department_id: Some(2),
        ..Default::default()
    };
    let created = api::<MedicalStaff>(&http, &config)
        .create(&input, None)
        .await
        .unwrap();
    assert_eq!(created.username.as_deref(), Some("dr.new"));

    let parts = rec.parts();
    assert_eq!(parts[0].name, "staff");
    assert_eq!(parts[0].file_name.as_deref(), Some("staff.json"));
    let payload: Value = serde_json::from_slice(&parts[0].body).unwrap();
    assert_eq!(payload, json!({"username": "dr.new", "departmentId": 2}));
}

#[tokio::test]
async fn test_department_create_is_plain_json() {
    let (rec, http, config) = setup().await;
    let input = DepartmentInput {
        name: Some("Cardiology".into()),
        head_medical_staff_id: Some(4),
        ..Default::default()
    };
    let created: Department = api::<Department>(&http, &config)
        .create(&input, None)
        .await
        .unwrap();

    assert_eq!(created.id, 7);
    assert_eq!(created.name.as_deref(), Some("Cardiology"));
    assert_eq!(
        rec.bodies(),
        vec![json!({"name": "Cardiology", "headMedicalStaffId": 4})]
    );
    assert!(rec.parts().is_empty());
}

#[tokio::test]
async fn test_department_attachment_is_unsupported() {
    let (rec, http, config) = setup().await;
    let attachment = Attachment::new("plan.pdf", "application/pdf", vec![1]);
    let err = api::<Department>(&http, &config)
        .create(&DepartmentInput::default(), Some(attachment))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unsupported(_)));
    assert!(rec.bodies().is_empty());
}

#[tokio::test]
async fn test_update_puts_json_body() {
    let (rec, http, config) = setup().await;
    let input = EmployeeInput {
        name: Some("Renamed".into()),
        ..Default::default()
    };
    let updated = api::<Employee>(&http, &config).update(2, &input).await.unwrap();

    assert_eq!(updated.id, 2);
    assert_eq!(updated.name.as_deref(), Some("Renamed"));
    assert_eq!(rec.bodies(), vec![json!({"name": "Renamed"})]);
}

#[tokio::test]
async fn test_delete_accepts_envelope_without_result() {
    let (_rec, http, config) = setup().await;
    api::<Employee>(&http, &config).delete(1).await.unwrap();
}

#[tokio::test]
async fn test_profile_image_upload_returns_url() {
    let (rec, http, config) = setup().await;
    let attachment = Attachment::new("portrait.png", "image/png", vec![1, 2]);
    let url = api::<Employee>(&http, &config)
        .upload_profile_image(attachment)
        .await
        .unwrap();

    assert_eq!(url, "/uploads/portrait.png");
    let parts = rec.parts();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "file");
}

#[tokio::test]
async fn test_directory_end_to_end() {
    let (_rec, http, config) = setup().await;
    let directory = StaffDirectory::with_http(http, &config).unwrap();

    let settlement = directory.employees.dispatch(Command::FetchAll).await.unwrap();
    assert_eq!(settlement, Settlement::Succeeded);
    assert_eq!(directory.employees.snapshot().items.len(), 2);

    let settlement = directory.medical_staff.dispatch(Command::FetchAll).await.unwrap();
    assert_eq!(settlement, Settlement::Failed("access denied".into()));
    assert_eq!(directory.medical_staff.snapshot().error(), Some("access denied"));

    let upload = Attachment::new("portrait.png", "image/png", vec![1]);
    directory.employees.upload_image(upload).await.unwrap();
    assert_eq!(
        directory.employees.snapshot().image_upload_url(),
        Some("/uploads/portrait.png")
    );
}
