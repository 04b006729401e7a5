// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::tempdir;
use tower::ServiceExt;

use crate::extract::USER_ID_HEADER;
use crate::router::build_router;
use crate::test_support::make_app_state;

fn multipart_body(boundary: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn upload_without_user_header_is_rejected() {
    let dir = tempdir().unwrap();
    let state = make_app_state(dir.path(), 2, 2);
    let app = build_router(state);

    let boundary = "X-BOUNDARY";
    let request = Request::builder()
        .method("POST")
        .uri("/files/")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(multipart_body(boundary, "slide.png", b"hello")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_then_fetch_round_trips_file_info() {
    let dir = tempdir().unwrap();
    let state = make_app_state(dir.path(), 2, 2);
    let app = build_router(state);

    let boundary = "X-BOUNDARY";
    let request = Request::builder()
        .method("POST")
        .uri("/files/")
        .header(USER_ID_HEADER, "u1")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(multipart_body(boundary, "slide.png", b"hello")))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: tl_wire::FileResponse = serde_json::from_slice(&bytes).unwrap();

    let get_request = Request::builder()
        .method("GET")
        .uri(format!("/files/{}", body.file.file_id))
        .header(USER_ID_HEADER, "u1")
        .body(Body::empty())
        .unwrap();
    let get_response = app.clone().oneshot(get_request).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    let other_user_request = Request::builder()
        .method("GET")
        .uri(format!("/files/{}", body.file.file_id))
        .header(USER_ID_HEADER, "u2")
        .body(Body::empty())
        .unwrap();
    let other_user_response = app.oneshot(other_user_request).await.unwrap();
    assert_eq!(other_user_response.status(), StatusCode::NOT_FOUND);
}
