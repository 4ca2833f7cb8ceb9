//! Integration tests for the events HTTP API.
//!
//! Requests go through the full axum router backed by in-memory adapters.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use club_events::adapters::events::InMemoryEventBus;
use club_events::adapters::http::middleware::USER_ID_HEADER;
use club_events::adapters::http::{events_router, EventsAppState};
use club_events::adapters::memory::{
    InMemoryEventCatalog, InMemoryMemberDirectory, InMemoryRegistrationRepository,
};
use club_events::domain::event::{Event, EventCategory};
use club_events::domain::foundation::{EventId, MemberId, Timestamp, UserId};
use club_events::domain::member::{Member, MemberStatus};
use club_events::domain::registration::RefundPolicy;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    catalog: InMemoryEventCatalog,
    directory: InMemoryMemberDirectory,
    bus: Arc<InMemoryEventBus>,
}

impl TestApp {
    fn new() -> Self {
        let catalog = InMemoryEventCatalog::new();
        let directory = InMemoryMemberDirectory::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let state = EventsAppState::new(
            Arc::new(catalog.clone()),
            Arc::new(directory.clone()),
            Arc::new(InMemoryRegistrationRepository::new()),
            bus.clone(),
            RefundPolicy::default(),
        );
        Self {
            router: events_router(state),
            catalog,
            directory,
            bus,
        }
    }

    async fn add_event(&self, event: Event) -> EventId {
        let id = event.id;
        self.catalog.insert(event).await;
        id
    }

    async fn add_member(&self, user: &str, status: MemberStatus) {
        self.directory
            .insert_member(Member::new(
                MemberId::new(),
                UserId::new(user).unwrap(),
                user,
                status,
            ))
            .await;
    }

    async fn send(&self, method: Method, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user);
        }
        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

fn event(title: &str, capacity: Option<u32>) -> Event {
    let start = Timestamp::now().add_days(5);
    Event {
        id: EventId::new(),
        title: title.to_string(),
        category: EventCategory::Match,
        start_time: start,
        end_time: start.add_hours(4),
        location: "Bay 2".to_string(),
        capacity,
        cost_cents: 1000,
        is_public: false,
        members_only: true,
        board_only: false,
        requires_certification: None,
        registration_deadline: None,
    }
}

// =============================================================================
// Listing and detail
// =============================================================================

#[tokio::test]
async fn anonymous_listing_shows_only_public_events() {
    let app = TestApp::new();
    let mut open_house = event("Open House", None);
    open_house.is_public = true;
    open_house.members_only = false;
    app.add_event(open_house).await;
    app.add_event(event("Members Match", Some(10))).await;

    let (status, body) = app.send(Method::GET, "/api/events", None).await;

    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Open House");
}

#[tokio::test]
async fn hidden_event_detail_is_not_found() {
    let app = TestApp::new();
    let id = app.add_event(event("Members Match", Some(10))).await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/events/{}", id), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn detail_reports_missing_certifications() {
    let app = TestApp::new();
    let mut e = event("RSO Match", Some(10));
    e.requires_certification = Some(r#"["rso"]"#.to_string());
    let id = app.add_event(e).await;
    app.add_member("user-ann", MemberStatus::Active).await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/events/{}", id), Some("user-ann"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["can_register"], false);
    assert_eq!(body["reason"], "MISSING_CERTIFICATIONS");
    assert_eq!(body["missing_certifications"][0]["id"], "rso");
    assert_eq!(
        body["missing_certifications"][0]["display_name"],
        "Range Safety Officer"
    );
}

// =============================================================================
// Register and cancel
// =============================================================================

#[tokio::test]
async fn register_then_waitlist_then_cancel_promotes() {
    let app = TestApp::new();
    let id = app.add_event(event("Steel Match", Some(1))).await;
    app.add_member("user-ann", MemberStatus::Active).await;
    app.add_member("user-bo", MemberStatus::Active).await;
    let register = format!("/api/events/{}/register", id);

    let (status, body) = app.send(Method::POST, &register, Some("user-ann")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "registered");

    let (status, body) = app.send(Method::POST, &register, Some("user-bo")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "waitlisted");
    assert_eq!(body["waitlist_position"], 1);

    let (status, body) = app.send(Method::DELETE, &register, Some("user-ann")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refund_percentage"], 100);
    assert_eq!(body["waitlist_promoted"], true);
    assert_eq!(body["registration"]["status"], "cancelled");

    let (_, detail) = app
        .send(Method::GET, &format!("/api/events/{}", id), Some("user-bo"))
        .await;
    assert_eq!(detail["my_registration"]["status"], "registered");
    assert_eq!(detail["confirmed_count"], 1);

    assert!(app.bus.has_event("registration.promoted.v1"));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new();
    let id = app.add_event(event("Steel Match", Some(5))).await;
    app.add_member("user-ann", MemberStatus::Active).await;
    let register = format!("/api/events/{}/register", id);

    app.send(Method::POST, &register, Some("user-ann")).await;
    let (status, body) = app.send(Method::POST, &register, Some("user-ann")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "ALREADY_REGISTERED");
}

#[tokio::test]
async fn anonymous_register_on_public_event_requires_auth() {
    let app = TestApp::new();
    let mut e = event("Open Shoot", Some(5));
    e.is_public = true;
    e.members_only = false;
    let id = app.add_event(e).await;

    let (status, body) = app
        .send(Method::POST, &format!("/api/events/{}/register", id), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn suspended_member_is_forbidden() {
    let app = TestApp::new();
    let mut e = event("Work Day", Some(5));
    e.category = EventCategory::WorkDay;
    e.members_only = false;
    let id = app.add_event(e).await;
    app.add_member("user-sus", MemberStatus::Suspended).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/events/{}/register", id),
            Some("user-sus"),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "SUSPENDED");
}

#[tokio::test]
async fn cancel_without_registration_is_not_found() {
    let app = TestApp::new();
    let id = app.add_event(event("Steel Match", Some(5))).await;
    app.add_member("user-ann", MemberStatus::Active).await;

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/events/{}/register", id),
            Some("user-ann"),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "NOT_REGISTERED");
}

#[tokio::test]
async fn my_registrations_requires_identity() {
    let app = TestApp::new();
    let id = app.add_event(event("Steel Match", Some(5))).await;
    app.add_member("user-ann", MemberStatus::Active).await;
    app.send(
        Method::POST,
        &format!("/api/events/{}/register", id),
        Some("user-ann"),
    )
    .await;

    let (status, _) = app.send(Method::GET, "/api/me/registrations", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::GET, "/api/me/registrations", Some("user-ann"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registrations"].as_array().unwrap().len(), 1);
    assert_eq!(body["registrations"][0]["event_id"], id.to_string());
}
