//! Common test utilities for integration tests.
//!
//! This module provides fixtures, a scripted [`Notifier`] and an in-memory
//! stand-in for the reservation API.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::NaiveDate;
use innkeep::store::{ApiRequest, ApiResponse, Method, Transport};
use innkeep::{Notifier, ReservationDraft};
use serde_json::{json, Value};

/// Base URL used for every fake API.
#[allow(dead_code)]
pub const API_URL: &str = "http://fake.test";

/// Shorthand for a calendar day.
#[allow(dead_code)]
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A valid draft for `guest_name` staying `check_in..check_out`.
#[allow(dead_code)]
pub fn draft(guest_name: &str, check_in: NaiveDate, check_out: NaiveDate) -> ReservationDraft {
    ReservationDraft::builder(guest_name, format!("{}@example.com", guest_name.to_lowercase()))
        .stay(check_in, check_out)
        .room_number(101)
        .build()
        .unwrap()
}

/// Notifier that answers every confirmation the same way and records
/// what it was shown.
#[derive(Debug, Default)]
pub struct ScriptedNotifier {
    /// Answer to every `confirm`.
    pub answer: bool,
    /// Every confirmation question asked.
    pub questions: Vec<String>,
    /// Every alert shown.
    pub alerts: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedNotifier {
    /// A notifier that confirms everything.
    pub fn agreeing() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    /// A notifier that declines everything.
    pub fn declining() -> Self {
        Self::default()
    }
}

impl Notifier for ScriptedNotifier {
    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[derive(Debug, Default)]
struct FakeApiState {
    records: BTreeMap<u64, Value>,
    next_id: u64,
    requests: Vec<ApiRequest>,
    failing: bool,
}

/// In-memory reservation API answering like a json-server instance.
///
/// Clones share state, so a test can keep one handle while the store owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    state: Rc<RefCell<FakeApiState>>,
}

#[allow(dead_code)]
impl FakeApi {
    /// An empty API whose first id is 1.
    pub fn new() -> Self {
        let api = Self::default();
        api.state.borrow_mut().next_id = 1;
        api
    }

    /// Makes every following request answer 500.
    pub fn fail_all(&self) {
        self.state.borrow_mut().failing = true;
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    /// Stored body of record `id`.
    pub fn record(&self, id: u64) -> Option<Value> {
        self.state.borrow().records.get(&id).cloned()
    }

    fn respond(status: u16, body: &Value) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    fn not_found() -> ApiResponse {
        ApiResponse {
            status: 404,
            body: "{}".to_string(),
        }
    }
}

impl Transport for FakeApi {
    fn send(&self, request: ApiRequest) -> innkeep::Result<ApiResponse> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());

        if state.failing {
            return Ok(Self::respond(500, &json!({"error": "unavailable"})));
        }

        let path = request
            .url
            .strip_prefix(API_URL)
            .unwrap_or(&request.url)
            .trim_end_matches('/');
        let item = path
            .strip_prefix("/reservations/")
            .map(|id| id.parse::<u64>().ok());

        let response = match (request.method, item) {
            (Method::Get, None) => {
                let all: Vec<Value> = state.records.values().cloned().collect();
                Self::respond(200, &Value::Array(all))
            }
            (Method::Post, None) => {
                let mut body = request.body.clone().unwrap_or(Value::Null);
                let id = state.next_id;
                state.next_id += 1;
                body["id"] = json!(id);
                state.records.insert(id, body.clone());
                Self::respond(201, &body)
            }
            (Method::Get, Some(Some(id))) => match state.records.get(&id) {
                Some(record) => Self::respond(200, record),
                None => Self::not_found(),
            },
            (Method::Put, Some(Some(id))) => {
                if state.records.contains_key(&id) {
                    let body = request.body.clone().unwrap_or(Value::Null);
                    state.records.insert(id, body.clone());
                    Self::respond(200, &body)
                } else {
                    Self::not_found()
                }
            }
            (Method::Delete, Some(Some(id))) => match state.records.remove(&id) {
                Some(_) => Self::respond(200, &json!({})),
                None => Self::not_found(),
            },
            _ => Self::not_found(),
        };

        Ok(response)
    }
}
