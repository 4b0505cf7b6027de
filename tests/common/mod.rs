#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use turtle_dashboard::models::status::{
    ManualUpdateResponse, RefreshResponse, TurtleDataResponse,
};
use turtle_dashboard::view::table::StockTable;
use turtle_dashboard::view::{labels, DashboardView, TriggerState};
use turtle_dashboard::{DashboardApi, DashboardError, Result, TurtleSystem};

/// API double that replays queued responses in order
#[derive(Default)]
pub struct ScriptedApi {
    refresh: Mutex<VecDeque<Result<RefreshResponse>>>,
    manual: Mutex<VecDeque<Result<ManualUpdateResponse>>>,
    data: Mutex<VecDeque<Result<TurtleDataResponse>>>,
    // served once the queue is empty
    data_fallback: Mutex<Option<String>>,
    pub refresh_calls: AtomicU32,
    pub data_calls: AtomicU32,
    // endpoint hits in call order
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(self, json: &str) -> Self {
        self.refresh.lock().unwrap().push_back(Ok(parse(json)));
        self
    }

    pub fn refresh_err(self, err: DashboardError) -> Self {
        self.refresh.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn manual(self, json: &str) -> Self {
        self.manual.lock().unwrap().push_back(Ok(parse(json)));
        self
    }

    pub fn manual_err(self, err: DashboardError) -> Self {
        self.manual.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn data(self, json: &str) -> Self {
        self.data.lock().unwrap().push_back(Ok(parse(json)));
        self
    }

    pub fn data_err(self, err: DashboardError) -> Self {
        self.data.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn data_forever(self, json: &str) -> Self {
        *self.data_fallback.lock().unwrap() = Some(json.to_string());
        self
    }

    pub fn data_calls(&self) -> u32 {
        self.data_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> u32 {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
    }
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> T {
    serde_json::from_str(json).expect("test fixture must be valid JSON")
}

#[async_trait]
impl DashboardApi for ScriptedApi {
    async fn refresh(&self) -> Result<RefreshResponse> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.record("refresh");
        self.refresh
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected /api/refresh call")
    }

    async fn turtle_data(&self) -> Result<TurtleDataResponse> {
        self.data_calls.fetch_add(1, Ordering::SeqCst);
        self.record("turtle-data");
        if let Some(next) = self.data.lock().unwrap().pop_front() {
            return next;
        }
        match self.data_fallback.lock().unwrap().as_deref() {
            Some(json) => Ok(parse(json)),
            None => panic!("unexpected /api/turtle-data call"),
        }
    }

    async fn manual_update(&self) -> Result<ManualUpdateResponse> {
        self.record("manual-update");
        self.manual
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected /api/manual-update call")
    }
}

/// View double that keeps every state change
#[derive(Default)]
pub struct RecordingView {
    pub triggers: Vec<TriggerState>,
    pub notices: Vec<String>,
    pub tables: HashMap<TurtleSystem, StockTable>,
    pub last_updated: Option<String>,
    pub reloads: u32,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn final_trigger(&self) -> &TriggerState {
        self.triggers.last().expect("trigger never touched")
    }

    pub fn saw_label(&self, label: &str) -> bool {
        self.triggers.iter().any(|t| t.label == label)
    }

    pub fn table(&self, system: TurtleSystem) -> Option<&StockTable> {
        self.tables.get(&system)
    }
}

impl DashboardView for RecordingView {
    fn trigger(&self) -> TriggerState {
        self.triggers
            .last()
            .cloned()
            .unwrap_or_else(|| TriggerState::idle(labels::REFRESH_IDLE))
    }

    fn set_trigger(&mut self, state: TriggerState) {
        self.triggers.push(state);
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn table_mut(&mut self, system: TurtleSystem) -> &mut StockTable {
        self.tables.entry(system).or_default()
    }

    fn set_last_updated(&mut self, label: String) {
        self.last_updated = Some(label);
    }

    fn request_reload(&mut self) {
        self.reloads += 1;
    }
}

/// A genuine reqwest failure, produced without touching the network
pub async fn network_error() -> DashboardError {
    reqwest::get("not a url").await.unwrap_err().into()
}

pub const SNAPSHOT: &str = r#"{
    "system1": [
        {"code":"005930","name":"삼성전자","entry_date":"2025-05-02","entry_price":71249.6,
         "current":71800,"stop_loss":68450.2,"trailing_stop":null,"add_position":72950},
        {"code":"000660","name":"SK하이닉스","entry_date":"2025-05-06","entry_price":"182300",
         "current":185100,"stop_loss":175000,"trailing_stop":179200,"add_position":186400}
    ],
    "system2": []
}"#;
