pub mod html;
pub mod table;

use crate::models::stock::TurtleSystem;
use std::ops::{Deref, DerefMut};
use table::StockTable;

/// 按钮上显示的文案
pub mod labels {
    pub const REFRESH_IDLE: &str = "🔄 Refresh";
    pub const REFRESHING: &str = "Refreshing…";
    pub const UPDATE_STARTING: &str = "Starting update…";
    pub const UPDATE_INITIALIZING: &str = "Initializing…";
    pub const UPDATE_COLLECTING: &str = "Collecting data…";
    pub const UPDATE_DONE: &str = "✅ Update complete";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerState {
    pub label: String,
    pub disabled: bool,
}

impl TriggerState {
    pub fn idle(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
        }
    }

    pub fn busy(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: true,
        }
    }
}

/// Everything the poller and the renderer are allowed to touch
pub trait DashboardView {
    fn trigger(&self) -> TriggerState;

    fn set_trigger(&mut self, state: TriggerState);

    /// Blocking user notification
    fn notify(&mut self, message: &str);

    fn table_mut(&mut self, system: TurtleSystem) -> &mut StockTable;

    fn set_last_updated(&mut self, label: String);

    /// Ask the host to reload the whole view from fresh server data
    fn request_reload(&mut self);
}

/// Disables the trigger for its lifetime and puts back whatever state it had
/// before, whichever way the operation exits.
pub struct TriggerGuard<'a> {
    view: &'a mut dyn DashboardView,
    restore: TriggerState,
}

impl<'a> TriggerGuard<'a> {
    pub fn engage(view: &'a mut dyn DashboardView, busy_label: &str) -> Self {
        let restore = view.trigger();
        view.set_trigger(TriggerState::busy(busy_label));
        Self { view, restore }
    }
}

impl<'a> Deref for TriggerGuard<'a> {
    type Target = dyn DashboardView + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.view
    }
}

impl<'a> DerefMut for TriggerGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.view
    }
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.view.set_trigger(self.restore.clone());
    }
}
