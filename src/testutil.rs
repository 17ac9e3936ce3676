#![cfg(test)]

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::net::{AutoRequest, NetError, NetworkClient, SettingsEcho, UpdateRequest};
use crate::source::Suggestable;

/// Recording fake for the completion widget capability.
#[derive(Debug, Default)]
pub struct FakeWidget {
    pub source: Vec<String>,
    pub searches: Vec<String>,
    pub auto_focus: bool,
    pub menu_active: bool,
    pub refreshes: usize,
}

impl Suggestable for FakeWidget {
    fn set_source(&mut self, items: Vec<String>) {
        self.source = items;
        self.refreshes += 1;
    }

    fn trigger_search(&mut self, query: &str) {
        self.searches.push(query.to_string());
    }

    fn set_auto_focus(&mut self, enabled: bool) {
        self.auto_focus = enabled;
    }

    fn is_menu_active(&self) -> bool {
        self.menu_active
    }
}

/// Scripted fake transport: responses are popped in order, and every
/// request is recorded for assertions.
#[derive(Default)]
pub struct FakeNet {
    pub auto_responses: RefCell<VecDeque<Result<Vec<String>, NetError>>>,
    pub update_responses: RefCell<VecDeque<Result<SettingsEcho, NetError>>>,
    pub auto_requests: RefCell<Vec<AutoRequest>>,
    pub update_requests: RefCell<Vec<UpdateRequest>>,
}

impl FakeNet {
    pub fn push_auto(&self, items: &[&str]) {
        self.auto_responses
            .borrow_mut()
            .push_back(Ok(items.iter().map(|s| s.to_string()).collect()));
    }

    pub fn push_auto_err(&self) {
        self.auto_responses
            .borrow_mut()
            .push_back(Err(NetError::Http("auto: connection refused".into())));
    }

    pub fn push_update(&self, echo: SettingsEcho) {
        self.update_responses.borrow_mut().push_back(Ok(echo));
    }

    pub fn push_update_err(&self) {
        self.update_responses
            .borrow_mut()
            .push_back(Err(NetError::Malformed("/update: not json".into())));
    }
}

impl NetworkClient for FakeNet {
    fn auto(&self, req: &AutoRequest) -> Result<Vec<String>, NetError> {
        self.auto_requests.borrow_mut().push(req.clone());
        self.auto_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn update(&self, req: &UpdateRequest) -> Result<SettingsEcho, NetError> {
        self.update_requests.borrow_mut().push(*req);
        self.update_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(SettingsEcho(false, false, false, 0)))
    }
}
