// ============================================================================
// DASHBOARD STATE - dos listas independientes (pendientes / activos)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::models::Workshop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopTab {
    #[default]
    Pending,
    Active,
}

/// Una lista con su propio flag de carga y su propio error
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WorkshopList {
    pub workshops: Vec<Workshop>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WorkshopList {
    pub fn count(&self) -> usize {
        self.workshops.len()
    }
}

#[derive(Clone, Default)]
pub struct DashboardState {
    pub pending: Rc<RefCell<WorkshopList>>,
    pub active: Rc<RefCell<WorkshopList>>,
    pub selected_tab: Rc<RefCell<WorkshopTab>>,
}

/// Copia inmutable para la vista (y para exportar a JS)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub pending: WorkshopList,
    pub active: WorkshopList,
    pub selected_tab: WorkshopTab,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, tab: WorkshopTab) -> &Rc<RefCell<WorkshopList>> {
        match tab {
            WorkshopTab::Pending => &self.pending,
            WorkshopTab::Active => &self.active,
        }
    }

    pub fn start_loading(&self, tab: WorkshopTab) {
        let mut list = self.list(tab).borrow_mut();
        list.loading = true;
        list.error = None;
    }

    pub fn finish_loading(&self, tab: WorkshopTab, result: Result<Vec<Workshop>, String>) {
        let mut list = self.list(tab).borrow_mut();
        list.loading = false;
        match result {
            Ok(workshops) => list.workshops = workshops,
            // La lista anterior se conserva
            Err(message) => list.error = Some(message),
        }
    }

    pub fn dismiss_error(&self, tab: WorkshopTab) {
        self.list(tab).borrow_mut().error = None;
    }

    pub fn select_tab(&self, tab: WorkshopTab) {
        *self.selected_tab.borrow_mut() = tab;
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().count()
    }

    pub fn active_count(&self) -> usize {
        self.active.borrow().count()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            pending: self.pending.borrow().clone(),
            active: self.active.borrow().clone(),
            selected_tab: *self.selected_tab.borrow(),
        }
    }

    pub fn clear(&self) {
        *self.pending.borrow_mut() = WorkshopList::default();
        *self.active.borrow_mut() = WorkshopList::default();
        *self.selected_tab.borrow_mut() = WorkshopTab::Pending;
    }
}
