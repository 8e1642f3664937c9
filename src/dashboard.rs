/// Dashboard tab switcher
///
/// Tab visibility toggling with URL-hash sync: switching a tab hides every
/// other pane, shows the selected one and updates the hash; hash changes
/// (deep links, browser back/forward) drive the active tab the other way,
/// falling back to the default tab for unknown hashes.

/// One dashboard tab. `hash` is the URL fragment it syncs with; tabs
/// without a mapping clear the hash when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub hash: Option<String>,
}

impl Tab {
    pub fn new(id: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hash: Some(hash.into()),
        }
    }

    pub fn unmapped(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hash: None,
        }
    }
}

/// What the browser location should do after a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashAction {
    Set(String),
    Clear,
}

/// Outcome of a tab switch: the pane to show, the panes to hide, and the
/// hash update to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabChange {
    pub activated: String,
    pub deactivated: Vec<String>,
    pub hash: HashAction,
}

/// Stateless apart from the active index; the first tab is the default.
#[derive(Debug, Clone)]
pub struct TabSwitcher {
    tabs: Vec<Tab>,
    active: usize,
}

impl TabSwitcher {
    /// None when the page has no tab navigation.
    pub fn new(tabs: Vec<Tab>) -> Option<Self> {
        if tabs.is_empty() {
            return None;
        }
        Some(Self { tabs, active: 0 })
    }

    pub fn active_id(&self) -> &str {
        &self.tabs[self.active].id
    }

    /// Activate a tab by id. Unknown ids are a no-op.
    pub fn switch(&mut self, id: &str) -> Option<TabChange> {
        let index = self.tabs.iter().position(|t| t.id == id)?;
        self.active = index;

        let tab = &self.tabs[index];
        let hash = match &tab.hash {
            Some(hash) => HashAction::Set(hash.clone()),
            None => HashAction::Clear,
        };
        Some(TabChange {
            activated: tab.id.clone(),
            deactivated: self
                .tabs
                .iter()
                .filter(|t| t.id != tab.id)
                .map(|t| t.id.clone())
                .collect(),
            hash,
        })
    }

    /// Apply a deep-link hash at page load. Unknown or empty hashes leave
    /// the default tab as-is.
    pub fn on_load(&mut self, hash: &str) -> Option<TabChange> {
        let id = self.tab_for_hash(hash)?;
        self.switch(&id)
    }

    /// Follow a hash change (browser back/forward). Unknown or empty
    /// hashes fall back to the default tab.
    pub fn on_hash_change(&mut self, hash: &str) -> Option<TabChange> {
        match self.tab_for_hash(hash) {
            Some(id) => self.switch(&id),
            None => {
                let default_id = self.tabs[0].id.clone();
                self.switch(&default_id)
            }
        }
    }

    fn tab_for_hash(&self, hash: &str) -> Option<String> {
        let hash = hash.trim_start_matches('#');
        if hash.is_empty() {
            return None;
        }
        self.tabs
            .iter()
            .find(|t| t.hash.as_deref() == Some(hash))
            .map(|t| t.id.clone())
    }
}
