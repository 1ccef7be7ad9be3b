//! Popup session state: the scope the user is targeting and the categories
//! they have picked. Lives as long as one invocation.

pub mod scope;
pub mod selection;

pub use scope::{Scope, ScopeChange, ScopeError, ScopeSelector};
pub use selection::{Selection, SelectionStats};

use serde::Serialize;

use crate::categories::{all_categories, Category, CategoryId};
use crate::origin::Origin;

/// One category as the category list renders it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub selected: bool,
    /// Whether the category can be toggled under the current scope
    pub interactive: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    scope: ScopeSelector,
    selection: Selection,
}

impl Session {
    /// Open a session in Global scope with the default selection
    pub fn new(origin: Option<Origin>) -> Self {
        Self {
            scope: ScopeSelector::new(origin),
            selection: Selection::defaults(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope.scope()
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.scope.origin()
    }

    pub fn site_available(&self) -> bool {
        self.scope.site_available()
    }

    /// Switch scope and drop any selection the new scope does not allow
    pub fn switch_scope(&mut self, target: Scope) -> Result<ScopeChange, ScopeError> {
        let change = self.scope.switch(target)?;
        if let ScopeChange::Changed { to, .. } = change {
            self.selection.recompute(to);
        }
        Ok(change)
    }

    pub fn toggle(&mut self, id: CategoryId) -> bool {
        self.selection.toggle(id, self.scope())
    }

    pub fn select_all(&mut self) -> bool {
        self.selection.select_all(self.scope())
    }

    pub fn is_selected(&self, id: CategoryId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn stats(&self) -> SelectionStats {
        self.selection.stats(self.scope())
    }

    /// What a run would clear right now
    pub fn runnable(&self) -> Vec<Category> {
        self.selection.runnable(self.scope())
    }

    pub fn views(&self) -> Vec<CategoryView> {
        let scope = self.scope();
        all_categories()
            .iter()
            .map(|c| CategoryView {
                category: *c,
                selected: self.selection.is_selected(c.id),
                interactive: c.is_compatible_with(scope),
            })
            .collect()
    }
}
