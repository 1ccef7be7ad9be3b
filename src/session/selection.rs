use std::collections::BTreeSet;

use serde::Serialize;

use super::Scope;
use crate::categories::{all_categories, is_scope_compatible, Category, CategoryId};

/// Which categories the user has picked.
///
/// Selection is a plain set of ids. Compatibility is never stored; it is
/// derived from the scope each time it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<CategoryId>,
}

/// Counts shown next to the category list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionStats {
    pub scope: Scope,
    /// Selected categories valid under the scope
    pub selected: usize,
    /// Categories valid under the scope
    pub available: usize,
}

impl SelectionStats {
    pub fn all_selected(&self) -> bool {
        self.available > 0 && self.selected == self.available
    }

    pub fn select_all_label(&self) -> &'static str {
        if self.all_selected() {
            "Deselect All"
        } else {
            "Select All"
        }
    }

    /// Subtitle under the run button
    pub fn run_label(&self) -> String {
        if self.selected == 0 {
            "Select targets below".to_string()
        } else {
            format!("Target: {} ({})", self.scope.label(), self.selected)
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Selection {
    /// Categories flagged as selected by default in the registry
    pub fn defaults() -> Self {
        Self {
            selected: all_categories()
                .iter()
                .filter(|c| c.default_selected)
                .map(|c| c.id)
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    pub fn is_selected(&self, id: CategoryId) -> bool {
        self.selected.contains(&id)
    }

    /// Flip one category. Returns `false` when the category is not
    /// interactive under `scope`, in which case nothing changes.
    pub fn toggle(&mut self, id: CategoryId, scope: Scope) -> bool {
        if !is_scope_compatible(id, scope) {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    /// Select every compatible category, or deselect them all if they
    /// already are. Returns whether the compatible set is now selected.
    pub fn select_all(&mut self, scope: Scope) -> bool {
        let available: Vec<CategoryId> = compatible_ids(scope).collect();
        let all_selected = available.iter().all(|id| self.selected.contains(id));
        for id in available {
            if all_selected {
                self.selected.remove(&id);
            } else {
                self.selected.insert(id);
            }
        }
        !all_selected
    }

    /// Drop anything the scope does not allow. One-way: switching back to
    /// a wider scope does not bring the dropped categories back.
    pub fn recompute(&mut self, scope: Scope) {
        self.selected.retain(|id| is_scope_compatible(*id, scope));
    }

    pub fn stats(&self, scope: Scope) -> SelectionStats {
        let available = compatible_ids(scope).count();
        let selected = compatible_ids(scope)
            .filter(|id| self.selected.contains(id))
            .count();
        SelectionStats {
            scope,
            selected,
            available,
        }
    }

    /// Selected, compatible categories in registry order
    pub fn runnable(&self, scope: Scope) -> Vec<Category> {
        all_categories()
            .iter()
            .filter(|c| c.is_compatible_with(scope) && self.selected.contains(&c.id))
            .copied()
            .collect()
    }
}

fn compatible_ids(scope: Scope) -> impl Iterator<Item = CategoryId> {
    all_categories()
        .iter()
        .map(|c| c.id)
        .filter(move |id| is_scope_compatible(*id, scope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_eight() {
        let selection = Selection::defaults();
        let stats = selection.stats(Scope::Global);
        assert_eq!(stats.selected, 8);
        assert_eq!(stats.available, 11);
        assert!(!selection.is_selected(CategoryId::History));
    }

    #[test]
    fn test_toggle_flips() {
        let mut selection = Selection::empty();
        assert!(selection.toggle(CategoryId::History, Scope::Global));
        assert!(selection.is_selected(CategoryId::History));
        assert!(selection.toggle(CategoryId::History, Scope::Global));
        assert!(!selection.is_selected(CategoryId::History));
    }

    #[test]
    fn test_toggle_incompatible_is_noop() {
        let mut selection = Selection::empty();
        assert!(!selection.toggle(CategoryId::FormData, Scope::Site));
        assert!(!selection.is_selected(CategoryId::FormData));
    }

    #[test]
    fn test_select_all_toggles() {
        let mut selection = Selection::defaults();
        assert!(selection.select_all(Scope::Global));
        assert_eq!(selection.stats(Scope::Global).selected, 11);
        assert!(!selection.select_all(Scope::Global));
        assert_eq!(selection.stats(Scope::Global).selected, 0);
    }

    #[test]
    fn test_select_all_under_site_leaves_incompatible_alone() {
        let mut selection = Selection::empty();
        selection.select_all(Scope::Site);
        assert_eq!(selection.stats(Scope::Site).selected, 8);
        assert!(!selection.is_selected(CategoryId::Downloads));
    }

    #[test]
    fn test_recompute_is_one_way() {
        let mut selection = Selection::empty();
        selection.select_all(Scope::Global);
        selection.recompute(Scope::Site);
        assert!(!selection.is_selected(CategoryId::History));
        selection.recompute(Scope::Global);
        assert!(!selection.is_selected(CategoryId::History));
        assert_eq!(selection.stats(Scope::Global).selected, 8);
    }

    #[test]
    fn test_runnable_keeps_registry_order() {
        let mut selection = Selection::empty();
        selection.toggle(CategoryId::History, Scope::Global);
        selection.toggle(CategoryId::Cookies, Scope::Global);
        selection.toggle(CategoryId::Cache, Scope::Global);
        let ids: Vec<_> = selection.runnable(Scope::Global).iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![CategoryId::Cache, CategoryId::Cookies, CategoryId::History]
        );
    }

    #[test]
    fn test_labels() {
        let mut selection = Selection::empty();
        let stats = selection.stats(Scope::Global);
        assert_eq!(stats.select_all_label(), "Select All");
        assert_eq!(stats.run_label(), "Select targets below");

        selection.select_all(Scope::Site);
        let stats = selection.stats(Scope::Site);
        assert_eq!(stats.select_all_label(), "Deselect All");
        assert_eq!(stats.run_label(), "Target: Current Site (8)");
    }
}
