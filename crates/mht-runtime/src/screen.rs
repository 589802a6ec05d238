// crates/mht-runtime/src/screen.rs
//! State for the guidelines browser: filters, bookmarks, selection and the
//! layout it is currently shown in.

use std::sync::Arc;

use mht_core::{catalog, CategoryCounts, CategoryKey, GuidelineLibrary, GuidelineRecord};
use mht_layout::{pack_into_rows, GridRow, LayoutState};
use serde_json::json;
use tracing::{debug, warn};

use crate::bookmarks::{BookmarkRepository, BookmarkSet};
use crate::navigation::{Navigator, DECISION_TREE_ROUTE, GUIDELINE_DETAIL_ROUTE};
use crate::session::SessionError;
use crate::storage::KeyValueStore;

pub struct GuidelinesScreen<S, N> {
    library: Arc<GuidelineLibrary>,
    repository: BookmarkRepository<S>,
    navigator: N,
    layout: LayoutState,
    category: CategoryKey,
    query: String,
    bookmarks: BookmarkSet,
    selected: Option<String>,
}

impl<S: KeyValueStore, N: Navigator> GuidelinesScreen<S, N> {
    pub fn new(
        library: Arc<GuidelineLibrary>,
        repository: BookmarkRepository<S>,
        navigator: N,
        layout: LayoutState,
    ) -> Self {
        Self {
            library,
            repository,
            navigator,
            layout,
            category: CategoryKey::All,
            query: String::new(),
            bookmarks: BookmarkSet::new(),
            selected: None,
        }
    }

    /// Load persisted bookmarks. Call once when the screen is shown.
    pub async fn mount(&mut self) {
        self.bookmarks = self.repository.load().await;
        debug!(
            "Guidelines screen mounted ({}) with {} bookmarks",
            self.repository.scope().name(),
            self.bookmarks.len()
        );
    }

    pub fn library(&self) -> &GuidelineLibrary {
        &self.library
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn on_layout_changed(&mut self, layout: LayoutState) {
        if layout.show_multi_pane != self.layout.show_multi_pane {
            debug!("Guidelines screen multi-pane: {}", layout.show_multi_pane);
        }
        self.layout = layout;
    }

    pub fn category(&self) -> CategoryKey {
        self.category
    }

    pub fn set_category(&mut self, category: CategoryKey) {
        self.category = category;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Records passing the active category and search query. An empty result
    /// is a normal state the view shows as such.
    pub fn visible_records(&self) -> Vec<&GuidelineRecord> {
        self.library.query(self.category, &self.query)
    }

    /// Visible records packed into rows for the current column count.
    pub fn grid_rows(&self) -> Vec<GridRow<&GuidelineRecord>> {
        pack_into_rows(self.visible_records(), self.layout.columns)
    }

    /// Per-category totals over the whole catalog, for the filter chips.
    pub fn counts(&self) -> CategoryCounts {
        self.library.counts()
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.contains(id)
    }

    /// Bookmarked records in bookmark order. Ids no longer in the catalog
    /// are skipped.
    pub fn bookmarked_records(&self) -> Vec<&GuidelineRecord> {
        self.bookmarks.iter().filter_map(|id| self.library.get(id)).collect()
    }

    /// Bookmarked records passing the active category and search query.
    pub fn visible_bookmarked_records(&self) -> Vec<&GuidelineRecord> {
        let narrowed = catalog::filter_by_category(self.category, self.bookmarked_records());
        catalog::search(&self.query, narrowed)
    }

    pub async fn toggle_bookmark(&mut self, id: &str) -> bool {
        self.repository.toggle(&mut self.bookmarks, id).await
    }

    /// Open a guideline: in multi-pane mode it fills the detail pane,
    /// otherwise the detail screen is pushed.
    pub fn select_guideline(&mut self, id: &str) -> Option<&GuidelineRecord> {
        let Some(record) = self.library.get(id) else {
            warn!("Selected unknown guideline '{}'", id);
            return None;
        };

        if self.layout.show_multi_pane {
            self.selected = Some(record.id.clone());
        } else {
            self.navigator
                .navigate(GUIDELINE_DETAIL_ROUTE, json!({ "guideline_id": record.id }));
        }
        Some(record)
    }

    /// Record shown in the detail pane, if any.
    pub fn selected(&self) -> Option<&GuidelineRecord> {
        self.selected.as_deref().and_then(|id| self.library.get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn start_decision_tree(&mut self, guideline_id: &str) -> Result<(), SessionError> {
        let (tree, root) = self
            .library
            .decision_root(guideline_id)
            .ok_or_else(|| SessionError::NoDecisionTree(guideline_id.to_string()))?;

        self.navigator.navigate(
            DECISION_TREE_ROUTE,
            json!({
                "guideline_id": guideline_id,
                "tree": tree,
                "root": root.id,
            }),
        );
        Ok(())
    }

    pub fn go_back(&mut self) {
        self.navigator.go_back();
    }
}
