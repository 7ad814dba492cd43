//! In-memory catalog store.
//!
//! Holds categories, tags, speakers and hydrated sessions behind one
//! `tokio::sync::RwLock`. It implements every read interface the engine
//! needs, and queries evaluate the count and the page under a single read
//! guard so both always describe the same snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use confcat_core::category::{Category, CategoryId, CategoryRepository, Condition, ConditionId};
use confcat_core::error::{ConfcatError, Result};
use confcat_core::query::{self, PageRequest, PagedResult, SessionFilter, SortSpec};
use confcat_core::session::{Session, SessionIndex, Speaker, Tag, TagRepository};

/// Last id handed out per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdCounters {
    pub category: i64,
    pub condition: i64,
    pub session: i64,
    pub tag: i64,
    pub speaker: i64,
}

impl IdCounters {
    fn next(slot: &mut i64) -> i64 {
        *slot += 1;
        *slot
    }

    /// Raises every counter to at least the largest id present.
    fn cover(&mut self, snapshot: &CatalogSnapshot) {
        self.category = self
            .category
            .max(max_id(snapshot.categories.iter().map(|c| c.id)));
        self.condition = self.condition.max(max_id(
            snapshot
                .categories
                .iter()
                .flat_map(|c| c.conditions.iter().map(|k| k.id)),
        ));
        self.session = self
            .session
            .max(max_id(snapshot.sessions.iter().map(|s| s.id)));
        self.tag = self.tag.max(max_id(snapshot.tags.iter().map(|t| t.id)));
        self.speaker = self
            .speaker
            .max(max_id(snapshot.speakers.iter().map(|s| s.id)));
    }
}

fn max_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0)
}

/// Full catalog state. Sessions are stored hydrated with their tags and
/// speakers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub speakers: Vec<Speaker>,
    pub sessions: Vec<Session>,
    pub ids: IdCounters,
}

/// Thread-safe in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogSnapshot>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing snapshot, e.g. one loaded from disk.
    pub fn from_snapshot(mut snapshot: CatalogSnapshot) -> Self {
        let mut ids = snapshot.ids;
        ids.cover(&snapshot);
        snapshot.ids = ids;
        Self {
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.clone()
    }

    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Adds a tag, or returns the existing one with the same name (ignoring case).
    pub async fn insert_tag(&self, tag: Tag) -> Tag {
        let mut state = self.state.write().await;
        resolve_tag(&mut state, tag)
    }

    /// Adds a speaker and assigns its id.
    pub async fn insert_speaker(&self, mut speaker: Speaker) -> Speaker {
        let mut state = self.state.write().await;
        speaker.id = IdCounters::next(&mut state.ids.speaker);
        speaker.created_at = Utc::now();
        state.speakers.push(speaker.clone());
        speaker
    }

    /// Adds a session and links its tags and speakers.
    ///
    /// Tags are resolved by id first, then by name (ignoring case); unknown
    /// names create new tags. Speakers must already exist when they carry an
    /// id; speakers with id 0 are created.
    pub async fn insert_session(&self, mut session: Session) -> Result<Session> {
        let mut state = self.state.write().await;

        let mut tags = Vec::with_capacity(session.tags.len());
        for tag in std::mem::take(&mut session.tags) {
            let by_id = state
                .tags
                .iter()
                .find(|t| tag.id != 0 && t.id == tag.id)
                .cloned();
            let linked = match by_id {
                Some(existing) => existing,
                None => resolve_tag(&mut state, tag),
            };
            if !tags.iter().any(|t: &Tag| t.id == linked.id) {
                tags.push(linked);
            }
        }

        let mut speakers = Vec::with_capacity(session.speakers.len());
        for mut speaker in std::mem::take(&mut session.speakers) {
            if speaker.id == 0 {
                speaker.id = IdCounters::next(&mut state.ids.speaker);
                state.speakers.push(speaker.clone());
            } else if let Some(existing) = state.speakers.iter().find(|s| s.id == speaker.id) {
                speaker = existing.clone();
            } else {
                return Err(ConfcatError::not_found("speaker", speaker.id));
            }
            if !speakers.iter().any(|s: &Speaker| s.id == speaker.id) {
                speakers.push(speaker);
            }
        }

        session.id = IdCounters::next(&mut state.ids.session);
        session.created_at = Utc::now();
        session.tags = tags;
        session.speakers = speakers;
        state.sessions.push(session.clone());
        Ok(session)
    }
}

fn resolve_tag(state: &mut CatalogSnapshot, mut tag: Tag) -> Tag {
    let folded = tag.name.to_lowercase();
    if let Some(existing) = state.tags.iter().find(|t| t.name.to_lowercase() == folded) {
        return existing.clone();
    }
    tag.id = IdCounters::next(&mut state.ids.tag);
    tag.created_at = Utc::now();
    state.tags.push(tag.clone());
    tag
}

fn stamp_new_condition(ids: &mut IdCounters, category_id: CategoryId, condition: &mut Condition) {
    condition.id = IdCounters::next(&mut ids.condition);
    condition.category_id = category_id;
    condition.created_at = Utc::now();
    condition.updated_at = None;
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn find_by_id_with_conditions(&self, id: CategoryId) -> Result<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_all_with_conditions(&self) -> Result<Vec<Category>> {
        let state = self.state.read().await;
        let mut categories = state.categories.clone();
        categories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(categories)
    }

    async fn conditions_for_category(&self, id: CategoryId) -> Result<Vec<Condition>> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.conditions.clone())
            .unwrap_or_default())
    }

    async fn create(&self, mut category: Category) -> Result<Category> {
        let mut state = self.state.write().await;
        let ids = &mut state.ids;

        category.id = IdCounters::next(&mut ids.category);
        category.created_at = Utc::now();
        category.updated_at = None;
        for condition in &mut category.conditions {
            stamp_new_condition(ids, category.id, condition);
        }

        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<Option<Category>> {
        let mut state = self.state.write().await;
        let CatalogSnapshot {
            categories, ids, ..
        } = &mut *state;

        let Some(existing) = categories.iter_mut().find(|c| c.id == category.id) else {
            return Ok(None);
        };

        let now = Utc::now();
        existing.name = category.name;
        existing.description = category.description;
        existing.updated_at = Some(now);

        let mut previous = std::mem::take(&mut existing.conditions);
        let mut reconciled = Vec::with_capacity(category.conditions.len());
        for mut incoming in category.conditions {
            let position = previous
                .iter()
                .position(|c| incoming.id != 0 && c.id == incoming.id);
            match position {
                Some(index) => {
                    let mut kept = previous.swap_remove(index);
                    kept.condition_type = incoming.condition_type;
                    kept.value = incoming.value;
                    kept.updated_at = Some(now);
                    reconciled.push(kept);
                }
                None => {
                    stamp_new_condition(ids, existing.id, &mut incoming);
                    reconciled.push(incoming);
                }
            }
        }
        existing.conditions = reconciled;

        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(state.categories.len() != before)
    }

    async fn remove_conditions(
        &self,
        category_id: CategoryId,
        condition_ids: &[ConditionId],
    ) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(category) = state.categories.iter_mut().find(|c| c.id == category_id) {
            category
                .conditions
                .retain(|condition| !condition_ids.contains(&condition.id));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionIndex for InMemoryCatalog {
    async fn query(
        &self,
        filter: &SessionFilter,
        sort: &SortSpec,
        page: PageRequest,
    ) -> Result<PagedResult<Session>> {
        let state = self.state.read().await;
        Ok(query::execute(&state.sessions, filter, sort, page))
    }

    async fn count_all(&self) -> Result<usize> {
        Ok(self.session_count().await)
    }
}

#[async_trait]
impl TagRepository for InMemoryCatalog {
    async fn list_all(&self) -> Result<Vec<Tag>> {
        let state = self.state.read().await;
        let mut tags = state.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(tags)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let folded = name.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .tags
            .iter()
            .find(|t| t.name.to_lowercase() == folded)
            .cloned())
    }
}
