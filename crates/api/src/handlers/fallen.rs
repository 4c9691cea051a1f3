//! Handlers for the `/fallen` resource.
//!
//! The record page is assembled from several reads (record, awards,
//! timeline, memories, additions, comments, media). They all run inside one
//! read-only snapshot so the page never mixes states from different moments.

use axum::extract::State;
use axum::Json;
use memorial_core::comment_tree::{
    build_comments_tree, count_nested_comments, tree_depth, CommentNode,
};
use memorial_core::error::CoreError;
use memorial_core::fallen::FallenFacts;
use memorial_core::labels::{service_type_label, validate_service_type};
use memorial_core::listing::{
    clamp_limit, clamp_offset, search_pattern, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use memorial_core::memory_assembly::{
    assemble_memories, collect_media_ids, total_memory_comments, AssembledMemory,
};
use memorial_core::types::DbId;
use memorial_db::models::award::FallenAwardDetail;
use memorial_db::models::comment::Comment;
use memorial_db::models::fallen::{Fallen, FallenListFilter, FallenSummary};
use memorial_db::models::media::Media;
use memorial_db::models::memory::{MemoryAddition, MemoryItem};
use memorial_db::models::timeline::TimelineItem;
use memorial_db::repositories::{
    AwardRepo, CommentRepo, FallenRepo, MediaRepo, MemoryRepo, TimelineRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::query::FallenListParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// A memory item as shown on the record page.
pub type MemoryView = AssembledMemory<MemoryItem, MemoryAddition, Comment, Media>;

/// One entry of the `GET /api/fallen` listing.
#[derive(Debug, Serialize)]
pub struct FallenListItem {
    #[serde(flatten)]
    pub fallen: FallenSummary,
    pub name: String,
    pub service_type_label: String,
    pub age: Option<i32>,
}

impl From<FallenSummary> for FallenListItem {
    fn from(fallen: FallenSummary) -> Self {
        Self {
            name: fallen.display_name(),
            service_type_label: service_type_label(fallen.service_type.as_deref()),
            age: fallen.age(),
            fallen,
        }
    }
}

/// Counters shown on the record page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DetailCounts {
    /// Record-level comments, replies included.
    pub comments_total: usize,
    /// Record-level top-level comments.
    pub comments_root: usize,
    pub memories_total: usize,
    /// Comments on memories and their additions, replies included.
    pub memory_comments_total: usize,
}

/// Full record page returned by `GET /api/fallen/{id}`.
#[derive(Debug, Serialize)]
pub struct FallenDetail {
    #[serde(flatten)]
    pub fallen: Fallen,
    pub name: String,
    pub service_type_label: String,
    pub age: Option<i32>,
    pub awards: Vec<FallenAwardDetail>,
    pub timeline: Vec<TimelineItem>,
    pub memories: Vec<MemoryView>,
    pub comments: Vec<CommentNode<Comment>>,
    pub counts: DetailCounts,
}

/// Record-level comment tree returned by `GET /api/fallen/{id}/comments`.
#[derive(Debug, Serialize)]
pub struct CommentThread {
    pub comments: Vec<CommentNode<Comment>>,
    pub total: usize,
    pub roots: usize,
}

impl CommentThread {
    fn new(rows: &[Comment]) -> Self {
        let comments = build_comments_tree(rows);
        Self {
            total: count_nested_comments(&comments),
            roots: comments.len(),
            comments,
        }
    }
}

/// GET /api/fallen
///
/// List visible records, most recent death first.
pub async fn list_fallen(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FallenListParams>,
) -> AppResult<Json<PageResponse<FallenListItem>>> {
    let service_type = params
        .service_type
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(validate_service_type)
        .transpose()
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    let pattern = search_pattern(params.q.as_deref())
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let filter = FallenListFilter {
        service_type: service_type.map(|st| st.as_str().to_string()),
        pattern,
        limit: clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
        offset: clamp_offset(params.offset),
    };

    let (rows, total) = tokio::try_join!(
        FallenRepo::list_page(&state.pool, &filter),
        FallenRepo::count_page(&state.pool, &filter),
    )?;

    tracing::debug!(rows = rows.len(), total, "Listed fallen records");

    Ok(Json(PageResponse {
        data: rows.into_iter().map(FallenListItem::from).collect(),
        total,
    }))
}

/// GET /api/fallen/{id}
///
/// Assemble the record page. Returns 404 unless the record is approved and
/// not deleted.
pub async fn get_fallen(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<FallenDetail>>> {
    let mut tx = memorial_db::begin_snapshot(&state.pool).await?;

    let fallen = FallenRepo::find_visible(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fallen",
            id,
        }))?;

    let awards = AwardRepo::list_approved_for_fallen(&mut *tx, id).await?;
    let timeline = TimelineRepo::list_for_fallen(&mut *tx, id).await?;

    let items = MemoryRepo::list_visible_items(&mut *tx, id).await?;
    let item_ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
    let additions = MemoryRepo::list_visible_additions(&mut *tx, &item_ids).await?;
    let addition_ids: Vec<DbId> = additions.iter().map(|a| a.id).collect();
    let memory_comments =
        CommentRepo::list_visible_for_memories(&mut *tx, &item_ids, &addition_ids).await?;
    let media = MediaRepo::list_by_ids(&mut *tx, &collect_media_ids(&items, &additions)).await?;

    let fallen_comments = CommentRepo::list_visible_for_fallen(&mut *tx, id).await?;

    let memories = assemble_memories(&items, &additions, &memory_comments, &media);
    let thread = CommentThread::new(&fallen_comments);

    let counts = DetailCounts {
        comments_total: thread.total,
        comments_root: thread.roots,
        memories_total: memories.len(),
        memory_comments_total: total_memory_comments(&memories),
    };

    tracing::debug!(
        fallen_id = id,
        memories = counts.memories_total,
        additions = additions.len(),
        media = media.len(),
        comments = counts.comments_total,
        memory_comments = counts.memory_comments_total,
        "Assembled fallen record page"
    );

    Ok(Json(DataResponse {
        data: FallenDetail {
            name: fallen.display_name(),
            service_type_label: service_type_label(fallen.service_type.as_deref()),
            age: fallen.age(),
            fallen,
            awards,
            timeline,
            memories,
            comments: thread.comments,
            counts,
        },
    }))
}

/// GET /api/fallen/{id}/comments
///
/// Record-level comment tree with its counters.
pub async fn get_fallen_comments(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<CommentThread>>> {
    let mut tx = memorial_db::begin_snapshot(&state.pool).await?;

    if FallenRepo::find_visible(&mut *tx, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Fallen",
            id,
        }));
    }

    let rows = CommentRepo::list_visible_for_fallen(&mut *tx, id).await?;
    let thread = CommentThread::new(&rows);

    tracing::debug!(
        fallen_id = id,
        total = thread.total,
        roots = thread.roots,
        depth = tree_depth(&thread.comments),
        "Built comment tree"
    );

    Ok(Json(DataResponse { data: thread }))
}
