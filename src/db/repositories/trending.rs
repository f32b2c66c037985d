use crate::entities::{prelude::*, trending_searches};
use crate::models::TrendingEntry;
use anyhow::Result;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

/// Fields written for one recorded search.
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub search_key: &'a str,
    pub search_term: &'a str,
    pub movie_id: i64,
    pub title: &'a str,
    pub poster_url: Option<&'a str>,
}

pub struct TrendingRepository {
    conn: DatabaseConnection,
}

impl TrendingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the hit with `count = 1`, or bumps the existing row's count and
    /// refreshes its top-result fields. A single statement, so concurrent
    /// records of one key never lose an increment.
    pub async fn record_hit(&self, hit: &SearchHit<'_>) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();

        let active_model = trending_searches::ActiveModel {
            search_key: Set(hit.search_key.to_string()),
            search_term: Set(hit.search_term.to_string()),
            count: Set(1),
            movie_id: Set(hit.movie_id),
            title: Set(hit.title.to_string()),
            poster_url: Set(hit.poster_url.map(str::to_string)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        TrendingSearches::insert(active_model)
            .on_conflict(
                OnConflict::column(trending_searches::Column::SearchKey)
                    .value(
                        trending_searches::Column::Count,
                        Expr::col((TrendingSearches, trending_searches::Column::Count)).add(1),
                    )
                    .update_columns([
                        trending_searches::Column::SearchTerm,
                        trending_searches::Column::MovieId,
                        trending_searches::Column::Title,
                        trending_searches::Column::PosterUrl,
                        trending_searches::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn top(&self, limit: u64) -> Result<Vec<TrendingEntry>> {
        let rows = TrendingSearches::find()
            .order_by_desc(trending_searches::Column::Count)
            .order_by_desc(trending_searches::Column::UpdatedAt)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::to_entry).collect())
    }

    pub async fn get_by_key(&self, search_key: &str) -> Result<Option<TrendingEntry>> {
        let row = TrendingSearches::find()
            .filter(trending_searches::Column::SearchKey.eq(search_key))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::to_entry))
    }

    fn to_entry(model: trending_searches::Model) -> TrendingEntry {
        TrendingEntry {
            id: model.id,
            search_term: model.search_term,
            count: model.count,
            movie_id: model.movie_id,
            title: model.title,
            poster_url: model.poster_url,
            updated_at: model.updated_at,
        }
    }
}
