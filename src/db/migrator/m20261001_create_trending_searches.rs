use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrendingSearches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrendingSearches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrendingSearches::SearchKey)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TrendingSearches::SearchTerm)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrendingSearches::Count)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(TrendingSearches::MovieId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TrendingSearches::Title).string().not_null())
                    .col(ColumnDef::new(TrendingSearches::PosterUrl).string().null())
                    .col(
                        ColumnDef::new(TrendingSearches::CreatedAt)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrendingSearches::UpdatedAt)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Ranking reads sort by count first
        manager
            .create_index(
                Index::create()
                    .name("idx_trending_searches_count")
                    .table(TrendingSearches::Table)
                    .col(TrendingSearches::Count)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrendingSearches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TrendingSearches {
    Table,
    Id,
    SearchKey,
    SearchTerm,
    Count,
    MovieId,
    Title,
    PosterUrl,
    CreatedAt,
    UpdatedAt,
}
