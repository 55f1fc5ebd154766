use async_trait::async_trait;
use chrono::Utc;
use patternhub_core::{
    Architecture, CatalogError, Category, Favorite, FavoritesProvider, PatternProvider,
    PatternRecord, SessionId, TaxonomyProvider,
};
use patternhub_entities::{architectures, favorites, patterns};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    NotSet, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use crate::convert;
use crate::schema;

/// Whether a seeded row was created or refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(i64),
    Updated(i64),
}

impl Upsert {
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Inserted(id) | Self::Updated(id) => id,
        }
    }
}

/// Relational catalog storage backing every collaborator trait.
#[derive(Clone)]
pub struct CatalogStore {
    pub(crate) db: DatabaseConnection,
}

impl CatalogStore {
    /// Connect and make sure the schema exists.
    ///
    /// # Arguments
    /// * `database_url` - sea-orm connection string (`sqlite://…`, `postgres://…`)
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to catalog database");
        let mut options = ConnectOptions::new(database_url.to_string());
        options.sqlx_logging(false);
        if database_url.starts_with("sqlite:") {
            // An in-memory SQLite database lives and dies with its connection.
            options.max_connections(1).min_connections(1);
        }
        let db = Database::connect(options).await?;
        Self::from_connection(db).await
    }

    pub async fn from_connection(db: DatabaseConnection) -> anyhow::Result<Self> {
        schema::bootstrap(&db).await?;
        info!("CatalogStore initialized");
        Ok(Self { db })
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn pattern_exists(&self, pattern_id: i64) -> anyhow::Result<bool> {
        Ok(patterns::Entity::find_by_id(pattern_id)
            .one(&self.db)
            .await?
            .is_some())
    }

    /// Insert a pattern, or refresh the row with the same slug.
    pub async fn upsert_pattern(&self, record: &PatternRecord) -> anyhow::Result<Upsert> {
        let existing = patterns::Entity::find()
            .filter(patterns::Column::Slug.eq(record.slug.as_str()))
            .one(&self.db)
            .await?;

        let mut model = patterns::ActiveModel {
            id: NotSet,
            slug: Set(record.slug.clone()),
            name: Set(record.name.clone()),
            description: Set(record.description.clone()),
            content: Set(record.content.clone()),
            category: Set(record.category.to_string()),
            difficulty: Set(i16::from(record.difficulty)),
            tags: Set(convert::to_json(&record.tags)?),
            architectures: Set(convert::to_json(&record.architectures)?),
            languages: Set(convert::to_json(&record.languages)?),
            frameworks: Set(convert::to_json(&record.frameworks)?),
            related_patterns: Set(convert::to_json(&record.related_patterns)?),
            code_examples: Set(convert::to_json(&record.code_examples)?),
            created_at: Set(Utc::now().naive_utc()),
        };

        if let Some(existing) = existing {
            model.id = Set(existing.id);
            model.created_at = Set(existing.created_at);
            let updated = model.update(&self.db).await?;
            debug!("Updated pattern '{}' (id={})", updated.slug, updated.id);
            Ok(Upsert::Updated(updated.id))
        } else {
            let inserted = model.insert(&self.db).await?;
            debug!("Inserted pattern '{}' (id={})", inserted.slug, inserted.id);
            Ok(Upsert::Inserted(inserted.id))
        }
    }

    /// Insert an architecture, or refresh the row with the same slug.
    pub async fn upsert_architecture(&self, architecture: &Architecture) -> anyhow::Result<Upsert> {
        let existing = architectures::Entity::find()
            .filter(architectures::Column::Slug.eq(architecture.slug.as_str()))
            .one(&self.db)
            .await?;

        let mut model = architectures::ActiveModel {
            id: NotSet,
            slug: Set(architecture.slug.clone()),
            name: Set(architecture.name.clone()),
            description: Set(architecture.description.clone()),
            characteristics: Set(convert::to_json(&architecture.characteristics)?),
        };

        if let Some(existing) = existing {
            model.id = Set(existing.id);
            let updated = model.update(&self.db).await?;
            Ok(Upsert::Updated(updated.id))
        } else {
            let inserted = model.insert(&self.db).await?;
            Ok(Upsert::Inserted(inserted.id))
        }
    }
}

#[async_trait]
impl PatternProvider for CatalogStore {
    async fn all_patterns(&self) -> anyhow::Result<Vec<PatternRecord>> {
        let models = patterns::Entity::find()
            .order_by_asc(patterns::Column::Id)
            .all(&self.db)
            .await?;
        Ok(convert::patterns_from_models(models))
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<PatternRecord>> {
        patterns::Entity::find()
            .filter(patterns::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .map(convert::pattern_from_model)
            .transpose()
    }

    async fn list_by_category(&self, category: Category) -> anyhow::Result<Vec<PatternRecord>> {
        let models = patterns::Entity::find()
            .filter(patterns::Column::Category.eq(category.as_str()))
            .order_by_asc(patterns::Column::Id)
            .all(&self.db)
            .await?;
        Ok(convert::patterns_from_models(models))
    }
}

#[async_trait]
impl TaxonomyProvider for CatalogStore {
    async fn all_architectures(&self) -> anyhow::Result<Vec<Architecture>> {
        let models = architectures::Entity::find()
            .order_by_asc(architectures::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models
            .into_iter()
            .map(convert::architecture_from_model)
            .collect())
    }

    async fn find_architecture(&self, slug: &str) -> anyhow::Result<Option<Architecture>> {
        let model = architectures::Entity::find()
            .filter(architectures::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(model.map(convert::architecture_from_model))
    }
}

fn require_session(session: &SessionId) -> anyhow::Result<()> {
    if session.is_blank() {
        return Err(CatalogError::validation("userId is required").into());
    }
    Ok(())
}

#[async_trait]
impl FavoritesProvider for CatalogStore {
    async fn favorites(&self, session: &SessionId) -> anyhow::Result<Vec<Favorite>> {
        require_session(session)?;
        let models = favorites::Entity::find()
            .filter(favorites::Column::SessionId.eq(session.as_str()))
            .order_by_asc(favorites::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(convert::favorite_from_model).collect())
    }

    async fn add_favorite(&self, pattern_id: i64, session: &SessionId) -> anyhow::Result<Favorite> {
        require_session(session)?;
        if !self.pattern_exists(pattern_id).await? {
            return Err(CatalogError::not_found(format!("pattern {pattern_id}")).into());
        }

        let existing = favorites::Entity::find()
            .filter(favorites::Column::PatternId.eq(pattern_id))
            .filter(favorites::Column::SessionId.eq(session.as_str()))
            .one(&self.db)
            .await?;
        if let Some(existing) = existing {
            debug!("Pattern {} already a favorite of {}", pattern_id, session);
            return Ok(convert::favorite_from_model(existing));
        }

        let inserted = favorites::ActiveModel {
            id: NotSet,
            pattern_id: Set(pattern_id),
            session_id: Set(session.as_str().to_string()),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&self.db)
        .await?;

        info!("Added favorite {} for session {}", pattern_id, session);
        Ok(convert::favorite_from_model(inserted))
    }

    async fn remove_favorite(&self, pattern_id: i64, session: &SessionId) -> anyhow::Result<()> {
        require_session(session)?;
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::PatternId.eq(pattern_id))
            .filter(favorites::Column::SessionId.eq(session.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            debug!("No favorite {} to remove for {}", pattern_id, session);
        } else {
            info!("Removed favorite {} for session {}", pattern_id, session);
        }
        Ok(())
    }
}
