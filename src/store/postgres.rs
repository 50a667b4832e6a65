use crate::error::StoreError;
use crate::i18n::LanguageRegistry;
use crate::model::{PluralForms, TranslationEntry, TranslationId};
use crate::store::{default_plural_rules, PluralRow, TranslationStore, ValueRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};

const ENTRY_COLUMNS: &str = r#"id, "key", source_text, context"#;

/// PostgreSQL-backed translation store.
#[derive(Clone, Debug)]
pub struct PgTranslationStore {
    pool: PgPool,
}

impl PgTranslationStore {
    /// Connect to the database and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Wrap an existing pool. The caller is responsible for running [`Self::migrate`].
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create tables and indexes (safe to run always).
    ///
    /// `source_text` is not unique: concurrent first writers may
    /// produce duplicate rows, and lookups pick the lowest id.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS translations (
                id BIGSERIAL PRIMARY KEY,
                "key" TEXT,
                source_text TEXT NOT NULL,
                context TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE UNIQUE INDEX IF NOT EXISTS translations_key_unique
               ON translations ("key") WHERE "key" IS NOT NULL"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS translations_key_lower_idx
               ON translations (LOWER("key"))"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS translations_source_text_idx ON translations (source_text)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS translation_values (
                translation_id BIGINT NOT NULL REFERENCES translations(id),
                lang TEXT NOT NULL,
                value TEXT,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (translation_id, lang)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS plural_forms (
                translation_id BIGINT NOT NULL REFERENCES translations(id),
                lang TEXT NOT NULL,
                plural_data TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (translation_id, lang)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS plural_rules (
                lang TEXT PRIMARY KEY,
                forms TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        self.seed_plural_rules().await?;

        info!("Translation store schema is up to date");
        Ok(())
    }

    /// Insert the registry's categories for every target language that has
    /// no rule row yet. Existing overrides are left alone.
    pub async fn seed_plural_rules(&self) -> Result<(), StoreError> {
        let registry = LanguageRegistry::get();
        for lang in registry.list_targets() {
            let json = serde_json::to_string(lang.plural_categories)?;
            sqlx::query(
                "INSERT INTO plural_rules (lang, forms) VALUES ($1, $2)
                 ON CONFLICT (lang) DO NOTHING",
            )
            .bind(lang.code)
            .bind(json)
            .execute(&self.pool)
            .await?;
        }
        debug!("Seeded plural rules for {} languages", registry.language_codes().len());
        Ok(())
    }

    /// Override the plural categories used for a language.
    pub async fn set_plural_rules(&self, lang: &str, forms: &[&str]) -> Result<(), StoreError> {
        let json = serde_json::to_string(forms)?;
        sqlx::query(
            "INSERT INTO plural_rules (lang, forms) VALUES ($1, $2)
             ON CONFLICT (lang) DO UPDATE SET forms = EXCLUDED.forms",
        )
        .bind(lang)
        .bind(json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch_one_entry(
        &self,
        sql: &str,
        param: &str,
    ) -> Result<Option<TranslationEntry>, StoreError> {
        let row = sqlx::query(sql)
            .bind(param)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| entry_from_row(&r)).transpose()
    }
}

fn entry_from_row(row: &PgRow) -> Result<TranslationEntry, StoreError> {
    Ok(TranslationEntry {
        id: TranslationId(row.try_get("id")?),
        key: row.try_get("key")?,
        source_text: row.try_get("source_text")?,
        context: row.try_get("context")?,
    })
}

fn raw_ids(ids: &[TranslationId]) -> Vec<i64> {
    ids.iter().map(|id| id.0).collect()
}

fn parse_forms(raw: &str) -> Result<PluralForms, StoreError> {
    Ok(serde_json::from_str(raw)?)
}

fn parse_rules(raw: &str) -> Result<Vec<String>, StoreError> {
    Ok(serde_json::from_str(raw)?)
}

#[async_trait]
impl TranslationStore for PgTranslationStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<TranslationEntry>, StoreError> {
        let exact = format!(
            r#"SELECT {} FROM translations WHERE "key" = $1 ORDER BY id LIMIT 1"#,
            ENTRY_COLUMNS
        );
        if let Some(entry) = self.fetch_one_entry(&exact, key).await? {
            return Ok(Some(entry));
        }

        debug!("Exact key match not found, trying case-insensitive for {:?}", key);
        let folded = format!(
            r#"SELECT {} FROM translations WHERE LOWER("key") = LOWER($1) ORDER BY id LIMIT 1"#,
            ENTRY_COLUMNS
        );
        self.fetch_one_entry(&folded, key).await
    }

    async fn find_by_source(&self, text: &str) -> Result<Option<TranslationEntry>, StoreError> {
        let sql = format!(
            "SELECT {} FROM translations WHERE source_text = $1 ORDER BY id LIMIT 1",
            ENTRY_COLUMNS
        );
        self.fetch_one_entry(&sql, text).await
    }

    async fn find_many_by_keys(
        &self,
        keys: &[String],
    ) -> Result<Vec<TranslationEntry>, StoreError> {
        let lowered: Vec<String> = keys.iter().map(|k| k.to_lowercase()).collect();
        let sql = format!(
            r#"SELECT {} FROM translations WHERE LOWER("key") = ANY($1) ORDER BY id"#,
            ENTRY_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(&lowered).fetch_all(&self.pool).await?;
        debug!("find_many_by_keys: {} keys, {} rows", keys.len(), rows.len());
        rows.iter().map(entry_from_row).collect()
    }

    async fn find_many_by_source(
        &self,
        texts: &[String],
    ) -> Result<Vec<TranslationEntry>, StoreError> {
        let sql = format!(
            "SELECT {} FROM translations WHERE source_text = ANY($1) ORDER BY id",
            ENTRY_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(texts).fetch_all(&self.pool).await?;
        debug!("find_many_by_source: {} texts, {} rows", texts.len(), rows.len());
        rows.iter().map(entry_from_row).collect()
    }

    async fn create_entry(
        &self,
        key: Option<&str>,
        context: Option<&str>,
        source_text: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO translations ("key", context, source_text) VALUES ($1, $2, $3)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(key)
        .bind(context)
        .bind(source_text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_value(
        &self,
        id: TranslationId,
        lang: &str,
    ) -> Result<Option<String>, StoreError> {
        let value: Option<Option<String>> = sqlx::query_scalar(
            "SELECT value FROM translation_values WHERE translation_id = $1 AND lang = $2 LIMIT 1",
        )
        .bind(id.0)
        .bind(lang)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value.flatten())
    }

    async fn set_value(
        &self,
        id: TranslationId,
        lang: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO translation_values (translation_id, lang, value) VALUES ($1, $2, $3)
             ON CONFLICT (translation_id, lang)
             DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(id.0)
        .bind(lang)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn values_for(&self, ids: &[TranslationId]) -> Result<Vec<ValueRow>, StoreError> {
        let rows = sqlx::query(
            "SELECT translation_id, lang, value, updated_at FROM translation_values
             WHERE translation_id = ANY($1)",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ValueRow, StoreError> {
                Ok(ValueRow {
                    translation_id: TranslationId(row.try_get("translation_id")?),
                    lang: row.try_get("lang")?,
                    value: row.try_get("value")?,
                    updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
                })
            })
            .collect()
    }

    async fn has_plural_forms(&self, id: TranslationId) -> Result<bool, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM plural_forms WHERE translation_id = $1")
                .bind(id.0)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    async fn get_plural_forms(
        &self,
        id: TranslationId,
        lang: &str,
    ) -> Result<Option<PluralForms>, StoreError> {
        let raw: Option<String> = sqlx::query_scalar(
            "SELECT plural_data FROM plural_forms WHERE translation_id = $1 AND lang = $2 LIMIT 1",
        )
        .bind(id.0)
        .bind(lang)
        .fetch_optional(&self.pool)
        .await?;
        raw.as_deref().map(parse_forms).transpose()
    }

    async fn set_plural_forms(
        &self,
        id: TranslationId,
        lang: &str,
        forms: &PluralForms,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(forms)?;
        sqlx::query(
            "INSERT INTO plural_forms (translation_id, lang, plural_data) VALUES ($1, $2, $3)
             ON CONFLICT (translation_id, lang)
             DO UPDATE SET plural_data = EXCLUDED.plural_data, updated_at = NOW()",
        )
        .bind(id.0)
        .bind(lang)
        .bind(json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn plural_forms_for(
        &self,
        ids: &[TranslationId],
    ) -> Result<Vec<PluralRow>, StoreError> {
        let rows = sqlx::query(
            "SELECT translation_id, lang, plural_data FROM plural_forms
             WHERE translation_id = ANY($1)",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<PluralRow, StoreError> {
                let raw: String = row.try_get("plural_data")?;
                Ok(PluralRow {
                    translation_id: TranslationId(row.try_get("translation_id")?),
                    lang: row.try_get("lang")?,
                    forms: parse_forms(&raw)?,
                })
            })
            .collect()
    }

    async fn plural_rules(&self, lang: &str) -> Result<Vec<String>, StoreError> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT forms FROM plural_rules WHERE lang = $1 LIMIT 1")
                .bind(lang)
                .fetch_optional(&self.pool)
                .await?;

        match raw {
            Some(raw) => parse_rules(&raw),
            None => Ok(default_plural_rules()),
        }
    }
}
