use anyhow::Context as _;

use vigil_utils::time::now_unix_secs;

use crate::{
    database::Database,
    model::experiment::{Experiment, ExperimentStatus},
};

#[derive(sqlx::FromRow)]
struct ExperimentRow {
    id: i64,
    name: String,
    value: String,
    status: i64,
    created: i64,
    updated: i64,
    created_by: String,
    updated_by: String,
}

impl ExperimentRow {
    fn into_model(self) -> anyhow::Result<Experiment> {
        let value = serde_json::from_str(&self.value)
            .with_context(|| format!("experiment {} payload is not valid JSON", self.id))?;
        let status = ExperimentStatus::try_from(self.status)?;
        let created = u64::try_from(self.created).context("created out of u64 range")?;
        let updated = u64::try_from(self.updated).context("updated out of u64 range")?;

        Ok(Experiment {
            id: self.id,
            name: self.name,
            value,
            status,
            created,
            updated,
            created_by: self.created_by,
            updated_by: self.updated_by,
        })
    }
}

/// Insert a new experiment with status `init` and return the stored record.
pub async fn create_experiment(
    db: &Database,
    name: &str,
    value: &serde_json::Value,
    author: &str,
) -> anyhow::Result<Experiment> {
    let payload = serde_json::to_string(value).context("failed to encode experiment payload")?;
    let now = now_unix_secs();
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;
    let status = i64::from(ExperimentStatus::Init);

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO experiments (name, value, status, created, updated, created_by, updated_by) \
         VALUES ($1, $2, $3, $4, $4, $5, $5) RETURNING id",
    )
    .bind(name)
    .bind(&payload)
    .bind(status)
    .bind(now_i64)
    .bind(author)
    .fetch_one(db.pool())
    .await?;

    Ok(Experiment {
        id,
        name: name.to_owned(),
        value: value.clone(),
        status: ExperimentStatus::Init,
        created: now,
        updated: now,
        created_by: author.to_owned(),
        updated_by: author.to_owned(),
    })
}

/// List experiments ordered by most recently updated, with LIMIT/OFFSET
/// pagination. An empty table yields an empty list.
pub async fn list_experiments(
    db: &Database,
    limit: u32,
    start: u32,
) -> anyhow::Result<Vec<Experiment>> {
    let rows: Vec<ExperimentRow> = sqlx::query_as(
        "SELECT id, name, value, status, created, updated, created_by, updated_by \
         FROM experiments \
         ORDER BY updated DESC \
         LIMIT $1 OFFSET $2",
    )
    .bind(i64::from(limit))
    .bind(i64::from(start))
    .fetch_all(db.pool())
    .await?;

    let mut experiments = Vec::with_capacity(rows.len());
    for row in rows {
        experiments.push(row.into_model()?);
    }

    Ok(experiments)
}

/// Update an experiment's name, payload, and status by id. Returns whether
/// a row matched.
pub async fn update_experiment(
    db: &Database,
    id: i64,
    name: &str,
    status: ExperimentStatus,
    value: &serde_json::Value,
    author: &str,
) -> anyhow::Result<bool> {
    let payload = serde_json::to_string(value).context("failed to encode experiment payload")?;
    let now_i64 = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    let updated = sqlx::query(
        "UPDATE experiments \
         SET name = $2, value = $3, status = $4, updated = $5, updated_by = $6 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(name)
    .bind(&payload)
    .bind(i64::from(status))
    .bind(now_i64)
    .bind(author)
    .execute(db.pool())
    .await?
    .rows_affected();

    Ok(updated > 0)
}

/// Hard-delete an experiment by id. Returns whether a row matched.
pub async fn delete_experiment(db: &Database, id: i64) -> anyhow::Result<bool> {
    let deleted = sqlx::query("DELETE FROM experiments WHERE id = $1")
        .bind(id)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}
