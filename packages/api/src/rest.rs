//! PostgREST table access: a small query builder plus select, insert and
//! update on [`Backend`].

use std::fmt;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::SessionStore;

use crate::client::Backend;
use crate::error::ApiError;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Filters and modifiers for one table, rendered as query parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn gte(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lt(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "lt", value)
    }

    fn filter(mut self, column: &str, op: &str, value: impl fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("{op}.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".to_string(), format!("{column}.{dir}")));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    /// Only the row filters; `select`, `order` and `limit` do not apply to
    /// updates.
    fn filters(&self) -> Vec<&(String, String)> {
        self.params
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "select" | "order" | "limit"))
            .collect()
    }
}

impl<S: SessionStore> Backend<S> {
    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, ApiError> {
        let request = self.authed(Method::GET, &query.path()).await?.query(query.params());
        let body = self.send(request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Exactly one row; zero rows is an error with code `PGRST116`.
    pub async fn single<T: DeserializeOwned>(&self, query: &Query) -> Result<T, ApiError> {
        let request = self
            .authed(Method::GET, &query.path())
            .await?
            .query(query.params())
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT);
        let body = self.send(request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`Backend::single`], with "no rows" mapped to `None`.
    pub async fn maybe_single<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, ApiError> {
        match self.single(query).await {
            Ok(row) => Ok(Some(row)),
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether any row matches the query's filters.
    pub async fn exists(&self, query: &Query) -> Result<bool, ApiError> {
        let mut probe = Query::from(query.table()).select("*").limit(1);
        for (k, v) in query.filters() {
            probe.params.push((k.clone(), v.clone()));
        }
        let rows: Vec<serde_json::Value> = self.select(&probe).await?;
        Ok(!rows.is_empty())
    }

    pub async fn insert<B: Serialize + ?Sized>(&self, table: &str, body: &B) -> Result<(), ApiError> {
        let request = self
            .authed(Method::POST, &format!("/rest/v1/{table}"))
            .await?
            .header("Prefer", "return=minimal")
            .json(body);
        self.send(request).await?;
        tracing::debug!(table, "row inserted");
        Ok(())
    }

    pub async fn update<B: Serialize + ?Sized>(&self, query: &Query, body: &B) -> Result<(), ApiError> {
        let request = self
            .authed(Method::PATCH, &query.path())
            .await?
            .query(&query.filters())
            .header("Prefer", "return=minimal")
            .json(body);
        self.send(request).await?;
        tracing::debug!(table = query.table(), "rows updated");
        Ok(())
    }
}
