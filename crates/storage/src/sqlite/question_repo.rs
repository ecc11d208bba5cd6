use quiz_core::model::{Page, Question, QuestionFilter, QuestionId};
use sqlx::Row;
use sqlx::sqlite::{Sqlite, SqliteArguments};

use super::SqliteRepository;
use super::mapping::{map_question_row, question_id_from_i64};
use crate::repository::{FilterFacets, NewQuestionRecord, QuestionRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

const QUESTION_COLUMNS: &str = "id, title, body, kind, level, role, topic, company, \
     option_a, option_b, option_c, option_d, correct_option, answer, keyword, explanation";

/// Appends WHERE clauses for every active filter criterion and returns the
/// next free bind index.
///
/// Exact matches are AND'd; the free-text term matches title OR body after
/// lowercasing both sides. Bind order must stay consistent with
/// `bind_filter`.
fn append_filter_sql(sql: &mut String, filter: &QuestionFilter) -> usize {
    let mut bind_index = 1;
    let mut connective = " WHERE";

    if filter.role.is_some() {
        sql.push_str(connective);
        sql.push_str(" role = ?");
        sql.push_str(&bind_index.to_string());
        connective = " AND";
        bind_index += 1;
    }
    if filter.topic.is_some() {
        sql.push_str(connective);
        sql.push_str(" topic = ?");
        sql.push_str(&bind_index.to_string());
        connective = " AND";
        bind_index += 1;
    }
    if filter.level.is_some() {
        sql.push_str(connective);
        sql.push_str(" level = ?");
        sql.push_str(&bind_index.to_string());
        connective = " AND";
        bind_index += 1;
    }
    if filter.company.is_some() {
        sql.push_str(connective);
        sql.push_str(" company = ?");
        sql.push_str(&bind_index.to_string());
        connective = " AND";
        bind_index += 1;
    }
    if filter.term.is_some() {
        sql.push_str(connective);
        sql.push_str(" (LOWER(title) LIKE ?");
        sql.push_str(&bind_index.to_string());
        sql.push_str(" ESCAPE '\\' OR LOWER(body) LIKE ?");
        sql.push_str(&(bind_index + 1).to_string());
        sql.push_str(" ESCAPE '\\')");
        bind_index += 2;
    }

    bind_index
}

/// Builds the `%term%` pattern with LIKE wildcards escaped, so the term is
/// matched as a literal substring.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Binds the active criteria in the same order `append_filter_sql` numbered
/// them.
fn bind_filter<'q>(
    mut query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    filter: &QuestionFilter,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    if let Some(role) = &filter.role {
        query = query.bind(role.clone());
    }
    if let Some(topic) = &filter.topic {
        query = query.bind(topic.clone());
    }
    if let Some(level) = filter.level {
        query = query.bind(level.as_str());
    }
    if let Some(company) = &filter.company {
        query = query.bind(company.clone());
    }
    if let Some(term) = &filter.term {
        let pattern = like_pattern(term);
        query = query.bind(pattern.clone());
        query = query.bind(pattern);
    }
    query
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_question(
        &self,
        question: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (
                title, body, kind, level, role, topic, company,
                option_a, option_b, option_c, option_d, correct_option,
                answer, keyword, explanation
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ",
        )
        .bind(question.title)
        .bind(question.body)
        .bind(question.kind.as_str())
        .bind(question.level.as_str())
        .bind(question.role)
        .bind(question.topic)
        .bind(question.company)
        .bind(question.option_a)
        .bind(question.option_b)
        .bind(question.option_c)
        .bind(question.option_d)
        .bind(question.correct_option.map(|k| k.as_str()))
        .bind(question.answer)
        .bind(question.keyword)
        .bind(question.explanation)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(super::mapping::id_to_i64("question_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn search_questions(
        &self,
        filter: &QuestionFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Question>, StorageError> {
        let mut count_sql = String::from("SELECT COUNT(*) AS total FROM questions");
        append_filter_sql(&mut count_sql, filter);

        let count_row = bind_filter(sqlx::query(&count_sql), filter)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let total: i64 = count_row.try_get("total").map_err(ser)?;
        let total = u64::try_from(total).unwrap_or(0);

        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let mut sql = format!("SELECT {QUESTION_COLUMNS} FROM questions");
        let bind_index = append_filter_sql(&mut sql, filter);
        sql.push_str(" ORDER BY id DESC LIMIT ?");
        sql.push_str(&bind_index.to_string());
        sql.push_str(" OFFSET ?");
        sql.push_str(&(bind_index + 1).to_string());

        let rows = bind_filter(sqlx::query(&sql), filter)
            .bind(i64::from(per_page))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(map_question_row(&row)?);
        }

        Ok(Page::new(items, page, per_page, total))
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let total: i64 = row.try_get("total").map_err(ser)?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn distinct_facets(&self) -> Result<FilterFacets, StorageError> {
        async fn distinct_column(
            pool: &sqlx::SqlitePool,
            sql: &str,
            column: &str,
        ) -> Result<Vec<String>, StorageError> {
            let rows = sqlx::query(sql)
                .fetch_all(pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            let mut values = Vec::with_capacity(rows.len());
            for row in rows {
                values.push(row.try_get::<String, _>(column).map_err(ser)?);
            }
            Ok(values)
        }

        Ok(FilterFacets {
            roles: distinct_column(
                &self.pool,
                "SELECT DISTINCT role FROM questions ORDER BY role",
                "role",
            )
            .await?,
            topics: distinct_column(
                &self.pool,
                "SELECT DISTINCT topic FROM questions ORDER BY topic",
                "topic",
            )
            .await?,
            companies: distinct_column(
                &self.pool,
                "SELECT DISTINCT company FROM questions ORDER BY company",
                "company",
            )
            .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Level;

    #[test]
    fn empty_filter_adds_no_clauses() {
        let mut sql = String::from("SELECT COUNT(*) FROM questions");
        let next = append_filter_sql(&mut sql, &QuestionFilter::default());
        assert_eq!(sql, "SELECT COUNT(*) FROM questions");
        assert_eq!(next, 1);
    }

    #[test]
    fn clauses_are_anded_with_sequential_binds() {
        let mut sql = String::new();
        let filter = QuestionFilter {
            role: Some("SDE".to_string()),
            level: Some(Level::Beginner),
            term: Some("sql".to_string()),
            ..QuestionFilter::default()
        };
        let next = append_filter_sql(&mut sql, &filter);
        assert_eq!(
            sql,
            " WHERE role = ?1 AND level = ?2 AND (LOWER(title) LIKE ?3 ESCAPE '\\' OR LOWER(body) LIKE ?4 ESCAPE '\\')"
        );
        assert_eq!(next, 5);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("sql"), "%sql%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("dense_rank"), "%dense\\_rank%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
