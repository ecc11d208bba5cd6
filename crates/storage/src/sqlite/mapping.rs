use quiz_core::model::{
    Attempt, AttemptId, Level, McqChoices, OptionKey, Question, QuestionId, QuestionKind,
    QuestionPayload, User, UserId,
};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn user_id_from_i64(v: i64) -> Result<UserId, StorageError> {
    Ok(UserId::new(i64_to_u64("user_id", v)?))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn attempt_id_from_i64(v: i64) -> Result<AttemptId, StorageError> {
    Ok(AttemptId::new(i64_to_u64("attempt_id", v)?))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn parse_kind(s: &str) -> Result<QuestionKind, StorageError> {
    match s {
        "mcq" => Ok(QuestionKind::Mcq),
        "short" => Ok(QuestionKind::Short),
        _ => Err(StorageError::Serialization(format!("invalid kind: {s}"))),
    }
}

pub(crate) fn parse_level(s: &str) -> Result<Level, StorageError> {
    s.parse::<Level>().map_err(ser)
}

pub(crate) fn parse_option_key(s: &str) -> Result<OptionKey, StorageError> {
    s.parse::<OptionKey>().map_err(ser)
}

pub(crate) fn map_user_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
    Ok(User {
        id: user_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        email: row.try_get("email").map_err(ser)?,
        password_hash: row.try_get("password_hash").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

fn required_text(
    row: &sqlx::sqlite::SqliteRow,
    field: &'static str,
) -> Result<String, StorageError> {
    row.try_get::<Option<String>, _>(field)
        .map_err(ser)?
        .ok_or_else(|| StorageError::Serialization(format!("missing {field}")))
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let kind_str: String = row.try_get("kind").map_err(ser)?;
    let kind = parse_kind(kind_str.as_str())?;

    // The kind determines which payload columns must be present.
    let payload = match kind {
        QuestionKind::Mcq => QuestionPayload::MultipleChoice {
            choices: McqChoices {
                a: required_text(row, "option_a")?,
                b: required_text(row, "option_b")?,
                c: required_text(row, "option_c")?,
                d: required_text(row, "option_d")?,
            },
            correct: parse_option_key(required_text(row, "correct_option")?.as_str())?,
        },
        QuestionKind::Short => QuestionPayload::ShortAnswer {
            answer: required_text(row, "answer")?,
            keyword: required_text(row, "keyword")?,
        },
    };

    let level_str: String = row.try_get("level").map_err(ser)?;

    Ok(Question {
        id: question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        body: row.try_get("body").map_err(ser)?,
        level: parse_level(level_str.as_str())?,
        role: row.try_get("role").map_err(ser)?,
        topic: row.try_get("topic").map_err(ser)?,
        company: row.try_get("company").map_err(ser)?,
        payload,
        explanation: row.try_get("explanation").map_err(ser)?,
    })
}

pub(crate) fn map_attempt_row(row: &sqlx::sqlite::SqliteRow) -> Result<Attempt, StorageError> {
    Ok(Attempt {
        id: attempt_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        user_id: user_id_from_i64(row.try_get::<i64, _>("user_id").map_err(ser)?)?,
        question_id: question_id_from_i64(row.try_get::<i64, _>("question_id").map_err(ser)?)?,
        is_correct: row.try_get("is_correct").map_err(ser)?,
        submitted: row.try_get("submitted").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}
