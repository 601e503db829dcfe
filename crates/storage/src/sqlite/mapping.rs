use quiz_core::model::{
    Area, Cluster, SessionSummary, StudentId, StudentProfile, Subject,
};
use sqlx::Row;
use std::collections::BTreeMap;

use crate::repository::{ResultRow, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

/// Encodes a weak-cluster map as a JSON object keyed by tier number,
/// e.g. `{"5":1}`.
pub(crate) fn weak_clusters_to_json(
    weak: &BTreeMap<Cluster, u32>,
) -> Result<String, StorageError> {
    let keyed: BTreeMap<String, u32> = weak
        .iter()
        .map(|(cluster, &count)| (cluster.value().to_string(), count))
        .collect();
    serde_json::to_string(&keyed).map_err(ser)
}

/// Decodes the JSON produced by [`weak_clusters_to_json`].
pub(crate) fn weak_clusters_from_json(
    raw: &str,
) -> Result<BTreeMap<Cluster, u32>, StorageError> {
    let keyed: BTreeMap<String, u32> = serde_json::from_str(raw).map_err(ser)?;
    let mut weak = BTreeMap::new();
    for (key, count) in keyed {
        let tier: u32 = key
            .parse()
            .map_err(|_| StorageError::Serialization(format!("invalid cluster key: {key}")))?;
        weak.insert(Cluster::new(tier), count);
    }
    Ok(weak)
}

pub(crate) fn map_student_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<StudentProfile, StorageError> {
    let area_str: String = row.try_get("area").map_err(ser)?;
    Ok(StudentProfile {
        id: StudentId::new(row.try_get::<String, _>("student_id").map_err(ser)?),
        name: row.try_get("name").map_err(ser)?,
        area: Area::parse(&area_str).map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<ResultRow, StorageError> {
    let subject: String = row.try_get("subject").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let total_questions = u32_from_i64(
        "total_questions",
        row.try_get::<i64, _>("total_questions").map_err(ser)?,
    )?;
    let progress: f64 = row.try_get("progress").map_err(ser)?;
    let weak_raw: String = row.try_get("weak_clusters").map_err(ser)?;

    let summary = SessionSummary::from_persisted(
        Subject::new(subject),
        score,
        total_questions,
        progress,
        weak_clusters_from_json(&weak_raw)?,
    )
    .map_err(ser)?;

    Ok(ResultRow {
        id: row.try_get("id").map_err(ser)?,
        student_id: StudentId::new(row.try_get::<String, _>("student_id").map_err(ser)?),
        taken_at: row.try_get("taken_at").map_err(ser)?,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_cluster_json_round_trips() {
        let mut weak = BTreeMap::new();
        weak.insert(Cluster::new(2), 0);
        weak.insert(Cluster::new(5), 3);

        let raw = weak_clusters_to_json(&weak).unwrap();
        assert_eq!(raw, r#"{"2":0,"5":3}"#);
        assert_eq!(weak_clusters_from_json(&raw).unwrap(), weak);
    }

    #[test]
    fn bad_cluster_key_is_a_serialization_error() {
        let err = weak_clusters_from_json(r#"{"five":1}"#).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
