use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};
use yield_core::RepositoryError;

/// Get an `f64` from a row, accepting both INTEGER and REAL storage classes.
///
/// Rows written by other tools may hold whole amounts as INTEGER even though
/// the column is declared REAL. NULL is rejected because every stored amount
/// is mandatory.
pub fn get_f64(
    row: &SqliteRow,
    column: &str,
) -> Result<f64, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(val as f64)
        }
        "REAL" => row.try_get(column).map_err(|e| {
            RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
        }),
        "NULL" => Err(RepositoryError::Database(format!(
            "Unexpected NULL in column '{}'",
            column
        ))),
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}
