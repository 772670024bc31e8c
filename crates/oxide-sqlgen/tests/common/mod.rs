#![allow(dead_code)]

use oxide_sqlgen::{DialectKind, QueryGenerationError, QueryGenerator, Result};

pub const ALL_DIALECTS: [DialectKind; 4] = [
    DialectKind::Postgres,
    DialectKind::Mysql,
    DialectKind::Mariadb,
    DialectKind::Sqlite,
];

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn generator(kind: DialectKind) -> QueryGenerator {
    init_tracing();
    QueryGenerator::for_kind(kind)
}

pub fn sql(kind: DialectKind, result: Result<String>) -> String {
    result.unwrap_or_else(|e| panic!("Failed to generate SQL for {kind}\nError: {e}"))
}

pub fn sql_err(kind: DialectKind, result: Result<String>) -> QueryGenerationError {
    match result {
        Ok(sql) => panic!("Expected an error for {kind}, got: {sql}"),
        Err(e) => e,
    }
}
