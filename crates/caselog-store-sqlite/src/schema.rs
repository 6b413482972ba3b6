//! SQL schema for the caselog SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout; there is no migration path yet.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `id` only fixes insertion order; `case_id` is the real key.
CREATE TABLE IF NOT EXISTS cases (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    case_id       TEXT NOT NULL UNIQUE,
    created_at    TEXT NOT NULL,            -- RFC 3339 UTC
    phone_number  TEXT NOT NULL DEFAULT '',
    email         TEXT NOT NULL DEFAULT '',
    main_reaction TEXT,
    main_response TEXT,
    email_count   INTEGER,                  -- NULL when email is blank
    phone_count   INTEGER,                  -- NULL when phone is blank
    comments      TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS cases_email_idx ON cases(email COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS cases_phone_idx ON cases(phone_number);

PRAGMA user_version = 1;
";
