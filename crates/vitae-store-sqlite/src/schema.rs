//! SQL schema for the Vitae SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` is stamped so a
//! future layout change can be detected.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    created_at    TEXT NOT NULL    -- RFC 3339 UTC
);

-- Only the SHA-256 digest of a bearer token is kept.
CREATE TABLE IF NOT EXISTS sessions (
    token_digest TEXT PRIMARY KEY,
    user_id      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    issued_at    TEXT NOT NULL,
    expires_at   TEXT NOT NULL
);

-- The single portfolio header. The CHECK pins the key so a second row can
-- never be inserted.
CREATE TABLE IF NOT EXISTS header (
    id              INTEGER PRIMARY KEY CHECK (id = 1),
    owner_id        INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name            TEXT NOT NULL DEFAULT '',
    actual_position TEXT NOT NULL DEFAULT '',
    description     TEXT NOT NULL DEFAULT '',
    profile_picture TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    cellphone       TEXT NOT NULL DEFAULT '',
    location        TEXT NOT NULL DEFAULT '',
    github          TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS education (
    id         INTEGER PRIMARY KEY,
    owner_id   INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    degree     TEXT NOT NULL,
    university TEXT NOT NULL,
    start_date TEXT NOT NULL,   -- YYYY-MM-DD
    end_date   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS skills (
    id       INTEGER PRIMARY KEY,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name     TEXT NOT NULL,
    percent  INTEGER NOT NULL CHECK (percent BETWEEN 0 AND 100)
);

CREATE TABLE IF NOT EXISTS languages (
    id       INTEGER PRIMARY KEY,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS interests (
    id       INTEGER PRIMARY KEY,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS work_experiences (
    id         INTEGER PRIMARY KEY,
    owner_id   INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    position   TEXT NOT NULL,
    company    TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date   TEXT NOT NULL,
    location   TEXT NOT NULL
);

-- Reconciled as a set on every work-experience upsert that supplies a list.
CREATE TABLE IF NOT EXISTS achievements (
    id                 INTEGER PRIMARY KEY,
    work_experience_id INTEGER NOT NULL
                       REFERENCES work_experiences(id) ON DELETE CASCADE,
    description        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS archivements (
    id       INTEGER PRIMARY KEY,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name     TEXT NOT NULL,
    year     INTEGER NOT NULL CHECK (year > 0)
);

-- Links are global; votes are per user.
CREATE TABLE IF NOT EXISTS links (
    id          INTEGER PRIMARY KEY,
    url         TEXT NOT NULL,
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS votes (
    id      INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    link_id INTEGER NOT NULL REFERENCES links(id) ON DELETE CASCADE,
    UNIQUE (user_id, link_id)
);

CREATE INDEX IF NOT EXISTS education_owner_idx        ON education(owner_id);
CREATE INDEX IF NOT EXISTS skills_owner_idx           ON skills(owner_id);
CREATE INDEX IF NOT EXISTS languages_owner_idx        ON languages(owner_id);
CREATE INDEX IF NOT EXISTS interests_owner_idx        ON interests(owner_id);
CREATE INDEX IF NOT EXISTS work_experiences_owner_idx ON work_experiences(owner_id);
CREATE INDEX IF NOT EXISTS archivements_owner_idx     ON archivements(owner_id);
CREATE INDEX IF NOT EXISTS achievements_parent_idx    ON achievements(work_experience_id);
CREATE INDEX IF NOT EXISTS sessions_user_idx          ON sessions(user_id);

PRAGMA user_version = 1;
";
