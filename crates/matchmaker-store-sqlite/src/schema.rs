//! SQL schema for the matchmaking SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS actors (
    actor_id      TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    display_name  TEXT NOT NULL DEFAULT '',
    role          TEXT NOT NULL CHECK (role IN ('SEEKER', 'CATALYST')),
    created_at    TEXT NOT NULL
);

-- One row per actor, created in the same transaction as the actor.
CREATE TABLE IF NOT EXISTS profiles (
    actor_id         TEXT PRIMARY KEY REFERENCES actors(actor_id) ON DELETE CASCADE,
    bio              TEXT NOT NULL DEFAULT '',
    bio_short        TEXT NOT NULL DEFAULT '',
    is_active        INTEGER NOT NULL DEFAULT 1,
    latitude         REAL,
    longitude        REAL,
    address          TEXT NOT NULL DEFAULT '',
    hourly_rate      TEXT,                          -- decimal text or NULL
    specializations  TEXT NOT NULL DEFAULT '[]',    -- JSON array
    preferences      TEXT NOT NULL DEFAULT '{}',    -- JSON object
    average_rating   TEXT NOT NULL DEFAULT '0.00',  -- derived from ratings
    rating_count     INTEGER NOT NULL DEFAULT 0,    -- derived from ratings
    CHECK ((latitude IS NULL) = (longitude IS NULL))
);

-- Only the SHA-256 digest of an API token is ever stored.
CREATE TABLE IF NOT EXISTS tokens (
    token_digest  TEXT PRIMARY KEY,
    actor_id      TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS services (
    service_id        TEXT PRIMARY KEY,
    catalyst_id       TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    name              TEXT NOT NULL,
    description       TEXT NOT NULL DEFAULT '',
    price             TEXT NOT NULL,
    duration_minutes  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS bookings (
    booking_id          TEXT PRIMARY KEY,
    seeker_id           TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    catalyst_id         TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    service_id          TEXT REFERENCES services(service_id) ON DELETE SET NULL,
    status              TEXT NOT NULL
                        CHECK (status IN ('REQUESTED', 'CONFIRMED', 'COMPLETED', 'CANCELLED')),
    scheduled_time      TEXT NOT NULL,
    notes               TEXT NOT NULL DEFAULT '',
    seeker_preferences  TEXT NOT NULL DEFAULT '{}',
    created_at          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ratings (
    rating_id    TEXT PRIMARY KEY,
    seeker_id    TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    catalyst_id  TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    booking_id   TEXT REFERENCES bookings(booking_id) ON DELETE CASCADE,
    rating       INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    review       TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL,
    UNIQUE (seeker_id, catalyst_id, booking_id)
);

CREATE TABLE IF NOT EXISTS messages (
    message_id  TEXT PRIMARY KEY,
    booking_id  TEXT NOT NULL REFERENCES bookings(booking_id) ON DELETE CASCADE,
    sender_id   TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    content     TEXT NOT NULL,
    timestamp   TEXT NOT NULL,
    is_read     INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS tokens_actor_idx       ON tokens(actor_id);
CREATE INDEX IF NOT EXISTS services_catalyst_idx  ON services(catalyst_id);
CREATE INDEX IF NOT EXISTS bookings_seeker_idx    ON bookings(seeker_id);
CREATE INDEX IF NOT EXISTS bookings_catalyst_idx  ON bookings(catalyst_id);
CREATE INDEX IF NOT EXISTS ratings_catalyst_idx   ON ratings(catalyst_id);
CREATE INDEX IF NOT EXISTS ratings_seeker_idx     ON ratings(seeker_id);
CREATE INDEX IF NOT EXISTS messages_booking_idx   ON messages(booking_id, timestamp);

PRAGMA user_version = 1;
";
