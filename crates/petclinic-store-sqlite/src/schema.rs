//! SQL schema for the clinic SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS owners (
    owner_id   INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    address    TEXT NOT NULL,
    city       TEXT NOT NULL,
    telephone  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pet_types (
    type_id INTEGER PRIMARY KEY,
    name    TEXT
);

-- Pets belong to exactly one owner; the owner row is the aggregate root and
-- deleting it takes the pets (and their visits) with it.
CREATE TABLE IF NOT EXISTS pets (
    pet_id     INTEGER PRIMARY KEY,
    owner_id   INTEGER NOT NULL REFERENCES owners(owner_id) ON DELETE CASCADE,
    name       TEXT,
    birth_date TEXT,            -- ISO 8601 calendar date or NULL
    type_id    INTEGER REFERENCES pet_types(type_id)
);

CREATE TABLE IF NOT EXISTS visits (
    visit_id    INTEGER PRIMARY KEY,
    pet_id      INTEGER NOT NULL REFERENCES pets(pet_id) ON DELETE CASCADE,
    visit_date  TEXT NOT NULL,  -- ISO 8601 calendar date
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vets (
    vet_id     INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS specialties (
    specialty_id INTEGER PRIMARY KEY,
    name         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vet_specialties (
    vet_id       INTEGER NOT NULL REFERENCES vets(vet_id) ON DELETE CASCADE,
    specialty_id INTEGER NOT NULL REFERENCES specialties(specialty_id),
    PRIMARY KEY (vet_id, specialty_id)
);

CREATE INDEX IF NOT EXISTS pets_owner_idx       ON pets(owner_id);
CREATE INDEX IF NOT EXISTS visits_pet_idx       ON visits(pet_id);
CREATE INDEX IF NOT EXISTS owners_last_name_idx ON owners(last_name);

PRAGMA user_version = 1;
";
