//! [`SqliteStore`] — the SQLite implementation of [`ClinicStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use petclinic_core::{
  entity::{EntityId, PersonName},
  owner::Owner,
  pet::{Pet, PetType, Visit},
  store::{ClinicStore, Page, PageRequest},
  vet::{Specialty, Vet, Vets},
};

use crate::{
  encode::{decode_date, encode_date},
  schema::SCHEMA,
  Error, Result,
};

// ─── Raw rows ────────────────────────────────────────────────────────────────

// Aggregates cross the connection-thread boundary as plain strings; dates are
// decoded on the calling side where our error type is available.

struct RawOwner {
  id:         i64,
  first_name: String,
  last_name:  String,
  address:    String,
  city:       String,
  telephone:  String,
}

struct RawPet {
  id:         i64,
  name:       Option<String>,
  birth_date: Option<String>,
  type_id:    Option<i64>,
  type_name:  Option<String>,
}

struct RawVisit {
  id:          i64,
  date:        String,
  description: String,
}

struct RawAggregate {
  owner: RawOwner,
  pets:  Vec<(RawPet, Vec<RawVisit>)>,
}

impl RawAggregate {
  fn into_owner(self) -> Result<Owner> {
    let mut owner = Owner::default();
    owner.id = Some(self.owner.id);
    owner.name = PersonName::new(self.owner.first_name, self.owner.last_name);
    owner.address = self.owner.address;
    owner.city = self.owner.city;
    owner.telephone = self.owner.telephone;

    for (raw_pet, raw_visits) in self.pets {
      let mut visits = Vec::with_capacity(raw_visits.len());
      for raw in raw_visits {
        visits.push(Visit {
          id:          Some(raw.id),
          date:        decode_date(&raw.date)?,
          description: raw.description,
        });
      }

      owner.pets_mut().push(Pet {
        id:         Some(raw_pet.id),
        name:       raw_pet.name,
        birth_date: raw_pet.birth_date.as_deref().map(decode_date).transpose()?,
        kind:       raw_pet
          .type_id
          .map(|id| PetType { id: Some(id), name: raw_pet.type_name }),
        visits,
      });
    }

    Ok(owner)
  }
}

/// Load one owner aggregate (pets and visits in insertion order) on the
/// connection thread.
fn load_aggregate(
  conn: &rusqlite::Connection,
  owner_id: i64,
) -> rusqlite::Result<Option<RawAggregate>> {
  let owner: Option<RawOwner> = conn
    .query_row(
      "SELECT owner_id, first_name, last_name, address, city, telephone
       FROM owners WHERE owner_id = ?1",
      rusqlite::params![owner_id],
      |row| {
        Ok(RawOwner {
          id:         row.get(0)?,
          first_name: row.get(1)?,
          last_name:  row.get(2)?,
          address:    row.get(3)?,
          city:       row.get(4)?,
          telephone:  row.get(5)?,
        })
      },
    )
    .optional()?;

  let Some(owner) = owner else {
    return Ok(None);
  };

  let mut stmt = conn.prepare(
    "SELECT p.pet_id, p.name, p.birth_date, p.type_id, t.name
     FROM pets p
     LEFT JOIN pet_types t ON t.type_id = p.type_id
     WHERE p.owner_id = ?1
     ORDER BY p.pet_id",
  )?;
  let raw_pets = stmt
    .query_map(rusqlite::params![owner_id], |row| {
      Ok(RawPet {
        id:         row.get(0)?,
        name:       row.get(1)?,
        birth_date: row.get(2)?,
        type_id:    row.get(3)?,
        type_name:  row.get(4)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut pets = Vec::with_capacity(raw_pets.len());
  for raw_pet in raw_pets {
    let mut stmt = conn.prepare(
      "SELECT visit_id, visit_date, description
       FROM visits WHERE pet_id = ?1
       ORDER BY visit_id",
    )?;
    let visits = stmt
      .query_map(rusqlite::params![raw_pet.id], |row| {
        Ok(RawVisit {
          id:          row.get(0)?,
          date:        row.get(1)?,
          description: row.get(2)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    pets.push((raw_pet, visits));
  }

  Ok(Some(RawAggregate { owner, pets }))
}

/// Load a vet with its specialties sorted by name.
fn load_vet(
  conn: &rusqlite::Connection,
  vet_id: i64,
  name: PersonName,
) -> rusqlite::Result<Vet> {
  let mut vet = Vet::default();
  vet.id = Some(vet_id);
  vet.name = name;

  let mut stmt = conn.prepare(
    "SELECT s.specialty_id, s.name
     FROM specialties s
     JOIN vet_specialties vs ON vs.specialty_id = s.specialty_id
     WHERE vs.vet_id = ?1
     ORDER BY s.name",
  )?;
  let specialties = stmt
    .query_map(rusqlite::params![vet_id], |row| {
      Ok(Specialty { id: Some(row.get(0)?), name: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  for specialty in specialties {
    vet.add_specialty(specialty);
  }
  Ok(vet)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A clinic record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ClinicStore impl ────────────────────────────────────────────────────────

impl ClinicStore for SqliteStore {
  type Error = Error;

  // ── Owners ────────────────────────────────────────────────────────────────

  async fn save_owner(&self, mut owner: Owner) -> Result<Owner> {
    let owner = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let owner_id = match owner.id {
          None => {
            tx.execute(
              "INSERT INTO owners (first_name, last_name, address, city, telephone)
               VALUES (?1, ?2, ?3, ?4, ?5)",
              rusqlite::params![
                owner.name.first,
                owner.name.last,
                owner.address,
                owner.city,
                owner.telephone,
              ],
            )?;
            let id = tx.last_insert_rowid();
            owner.id = Some(id);
            id
          }
          Some(id) => {
            tx.execute(
              "UPDATE owners
               SET first_name = ?1, last_name = ?2, address = ?3,
                   city = ?4, telephone = ?5
               WHERE owner_id = ?6",
              rusqlite::params![
                owner.name.first,
                owner.name.last,
                owner.address,
                owner.city,
                owner.telephone,
                id,
              ],
            )?;
            id
          }
        };

        for pet in owner.pets_mut() {
          let type_id = pet.kind.as_ref().and_then(|k| k.id);
          let birth_date = pet.birth_date.map(encode_date);

          let pet_id = match pet.id {
            None => {
              tx.execute(
                "INSERT INTO pets (owner_id, name, birth_date, type_id)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![owner_id, pet.name, birth_date, type_id],
              )?;
              let id = tx.last_insert_rowid();
              pet.id = Some(id);
              id
            }
            Some(id) => {
              tx.execute(
                "UPDATE pets
                 SET name = ?1, birth_date = ?2, type_id = ?3
                 WHERE pet_id = ?4 AND owner_id = ?5",
                rusqlite::params![pet.name, birth_date, type_id, id, owner_id],
              )?;
              id
            }
          };

          // Visits are append-only; rows that already have an id are final.
          for visit in &mut pet.visits {
            if visit.is_new() {
              tx.execute(
                "INSERT INTO visits (pet_id, visit_date, description)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![
                  pet_id,
                  encode_date(visit.date),
                  visit.description,
                ],
              )?;
              visit.id = Some(tx.last_insert_rowid());
            }
          }
        }

        tx.commit()?;
        Ok(owner)
      })
      .await?;

    Ok(owner)
  }

  async fn find_owner(&self, id: EntityId) -> Result<Option<Owner>> {
    let raw = self.conn.call(move |conn| Ok(load_aggregate(conn, id)?)).await?;
    raw.map(RawAggregate::into_owner).transpose()
  }

  async fn find_owners_by_last_name(
    &self,
    last_name: &str,
    page: PageRequest,
  ) -> Result<Page<Owner>> {
    let pattern = format!("{last_name}%");
    let limit = i64::from(page.size);
    let offset = page.offset() as i64;

    let (raws, total): (Vec<RawAggregate>, u64) = self
      .conn
      .call(move |conn| {
        let total: u64 = conn.query_row(
          "SELECT COUNT(*) FROM owners WHERE last_name LIKE ?1",
          rusqlite::params![pattern],
          |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
          "SELECT owner_id FROM owners
           WHERE last_name LIKE ?1
           ORDER BY owner_id
           LIMIT ?2 OFFSET ?3",
        )?;
        let ids = stmt
          .query_map(rusqlite::params![pattern, limit, offset], |row| {
            row.get::<_, i64>(0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut raws = Vec::with_capacity(ids.len());
        for id in ids {
          if let Some(raw) = load_aggregate(conn, id)? {
            raws.push(raw);
          }
        }
        Ok((raws, total))
      })
      .await?;

    let owners = raws
      .into_iter()
      .map(RawAggregate::into_owner)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page::new(owners, page, total))
  }

  async fn count_owners(&self) -> Result<u64> {
    let count = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM owners", [], |row| row.get(0))?)
      })
      .await?;
    Ok(count)
  }

  async fn delete_all_owners(&self) -> Result<()> {
    // Pets and visits cascade from the owner rows.
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM owners", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Pet types ─────────────────────────────────────────────────────────────

  async fn save_pet_type(&self, mut kind: PetType) -> Result<PetType> {
    let kind = self
      .conn
      .call(move |conn| {
        match kind.id {
          None => {
            conn.execute(
              "INSERT INTO pet_types (name) VALUES (?1)",
              rusqlite::params![kind.name],
            )?;
            kind.id = Some(conn.last_insert_rowid());
          }
          Some(id) => {
            conn.execute(
              "UPDATE pet_types SET name = ?1 WHERE type_id = ?2",
              rusqlite::params![kind.name, id],
            )?;
          }
        }
        Ok(kind)
      })
      .await?;
    Ok(kind)
  }

  async fn find_pet_types(&self) -> Result<Vec<PetType>> {
    let types = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT type_id, name FROM pet_types ORDER BY name")?;
        let types = stmt
          .query_map([], |row| {
            Ok(PetType { id: Some(row.get(0)?), name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(types)
      })
      .await?;
    Ok(types)
  }

  async fn delete_all_pet_types(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM pet_types", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Vets ──────────────────────────────────────────────────────────────────

  async fn save_vet(&self, vet: Vet) -> Result<Vet> {
    let saved = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let vet_id = match vet.id {
          None => {
            tx.execute(
              "INSERT INTO vets (first_name, last_name) VALUES (?1, ?2)",
              rusqlite::params![vet.name.first, vet.name.last],
            )?;
            tx.last_insert_rowid()
          }
          Some(id) => {
            tx.execute(
              "UPDATE vets SET first_name = ?1, last_name = ?2
               WHERE vet_id = ?3",
              rusqlite::params![vet.name.first, vet.name.last, id],
            )?;
            id
          }
        };

        for specialty in vet.specialties() {
          let specialty_id = match specialty.id {
            None => {
              tx.execute(
                "INSERT INTO specialties (name) VALUES (?1)",
                rusqlite::params![specialty.name],
              )?;
              tx.last_insert_rowid()
            }
            Some(id) => id,
          };
          tx.execute(
            "INSERT OR IGNORE INTO vet_specialties (vet_id, specialty_id)
             VALUES (?1, ?2)",
            rusqlite::params![vet_id, specialty_id],
          )?;
        }

        let saved = load_vet(&tx, vet_id, vet.name.clone())?;
        tx.commit()?;
        Ok(saved)
      })
      .await?;
    Ok(saved)
  }

  async fn find_vets(&self, page: PageRequest) -> Result<Page<Vet>> {
    let limit = i64::from(page.size);
    let offset = page.offset() as i64;

    let (vets, total): (Vec<Vet>, u64) = self
      .conn
      .call(move |conn| {
        let total: u64 =
          conn.query_row("SELECT COUNT(*) FROM vets", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(
          "SELECT vet_id, first_name, last_name FROM vets
           ORDER BY vet_id
           LIMIT ?1 OFFSET ?2",
        )?;
        let heads = stmt
          .query_map(rusqlite::params![limit, offset], |row| {
            Ok((
              row.get::<_, i64>(0)?,
              PersonName::new(
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
              ),
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut vets = Vec::with_capacity(heads.len());
        for (id, name) in heads {
          vets.push(load_vet(conn, id, name)?);
        }
        Ok((vets, total))
      })
      .await?;

    Ok(Page::new(vets, page, total))
  }

  async fn find_all_vets(&self) -> Result<Vets> {
    let vets = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT vet_id, first_name, last_name FROM vets ORDER BY vet_id",
        )?;
        let heads = stmt
          .query_map([], |row| {
            Ok((
              row.get::<_, i64>(0)?,
              PersonName::new(
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
              ),
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut vets = Vec::with_capacity(heads.len());
        for (id, name) in heads {
          vets.push(load_vet(conn, id, name)?);
        }
        Ok(vets)
      })
      .await?;

    Ok(Vets::new(vets))
  }
}
