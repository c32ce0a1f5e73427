//! Objects to manage the geolocated sites that belong to an organisation
use crate::{
    database::Database,
    error::{Error, Result},
    loadable::Loadable,
    query::{Cmp, CompoundFilter, DynFilterPart, FilterPart, Op},
};
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use sqlx::QueryBuilder;
use sqlx::Sqlite;
use sqlx::sqlite::SqliteQueryResult;

/// A rectangular query filter over the coordinates of a location. All four
/// bounds are inclusive, and no check is made that a minimum is below its
/// maximum; an inverted box simply matches nothing.
///
/// The `x` bounds are compared against latitude and the `y` bounds against
/// longitude. Existing clients of this service established that mapping, so it
/// is kept even though maps conventionally put x on the east-west axis.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// A type for specifying fields that can be used for filtering a database query
/// for locations
#[derive(Clone)]
pub enum Filter {
    /// Match the ID of the location to the given value
    Id(i64),

    /// Match the id of the location's organisation to the given value
    OrganisationId(i64),

    /// Compare the name of the location to the given value
    Name(Cmp, String),

    /// Match locations whose coordinates fall within the given box
    Bounds(BoundingBox),
}

impl FilterPart for Filter {
    fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>) {
        match self {
            Self::Id(id) => _ = builder.push(" L.locid = ").push_bind(*id),
            Self::OrganisationId(id) => _ = builder.push(" L.orgid = ").push_bind(*id),
            Self::Name(cmp, frag) => {
                let s = match cmp {
                    Cmp::Like => format!("%{frag}%"),
                    _ => frag.to_string(),
                };
                builder.push(" L.locname ").push(cmp).push_bind(s);
            }
            Self::Bounds(b) => {
                builder
                    .push(" (L.latitude ")
                    .push(Cmp::NotLessThan)
                    .push_bind(b.x_min)
                    .push(" AND L.latitude ")
                    .push(Cmp::NotGreaterThan)
                    .push_bind(b.x_max)
                    .push(" AND L.longitude ")
                    .push(Cmp::NotLessThan)
                    .push_bind(b.y_min)
                    .push(" AND L.longitude ")
                    .push(Cmp::NotGreaterThan)
                    .push_bind(b.y_max)
                    .push(")");
            }
        }
    }
}

/// A data type that represents a geocoded site belonging to exactly one
/// organisation
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Location {
    /// A unique ID that identifies this location in the database
    #[sqlx(rename = "locid")]
    pub id: i64,

    /// The organisation that this location belongs to. The database refuses
    /// rows that reference an organisation that does not exist.
    #[sqlx(rename = "orgid")]
    pub organisation_id: i64,

    /// The name of the location
    #[sqlx(rename = "locname")]
    #[serde(rename = "location_name")]
    pub name: String,

    /// Latitude of the site in degrees, nominally within [-90, 90]
    pub latitude: f64,

    /// Longitude of the site in degrees, nominally within [-180, 180]
    pub longitude: f64,
}

#[async_trait]
impl Loadable for Location {
    type Id = i64;

    fn invalid_id() -> Self::Id {
        -1
    }

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id
    }

    async fn load(id: Self::Id, db: &Database) -> Result<Self> {
        Self::build_query(Some(Filter::Id(id).into()))
            .build_query_as()
            .fetch_one(db.pool())
            .await
            .map_err(|e| e.into())
    }
}

impl Location {
    fn build_query(filter: Option<DynFilterPart>) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(
            "SELECT L.locid, L.orgid, L.locname, L.latitude, L.longitude FROM om_locations L",
        );
        if let Some(f) = filter {
            qb.push(" WHERE ");
            f.add_to_query(&mut qb);
        }
        qb.push(" ORDER BY locname ASC");
        qb
    }

    /// Loads all matching locations from the database
    pub async fn load_all(filter: Option<DynFilterPart>, db: &Database) -> Result<Vec<Location>> {
        Self::build_query(filter)
            .build_query_as()
            .fetch_all(db.pool())
            .await
            .map_err(|e| e.into())
    }

    /// Loads all matching locations that belong to the given organisation
    pub async fn load_all_organisation(
        organisation_id: i64,
        filter: Option<DynFilterPart>,
        db: &Database,
    ) -> Result<Vec<Location>> {
        let mut fbuilder =
            CompoundFilter::builder(Op::And).push(Filter::OrganisationId(organisation_id));
        if let Some(f) = filter {
            fbuilder = fbuilder.push(f);
        }
        Self::load_all(Some(fbuilder.build()), db).await
    }

    /// Add this location to the database. If this call completes successfully,
    /// the id of this object will be updated to the ID of the inserted row in
    /// the database. Fails with a foreign key violation if the organisation
    /// does not exist.
    pub async fn insert(&mut self, db: &Database) -> Result<SqliteQueryResult> {
        if self.id != Self::invalid_id() {
            return Err(Error::InvalidInsertObjectAlreadyExists(self.id));
        }

        sqlx::query(
            "INSERT INTO om_locations (orgid, locname, latitude, longitude) VALUES (?, ?, ?, ?)",
        )
        .bind(self.organisation_id)
        .bind(&self.name)
        .bind(self.latitude)
        .bind(self.longitude)
        .execute(db.pool())
        .await
        .inspect(|r| self.id = r.last_insert_rowid())
        .map_err(|e| e.into())
    }

    /// Creates a new location object with the given data. It will initially
    /// have an invalid ID until it is inserted into the database
    pub fn new(name: String, latitude: f64, longitude: f64, organisation_id: i64) -> Self {
        Self {
            id: Self::invalid_id(),
            organisation_id,
            name,
            latitude,
            longitude,
        }
    }
}
