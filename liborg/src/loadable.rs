use crate::{database::Database, error::Result};
use async_trait::async_trait;

/// A trait implemented by objects that live in a database table and are
/// addressable by a unique id
#[async_trait]
pub trait Loadable {
    type Id: Copy + PartialEq + Send + 'static;

    /// The sentinel id assigned to objects that have not been inserted into
    /// the database yet
    fn invalid_id() -> Self::Id;

    fn id(&self) -> Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// Load the object with the given id from the database
    async fn load(id: Self::Id, db: &Database) -> Result<Self>
    where
        Self: Sized;
}
