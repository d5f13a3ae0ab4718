use async_trait::async_trait;
use diesel::result;

/// Common CRUD surface shared by every entity repo. `NewItem` and
/// `UpdateForm` are generic over a lifetime so repos can borrow from
/// request payloads instead of cloning them.
#[async_trait]
pub trait Repository {
    type Id;
    type Item;
    type NewItem<'a>: Send;
    type UpdateForm<'a>: Send;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error>;

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error>;

    async fn add(&self, item: Self::NewItem<'_>) -> Result<(), result::Error>;

    async fn update(&self, id: Self::Id, form: Self::UpdateForm<'_>) -> Result<(), result::Error>;

    /// Idempotent: reports whether a row was actually deleted.
    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error>;
}
