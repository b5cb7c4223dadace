use mongodb::bson::{Bson, doc};

use super::ConnectionRegistry;
use crate::error::RegistryError;

impl ConnectionRegistry {
    /// Returns `field` from the first document whose `key` equals `value`.
    ///
    /// `Ok(None)` when no document matches or the document lacks the field;
    /// absence is a normal outcome here. An unknown collection name is an
    /// error, since the map is fixed at connect time.
    pub async fn get_from_document(
        &self,
        key: &str,
        value: &str,
        collection: &str,
        field: &str,
    ) -> Result<Option<Bson>, RegistryError> {
        let handle = self.collections.get(collection).ok_or_else(|| {
            RegistryError::UnknownCollection {
                name: collection.to_string(),
            }
        })?;

        let document = handle.find_one(doc! { key: value }).await?;
        Ok(document.and_then(|d| d.get(field).cloned()))
    }

    /// Sets `field` to `field_value` on the first document whose `key` equals
    /// `value`, leaving sibling fields untouched.
    ///
    /// A zero-match lookup returns `Ok(())` without touching the database.
    pub async fn set_in_document(
        &self,
        key: &str,
        value: &str,
        collection: &str,
        field: &str,
        field_value: impl Into<Bson>,
    ) -> Result<(), RegistryError> {
        let handle = self.collections.get(collection).ok_or_else(|| {
            RegistryError::UnknownCollection {
                name: collection.to_string(),
            }
        })?;

        let Some(document) = handle.find_one(doc! { key: value }).await? else {
            return Ok(());
        };

        handle
            .update_one(document, doc! { "$set": { field: field_value.into() } })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConnectionRegistry, RegistryConfig, RegistryError};

    #[tokio::test]
    async fn get_on_unknown_collection_is_an_error() {
        let registry =
            ConnectionRegistry::new(RegistryConfig::new("localhost", "app", "alice", "secret"));

        let err = registry
            .get_from_document("uuid", "abc", "users", "nickname")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownCollection { ref name } if name == "users"
        ));
    }

    #[tokio::test]
    async fn set_on_unknown_collection_is_an_error() {
        let registry =
            ConnectionRegistry::new(RegistryConfig::new("localhost", "app", "alice", "secret"));

        let err = registry
            .set_in_document("uuid", "abc", "users", "nickname", "Bob")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownCollection { .. }));
    }
}
