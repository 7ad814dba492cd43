use std::sync::Arc;

use confcat_core::error::Result;
use confcat_core::session::TagRepository;

use crate::dto::TagDto;

/// Read access to the tag vocabulary.
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// All tags, sorted by name.
    pub async fn list_tags(&self) -> Result<Vec<TagDto>> {
        let tags = self.tags.list_all().await?;
        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    /// Looks a tag up by name, ignoring case.
    pub async fn get_tag_by_name(&self, name: &str) -> Result<Option<TagDto>> {
        Ok(self.tags.find_by_name(name).await?.map(TagDto::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confcat_core::session::Tag;
    use confcat_infrastructure::InMemoryCatalog;

    #[tokio::test]
    async fn test_list_and_lookup() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.insert_tag(Tag::new("serverless")).await;
        catalog.insert_tag(Tag::new("aws")).await;
        let service = TagService::new(catalog);

        let names: Vec<_> = service
            .list_tags()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["aws", "serverless"]);

        let found = service.get_tag_by_name("AWS").await.unwrap().unwrap();
        assert_eq!(found.name, "aws");
        assert!(service.get_tag_by_name("cobol").await.unwrap().is_none());
    }
}
