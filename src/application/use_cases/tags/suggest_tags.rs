use crate::application::ports::tag_repository::TagRepository;

pub struct SuggestTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> SuggestTags<'a, R> {
    /// Directory names containing `input` (case-insensitive) that are not already selected.
    pub async fn execute(&self, input: &str, selected: &[String]) -> anyhow::Result<Vec<String>> {
        // matched as typed: a trailing space narrows to names containing one
        let needle = input.to_lowercase();
        if needle.trim().is_empty() {
            return Ok(Vec::new());
        }
        let names = self.repo.list_names().await?;
        Ok(names
            .into_iter()
            .filter(|n| n.to_lowercase().contains(&needle))
            .filter(|n| !selected.contains(n))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::clients::test_support::seed;
    use crate::application::use_cases::tags::list_tags::ListTags;
    use crate::infrastructure::memory::MemoryStore;

    #[tokio::test]
    async fn suggests_unselected_matches_ignoring_case() {
        let store = MemoryStore::new();
        seed(&store, "Ana", &["Wedding", "studio", "wed-2025"]).await;
        let uc = SuggestTags { repo: &store };
        let out = uc.execute("WED", &["wed-2025".to_string()]).await.unwrap();
        assert_eq!(out, vec!["Wedding"]);
        assert!(uc.execute("   ", &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn input_is_matched_untrimmed() {
        let store = MemoryStore::new();
        seed(&store, "Ana", &["wedding", "wed day"]).await;
        let uc = SuggestTags { repo: &store };
        assert_eq!(uc.execute("wed ", &[]).await.unwrap(), vec!["wed day"]);
        assert_eq!(uc.execute(" day", &[]).await.unwrap(), vec!["wed day"]);
    }

    #[tokio::test]
    async fn directory_is_sorted_by_name() {
        let store = MemoryStore::new();
        seed(&store, "Ana", &["wedding", "studio"]).await;
        seed(&store, "Beto", &["newborn"]).await;
        let all = ListTags { repo: &store }.execute().await.unwrap();
        assert_eq!(all, vec!["newborn", "studio", "wedding"]);
    }
}
