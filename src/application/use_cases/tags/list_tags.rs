use crate::application::ports::tag_repository::TagRepository;

pub struct ListTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> ListTags<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<String>> {
        self.repo.list_names().await
    }
}
