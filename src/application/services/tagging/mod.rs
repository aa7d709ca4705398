use uuid::Uuid;

use crate::application::ports::tagging_repository::TaggingRepository;

// Each step commits on its own. If linking fails after the client row was written,
// the client stays persisted with a partial or empty tag set.

/// Upserts `names` into the shared tag store and links every resulting tag to the client.
/// `names` must already be normalised (no blanks, no duplicates).
pub async fn link_client_tags<R: TaggingRepository + ?Sized>(
    repo: &R,
    client_id: Uuid,
    names: &[String],
) -> anyhow::Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    let tags = repo.upsert_tags(names).await?;
    let mut ids: Vec<i64> = Vec::with_capacity(tags.len());
    for (_, id) in tags {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    repo.associate_client_tags(client_id, &ids).await?;
    Ok(())
}

/// Drops every association of the client, then links `names` afresh.
/// An empty `names` leaves the client with no tags.
pub async fn replace_client_tags<R: TaggingRepository + ?Sized>(
    repo: &R,
    client_id: Uuid,
    names: &[String],
) -> anyhow::Result<()> {
    repo.clear_client_tags(client_id).await?;
    link_client_tags(repo, client_id, names).await
}
