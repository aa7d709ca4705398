use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::domain::clients::client::{
    Client, ClientFields, ClientFilter, ClientQuery, SortField,
};

#[derive(Debug, Clone)]
struct ClientRow {
    id: Uuid,
    fields: ClientFields,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Default)]
struct State {
    clients: HashMap<Uuid, ClientRow>,
    // name -> id; the map key is the unique conflict key
    tags: BTreeMap<String, i64>,
    next_tag_id: i64,
    client_tags: BTreeSet<(Uuid, i64)>,
}

impl State {
    fn tag_names_for(&self, client_id: Uuid) -> Vec<String> {
        let ids: Vec<i64> = self
            .client_tags
            .range((client_id, i64::MIN)..=(client_id, i64::MAX))
            .map(|(_, tag_id)| *tag_id)
            .collect();
        self.tags
            .iter()
            .filter(|(_, id)| ids.contains(id))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn to_client(&self, row: &ClientRow) -> Client {
        Client {
            id: row.id,
            full_name: row.fields.full_name.clone(),
            email: row.fields.email.clone(),
            phone_number: row.fields.phone_number.clone(),
            address: row.fields.address.clone(),
            profile_picture_url: row.fields.profile_picture_url.clone(),
            internal_notes: row.fields.internal_notes.clone(),
            registration_date: row.created_at,
            tags: self.tag_names_for(row.id),
        }
    }

    fn matches(row: &ClientRow, filter: &ClientFilter) -> bool {
        match filter {
            ClientFilter::All => true,
            ClientFilter::Ids(ids) => ids.contains(&row.id),
            ClientFilter::Text(q) => {
                let q = q.to_lowercase();
                row.fields.full_name.to_lowercase().contains(&q)
                    || row.fields.email.to_lowercase().contains(&q)
            }
        }
    }
}

fn compare(a: &ClientRow, b: &ClientRow, field: SortField) -> Ordering {
    match field {
        SortField::FullName => a.fields.full_name.cmp(&b.fields.full_name),
        SortField::Email => a.fields.email.cmp(&b.fields.email),
        SortField::PhoneNumber => a.fields.phone_number.cmp(&b.fields.phone_number),
        SortField::Address => a.fields.address.cmp(&b.fields.address),
        SortField::RegistrationDate => a.created_at.cmp(&b.created_at),
    }
}

/// In-process store with the same observable semantics as the remote one:
/// unique tag names, cascading association removal, intersection tag lookup.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn tag_row_count(&self, name: &str) -> usize {
        usize::from(self.state.lock().await.tags.contains_key(name))
    }

    pub async fn association_count(&self, client_id: Uuid) -> usize {
        let st = self.state.lock().await;
        st.client_tags
            .iter()
            .filter(|(cid, _)| *cid == client_id)
            .count()
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn find_ids_with_all_tags(&self, tag_names: &[String]) -> anyhow::Result<Vec<Uuid>> {
        let st = self.state.lock().await;
        let mut wanted: Vec<i64> = Vec::with_capacity(tag_names.len());
        for name in tag_names {
            match st.tags.get(name) {
                Some(id) => wanted.push(*id),
                // an unknown tag can't be carried by anyone
                None => return Ok(Vec::new()),
            }
        }
        Ok(st
            .clients
            .keys()
            .filter(|cid| {
                wanted
                    .iter()
                    .all(|tid| st.client_tags.contains(&(**cid, *tid)))
            })
            .copied()
            .collect())
    }

    async fn query(&self, query: &ClientQuery) -> anyhow::Result<(Vec<Client>, Option<i64>)> {
        let st = self.state.lock().await;
        let mut rows: Vec<&ClientRow> = st
            .clients
            .values()
            .filter(|r| State::matches(r, &query.filter))
            .collect();
        rows.sort_by(|a, b| {
            let ord = compare(a, b, query.sort.field).then_with(|| a.id.cmp(&b.id));
            if query.sort.ascending() { ord } else { ord.reverse() }
        });
        let total = rows.len() as i64;
        let content = rows
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .map(|r| st.to_client(r))
            .collect();
        Ok((content, Some(total)))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        let st = self.state.lock().await;
        Ok(st.clients.get(&id).map(|r| st.to_client(r)))
    }

    async fn insert(&self, fields: &ClientFields) -> anyhow::Result<Client> {
        let mut st = self.state.lock().await;
        let row = ClientRow {
            id: Uuid::new_v4(),
            fields: fields.clone(),
            created_at: chrono::Utc::now(),
        };
        let client = st.to_client(&row);
        st.clients.insert(row.id, row);
        Ok(client)
    }

    async fn update(&self, id: Uuid, fields: &ClientFields) -> anyhow::Result<Option<Client>> {
        let mut st = self.state.lock().await;
        let Some(row) = st.clients.get_mut(&id) else {
            return Ok(None);
        };
        row.fields = fields.clone();
        let row = row.clone();
        Ok(Some(st.to_client(&row)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().await;
        if st.clients.remove(&id).is_none() {
            return Ok(false);
        }
        st.client_tags.retain(|(cid, _)| *cid != id);
        Ok(true)
    }
}

#[async_trait]
impl TaggingRepository for MemoryStore {
    async fn upsert_tags(&self, names: &[String]) -> anyhow::Result<Vec<(String, i64)>> {
        let mut st = self.state.lock().await;
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let id = match st.tags.get(name) {
                Some(id) => *id,
                None => {
                    st.next_tag_id += 1;
                    let id = st.next_tag_id;
                    st.tags.insert(name.clone(), id);
                    id
                }
            };
            out.push((name.clone(), id));
        }
        Ok(out)
    }

    async fn clear_client_tags(&self, client_id: Uuid) -> anyhow::Result<()> {
        let mut st = self.state.lock().await;
        st.client_tags.retain(|(cid, _)| *cid != client_id);
        Ok(())
    }

    async fn associate_client_tags(&self, client_id: Uuid, tag_ids: &[i64]) -> anyhow::Result<()> {
        let mut st = self.state.lock().await;
        if !st.clients.contains_key(&client_id) {
            anyhow::bail!("client {client_id} does not exist");
        }
        for tag_id in tag_ids {
            if !st.tags.values().any(|id| id == tag_id) {
                anyhow::bail!("tag {tag_id} does not exist");
            }
            if !st.client_tags.insert((client_id, *tag_id)) {
                anyhow::bail!("duplicate association ({client_id}, {tag_id})");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list_names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.state.lock().await.tags.keys().cloned().collect())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.state.lock().await.tags.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_reuses_existing_ids() {
        let store = MemoryStore::new();
        let first = store.upsert_tags(&["studio".into()]).await.unwrap();
        let again = store
            .upsert_tags(&["wedding".into(), "studio".into()])
            .await
            .unwrap();
        assert_eq!(again[1].1, first[0].1);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unknown_tag_matches_nobody() {
        let store = MemoryStore::new();
        store.insert(&ClientFields::default()).await.unwrap();
        let ids = store
            .find_ids_with_all_tags(&["ghost".into()])
            .await
            .unwrap();
        assert!(ids.is_empty());
    }
}
