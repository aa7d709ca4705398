use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::clients::client::{Client, ClientFields};

/// A `clients` row as the store returns it, optionally with the embedded `tags(name)` relation.
#[derive(Debug, Deserialize)]
pub struct ClientRow {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub tags: Option<Vec<TagNameRow>>,
}

impl From<ClientRow> for Client {
    fn from(r: ClientRow) -> Self {
        Client {
            id: r.id,
            full_name: r.full_name.unwrap_or_default(),
            email: r.email.unwrap_or_default(),
            phone_number: r.phone_number.unwrap_or_default(),
            address: r.address.unwrap_or_default(),
            profile_picture_url: r.profile_picture_url.unwrap_or_default(),
            internal_notes: r.internal_notes.unwrap_or_default(),
            registration_date: r.created_at,
            tags: r
                .tags
                .map(|ts| ts.into_iter().map(|t| t.name).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientWriteRow<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub address: &'a str,
    pub profile_picture_url: &'a str,
    pub internal_notes: &'a str,
}

impl<'a> From<&'a ClientFields> for ClientWriteRow<'a> {
    fn from(f: &'a ClientFields) -> Self {
        ClientWriteRow {
            full_name: &f.full_name,
            email: &f.email,
            phone_number: &f.phone_number,
            address: &f.address,
            profile_picture_url: &f.profile_picture_url,
            internal_notes: &f.internal_notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TagNameRow {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TagRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct NewTagRow<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ClientTagRow {
    pub client_id: Uuid,
    pub tag_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ClientIdRow {
    pub client_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_maps_storage_names_and_flattens_tags() {
        let id = Uuid::new_v4();
        let row: ClientRow = serde_json::from_value(json!({
            "id": id,
            "full_name": "Ana",
            "email": "ana@example.com",
            "phone_number": "555",
            "address": null,
            "profile_picture_url": "https://img/ana.png",
            "internal_notes": "vip since 2020",
            "created_at": "2024-03-01T10:00:00Z",
            "tags": [{"name": "vip"}, {"name": "studio"}]
        }))
        .unwrap();
        let c = Client::from(row);
        assert_eq!(c.id, id);
        assert_eq!(c.full_name, "Ana");
        assert_eq!(c.address, "");
        assert_eq!(c.profile_picture_url, "https://img/ana.png");
        assert_eq!(c.internal_notes, "vip since 2020");
        assert_eq!(c.registration_date.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(c.tags, vec!["vip", "studio"]);
    }

    #[test]
    fn absent_tag_relation_is_empty() {
        let row: ClientRow = serde_json::from_value(json!({
            "id": Uuid::nil(),
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert!(Client::from(row).tags.is_empty());
    }

    #[test]
    fn write_row_uses_storage_names() {
        let fields = ClientFields {
            full_name: "Beto".into(),
            phone_number: "555".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(ClientWriteRow::from(&fields)).unwrap();
        assert_eq!(v["full_name"], "Beto");
        assert_eq!(v["phone_number"], "555");
        assert!(v.get("fullName").is_none());
        assert!(v.get("id").is_none());
        assert!(v.get("created_at").is_none());
    }
}
