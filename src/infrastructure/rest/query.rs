use uuid::Uuid;

use crate::domain::clients::client::{ClientFilter, ClientQuery};

pub const CLIENT_SELECT: &str = "*,tags(name)";

/// Query-string pairs for one page of the client list.
pub fn list_params(q: &ClientQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), CLIENT_SELECT.to_string())];
    match &q.filter {
        ClientFilter::All => {}
        ClientFilter::Ids(ids) => params.push(("id".into(), in_list(ids))),
        ClientFilter::Text(text) => params.push(("or".into(), name_or_email_contains(text))),
    }
    let dir = if q.sort.ascending() { "asc" } else { "desc" };
    // id breaks ties so offset paging stays stable
    params.push((
        "order".into(),
        format!("{}.{dir},id.{dir}", q.sort.field.column()),
    ));
    params.push(("offset".into(), q.offset.to_string()));
    params.push(("limit".into(), q.limit.to_string()));
    params
}

pub fn eq(id: Uuid) -> String {
    format!("eq.{id}")
}

pub fn in_list(ids: &[Uuid]) -> String {
    let joined: Vec<String> = ids.iter().map(Uuid::to_string).collect();
    format!("in.({})", joined.join(","))
}

/// Case-insensitive infix match on name or email. `imatch` with a fully escaped pattern,
/// since PostgREST turns `*` into `%` in `ilike` values.
pub fn name_or_email_contains(text: &str) -> String {
    let pattern = quote(&regex::escape(text));
    format!("(full_name.imatch.{pattern},email.imatch.{pattern})")
}

// Double-quoted so commas and parentheses don't break the or=() grammar
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Total from a `Content-Range` header (`0-9/42`, `*/0`); `None` when the total is `*`.
pub fn content_range_total(header: &str) -> Option<i64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}
