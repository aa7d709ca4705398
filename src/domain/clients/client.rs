use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub profile_picture_url: String,
    pub internal_notes: String,
    pub registration_date: chrono::DateTime<chrono::Utc>,
    pub tags: Vec<String>,
}

/// Scalar fields written on create/update. Identity and registration date are store-assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFields {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub profile_picture_url: String,
    pub internal_notes: String,
}

/// Write payload: scalar fields plus the tag names the client should carry afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub fields: ClientFields,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl ClientFields {
    /// Copy with surrounding whitespace stripped from every field, as stored.
    pub fn normalized(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            address: self.address.trim().to_string(),
            profile_picture_url: self.profile_picture_url.trim().to_string(),
            internal_notes: self.internal_notes.trim().to_string(),
        }
    }
}

impl ClientDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let f = &self.fields;
        if f.full_name.trim().is_empty() {
            errors.push(FieldError::new("fullName", "Name is required"));
        }
        if f.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !EMAIL_RE.is_match(f.email.trim()) {
            errors.push(FieldError::new("email", "Please enter a valid email format."));
        }
        if f.phone_number.trim().is_empty() {
            errors.push(FieldError::new("phoneNumber", "Phone is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn tag_names(&self) -> Vec<String> {
        normalize_tag_names(&self.tags)
    }
}

/// Trims names, drops empties and collapses exact duplicates keeping first-seen order.
/// Tag identity is case-sensitive, so case is left untouched.
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for n in names {
        let t = n.as_ref().trim();
        if t.is_empty() || out.iter().any(|seen| seen == t) {
            continue;
        }
        out.push(t.to_string());
    }
    out
}

/// Backslash-escapes LIKE metacharacters so user input matches literally inside a pattern.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    FullName,
    Email,
    PhoneNumber,
    Address,
    RegistrationDate,
}

impl SortField {
    /// Accepts both the domain spelling (`fullName`) and the storage column (`full_name`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "fullName" | "full_name" => Some(Self::FullName),
            "email" => Some(Self::Email),
            "phoneNumber" | "phone_number" => Some(Self::PhoneNumber),
            "address" => Some(Self::Address),
            "registrationDate" | "created_at" => Some(Self::RegistrationDate),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Address => "address",
            Self::RegistrationDate => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ClientSort {
    /// Parses `"field,dir"`; the direction defaults to ascending when omitted.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(2, ',');
        let field = SortField::parse(parts.next()?)?;
        let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d.is_empty() || d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(_) => return None,
        };
        Some(Self { field, direction })
    }

    pub fn ascending(&self) -> bool {
        self.direction == SortDirection::Asc
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListClientsParams {
    pub page: u32,
    pub size: u32,
    pub sort: ClientSort,
    pub tags: Vec<String>,
    pub query: String,
}

impl Default for ListClientsParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: ClientSort::default(),
            tags: Vec::new(),
            query: String::new(),
        }
    }
}

impl ListClientsParams {
    /// Inclusive row range `[from, to]` for the requested page.
    pub fn range(&self) -> (i64, i64) {
        let from = self.page as i64 * self.size as i64;
        (from, from + self.size as i64 - 1)
    }
}

/// Restriction applied to a list query once the tag/text precedence has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientFilter {
    All,
    Ids(Vec<Uuid>),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ClientQuery {
    pub filter: ClientFilter,
    pub sort: ClientSort,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total: Option<i64>, page: u32, size: u32) -> Self {
        let total_elements = total.unwrap_or(0).max(0);
        Self {
            content,
            total_elements,
            total_pages: total_pages(total_elements, size),
            page,
            size,
        }
    }
}

pub fn total_pages(total: i64, size: u32) -> i64 {
    if size == 0 || total <= 0 {
        return 0;
    }
    let size = size as i64;
    (total + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str, phone: &str) -> ClientDraft {
        ClientDraft {
            fields: ClientFields {
                full_name: name.into(),
                email: email.into(),
                phone_number: phone.into(),
                ..Default::default()
            },
            tags: vec![],
        }
    }

    #[test]
    fn total_pages_rounds_up_and_handles_empty() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn page_treats_missing_total_as_zero() {
        let p: Page<u8> = Page::new(vec![], None, 0, 10);
        assert_eq!(p.total_elements, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn sort_parses_both_spellings() {
        assert_eq!(ClientSort::parse("fullName,asc"), Some(ClientSort::default()));
        let s = ClientSort::parse("created_at,desc").unwrap();
        assert_eq!(s.field, SortField::RegistrationDate);
        assert!(!s.ascending());
        assert_eq!(ClientSort::parse("email").unwrap().direction, SortDirection::Asc);
        assert!(ClientSort::parse("password,asc").is_none());
        assert!(ClientSort::parse("email,sideways").is_none());
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like(r"50%_off\x"), r"50\%\_off\\x");
    }

    #[test]
    fn range_is_inclusive() {
        let p = ListClientsParams {
            page: 2,
            size: 10,
            ..Default::default()
        };
        assert_eq!(p.range(), (20, 29));
    }

    #[test]
    fn tag_names_are_trimmed_and_deduplicated_case_sensitively() {
        let names = normalize_tag_names(&[" studio", "wedding", "studio", "", "Studio"]);
        assert_eq!(names, vec!["studio", "wedding", "Studio"]);
    }

    #[test]
    fn normalized_fields_still_pass_the_email_check() {
        let d = draft("  Zoe ", " zoe@example.com ", " 555 ");
        assert!(d.validate().is_ok());
        let f = d.fields.normalized();
        assert_eq!(f.full_name, "Zoe");
        assert_eq!(f.phone_number, "555");
        assert!(EMAIL_RE.is_match(&f.email));
    }

    #[test]
    fn validation_reports_each_missing_field() {
        let errs = draft(" ", "", "").validate().unwrap_err();
        let fields: Vec<_> = errs.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["fullName", "email", "phoneNumber"]);
    }

    #[test]
    fn validation_rejects_malformed_email() {
        let errs = draft("Ana", "ana@", "555").validate().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "email");
        assert!(draft("Ana", "ana@example.com", "555").validate().is_ok());
    }
}
